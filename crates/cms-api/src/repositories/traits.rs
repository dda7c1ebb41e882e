use crate::models::Content;
use crate::planner::SelectionPlan;
use async_trait::async_trait;
use thiserror::Error;

/// Failures raised by a content store. The messages are for logs only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("store call exceeded its deadline")]
    Timeout,

    #[error("store unreachable: {0}")]
    Connection(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<diesel::ConnectionError> for StoreError {
    fn from(err: diesel::ConnectionError) -> Self {
        StoreError::Connection(err.to_string())
    }
}

/// One window of a filtered, ordered selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPage {
    pub items: Vec<Content>,
    /// matches before the window was applied
    pub total: u64,
}

#[async_trait]
pub trait ContentRepository: Clone + Send + Sync + 'static {
    async fn find_by_id(&self, id: &str) -> Result<Option<Content>, StoreError>;
    async fn list(&self, plan: &SelectionPlan) -> Result<ContentPage, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}
