use super::traits::{ContentPage, ContentRepository, StoreError};
use crate::models::Content;
use crate::planner::SelectionPlan;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Store backed by a vector, executing plans with the planner's own
/// reference semantics.
#[derive(Clone, Default)]
pub struct InMemoryContentRepository {
    contents: Arc<RwLock<Vec<Content>>>,
}

impl InMemoryContentRepository {
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents: Arc::new(RwLock::new(contents)),
        }
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Content>, StoreError> {
        let contents = self
            .contents
            .read()
            .map_err(|_| StoreError::Connection("store lock poisoned".to_string()))?;
        Ok(contents.iter().find(|content| content.id == id).cloned())
    }

    async fn list(&self, plan: &SelectionPlan) -> Result<ContentPage, StoreError> {
        let contents = self
            .contents
            .read()
            .map_err(|_| StoreError::Connection("store lock poisoned".to_string()))?;
        let (items, total) = plan.apply(contents.iter());
        Ok(ContentPage { items, total })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentMetadata, ContentStatus};
    use crate::planner::plan;
    use crate::validation::ListParams;
    use chrono::Utc;

    fn item(id: &str, title: &str) -> Content {
        let now = Utc::now();
        Content {
            id: id.to_string(),
            title: title.to_string(),
            body: String::new(),
            status: ContentStatus::Draft,
            created_at: now,
            updated_at: now,
            published_at: None,
            author_id: "author".to_string(),
            metadata: ContentMetadata::default(),
        }
    }

    #[tokio::test]
    async fn test_list_runs_plan() {
        let repo = InMemoryContentRepository::new(vec![item("a", "First"), item("b", "Second")]);

        let found = repo.find_by_id("b").await.unwrap().unwrap();
        assert_eq!(found.title, "Second");

        let page = repo
            .list(&plan(&ListParams {
                limit: 1,
                ..ListParams::default()
            }))
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_store_pings() {
        assert!(InMemoryContentRepository::default().ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_id_is_none() {
        let repo = InMemoryContentRepository::new(vec![item("a", "A")]);
        assert!(repo.find_by_id("b").await.unwrap().is_none());
    }
}
