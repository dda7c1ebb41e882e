use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::context::RequestContext;
use crate::envelope::{Envelope, assemble_error, assemble_success};
use crate::errors::ApiError;
use crate::models::Content;
use crate::pagination::{PaginationInfo, paginate};
use crate::planner::plan;
use crate::repositories::{ContentRepository, StoreError};
use crate::validation::{RawParams, validate, validate_content_id};

/// Data payload of a list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentListData {
    pub contents: Vec<Content>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentData {
    List(ContentListData),
    Detail(Box<Content>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List,
    Detail { id: String },
}

/// Transport-neutral description of one inbound call.
#[derive(Debug, Clone)]
pub struct ContentRequest {
    pub operation: Operation,
    pub params: RawParams,
    pub context: RequestContext,
}

/// Runs the list/detail contract against a store.
///
/// Holds no per-request state; clones share only the store handle.
#[derive(Clone)]
pub struct ContentService<R> {
    repo: R,
    store_timeout: Duration,
}

impl<R: ContentRepository> ContentService<R> {
    pub fn new(repo: R, store_timeout: Duration) -> Self {
        Self {
            repo,
            store_timeout,
        }
    }

    async fn call_store<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout(self.store_timeout, call)
            .await
            .map_err(|_| StoreError::Timeout)?
    }

    #[instrument(skip_all)]
    pub async fn list(&self, raw: &RawParams) -> Result<ContentListData, ApiError> {
        let params = validate(raw)?;
        debug!(?params, "List parameters normalized");

        let plan = plan(&params);
        let page = self.call_store(self.repo.list(&plan)).await?;
        let pagination = paginate(page.total, params.limit, params.offset);

        info!(
            returned_count = page.items.len(),
            total = page.total,
            current_page = pagination.current_page,
            "Retrieved content list"
        );

        Ok(ContentListData {
            contents: page.items,
            pagination,
        })
    }

    #[instrument(skip_all, fields(id = %raw_id))]
    pub async fn detail(&self, raw_id: &str) -> Result<Content, ApiError> {
        let id = validate_content_id(raw_id)?;

        match self.call_store(self.repo.find_by_id(&id)).await? {
            Some(content) => {
                info!(id = %content.id, "Retrieved content item");
                Ok(content)
            }
            None => {
                debug!("Content item not found");
                Err(ApiError::ContentNotFound(id))
            }
        }
    }

    pub async fn health(&self) -> Result<(), ApiError> {
        self.call_store(self.repo.ping()).await?;
        Ok(())
    }

    /// Executes a request descriptor and always produces an envelope.
    #[instrument(
        skip_all,
        fields(request_id = %request.context.request_id, operation = ?request.operation)
    )]
    pub async fn handle(&self, request: ContentRequest) -> Envelope<ContentData> {
        let ContentRequest {
            operation,
            params,
            context,
        } = request;

        let result = match operation {
            Operation::List => self.list(&params).await.map(ContentData::List),
            Operation::Detail { id } => self
                .detail(&id)
                .await
                .map(|content| ContentData::Detail(Box::new(content))),
        };

        respond(result, &context)
    }
}

pub fn respond<T>(result: Result<T, ApiError>, context: &RequestContext) -> Envelope<T> {
    match result {
        Ok(data) => assemble_success(data, &context.request_id, context.started_at),
        Err(err) => assemble_error(&err, &context.request_id, context.started_at),
    }
}
