use axum::{
    Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    routing::get,
};
use tracing::{debug, instrument};

use crate::AppState;
use crate::context::RequestContext;
use crate::envelope::Envelope;
use crate::errors::ApiError;
use crate::service::{ContentData, ContentRequest, Operation, respond};
use crate::validation::RawParams;

#[instrument(skip_all, fields(request_id = %ctx.request_id))]
async fn list_contents<S: AppState>(
    State(state): State<S>,
    ctx: RequestContext,
    query: Result<Query<RawParams>, QueryRejection>,
) -> Envelope<ContentData> {
    debug!("Processing list contents request");

    match query {
        Ok(Query(params)) => {
            state
                .content_service()
                .handle(ContentRequest {
                    operation: Operation::List,
                    params,
                    context: ctx,
                })
                .await
        }
        Err(rejection) => respond(Err(ApiError::MalformedRequest(rejection.body_text())), &ctx),
    }
}

#[instrument(skip_all, fields(request_id = %ctx.request_id))]
async fn get_content<S: AppState>(
    State(state): State<S>,
    ctx: RequestContext,
    id: Result<Path<String>, PathRejection>,
) -> Envelope<ContentData> {
    debug!("Processing get content request");

    match id {
        Ok(Path(id)) => {
            state
                .content_service()
                .handle(ContentRequest {
                    operation: Operation::Detail { id },
                    params: RawParams::new(),
                    context: ctx,
                })
                .await
        }
        Err(rejection) => respond(Err(ApiError::MalformedRequest(rejection.body_text())), &ctx),
    }
}

pub fn create_api_v1_router<S: AppState>() -> Router<S> {
    Router::new()
        .route("/contents", get(list_contents::<S>))
        .route("/contents/{id}", get(get_content::<S>))
}
