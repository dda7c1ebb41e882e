use crate::AppState;
use crate::context::RequestContext;
use crate::envelope::Envelope;
use crate::errors::ApiError;
use crate::service::respond;
use axum::{
    Router,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

pub mod api;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub store: String,
}

#[instrument(skip_all, fields(request_id = %ctx.request_id))]
async fn health<S: AppState>(
    State(state): State<S>,
    ctx: RequestContext,
) -> Envelope<HealthStatus> {
    let result = state
        .content_service()
        .health()
        .await
        .map(|()| HealthStatus {
            status: "OK".to_string(),
            store: "CONNECTED".to_string(),
        });

    respond(result, &ctx)
}

#[instrument(skip_all, fields(request_id = %ctx.request_id, path = %uri.path()))]
async fn not_found(ctx: RequestContext, uri: Uri) -> Envelope<()> {
    respond(Err(ApiError::ResourceNotFound(uri.path().to_string())), &ctx)
}

/// No resource answers this method on a known path.
#[instrument(skip_all, fields(request_id = %ctx.request_id, method = %method, path = %uri.path()))]
async fn method_not_allowed(ctx: RequestContext, method: Method, uri: Uri) -> Envelope<()> {
    let target = format!("{method} {}", uri.path());
    respond(Err(ApiError::ResourceNotFound(target)), &ctx)
}

/// Rewrites the bare `408` produced by the request timeout layer into a
/// `TIMEOUT_ERROR` envelope.
pub async fn envelope_request_timeout(ctx: RequestContext, response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    respond::<()>(Err(ApiError::RequestTimeout), &ctx).into_response()
}

pub fn create_router<S: AppState>() -> Router<S> {
    Router::new()
        .route("/health", get(health::<S>))
        .nest("/api", api::create_api_router())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
}
