use axum::{Router, middleware};
use diesel::sqlite::SqliteConnection;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub mod config;
pub mod context;
pub mod db;
pub mod envelope;
pub mod errors;
pub mod models;
pub mod pagination;
pub mod planner;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod service;
pub mod validation;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

use repositories::{ContentRepository, SqliteContentRepository};
use service::ContentService;

pub trait AppState: Clone + Send + Sync + 'static {
    type ContentRepo: ContentRepository;

    fn content_service(&self) -> &ContentService<Self::ContentRepo>;
}

#[derive(Clone)]
pub struct ServiceState<R> {
    content_service: ContentService<R>,
}

impl<R: ContentRepository> ServiceState<R> {
    pub fn new(repo: R, store_timeout: Duration) -> Self {
        Self {
            content_service: ContentService::new(repo, store_timeout),
        }
    }
}

impl<R: ContentRepository> AppState for ServiceState<R> {
    type ContentRepo = R;

    fn content_service(&self) -> &ContentService<R> {
        &self.content_service
    }
}

pub type DefaultAppState = ServiceState<SqliteContentRepository>;

impl DefaultAppState {
    pub fn with_sqlite(db: Arc<Mutex<SqliteConnection>>, store_timeout: Duration) -> Self {
        Self::new(SqliteContentRepository::new(db), store_timeout)
    }
}

/// Full application: routes, request ids, tracing and the request deadline.
pub fn create_app<S: AppState>(state: S, request_timeout: Duration) -> Router {
    routes::create_router()
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::map_response(routes::envelope_request_timeout))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
