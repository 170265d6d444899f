use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::manager::WorkflowManager;

pub mod error;
pub mod handlers;
pub mod types;

#[derive(Clone)]
pub struct AppState {
    pub workflows: Arc<WorkflowManager>,
}

impl AppState {
    pub fn new(workflows: WorkflowManager) -> Self {
        Self {
            workflows: Arc::new(workflows),
        }
    }
}

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/generate", post(handlers::generate))
}

/// Any origin, method and header, with credentials. Wildcards are not
/// allowed together with credentials, so the request values are mirrored.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn app(state: AppState) -> Router {
    api_router()
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
