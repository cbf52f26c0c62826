// HTTP routes: status endpoint polled by watcher nodes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::status_repo::StatusRepo;

/// Path watcher nodes poll.
pub const STATUS_PATH: &str = "/vram_watcher/status";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) status_repo: Arc<StatusRepo>,
}

pub fn app(status_repo: Arc<StatusRepo>) -> Router {
    let state = AppState { status_repo };
    Router::new()
        .route(STATUS_PATH, get(http::status_handler)) // GET /vram_watcher/status
        .route("/version", get(http::version_handler)) // GET /version
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
