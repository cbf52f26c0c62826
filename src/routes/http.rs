// GET handlers: status, version

use axum::{extract::State, response::IntoResponse};

use super::AppState;
use crate::version::{NAME, VERSION};

/// GET /vram_watcher/status — current VRAM and RAM usage in one flat object.
pub(super) async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.status_repo.get_status().await)
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}
