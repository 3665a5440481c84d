use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Free bytes on the upload volume, when it can be read.
    pub upload_free_bytes: Option<u64>,
}

/// GET /health -- returns service, database and upload volume health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = fbfp_db::health_check(&state.pool).await.is_ok();

    let upload_path = state.config.uploads.upload_path.clone();
    let upload_free_bytes =
        tokio::task::spawn_blocking(move || fbfp_core::storage::free_space(&upload_path))
            .await
            .ok()
            .and_then(Result::ok);

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        upload_free_bytes,
    })
}

/// Mount health check routes. Health is public and needs no identity.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
