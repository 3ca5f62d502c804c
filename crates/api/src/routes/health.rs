use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

/// GET /health
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "message": "Application running" }))
}

/// Mount the health check route.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
