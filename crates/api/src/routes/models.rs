//! Route definitions for the `/model` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::models;
use crate::state::AppState;

/// ```text
/// GET  /model  -> list_models
/// POST /model  -> create_model
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/model", get(models::list_models).post(models::create_model))
}
