//! Route definitions for the `/satellites/` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::satellites;
use crate::state::AppState;

/// ```text
/// POST /satellites/  -> create_satellite
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/satellites/", post(satellites::create_satellite))
}
