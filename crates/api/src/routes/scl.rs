//! Route definition for the `/scl` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::scl;
use crate::state::AppState;

/// ```text
/// GET /scl  -> query_scl
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/scl", get(scl::query_scl))
}
