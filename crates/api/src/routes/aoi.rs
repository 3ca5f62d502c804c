//! Route definitions for the AOI resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::aoi;
use crate::state::AppState;

/// ```text
/// GET  /aoi-centers  -> get_aoi_centers
/// GET  /aoi          -> get_aois
/// POST /aoi          -> create_aoi
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/aoi-centers", get(aoi::get_aoi_centers))
        .route("/aoi", get(aoi::get_aois).post(aoi::create_aoi))
}
