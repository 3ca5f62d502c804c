//! Route definitions for the prediction resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::predictions;
use crate::state::AppState;

/// ```text
/// GET  /predictions                 -> list_predictions
/// POST /predictions                 -> dispatch_predictions
/// GET  /predictions-by-day-and-aoi  -> predictions_by_day
/// GET  /images-by-day               -> images_by_day
/// POST /prediction-request          -> prediction_request (catalog search)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/predictions",
            get(predictions::list_predictions).post(predictions::dispatch_predictions),
        )
        .route(
            "/predictions-by-day-and-aoi",
            get(predictions::predictions_by_day),
        )
        .route("/images-by-day", get(predictions::images_by_day))
        .route("/prediction-request", post(predictions::prediction_request))
}
