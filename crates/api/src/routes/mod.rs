pub mod aoi;
pub mod health;
pub mod jobs;
pub mod models;
pub mod predictions;
pub mod satellites;
pub mod scl;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree (all resources are mounted at the root).
///
/// ```text
/// GET  /aoi-centers                  AOI centroids + aggregates by bbox
/// GET  /aoi                          AOI polygons + detection stats by bbox
/// POST /aoi                          create AOI
/// GET  /jobs                         grouped jobs -> images -> predictions
/// POST /jobs                         create job(s)
/// GET  /jobs/{job_id}                job detail
/// GET  /model                        list models
/// POST /model                        create model + bands + classes
/// POST /satellites/                  create satellite + bands
/// GET  /predictions                  detection points (capped)
/// POST /predictions                  dispatch prediction runs
/// GET  /predictions-by-day-and-aoi   detections in a UTC day window
/// GET  /images-by-day                images bucketed by UTC day
/// POST /prediction-request           imagery catalog search
/// GET  /scl                          scene classification query
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(aoi::router())
        .merge(jobs::router())
        .merge(models::router())
        .merge(satellites::router())
        .merge(predictions::router())
        .merge(scl::router())
}
