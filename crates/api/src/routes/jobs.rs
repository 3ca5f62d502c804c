//! Route definitions for the `/jobs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// ```text
/// GET  /jobs           -> list_jobs (grouped by AOI)
/// POST /jobs           -> create_jobs
/// GET  /jobs/{job_id}  -> get_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_jobs))
        .route("/jobs/{job_id}", get(jobs::get_job))
}
