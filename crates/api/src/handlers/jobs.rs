//! Handlers for the `/jobs` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use driftnet_core::error::CoreError;
use driftnet_core::timerange::{split_date_range, validate_time_range};
use driftnet_core::types::DbId;
use driftnet_db::models::job::{group_prediction_rows, CreateJob, Job};
use driftnet_db::repositories::{AoiRepo, JobRepo, ModelRepo};

use crate::error::{AppError, AppResult};
use crate::geojson_out::{feature, properties};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobsByAoiParams {
    #[serde(rename = "aoiId")]
    pub aoi_id: DbId,
}

/// GET /jobs?aoiId=
///
/// All COMPLETED, non-deleted jobs of the AOI with their images and
/// prediction features, nested. The repository returns flat rows pre-sorted
/// by (job id DESC, image id DESC); the grouping fold in `driftnet_db`
/// turns transitions in those ids into the nesting.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsByAoiParams>,
) -> AppResult<impl IntoResponse> {
    let rows = JobRepo::completed_prediction_rows(&state.pool, params.aoi_id).await?;
    let grouped = group_prediction_rows(&rows);

    let mut jobs = Vec::with_capacity(grouped.len());
    for job in grouped {
        let mut images = Vec::with_capacity(job.images.len());
        for image in job.images {
            let mut predictions = Vec::with_capacity(image.predictions.len());
            for prediction in image.predictions {
                let props = properties([("pixelValue", json!(prediction.pixel_value))]);
                predictions.push(feature(&prediction.geometry, props)?);
            }
            images.push(json!({
                "image_id": image.image_id,
                "image_url": image.image_url,
                "timestamp": image.timestamp,
                "predictions": predictions,
            }));
        }
        jobs.push(json!({
            "job_id": job.job_id,
            "status": job.status.as_str(),
            "created_at": job.created_at,
            "model_id": job.model_id,
            "images": images,
        }));
    }

    Ok(Json(json!({ "jobs": jobs })))
}

fn job_json(job: &Job) -> serde_json::Value {
    json!({
        "job_id": job.id,
        "status": job.status.as_str(),
        "created_at": job.created_at.to_rfc3339(),
        "start_date": job.start_date.to_rfc3339(),
        "end_date": job.end_date.to_rfc3339(),
        "maxcc": job.maxcc,
        "model_id": job.model_id,
    })
}

/// POST /jobs
///
/// Create one PENDING job, or -- with `create_multiple` -- one per
/// consecutive sub-range of at most the configured maximum length. All rows
/// are written in a single transaction.
pub async fn create_jobs(
    State(state): State<AppState>,
    Json(input): Json<CreateJob>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(format!("Invalid job request: {e}")))?;

    if input.start_date > input.end_date {
        return Err(AppError::Core(CoreError::Validation(
            "The start date must be before the end date".to_string(),
        )));
    }

    if !ModelRepo::exists(&state.pool, input.model_id).await? {
        return Err(AppError::NotFound("Model not found".to_string()));
    }
    if AoiRepo::find_by_id(&state.pool, input.aoi_id).await?.is_none() {
        return Err(AppError::NotFound("AOI not found".to_string()));
    }

    let ranges = if input.create_multiple {
        split_date_range(input.start_date, input.end_date, state.config.max_job_days)
    } else {
        validate_time_range(input.start_date, input.end_date, state.config.max_job_days)?;
        vec![(input.start_date, input.end_date)]
    };

    let jobs = JobRepo::create_batch(&state.pool, &input, &ranges).await?;

    tracing::info!(
        aoi_id = input.aoi_id,
        model_id = input.model_id,
        count = jobs.len(),
        "Jobs created",
    );

    let payload: Vec<_> = jobs
        .iter()
        .map(|job| {
            let mut value = job_json(job);
            value["images"] = json!([]);
            value
        })
        .collect();

    Ok((StatusCode::CREATED, Json(payload)))
}

/// GET /jobs/{job_id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = JobRepo::find_by_id(&state.pool, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    Ok(Json(job_json(&job)))
}
