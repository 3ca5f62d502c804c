//! Handlers for prediction listing, day aggregation, dispatch, and the
//! imagery-catalog prediction request.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::DateTime;
use serde::Deserialize;
use serde_json::json;

use driftnet_core::accuracy::{accuracy_to_percent, pixel_cutoff};
use driftnet_core::error::CoreError;
use driftnet_core::polygon::validate_polygon_rings;
use driftnet_core::timerange::{day_window, start_of_utc_day};
use driftnet_core::types::DbId;
use driftnet_db::clamp_limit;
use driftnet_db::models::job::JobStatus;
use driftnet_db::models::model::ModelType;
use driftnet_db::models::prediction::DispatchPredictions;
use driftnet_db::repositories::{AoiRepo, ImageRepo, JobRepo, ModelRepo, PredictionRepo};

use crate::error::{AppError, AppResult};
use crate::geojson_out::{collection, feature, parse_db_geometry, properties};
use crate::state::AppState;

/// Default probability threshold handed to the dispatcher.
const DEFAULT_PROBABILITY_THRESHOLD: f64 = 0.33;

#[derive(Debug, Deserialize)]
pub struct PredictionListParams {
    pub limit: Option<i64>,
}

/// GET /predictions
///
/// Bare detection points. The limit is clamped to the configured maximum,
/// never exceeded.
pub async fn list_predictions(
    State(state): State<AppState>,
    Query(params): Query<PredictionListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, state.config.max_row_limit);
    let rows = PredictionRepo::list(&state.pool, limit).await?;

    let mut features = Vec::with_capacity(rows.len());
    for row in rows {
        let props = properties([("pixelValue", json!(row.pixel_value))]);
        features.push(feature(&row.geometry, props)?);
    }

    Ok(Json(collection(features)))
}

#[derive(Debug, Deserialize)]
pub struct PredictionsByDayParams {
    /// Unix timestamp opening a 24-hour UTC window.
    pub day: i64,
    pub aoi_id: DbId,
    /// External model identifier to narrow by.
    pub model_id: Option<String>,
    /// Minimum accuracy (percent) a detection must reach. Only meaningful
    /// for SEGMENTATION models.
    pub accuracy_limit: Option<f64>,
}

/// GET /predictions-by-day-and-aoi
///
/// Detections intersecting the AOI whose parent image falls inside the day
/// window. Pixel values are translated back to percent for SEGMENTATION
/// models only; CLASSIFICATION values are discrete class indices and pass
/// through raw.
pub async fn predictions_by_day(
    State(state): State<AppState>,
    Query(params): Query<PredictionsByDayParams>,
) -> AppResult<impl IntoResponse> {
    if AoiRepo::find_by_id(&state.pool, params.aoi_id).await?.is_none() {
        return Err(AppError::NotFound("AOI not found".to_string()));
    }

    let window = day_window(params.day)?;

    let model_id = params.model_id.as_deref().filter(|s| !s.is_empty());
    if let Some(model_id) = model_id {
        if !ModelRepo::exists_by_external_id(&state.pool, model_id).await? {
            return Err(AppError::NotFound("Model not found".to_string()));
        }
    }

    let min_pixel = params.accuracy_limit.map(pixel_cutoff);

    let rows = PredictionRepo::by_day_and_aoi(
        &state.pool,
        params.aoi_id,
        window,
        model_id,
        min_pixel,
        state.config.max_row_limit,
    )
    .await?;

    let mut features = Vec::with_capacity(rows.len());
    for row in rows {
        let pixel_value = match row.model_type {
            ModelType::Segmentation => json!(accuracy_to_percent(f64::from(row.pixel_value))),
            ModelType::Classification => json!(row.pixel_value),
        };
        let props = properties([
            ("pixelValue", pixel_value),
            ("timestamp", json!(row.timestamp.timestamp())),
            ("imageId", json!(row.image_id)),
            ("modelId", json!(row.model_id)),
            ("modelType", json!(row.model_type)),
            ("classificationClasses", json!(row.classification_classes)),
        ]);
        features.push(feature(&row.geometry, props)?);
    }

    Ok(Json(collection(features)))
}

#[derive(Debug, Deserialize)]
pub struct ImagesByDayParams {
    #[serde(rename = "aoiId")]
    pub aoi_id: DbId,
}

/// GET /images-by-day
///
/// The AOI's images bucketed by the unix timestamp of the UTC start of
/// their acquisition day.
pub async fn images_by_day(
    State(state): State<AppState>,
    Query(params): Query<ImagesByDayParams>,
) -> AppResult<impl IntoResponse> {
    let rows = ImageRepo::list_by_aoi(&state.pool, params.aoi_id).await?;

    let mut days: BTreeMap<i64, Vec<serde_json::Value>> = BTreeMap::new();
    for row in rows {
        let bucket = start_of_utc_day(row.timestamp);
        days.entry(bucket).or_default().push(json!({
            "image_id": row.image_id,
            "timestamp": row.timestamp.timestamp(),
            "geometry": parse_db_geometry(&row.geometry)?,
        }));
    }

    Ok(Json(days))
}

/// POST /predictions
///
/// Dispatch prediction runs for the given jobs. Jobs already COMPLETED are
/// refused before the dispatcher is contacted; the job rows themselves are
/// never mutated here.
pub async fn dispatch_predictions(
    State(state): State<AppState>,
    Json(input): Json<DispatchPredictions>,
) -> AppResult<impl IntoResponse> {
    let threshold = input
        .probability_threshold
        .unwrap_or(DEFAULT_PROBABILITY_THRESHOLD);

    let mut results = Vec::with_capacity(input.job_ids.len());
    for job_id in &input.job_ids {
        let job = JobRepo::find_by_id(&state.pool, *job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job with ID {job_id} not found")))?;

        // A COMPLETED job is terminal; re-dispatching it is refused before
        // the dispatcher is contacted. FAILED jobs may be re-run.
        if job.status == JobStatus::Completed {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Job with ID {job_id} already completed"
            ))));
        }

        state
            .dispatch
            .trigger(*job_id, threshold)
            .await
            .map_err(|e| {
                AppError::Upstream(format!(
                    "Error running prediction job for job ID {job_id}: {e}"
                ))
            })?;

        results.push(json!({
            "job_id": job_id,
            "message": "Prediction job started",
        }));
    }

    Ok(Json(json!({ "results": results })))
}

#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    /// A GeoJSON Feature whose geometry is a closed 5-point Polygon.
    pub feature: geojson::Feature,
    /// ISO8601 interval, e.g. `2024-03-01T00:00:00Z/2024-03-20T23:59:59Z`.
    pub time_range: String,
}

/// POST /prediction-request
///
/// Forward a search polygon and time range to the imagery catalog and
/// return the matching scene metadata.
pub async fn prediction_request(
    State(state): State<AppState>,
    Json(input): Json<PredictionRequest>,
) -> AppResult<impl IntoResponse> {
    let geometry = input
        .feature
        .geometry
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("Feature has no geometry".to_string()))?;
    validate_polygon_rings(geometry, 5)?;
    validate_time_range_format(&input.time_range)?;

    let scenes = state
        .catalog
        .search(geometry, &input.time_range, 20)
        .await
        .map_err(|e| AppError::Upstream(format!("Catalog search failed: {e}")))?;

    let payload: Vec<_> = scenes
        .iter()
        .map(|scene| {
            json!({
                "id": scene.id,
                "bbox": scene.bbox,
                "timestamp": scene.timestamp.to_rfc3339(),
                "cloud_cover": scene.cloud_cover,
            })
        })
        .collect();

    Ok(Json(json!({ "scenes": payload })))
}

/// Require `start/end` with both halves valid RFC3339 timestamps.
fn validate_time_range_format(time_range: &str) -> AppResult<()> {
    let Some((start, end)) = time_range.split_once('/') else {
        return Err(AppError::BadRequest(
            "time_range must be an ISO8601 interval (start/end)".to_string(),
        ));
    };
    for part in [start, end] {
        DateTime::parse_from_rfc3339(part).map_err(|e| {
            AppError::BadRequest(format!("Invalid time_range timestamp '{part}': {e}"))
        })?;
    }
    Ok(())
}
