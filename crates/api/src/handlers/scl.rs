//! Handler for the `/scl` scene-classification query.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use driftnet_core::error::CoreError;
use driftnet_core::scl::Scl;
use driftnet_core::timerange::day_window;
use driftnet_core::types::DbId;
use driftnet_db::models::scl::SclFilter;
use driftnet_db::repositories::{AoiRepo, ImageRepo, SclRepo};

use crate::error::{AppError, AppResult};
use crate::geojson_out::{collection, feature, properties};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SclParams {
    /// Comma-separated classification codes (0-11).
    pub classification: Option<String>,
    pub image_id: Option<DbId>,
    pub aoi_id: Option<DbId>,
    /// Unix timestamp restricting, together with `aoi_id`, to one UTC day.
    pub timestamp: Option<i64>,
    /// GeoJSON geometry to intersect with.
    pub geometry: Option<String>,
}

/// Parse and validate the classification codes before anything hits the
/// database.
fn parse_classification(raw: &str) -> AppResult<Vec<i32>> {
    let mut codes = Vec::new();
    for field in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let code: i32 = field.parse().map_err(|_| {
            AppError::Core(CoreError::Validation(format!(
                "Invalid classification value: {field}"
            )))
        })?;
        if Scl::from_code(code).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid classification value: {code}"
            ))));
        }
        codes.push(code);
    }
    Ok(codes)
}

/// GET /scl
///
/// Scene classification polygons filtered by code, image, AOI (with an
/// optional UTC day window), and arbitrary geometry intersection. Features
/// carry the human-readable taxonomy label next to the numeric code.
pub async fn query_scl(
    State(state): State<AppState>,
    Query(params): Query<SclParams>,
) -> AppResult<impl IntoResponse> {
    let classification = match params.classification.as_deref() {
        Some(raw) => parse_classification(raw)?,
        None => Vec::new(),
    };

    if let Some(image_id) = params.image_id {
        if !ImageRepo::exists(&state.pool, image_id).await? {
            return Err(AppError::NotFound(format!(
                "No image found for ID: {image_id}"
            )));
        }
        if !SclRepo::exists_for_image(&state.pool, image_id).await? {
            return Err(AppError::NotFound(format!(
                "No SCL data found for image ID: {image_id}"
            )));
        }
    }

    if let Some(aoi_id) = params.aoi_id {
        if AoiRepo::find_by_id(&state.pool, aoi_id).await?.is_none() {
            return Err(AppError::NotFound("AOI not found".to_string()));
        }
    }

    let window = match (params.aoi_id, params.timestamp) {
        (Some(_), Some(day)) => Some(day_window(day)?),
        _ => None,
    };

    if let Some(ref geometry) = params.geometry {
        serde_json::from_str::<geojson::Geometry>(geometry).map_err(|e| {
            AppError::Core(CoreError::Validation(format!("Invalid GeoJSON geometry: {e}")))
        })?;
    }

    let filter = SclFilter {
        classification,
        image_id: params.image_id,
        aoi_id: params.aoi_id,
        window,
        geometry: params.geometry.clone(),
    };

    let rows = SclRepo::query(&state.pool, &filter).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No SCL data found for query".to_string()));
    }

    let mut features = Vec::with_capacity(rows.len());
    for row in rows {
        let scl = Scl::from_code(row.pixel_value).ok_or_else(|| {
            AppError::InternalError(format!(
                "Stored SCL code {} outside the taxonomy",
                row.pixel_value
            ))
        })?;

        let mut props = properties([
            ("classification", json!(scl.label())),
            ("classification_code", json!(row.pixel_value)),
            ("image_id", json!(row.image_id)),
        ]);
        if let Some(timestamp) = row.timestamp {
            props.insert("timestamp".to_string(), json!(timestamp.timestamp()));
        }
        if let Some(aoi_id) = row.aoi_id {
            props.insert("aoi_id".to_string(), json!(aoi_id));
        }

        features.push(feature(&row.geometry, props)?);
    }

    Ok(Json(collection(features)))
}
