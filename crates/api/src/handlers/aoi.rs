//! Handlers for the `/aoi` and `/aoi-centers` resources.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use geojson::GeoJson;
use serde::Deserialize;
use serde_json::json;

use driftnet_core::accuracy::pixel_cutoff;
use driftnet_core::bbox::{BoundingBox, WORLD_BBOX_STR};
use driftnet_core::error::CoreError;
use driftnet_core::polygon::{extract_polygon, polygon_to_geojson_string};
use driftnet_core::projection::area_km2;
use driftnet_db::models::aoi::CreateAoi;
use driftnet_db::repositories::AoiRepo;

use crate::error::{AppError, AppResult};
use crate::geojson_out::{collection, feature, properties};
use crate::state::AppState;

/// Default accuracy threshold (percent) for the plastic-timestamp count.
const DEFAULT_THRESHOLD_PERCENT: f64 = 80.0;

#[derive(Debug, Deserialize)]
pub struct BboxParams {
    /// Comma-separated `minLon,minLat,maxLon,maxLat` in WGS84.
    pub bbox: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AoiListParams {
    pub bbox: Option<String>,
    /// Minimum detection accuracy (percent) a prediction must reach to make
    /// an image timestamp count as a plastic sighting.
    pub threshold: Option<f64>,
}

fn parse_bbox_param(bbox: Option<&str>) -> AppResult<BoundingBox> {
    BoundingBox::parse(bbox.unwrap_or(WORLD_BBOX_STR)).map_err(AppError::from)
}

/// Parse a stored AOI polygon and compute its metric area.
///
/// The geometry came out of the database, so any failure here is internal.
fn stored_area_km2(geometry_json: &str) -> AppResult<f64> {
    let gj: GeoJson = geometry_json
        .parse()
        .map_err(|e| AppError::InternalError(format!("Invalid AOI geometry from database: {e}")))?;
    let polygon = extract_polygon(&gj)
        .map_err(|e| AppError::InternalError(format!("Stored AOI is not a polygon: {e}")))?;
    area_km2(&polygon).map_err(|e| AppError::InternalError(format!("AOI area computation: {e}")))
}

/// GET /aoi-centers
///
/// One centroid Feature per non-deleted AOI intersecting the bbox, with
/// image-acquisition aggregates. AOIs without imagery appear with null
/// timestamps.
pub async fn get_aoi_centers(
    State(state): State<AppState>,
    Query(params): Query<BboxParams>,
) -> AppResult<impl IntoResponse> {
    let bbox = parse_bbox_param(params.bbox.as_deref())?;
    let rows = AoiRepo::centers_by_bbox(&state.pool, &bbox).await?;

    let mut features = Vec::with_capacity(rows.len());
    for row in rows {
        let area = stored_area_km2(&row.geometry)?;
        let props = properties([
            ("id", json!(row.id)),
            ("name", json!(row.name)),
            ("area_km2", json!(area)),
            (
                "start_timestamp",
                json!(row.start_timestamp.map(|t| t.timestamp())),
            ),
            (
                "end_timestamp",
                json!(row.end_timestamp.map(|t| t.timestamp())),
            ),
            ("timestamp_count", json!(row.timestamp_count)),
        ]);
        features.push(feature(&row.centroid, props)?);
    }

    Ok(Json(collection(features)))
}

/// GET /aoi
///
/// Full AOI polygons with the centers aggregates plus the count of distinct
/// image timestamps carrying a detection at or above the threshold.
pub async fn get_aois(
    State(state): State<AppState>,
    Query(params): Query<AoiListParams>,
) -> AppResult<impl IntoResponse> {
    let bbox = parse_bbox_param(params.bbox.as_deref())?;
    let threshold = params.threshold.unwrap_or(DEFAULT_THRESHOLD_PERCENT);
    let cutoff = pixel_cutoff(threshold);

    let rows = AoiRepo::list_by_bbox(&state.pool, &bbox, cutoff).await?;

    let mut features = Vec::with_capacity(rows.len());
    for row in rows {
        let area = stored_area_km2(&row.geometry)?;
        let props = properties([
            ("id", json!(row.id)),
            ("name", json!(row.name)),
            ("created_at", json!(row.created_at.to_rfc3339())),
            ("area_km2", json!(area)),
            (
                "start_timestamp",
                json!(row.start_timestamp.map(|t| t.timestamp())),
            ),
            (
                "end_timestamp",
                json!(row.end_timestamp.map(|t| t.timestamp())),
            ),
            ("timestamp_count", json!(row.timestamp_count)),
            (
                "plastic_timestamp_count",
                json!(row.plastic_timestamp_count),
            ),
        ]);
        features.push(feature(&row.geometry, props)?);
    }

    Ok(Json(collection(features)))
}

/// POST /aoi
///
/// Create an AOI from a GeoJSON Polygon, Feature, or FeatureCollection
/// (first feature used). The computed metric area must not exceed the
/// configured maximum; nothing is persisted when it does.
pub async fn create_aoi(
    State(state): State<AppState>,
    Json(input): Json<CreateAoi>,
) -> AppResult<impl IntoResponse> {
    let gj: GeoJson = serde_json::from_value(input.geometry)
        .map_err(|e| AppError::BadRequest(format!("Invalid GeoJSON: {e}")))?;
    let polygon = extract_polygon(&gj)?;

    let area = area_km2(&polygon)?;
    if area > state.config.max_aoi_area_km2 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "AOI area of {area:.1} km2 exceeds the maximum of {} km2",
            state.config.max_aoi_area_km2
        ))));
    }

    let geometry_json = polygon_to_geojson_string(&polygon);
    let aoi = AoiRepo::create(&state.pool, &input.name, &geometry_json).await?;

    tracing::info!(aoi_id = aoi.id, area_km2 = area, "AOI created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": aoi.id,
            "name": aoi.name,
            "created_at": aoi.created_at.to_rfc3339(),
            "area_km2": area,
        })),
    ))
}
