//! AOI entity models and listing DTOs.

use driftnet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `aois` table (geometry selected separately as GeoJSON).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Aoi {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub is_deleted: bool,
}

/// DTO for `POST /aoi`.
///
/// `geometry` is raw GeoJSON: a Polygon, a Feature, or a FeatureCollection
/// (first feature used).
#[derive(Debug, Deserialize)]
pub struct CreateAoi {
    pub name: String,
    pub geometry: serde_json::Value,
}

/// Aggregated row for `GET /aoi-centers`.
///
/// Image aggregates come from LEFT JOINs through non-deleted jobs, so AOIs
/// without any imagery appear with null timestamps and a zero count.
#[derive(Debug, Clone, FromRow)]
pub struct AoiCenterRow {
    pub id: DbId,
    pub name: String,
    /// GeoJSON Point, `ST_Centroid` of the AOI polygon.
    pub centroid: String,
    /// GeoJSON Polygon, used to compute the metric area in-process.
    pub geometry: String,
    pub start_timestamp: Option<Timestamp>,
    pub end_timestamp: Option<Timestamp>,
    pub timestamp_count: i64,
}

/// Aggregated row for `GET /aoi`: the centers aggregates plus the count of
/// distinct image timestamps with at least one detection above the pixel
/// cutoff.
#[derive(Debug, Clone, FromRow)]
pub struct AoiListRow {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub geometry: String,
    pub start_timestamp: Option<Timestamp>,
    pub end_timestamp: Option<Timestamp>,
    pub timestamp_count: i64,
    pub plastic_timestamp_count: i64,
}
