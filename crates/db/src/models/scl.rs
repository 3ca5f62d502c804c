//! Scene classification vector query DTOs.

use driftnet_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One scene-classification feature row.
///
/// `timestamp` and `aoi_id` are populated only when the query joins through
/// an AOI's jobs (`aoi_id` filter present).
#[derive(Debug, Clone, FromRow)]
pub struct SclRow {
    /// GeoJSON Polygon.
    pub geometry: String,
    pub pixel_value: i32,
    pub image_id: DbId,
    #[sqlx(default)]
    pub timestamp: Option<Timestamp>,
    #[sqlx(default)]
    pub aoi_id: Option<DbId>,
}

/// Validated filters for the SCL query, assembled by the API layer.
#[derive(Debug, Default)]
pub struct SclFilter {
    /// Classification codes (already validated against the taxonomy).
    pub classification: Vec<i32>,
    pub image_id: Option<DbId>,
    pub aoi_id: Option<DbId>,
    /// UTC day window on the parent image timestamp (requires `aoi_id`).
    pub window: Option<(Timestamp, Timestamp)>,
    /// Raw GeoJSON geometry to intersect with (already syntax-checked).
    pub geometry: Option<String>,
}
