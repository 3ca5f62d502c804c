//! Image listing DTOs.
//!
//! Image rows are written by the external prediction pipeline; this service
//! only reads them, so no create DTO exists here.

use driftnet_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Row for `GET /images-by-day`: one image of an AOI's jobs.
#[derive(Debug, Clone, FromRow)]
pub struct ImageDayRow {
    pub image_id: DbId,
    pub timestamp: Timestamp,
    /// GeoJSON Polygon of the image bbox.
    pub geometry: String,
}
