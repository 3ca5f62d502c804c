//! Satellite and band entity models.

use driftnet_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `satellites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Satellite {
    pub id: DbId,
    pub name: String,
}

/// A row from the `bands` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Band {
    pub id: DbId,
    pub satellite_id: DbId,
    /// 1-based band index within the satellite's sensor.
    #[serde(rename = "index")]
    pub band_index: i32,
    pub name: String,
    pub description: String,
    pub resolution: f64,
    pub wavelength: String,
}

/// Nested band payload for `POST /satellites/`.
#[derive(Debug, Deserialize)]
pub struct CreateBand {
    pub index: i32,
    pub name: String,
    pub description: String,
    pub resolution: f64,
    pub wavelength: String,
}

/// DTO for `POST /satellites/`.
#[derive(Debug, Deserialize)]
pub struct CreateSatellite {
    pub name: String,
    pub bands: Vec<CreateBand>,
}

/// A satellite with its full band list, as returned after creation.
#[derive(Debug, Serialize)]
pub struct SatelliteWithBands {
    #[serde(flatten)]
    pub satellite: Satellite,
    pub bands: Vec<Band>,
}
