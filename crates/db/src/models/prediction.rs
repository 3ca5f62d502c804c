//! Prediction-vector query DTOs.
//!
//! Prediction rasters and vectors are written by the external prediction
//! pipeline; this service reads and aggregates them.

use driftnet_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

use super::model::ModelType;

/// Row for `GET /predictions`: a bare detection point.
#[derive(Debug, Clone, FromRow)]
pub struct PredictionPointRow {
    /// GeoJSON Point.
    pub geometry: String,
    pub pixel_value: i32,
}

/// Row for `GET /predictions-by-day-and-aoi`.
#[derive(Debug, Clone, FromRow)]
pub struct PredictionByDayRow {
    pub timestamp: Timestamp,
    pub image_id: DbId,
    /// External model identifier.
    pub model_id: String,
    pub model_type: ModelType,
    /// Class labels of the job's model (empty for segmentation models).
    pub classification_classes: Vec<String>,
    /// GeoJSON Point.
    pub geometry: String,
    pub pixel_value: i32,
}

/// Body of `POST /predictions`: dispatch prediction runs for these jobs.
#[derive(Debug, Deserialize)]
pub struct DispatchPredictions {
    pub job_ids: Vec<DbId>,
    pub probability_threshold: Option<f64>,
}
