//! Model entity models and DTOs.

use driftnet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::satellite::Band;

/// What a model's output pixel values mean, mirrored by the `model_type`
/// Postgres enum.
///
/// SEGMENTATION outputs are 0-255 confidence scores; CLASSIFICATION outputs
/// are discrete class indices into the model's classification classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "model_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ModelType {
    Segmentation,
    Classification,
}

/// A row from the `models` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Model {
    pub id: DbId,
    /// External model identifier; unique together with `version`.
    pub model_id: String,
    pub model_url: String,
    pub version: i32,
    pub expected_image_height: i32,
    pub expected_image_width: i32,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub model_type: ModelType,
    pub output_dtype: String,
    pub created_at: Timestamp,
}

/// A row from the `classification_classes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassificationClass {
    pub id: DbId,
    pub model_id: DbId,
    pub name: String,
    /// 1-based class index; defines the label space of a CLASSIFICATION model.
    #[serde(rename = "index")]
    pub class_index: i32,
}

/// Optional filters for `GET /model`.
#[derive(Debug, Default, Deserialize)]
pub struct ModelQuery {
    pub model_id: Option<String>,
    pub model_url: Option<String>,
    pub version: Option<i32>,
    pub model_type: Option<ModelType>,
}

/// DTO for `POST /model`.
#[derive(Debug, Deserialize)]
pub struct CreateModel {
    pub model_id: String,
    pub model_url: String,
    pub expected_image_height: i32,
    pub expected_image_width: i32,
    #[serde(rename = "type")]
    pub model_type: ModelType,
    pub output_dtype: String,
    #[serde(default = "default_version")]
    pub version: i32,
    /// Satellite whose bands the model consumes; must already exist.
    pub satellite_name: String,
    /// 1-based indices into the satellite's bands.
    pub band_indices: Vec<i32>,
    /// Class labels for CLASSIFICATION models, in index order (1-based).
    #[serde(default)]
    pub classification_classes: Vec<String>,
}

fn default_version() -> i32 {
    1
}

/// A model with its resolved bands and classification classes, as returned
/// after creation.
#[derive(Debug, Serialize)]
pub struct ModelWithRelations {
    #[serde(flatten)]
    pub model: Model,
    pub bands: Vec<Band>,
    pub classification_classes: Vec<ClassificationClass>,
}
