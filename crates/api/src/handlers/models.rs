//! Handlers for the `/model` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use driftnet_core::dtype::{is_valid_dtype, IMAGE_DTYPES};
use driftnet_core::error::CoreError;
use driftnet_db::models::model::{CreateModel, ModelQuery};
use driftnet_db::repositories::{ModelRepo, SatelliteRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /model
///
/// List models, optionally filtered by external id, url, version, and type.
pub async fn list_models(
    State(state): State<AppState>,
    Query(params): Query<ModelQuery>,
) -> AppResult<impl IntoResponse> {
    let models = ModelRepo::list(&state.pool, &params).await?;
    Ok(Json(models))
}

/// POST /model
///
/// Create a model with its band links (resolved against the named
/// satellite) and classification classes, all in one transaction.
pub async fn create_model(
    State(state): State<AppState>,
    Json(input): Json<CreateModel>,
) -> AppResult<impl IntoResponse> {
    if !is_valid_dtype(&input.output_dtype) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid output_dtype '{}'; expected one of {IMAGE_DTYPES:?}",
            input.output_dtype
        ))));
    }

    let satellite = SatelliteRepo::find_by_name(&state.pool, &input.satellite_name)
        .await?
        .ok_or_else(|| AppError::NotFound("Satellite not found".to_string()))?;

    let bands =
        SatelliteRepo::bands_by_indices(&state.pool, satellite.id, &input.band_indices).await?;
    if bands.len() != input.band_indices.len() {
        let found: Vec<i32> = bands.iter().map(|b| b.band_index).collect();
        let missing: Vec<i32> = input
            .band_indices
            .iter()
            .copied()
            .filter(|index| !found.contains(index))
            .collect();
        return Err(AppError::Core(CoreError::Validation(format!(
            "Satellite '{}' has no band(s) with index {missing:?}",
            input.satellite_name
        ))));
    }

    let created = ModelRepo::create(&state.pool, &input, &bands).await?;

    tracing::info!(
        model_id = %created.model.model_id,
        version = created.model.version,
        "Model created",
    );

    Ok((StatusCode::CREATED, Json(created)))
}
