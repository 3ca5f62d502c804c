//! Handlers for the `/satellites/` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use driftnet_core::error::CoreError;
use driftnet_db::models::satellite::CreateSatellite;
use driftnet_db::repositories::SatelliteRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /satellites/
///
/// Create a satellite and its nested bands in one transaction. A duplicate
/// name rolls the whole write back and surfaces as a conflict.
pub async fn create_satellite(
    State(state): State<AppState>,
    Json(input): Json<CreateSatellite>,
) -> AppResult<impl IntoResponse> {
    if input.bands.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A satellite needs at least one band".to_string(),
        )));
    }
    for band in &input.bands {
        if band.index < 1 {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Band index must be 1-based, got {}",
                band.index
            ))));
        }
    }

    let created = SatelliteRepo::create(&state.pool, &input).await?;

    tracing::info!(
        satellite_id = created.satellite.id,
        bands = created.bands.len(),
        "Satellite created",
    );

    Ok((StatusCode::CREATED, Json(created)))
}
