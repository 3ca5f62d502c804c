//! Repository for the `satellites` and `bands` tables.

use driftnet_core::types::DbId;
use sqlx::PgPool;

use crate::models::satellite::{Band, CreateSatellite, Satellite, SatelliteWithBands};

const BAND_COLUMNS: &str = "id, satellite_id, band_index, name, description, resolution, wavelength";

/// Provides creation and lookup for satellites and their bands.
pub struct SatelliteRepo;

impl SatelliteRepo {
    /// Insert a satellite and its nested bands in one transaction.
    ///
    /// A duplicate satellite name violates `uq_satellites_name` and rolls
    /// the whole write back.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSatellite,
    ) -> Result<SatelliteWithBands, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let satellite = sqlx::query_as::<_, Satellite>(
            "INSERT INTO satellites (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&input.name)
        .fetch_one(&mut *tx)
        .await?;

        let band_query = format!(
            "INSERT INTO bands (satellite_id, band_index, name, description, resolution, wavelength) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {BAND_COLUMNS}"
        );
        let mut bands = Vec::with_capacity(input.bands.len());
        for band in &input.bands {
            let created = sqlx::query_as::<_, Band>(&band_query)
                .bind(satellite.id)
                .bind(band.index)
                .bind(&band.name)
                .bind(&band.description)
                .bind(band.resolution)
                .bind(&band.wavelength)
                .fetch_one(&mut *tx)
                .await?;
            bands.push(created);
        }

        tx.commit().await?;
        Ok(SatelliteWithBands { satellite, bands })
    }

    /// Find a satellite by its unique name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Satellite>, sqlx::Error> {
        sqlx::query_as::<_, Satellite>("SELECT id, name FROM satellites WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Bands of a satellite matching the given 1-based indices, ordered by
    /// index. Unknown indices are simply absent from the result.
    pub async fn bands_by_indices(
        pool: &PgPool,
        satellite_id: DbId,
        indices: &[i32],
    ) -> Result<Vec<Band>, sqlx::Error> {
        let query = format!(
            "SELECT {BAND_COLUMNS} FROM bands \
             WHERE satellite_id = $1 AND band_index = ANY($2) \
             ORDER BY band_index"
        );
        sqlx::query_as::<_, Band>(&query)
            .bind(satellite_id)
            .bind(indices)
            .fetch_all(pool)
            .await
    }
}
