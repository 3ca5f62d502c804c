//! Repository for the `images` table.

use driftnet_core::types::DbId;
use sqlx::PgPool;

use crate::models::image::ImageDayRow;

/// Provides read queries over images (written by the external pipeline).
pub struct ImageRepo;

impl ImageRepo {
    /// Check whether an image row exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM images WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Every image of the AOI's jobs, ordered by acquisition time ascending.
    /// The API buckets these into UTC days.
    pub async fn list_by_aoi(
        pool: &PgPool,
        aoi_id: DbId,
    ) -> Result<Vec<ImageDayRow>, sqlx::Error> {
        sqlx::query_as::<_, ImageDayRow>(
            "SELECT i.id AS image_id, i.\"timestamp\", \
                ST_AsGeoJSON(i.bbox) AS geometry \
             FROM images i \
             JOIN jobs j ON i.job_id = j.id \
             WHERE j.aoi_id = $1 \
             ORDER BY i.\"timestamp\"",
        )
        .bind(aoi_id)
        .fetch_all(pool)
        .await
    }
}
