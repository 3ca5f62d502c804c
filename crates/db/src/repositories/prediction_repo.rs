//! Repository for prediction-vector queries.

use driftnet_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::prediction::{PredictionByDayRow, PredictionPointRow};

/// Provides read/aggregation queries over prediction vectors.
pub struct PredictionRepo;

impl PredictionRepo {
    /// Bare detection points, up to `limit` rows (already clamped by the
    /// caller).
    pub async fn list(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<PredictionPointRow>, sqlx::Error> {
        sqlx::query_as::<_, PredictionPointRow>(
            "SELECT ST_AsGeoJSON(geometry) AS geometry, pixel_value \
             FROM prediction_vectors \
             ORDER BY id \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Detections intersecting the AOI polygon whose parent image was
    /// acquired inside `window`, with the owning model's metadata and class
    /// labels aggregated per row.
    ///
    /// `model_id` narrows to one external model; `min_pixel` applies the
    /// accuracy cutoff. Ordered by image timestamp ascending and capped at
    /// `limit`.
    pub async fn by_day_and_aoi(
        pool: &PgPool,
        aoi_id: DbId,
        window: (Timestamp, Timestamp),
        model_id: Option<&str>,
        min_pixel: Option<i32>,
        limit: i64,
    ) -> Result<Vec<PredictionByDayRow>, sqlx::Error> {
        // Build dynamic WHERE clauses after the four fixed binds.
        let mut conditions = Vec::new();
        let mut bind_idx = 4u32;

        if model_id.is_some() {
            conditions.push(format!("AND m.model_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if min_pixel.is_some() {
            conditions.push(format!("AND pv.pixel_value >= ${bind_idx}"));
            bind_idx += 1;
        }
        let extra_conditions = conditions.join(" ");

        let query = format!(
            "SELECT i.\"timestamp\", i.id AS image_id, m.model_id, \
                m.type AS model_type, \
                array_remove(array_agg(DISTINCT cc.name), NULL) AS classification_classes, \
                ST_AsGeoJSON(pv.geometry) AS geometry, pv.pixel_value \
             FROM aois a \
             JOIN jobs j ON j.aoi_id = a.id \
             JOIN images i ON i.job_id = j.id \
             JOIN prediction_rasters pr ON pr.image_id = i.id \
             JOIN prediction_vectors pv ON pv.prediction_raster_id = pr.id \
             JOIN models m ON m.id = j.model_id \
             LEFT JOIN classification_classes cc ON cc.model_id = m.id \
             WHERE a.id = $1 \
               AND i.\"timestamp\" >= $2 AND i.\"timestamp\" < $3 \
               AND ST_Intersects(pv.geometry, a.geometry) \
               {extra_conditions} \
             GROUP BY i.\"timestamp\", i.id, m.model_id, m.type, \
                      pv.geometry, pv.pixel_value \
             ORDER BY i.\"timestamp\" \
             LIMIT ${bind_idx}"
        );

        let mut q = sqlx::query_as::<_, PredictionByDayRow>(&query)
            .bind(aoi_id)
            .bind(window.0)
            .bind(window.1);

        if let Some(model_id) = model_id {
            q = q.bind(model_id);
        }
        if let Some(min_pixel) = min_pixel {
            q = q.bind(min_pixel);
        }

        q.bind(limit).fetch_all(pool).await
    }
}
