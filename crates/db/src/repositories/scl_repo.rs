//! Repository for the `scene_classification_vectors` table.

use driftnet_core::types::DbId;
use sqlx::PgPool;

use crate::models::scl::{SclFilter, SclRow};

/// Provides filtered queries over scene classification vectors.
pub struct SclRepo;

impl SclRepo {
    /// Check whether any SCL rows exist for an image.
    pub async fn exists_for_image(pool: &PgPool, image_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM scene_classification_vectors WHERE image_id = $1)",
        )
        .bind(image_id)
        .fetch_one(pool)
        .await
    }

    /// Run the SCL query for an already-validated filter.
    ///
    /// With `aoi_id` set the query joins through images and jobs so rows can
    /// carry the image timestamp and AOI id (and the optional UTC day
    /// window applies); without it the vectors table is queried directly.
    pub async fn query(pool: &PgPool, filter: &SclFilter) -> Result<Vec<SclRow>, sqlx::Error> {
        // Build dynamic WHERE clauses, binding in declaration order.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.aoi_id.is_some() {
            conditions.push(format!("j.aoi_id = ${bind_idx}"));
            bind_idx += 1;
            if filter.window.is_some() {
                conditions.push(format!(
                    "i.\"timestamp\" >= ${} AND i.\"timestamp\" < ${}",
                    bind_idx,
                    bind_idx + 1
                ));
                bind_idx += 2;
            }
        }
        if !filter.classification.is_empty() {
            conditions.push(format!("s.pixel_value = ANY(${bind_idx})"));
            bind_idx += 1;
        }
        if filter.image_id.is_some() {
            conditions.push(format!("s.image_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.geometry.is_some() {
            conditions.push(format!(
                "ST_Intersects(s.geometry, ST_GeomFromGeoJSON(${bind_idx}))"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = if filter.aoi_id.is_some() {
            format!(
                "SELECT ST_AsGeoJSON(s.geometry) AS geometry, s.pixel_value, \
                    s.image_id, i.\"timestamp\", j.aoi_id \
                 FROM scene_classification_vectors s \
                 JOIN images i ON s.image_id = i.id \
                 JOIN jobs j ON i.job_id = j.id \
                 {where_clause} \
                 ORDER BY s.id"
            )
        } else {
            format!(
                "SELECT ST_AsGeoJSON(s.geometry) AS geometry, s.pixel_value, \
                    s.image_id \
                 FROM scene_classification_vectors s \
                 {where_clause} \
                 ORDER BY s.id"
            )
        };

        let mut q = sqlx::query_as::<_, SclRow>(&query);
        if let Some(aoi_id) = filter.aoi_id {
            q = q.bind(aoi_id);
            if let Some((start, end)) = filter.window {
                q = q.bind(start).bind(end);
            }
        }
        if !filter.classification.is_empty() {
            q = q.bind(&filter.classification);
        }
        if let Some(image_id) = filter.image_id {
            q = q.bind(image_id);
        }
        if let Some(ref geometry) = filter.geometry {
            q = q.bind(geometry);
        }

        q.fetch_all(pool).await
    }
}
