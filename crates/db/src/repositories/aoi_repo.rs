//! Repository for the `aois` table and its bbox listings.

use driftnet_core::bbox::BoundingBox;
use driftnet_core::types::DbId;
use sqlx::PgPool;

use crate::models::aoi::{Aoi, AoiCenterRow, AoiListRow};

const COLUMNS: &str = "id, name, created_at, is_deleted";

/// Provides CRUD and bbox-listing queries for AOIs.
pub struct AoiRepo;

impl AoiRepo {
    /// Insert a new AOI from a GeoJSON polygon string.
    ///
    /// Geometry validity is enforced by the `ck_aois_geometry_valid` check
    /// constraint; an invalid ring surfaces as a database error.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        geometry_geojson: &str,
    ) -> Result<Aoi, sqlx::Error> {
        let query = format!(
            "INSERT INTO aois (name, geometry) \
             VALUES ($1, ST_GeomFromGeoJSON($2)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Aoi>(&query)
            .bind(name)
            .bind(geometry_geojson)
            .fetch_one(pool)
            .await
    }

    /// Find an AOI by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Aoi>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM aois WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Aoi>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Centroids plus image-acquisition aggregates for every non-deleted AOI
    /// intersecting the bbox.
    ///
    /// LEFT JOINs keep AOIs without jobs or imagery in the result with null
    /// timestamps and a zero distinct-timestamp count.
    pub async fn centers_by_bbox(
        pool: &PgPool,
        bbox: &BoundingBox,
    ) -> Result<Vec<AoiCenterRow>, sqlx::Error> {
        sqlx::query_as::<_, AoiCenterRow>(
            "SELECT a.id, a.name, \
                ST_AsGeoJSON(ST_Centroid(a.geometry)) AS centroid, \
                ST_AsGeoJSON(a.geometry) AS geometry, \
                MIN(i.\"timestamp\") AS start_timestamp, \
                MAX(i.\"timestamp\") AS end_timestamp, \
                COUNT(DISTINCT i.\"timestamp\") AS timestamp_count \
             FROM aois a \
             LEFT JOIN jobs j ON j.aoi_id = a.id AND j.is_deleted = FALSE \
             LEFT JOIN images i ON i.job_id = j.id \
             WHERE a.is_deleted = FALSE \
               AND ST_Intersects(a.geometry, ST_MakeEnvelope($1, $2, $3, $4, 4326)) \
             GROUP BY a.id \
             ORDER BY a.id",
        )
        .bind(bbox.min_x)
        .bind(bbox.min_y)
        .bind(bbox.max_x)
        .bind(bbox.max_y)
        .fetch_all(pool)
        .await
    }

    /// Full polygons plus aggregates for every non-deleted AOI intersecting
    /// the bbox, including the count of distinct image timestamps carrying
    /// at least one detection at or above `pixel_cutoff`.
    pub async fn list_by_bbox(
        pool: &PgPool,
        bbox: &BoundingBox,
        pixel_cutoff: i32,
    ) -> Result<Vec<AoiListRow>, sqlx::Error> {
        sqlx::query_as::<_, AoiListRow>(
            "SELECT a.id, a.name, a.created_at, \
                ST_AsGeoJSON(a.geometry) AS geometry, \
                MIN(i.\"timestamp\") AS start_timestamp, \
                MAX(i.\"timestamp\") AS end_timestamp, \
                COUNT(DISTINCT i.\"timestamp\") AS timestamp_count, \
                COUNT(DISTINCT i.\"timestamp\") \
                    FILTER (WHERE pv.pixel_value >= $5) AS plastic_timestamp_count \
             FROM aois a \
             LEFT JOIN jobs j ON j.aoi_id = a.id AND j.is_deleted = FALSE \
             LEFT JOIN images i ON i.job_id = j.id \
             LEFT JOIN prediction_rasters pr ON pr.image_id = i.id \
             LEFT JOIN prediction_vectors pv ON pv.prediction_raster_id = pr.id \
             WHERE a.is_deleted = FALSE \
               AND ST_Intersects(a.geometry, ST_MakeEnvelope($1, $2, $3, $4, 4326)) \
             GROUP BY a.id \
             ORDER BY a.id",
        )
        .bind(bbox.min_x)
        .bind(bbox.min_y)
        .bind(bbox.max_x)
        .bind(bbox.max_y)
        .bind(pixel_cutoff)
        .fetch_all(pool)
        .await
    }
}
