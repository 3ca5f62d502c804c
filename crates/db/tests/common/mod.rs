//! Shared seed helpers for repository integration tests.
//!
//! Rows owned by the external prediction pipeline (images, rasters,
//! vectors, SCL) are seeded with raw SQL because the repositories
//! deliberately expose no create methods for them.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// GeoJSON for a square polygon of side `size` degrees, south-west corner at
/// `(lon, lat)`.
pub fn square_geojson(lon: f64, lat: f64, size: f64) -> String {
    format!(
        r#"{{"type":"Polygon","coordinates":[[[{lon},{lat}],[{e},{lat}],[{e},{n}],[{lon},{n}],[{lon},{lat}]]]}}"#,
        e = lon + size,
        n = lat + size,
    )
}

pub fn point_geojson(lon: f64, lat: f64) -> String {
    format!(r#"{{"type":"Point","coordinates":[{lon},{lat}]}}"#)
}

pub async fn insert_satellite(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO satellites (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("insert satellite")
}

pub async fn insert_model(pool: &PgPool, external_id: &str, model_type: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO models \
            (model_id, model_url, version, expected_image_height, expected_image_width, \
             type, output_dtype) \
         VALUES ($1, 'https://models.test/m', 1, 480, 480, $2::model_type, 'uint8') \
         RETURNING id",
    )
    .bind(external_id)
    .bind(model_type)
    .fetch_one(pool)
    .await
    .expect("insert model")
}

pub async fn insert_image(
    pool: &PgPool,
    job_id: i64,
    satellite_id: i64,
    timestamp: DateTime<Utc>,
    bbox: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO images \
            (image_id, image_url, \"timestamp\", dtype, crs, resolution, \
             image_width, image_height, bbox, job_id, satellite_id) \
         VALUES \
            ('S2-' || $1 || '-' || $2, 'https://imagery.test/' || $1, $2, 'uint8', 4326, \
             10.0, 512, 512, ST_GeomFromGeoJSON($3), $1, $4) \
         RETURNING id",
    )
    .bind(job_id)
    .bind(timestamp)
    .bind(bbox)
    .bind(satellite_id)
    .fetch_one(pool)
    .await
    .expect("insert image")
}

pub async fn insert_prediction_raster(pool: &PgPool, image_id: i64, bbox: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO prediction_rasters \
            (raster_url, dtype, image_width, image_height, bbox, image_id) \
         VALUES ('https://rasters.test/' || $1, 'uint8', 512, 512, ST_GeomFromGeoJSON($2), $1) \
         RETURNING id",
    )
    .bind(image_id)
    .bind(bbox)
    .fetch_one(pool)
    .await
    .expect("insert prediction raster")
}

pub async fn insert_prediction_vector(
    pool: &PgPool,
    raster_id: i64,
    pixel_value: i32,
    point: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO prediction_vectors (pixel_value, geometry, prediction_raster_id) \
         VALUES ($1, ST_GeomFromGeoJSON($2), $3) RETURNING id",
    )
    .bind(pixel_value)
    .bind(point)
    .bind(raster_id)
    .fetch_one(pool)
    .await
    .expect("insert prediction vector")
}

pub async fn insert_scl(pool: &PgPool, image_id: i64, code: i32, polygon: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO scene_classification_vectors (pixel_value, geometry, image_id) \
         VALUES ($1, ST_GeomFromGeoJSON($2), $3) RETURNING id",
    )
    .bind(code)
    .bind(polygon)
    .bind(image_id)
    .fetch_one(pool)
    .await
    .expect("insert scl vector")
}
