//! PostGIS data-access layer for driftnet.
//!
//! Exposes pool construction, embedded migrations, entity models, and the
//! repository structs the API layer queries through. All geometry crosses
//! this boundary as GeoJSON text (`ST_AsGeoJSON` out, `ST_GeomFromGeoJSON`
//! in); spatial predicates run inside PostGIS.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod models;
pub mod repositories;

/// Alias so downstream crates don't import sqlx directly for the pool type.
pub type DbPool = PgPool;

/// Embedded migrations from `db/migrations` at the repository root.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../db/migrations");

/// Create a connection pool with bounded acquire timeout.
///
/// Connections are request-scoped: handlers check one out per unit of work
/// and release it when the query completes. Nothing holds a connection
/// across requests.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used by the health endpoint and startup.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

/// Apply pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Clamp a requested row limit to `[0, max]`.
///
/// The configured maximum always wins, no matter what the caller asked for.
pub fn clamp_limit(requested: Option<i64>, max: i64) -> i64 {
    requested.unwrap_or(max).clamp(0, max)
}
