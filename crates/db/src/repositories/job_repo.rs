//! Repository for the `jobs` table.

use driftnet_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::job::{CreateJob, Job, JobPredictionRow, JobStatus};

const COLUMNS: &str =
    "id, status, created_at, is_deleted, start_date, end_date, maxcc, aoi_id, model_id";

/// Provides creation and query operations for jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert one PENDING job per date range, all in a single transaction.
    ///
    /// Either every job row is committed or none is.
    pub async fn create_batch(
        pool: &PgPool,
        input: &CreateJob,
        ranges: &[(Timestamp, Timestamp)],
    ) -> Result<Vec<Job>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO jobs (status, start_date, end_date, maxcc, aoi_id, model_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );

        let mut jobs = Vec::with_capacity(ranges.len());
        for (start, end) in ranges {
            let job = sqlx::query_as::<_, Job>(&query)
                .bind(JobStatus::Pending)
                .bind(start)
                .bind(end)
                .bind(input.maxcc)
                .bind(input.aoi_id)
                .bind(input.model_id)
                .fetch_one(&mut *tx)
                .await?;
            jobs.push(job);
        }

        tx.commit().await?;
        Ok(jobs)
    }

    /// Find a job by ID (soft-deleted jobs included, matching the lookup
    /// semantics of the dispatch and detail endpoints).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flat join rows for the grouped `GET /jobs` response: every COMPLETED,
    /// non-deleted job of the AOI with its images and prediction vectors.
    ///
    /// Rows come back pre-sorted by (job id DESC, image id DESC); the
    /// grouping fold in `models::job` relies on exactly this order.
    pub async fn completed_prediction_rows(
        pool: &PgPool,
        aoi_id: DbId,
    ) -> Result<Vec<JobPredictionRow>, sqlx::Error> {
        sqlx::query_as::<_, JobPredictionRow>(
            "SELECT j.id AS job_id, j.status, j.created_at, m.model_id, \
                i.id AS image_id, i.image_url, i.\"timestamp\", \
                pv.pixel_value, ST_AsGeoJSON(pv.geometry) AS geometry \
             FROM jobs j \
             JOIN models m ON j.model_id = m.id \
             JOIN images i ON i.job_id = j.id \
             JOIN prediction_rasters pr ON pr.image_id = i.id \
             JOIN prediction_vectors pv ON pv.prediction_raster_id = pr.id \
             WHERE j.aoi_id = $1 \
               AND j.is_deleted = FALSE \
               AND j.status = $2 \
             ORDER BY j.id DESC, i.id DESC",
        )
        .bind(aoi_id)
        .bind(JobStatus::Completed)
        .fetch_all(pool)
        .await
    }
}
