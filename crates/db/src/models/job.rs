//! Job entity models, DTOs, and the flat-row grouping fold.

use driftnet_core::lifecycle;
use driftnet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Job lifecycle status, mirrored by the `job_status` Postgres enum.
///
/// The transition rules live in `driftnet_core::lifecycle`; this type only
/// carries the value across the SQL boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => lifecycle::STATUS_PENDING,
            JobStatus::InProgress => lifecycle::STATUS_IN_PROGRESS,
            JobStatus::Completed => lifecycle::STATUS_COMPLETED,
            JobStatus::Failed => lifecycle::STATUS_FAILED,
        }
    }

    pub fn is_terminal(&self) -> bool {
        lifecycle::is_terminal(self.as_str())
    }
}

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub status: JobStatus,
    pub created_at: Timestamp,
    pub is_deleted: bool,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub maxcc: f64,
    pub aoi_id: DbId,
    pub model_id: DbId,
}

/// DTO for `POST /jobs`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJob {
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub model_id: DbId,
    pub aoi_id: DbId,
    /// Maximum acceptable cloud-cover fraction for source imagery.
    #[validate(range(min = 0.0, max = 1.0))]
    pub maxcc: f64,
    /// Split ranges longer than the configured maximum into one job per
    /// sub-range instead of rejecting them.
    #[serde(default)]
    pub create_multiple: bool,
}

/// One flat row of the jobs -> images -> prediction vectors join, pre-sorted
/// by (job id DESC, image id DESC) in SQL.
#[derive(Debug, Clone, FromRow)]
pub struct JobPredictionRow {
    pub job_id: DbId,
    pub status: JobStatus,
    pub created_at: Timestamp,
    /// External model identifier of the job's model.
    pub model_id: String,
    pub image_id: DbId,
    pub image_url: String,
    pub timestamp: Timestamp,
    pub pixel_value: i32,
    /// GeoJSON Point of the prediction vector.
    pub geometry: String,
}

/// A prediction belonging to a grouped image.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedPrediction {
    pub pixel_value: i32,
    pub geometry: String,
}

/// An image with its predictions, nested under a grouped job.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedImage {
    pub image_id: DbId,
    pub image_url: String,
    pub timestamp: i64,
    pub predictions: Vec<GroupedPrediction>,
}

/// One job of the `GET /jobs` response, with nested images.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedJob {
    pub job_id: DbId,
    pub status: JobStatus,
    pub created_at: i64,
    pub model_id: String,
    pub images: Vec<GroupedImage>,
}

/// Fold the flat, pre-sorted join rows into jobs -> images -> predictions.
///
/// Grouping is done purely by detecting id transitions between consecutive
/// rows; the input order (job id DESC, image id DESC) is trusted and never
/// re-established here.
pub fn group_prediction_rows(rows: &[JobPredictionRow]) -> Vec<GroupedJob> {
    let mut jobs: Vec<GroupedJob> = Vec::new();
    let mut last_job_id: DbId = -1;
    let mut last_image_id: DbId = -1;

    for row in rows {
        if row.job_id != last_job_id {
            jobs.push(GroupedJob {
                job_id: row.job_id,
                status: row.status,
                created_at: row.created_at.timestamp(),
                model_id: row.model_id.clone(),
                images: Vec::new(),
            });
            // A new job always opens a new image group as well.
            last_image_id = -1;
        }
        let job = jobs.last_mut().expect("just pushed");

        if row.image_id != last_image_id {
            job.images.push(GroupedImage {
                image_id: row.image_id,
                image_url: row.image_url.clone(),
                timestamp: row.timestamp.timestamp(),
                predictions: Vec::new(),
            });
        }
        job.images
            .last_mut()
            .expect("just pushed")
            .predictions
            .push(GroupedPrediction {
                pixel_value: row.pixel_value,
                geometry: row.geometry.clone(),
            });

        last_job_id = row.job_id;
        last_image_id = row.image_id;
    }

    jobs
}
