//! Integration tests for job creation, range splitting, and the grouped
//! jobs listing.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use common::fixtures;
use common::{body_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;

async fn seed_aoi_and_model(pool: &PgPool) -> (i64, i64) {
    let aoi_id = fixtures::insert_aoi(
        pool,
        "bay",
        &fixtures::square_geojson(35.0, -21.0, 0.05),
    )
    .await;
    let model_id = fixtures::insert_model(pool, "plastic-detect", "SEGMENTATION").await;
    (aoi_id, model_id)
}

// ---------------------------------------------------------------------------
// Create: validation and referenced entities
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_job_rejects_unknown_model(pool: PgPool) {
    let aoi_id = fixtures::insert_aoi(
        &pool,
        "bay",
        &fixtures::square_geojson(35.0, -21.0, 0.05),
    )
    .await;

    let response = post_json(
        common::build_test_app(pool),
        "/jobs",
        json!({
            "start_date": "2024-03-01T00:00:00Z",
            "end_date": "2024-03-10T00:00:00Z",
            "model_id": 999,
            "aoi_id": aoi_id,
            "maxcc": 0.2,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Model not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_job_rejects_unknown_aoi(pool: PgPool) {
    let model_id = fixtures::insert_model(&pool, "plastic-detect", "SEGMENTATION").await;

    let response = post_json(
        common::build_test_app(pool),
        "/jobs",
        json!({
            "start_date": "2024-03-01T00:00:00Z",
            "end_date": "2024-03-10T00:00:00Z",
            "model_id": model_id,
            "aoi_id": 999,
            "maxcc": 0.2,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "AOI not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_job_rejects_backwards_range(pool: PgPool) {
    let (aoi_id, model_id) = seed_aoi_and_model(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/jobs",
        json!({
            "start_date": "2024-03-10T00:00:00Z",
            "end_date": "2024-03-01T00:00:00Z",
            "model_id": model_id,
            "aoi_id": aoi_id,
            "maxcc": 0.2,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_job_rejects_range_over_limit_without_create_multiple(pool: PgPool) {
    let (aoi_id, model_id) = seed_aoi_and_model(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/jobs",
        json!({
            "start_date": "2024-01-01T00:00:00Z",
            "end_date": "2024-03-15T00:00:00Z",
            "model_id": model_id,
            "aoi_id": aoi_id,
            "maxcc": 0.2,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_job_rejects_maxcc_out_of_range(pool: PgPool) {
    let (aoi_id, model_id) = seed_aoi_and_model(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/jobs",
        json!({
            "start_date": "2024-03-01T00:00:00Z",
            "end_date": "2024-03-10T00:00:00Z",
            "model_id": model_id,
            "aoi_id": aoi_id,
            "maxcc": 1.5,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Create: single and split
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_single_job_starts_pending(pool: PgPool) {
    let (aoi_id, model_id) = seed_aoi_and_model(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/jobs",
        json!({
            "start_date": "2024-03-01T00:00:00Z",
            "end_date": "2024-03-10T00:00:00Z",
            "model_id": model_id,
            "aoi_id": aoi_id,
            "maxcc": 0.2,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let jobs = body_json(response).await;
    let jobs = jobs.as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["status"], "PENDING");
    assert_eq!(jobs[0]["maxcc"], 0.2);
    assert!(jobs[0]["images"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_multiple_splits_65_days_into_three_contiguous_jobs(pool: PgPool) {
    let (aoi_id, model_id) = seed_aoi_and_model(&pool).await;

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let end = start + chrono::Duration::days(65);

    let response = post_json(
        common::build_test_app(pool),
        "/jobs",
        json!({
            "start_date": start.to_rfc3339(),
            "end_date": end.to_rfc3339(),
            "model_id": model_id,
            "aoi_id": aoi_id,
            "maxcc": 0.2,
            "create_multiple": true,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let jobs = body_json(response).await;
    let jobs = jobs.as_array().unwrap();
    assert_eq!(jobs.len(), 3);

    let parse = |v: &serde_json::Value| {
        DateTime::parse_from_rfc3339(v.as_str().unwrap())
            .unwrap()
            .with_timezone(&Utc)
    };

    // Non-overlapping, contiguous by one day, union equal to the request.
    assert_eq!(parse(&jobs[0]["start_date"]), start);
    for pair in jobs.windows(2) {
        let prev_end = parse(&pair[0]["end_date"]);
        let next_start = parse(&pair[1]["start_date"]);
        assert_eq!(next_start, prev_end + chrono::Duration::days(1));
        assert!((parse(&pair[0]["end_date"]) - parse(&pair[0]["start_date"])).num_days() <= 31);
    }
    assert_eq!(parse(&jobs[2]["end_date"]), end);
}

// ---------------------------------------------------------------------------
// Get by id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_job_returns_metadata_or_404(pool: PgPool) {
    let (aoi_id, model_id) = seed_aoi_and_model(&pool).await;
    let job_id = fixtures::insert_job(&pool, aoi_id, model_id, "PENDING").await;

    let response = get(common::build_test_app(pool.clone()), &format!("/jobs/{job_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["job_id"].as_i64().unwrap(), job_id);
    assert_eq!(json["status"], "PENDING");

    let response = get(common::build_test_app(pool), "/jobs/99999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Grouped listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn jobs_listing_groups_flat_rows_into_nested_structure(pool: PgPool) {
    let square = fixtures::square_geojson(35.0, -21.0, 0.05);
    let aoi_id = fixtures::insert_aoi(&pool, "bay", &square).await;
    let satellite_id = fixtures::insert_satellite(&pool, "SENTINEL2_L2A").await;
    let model_id = fixtures::insert_model(&pool, "plastic-detect", "SEGMENTATION").await;

    // 2 completed jobs x 2 images x 3 predictions = 12 flat rows.
    let mut job_ids = Vec::new();
    for j in 0..2u32 {
        let job_id = fixtures::insert_job(&pool, aoi_id, model_id, "COMPLETED").await;
        job_ids.push(job_id);
        for i in 0..2u32 {
            let ts = Utc
                .with_ymd_and_hms(2024, 3, 10 + j, 8 + i, 0, 0)
                .unwrap();
            let image_id =
                fixtures::insert_image(&pool, job_id, satellite_id, ts, &square).await;
            let raster_id = fixtures::insert_prediction_raster(&pool, image_id, &square).await;
            for pixel in [250, 180, 90] {
                fixtures::insert_prediction_vector(
                    &pool,
                    raster_id,
                    pixel,
                    &fixtures::point_geojson(35.02, -20.98),
                )
                .await;
            }
        }
    }
    // A pending job must not appear.
    fixtures::insert_job(&pool, aoi_id, model_id, "PENDING").await;

    let response = get(
        common::build_test_app(pool),
        &format!("/jobs?aoiId={aoi_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let jobs = json["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 2);

    // Jobs come back newest-first.
    assert_eq!(jobs[0]["job_id"].as_i64().unwrap(), job_ids[1]);
    assert_eq!(jobs[1]["job_id"].as_i64().unwrap(), job_ids[0]);

    for job in jobs {
        assert_eq!(job["status"], "COMPLETED");
        let images = job["images"].as_array().unwrap();
        assert_eq!(images.len(), 2);

        // Images are ordered by id descending within their job.
        let ids: Vec<i64> = images
            .iter()
            .map(|i| i["image_id"].as_i64().unwrap())
            .collect();
        assert!(ids[0] > ids[1]);

        for image in images {
            let predictions = image["predictions"].as_array().unwrap();
            assert_eq!(predictions.len(), 3);
            for prediction in predictions {
                assert_eq!(prediction["type"], "Feature");
                assert_eq!(prediction["geometry"]["type"], "Point");
                assert!(prediction["properties"]["pixelValue"].is_i64());
            }
        }
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn jobs_listing_is_empty_for_aoi_without_completed_jobs(pool: PgPool) {
    let (aoi_id, model_id) = seed_aoi_and_model(&pool).await;
    fixtures::insert_job(&pool, aoi_id, model_id, "PENDING").await;

    let response = get(
        common::build_test_app(pool),
        &format!("/jobs?aoiId={aoi_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["jobs"].as_array().unwrap().is_empty());
}
