//! Shared helpers for API integration tests.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use driftnet_api::config::{CatalogSettings, ServerConfig};
use driftnet_api::routes;
use driftnet_api::state::AppState;
use driftnet_catalog::CatalogClient;
use driftnet_dispatch::{DispatchClient, DispatchTarget};

/// Build a test `ServerConfig` with safe defaults.
///
/// The row limit is deliberately tiny (5) so clamping is testable without
/// seeding a thousand rows. The dispatcher has no token, so any dispatch
/// that passes the guards fails deterministically without touching the
/// network; the catalog points at an unroutable address.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_aoi_area_km2: 100.0,
        max_row_limit: 5,
        max_job_days: 31,
        dispatch: DispatchTarget {
            api_base: "http://127.0.0.1:9".to_string(),
            owner: "driftnet".to_string(),
            repo: "prediction-service".to_string(),
            workflow_id: "predict.yml".to_string(),
            ref_name: "main".to_string(),
            token: None,
        },
        catalog: CatalogSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            collection: "sentinel-2-l2a".to_string(),
            token: None,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let catalog = Arc::new(CatalogClient::new(
        config.catalog.base_url.clone(),
        config.catalog.collection.clone(),
        config.catalog.token.clone(),
    ));
    let dispatch = Arc::new(DispatchClient::new(config.dispatch.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config),
        catalog,
        dispatch,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request construction"),
    )
    .await
    .expect("request execution")
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request construction"),
    )
    .await
    .expect("request execution")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collection")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}
