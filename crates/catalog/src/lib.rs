//! REST client for the external imagery-catalog search service.
//!
//! The catalog speaks a STAC-style search API: we hand it a GeoJSON polygon
//! and an ISO8601 datetime interval, it returns scene metadata (id, bbox,
//! acquisition timestamp, cloud cover). Imagery acquisition itself happens
//! in the external prediction pipeline, never here.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Scene metadata returned by a catalog search.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneMetadata {
    /// External scene identifier.
    pub id: String,
    /// `(min_lon, min_lat, max_lon, max_lat)` in WGS84.
    pub bbox: [f64; 4],
    /// Acquisition timestamp.
    pub timestamp: DateTime<Utc>,
    /// Cloud-cover fraction reported by the catalog, if any.
    pub cloud_cover: Option<f64>,
}

/// Errors from the catalog client.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The catalog returned a payload we could not interpret.
    #[error("Unexpected catalog response: {0}")]
    Decode(String),
}

/// One item of a STAC search response.
#[derive(Debug, Deserialize)]
struct StacItem {
    id: String,
    bbox: [f64; 4],
    properties: StacProperties,
}

#[derive(Debug, Deserialize)]
struct StacProperties {
    datetime: String,
    #[serde(rename = "eo:cloud_cover")]
    cloud_cover: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct StacSearchResponse {
    features: Vec<StacItem>,
}

/// HTTP client for one catalog endpoint.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    token: Option<String>,
}

impl CatalogClient {
    /// Create a client with a bounded request timeout.
    pub fn new(base_url: String, collection: String, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client construction cannot fail with static options");
        Self {
            client,
            base_url,
            collection,
            token,
        }
    }

    /// Search the catalog for scenes intersecting `geometry` within
    /// `time_range` (an ISO8601 interval, e.g.
    /// `2024-03-01T00:00:00Z/2024-03-20T23:59:59Z`).
    pub async fn search(
        &self,
        geometry: &geojson::Geometry,
        time_range: &str,
        limit: u32,
    ) -> Result<Vec<SceneMetadata>, CatalogError> {
        let body = serde_json::json!({
            "collections": [self.collection],
            "intersects": geometry,
            "datetime": time_range,
            "limit": limit,
        });

        let mut request = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: StacSearchResponse = response.json().await?;
        tracing::debug!(count = parsed.features.len(), "Catalog search returned");

        parsed
            .features
            .into_iter()
            .map(|item| {
                let timestamp = DateTime::parse_from_rfc3339(&item.properties.datetime)
                    .map_err(|e| {
                        CatalogError::Decode(format!(
                            "Bad scene timestamp '{}': {e}",
                            item.properties.datetime
                        ))
                    })?
                    .with_timezone(&Utc);
                Ok(SceneMetadata {
                    id: item.id,
                    bbox: item.bbox,
                    timestamp,
                    cloud_cover: item.properties.cloud_cover,
                })
            })
            .collect()
    }
}
