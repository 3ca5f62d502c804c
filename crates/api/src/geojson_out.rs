//! Helpers for shaping database rows into GeoJSON responses.
//!
//! Geometry arrives from the repository layer as `ST_AsGeoJSON` strings;
//! these helpers parse it back into typed GeoJSON and attach properties.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Parse an `ST_AsGeoJSON` string into a typed geometry.
///
/// The database produced the string, so failure here is an internal error,
/// not a client one.
pub fn parse_db_geometry(geometry_json: &str) -> AppResult<Geometry> {
    serde_json::from_str::<Geometry>(geometry_json).map_err(|e| {
        AppError::InternalError(format!("Invalid geometry from database: {e}"))
    })
}

/// Build a Feature from a database geometry string and a property map.
pub fn feature(geometry_json: &str, properties: JsonObject) -> AppResult<Feature> {
    Ok(Feature {
        bbox: None,
        geometry: Some(parse_db_geometry(geometry_json)?),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Wrap features into a FeatureCollection.
pub fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Build a property map from `(key, value)` pairs.
pub fn properties<const N: usize>(pairs: [(&str, Value); N]) -> JsonObject {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
