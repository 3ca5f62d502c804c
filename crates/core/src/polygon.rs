//! Extraction of polygons from request GeoJSON.

use geo::Polygon;
use geojson::{Feature, GeoJson, Geometry, Value};

use crate::error::{CoreError, CoreResult};

/// Pull a polygon out of a GeoJSON document.
///
/// Accepts a bare Polygon geometry, a Feature, or a FeatureCollection (only
/// the first feature is used). Anything else is a validation error.
pub fn extract_polygon(gj: &GeoJson) -> CoreResult<Polygon<f64>> {
    let geometry = match gj {
        GeoJson::Geometry(geometry) => geometry,
        GeoJson::Feature(feature) => feature_geometry(feature)?,
        GeoJson::FeatureCollection(collection) => {
            let first = collection.features.first().ok_or_else(|| {
                CoreError::Validation("FeatureCollection contains no features".to_string())
            })?;
            feature_geometry(first)?
        }
    };

    if !matches!(geometry.value, Value::Polygon(_)) {
        return Err(CoreError::Validation(
            "Geometry must be a Polygon".to_string(),
        ));
    }

    Polygon::try_from(geometry.clone())
        .map_err(|e| CoreError::Validation(format!("Invalid Polygon geometry: {e}")))
}

/// Require every ring of a GeoJSON Polygon to be closed and have exactly
/// `expected` coordinate pairs.
///
/// Checked on the raw document because the geo conversion closes rings
/// implicitly.
pub fn validate_polygon_rings(geometry: &Geometry, expected: usize) -> CoreResult<()> {
    let Value::Polygon(rings) = &geometry.value else {
        return Err(CoreError::Validation(
            "Geometry must be a Polygon".to_string(),
        ));
    };
    for ring in rings {
        if ring.len() != expected {
            return Err(CoreError::Validation(format!(
                "Polygon ring must have exactly {expected} coordinate pairs"
            )));
        }
        if ring.first() != ring.last() {
            return Err(CoreError::Validation(
                "The first and last coordinate pairs must be the same to form a closed polygon"
                    .to_string(),
            ));
        }
    }
    Ok(())
}

/// Serialize a polygon back to a GeoJSON geometry string (for `ST_GeomFromGeoJSON`).
pub fn polygon_to_geojson_string(polygon: &Polygon<f64>) -> String {
    GeoJson::Geometry(Geometry::new(Value::from(polygon))).to_string()
}

fn feature_geometry(feature: &Feature) -> CoreResult<&Geometry> {
    feature
        .geometry
        .as_ref()
        .ok_or_else(|| CoreError::Validation("Feature has no geometry".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const POLYGON: &str = r#"{
        "type": "Polygon",
        "coordinates": [[[10.0, 0.0], [11.0, 0.0], [11.0, 1.0], [10.0, 1.0], [10.0, 0.0]]]
    }"#;

    fn parse(s: &str) -> GeoJson {
        s.parse::<GeoJson>().unwrap()
    }

    #[test]
    fn extracts_bare_polygon() {
        let polygon = extract_polygon(&parse(POLYGON)).unwrap();
        assert_eq!(polygon.exterior().0.len(), 5);
    }

    #[test]
    fn extracts_polygon_from_feature() {
        let feature = format!(r#"{{"type":"Feature","properties":{{}},"geometry":{POLYGON}}}"#);
        extract_polygon(&parse(&feature)).unwrap();
    }

    #[test]
    fn extracts_first_feature_of_collection() {
        let fc = format!(
            r#"{{"type":"FeatureCollection","features":[
                {{"type":"Feature","properties":{{}},"geometry":{POLYGON}}},
                {{"type":"Feature","properties":{{}},"geometry":{{"type":"Point","coordinates":[0,0]}}}}
            ]}}"#
        );
        extract_polygon(&parse(&fc)).unwrap();
    }

    #[test]
    fn rejects_empty_collection() {
        let fc = r#"{"type":"FeatureCollection","features":[]}"#;
        assert_matches!(extract_polygon(&parse(fc)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_point_geometry() {
        let point = r#"{"type":"Point","coordinates":[10.0, 0.0]}"#;
        assert_matches!(extract_polygon(&parse(point)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn ring_validation_accepts_closed_quad() {
        let GeoJson::Geometry(geometry) = parse(POLYGON) else {
            unreachable!()
        };
        validate_polygon_rings(&geometry, 5).unwrap();
    }

    #[test]
    fn ring_validation_rejects_unclosed_ring() {
        let open = r#"{
            "type": "Polygon",
            "coordinates": [[[10.0, 0.0], [11.0, 0.0], [11.0, 1.0], [10.0, 1.0], [10.5, 0.5]]]
        }"#;
        let GeoJson::Geometry(geometry) = parse(open) else {
            unreachable!()
        };
        assert_matches!(
            validate_polygon_rings(&geometry, 5),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn ring_validation_rejects_wrong_length() {
        let GeoJson::Geometry(geometry) = parse(POLYGON) else {
            unreachable!()
        };
        assert_matches!(
            validate_polygon_rings(&geometry, 4),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn polygon_round_trips_through_geojson_string() {
        let polygon = extract_polygon(&parse(POLYGON)).unwrap();
        let s = polygon_to_geojson_string(&polygon);
        let back = extract_polygon(&parse(&s)).unwrap();
        assert_eq!(polygon, back);
    }
}
