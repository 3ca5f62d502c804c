//! Local UTM projection selection and metric area computation.
//!
//! Areas in km² are only meaningful in a projected CRS; WGS84 degrees cannot
//! be used directly. The polygon is therefore reprojected into the UTM zone
//! covering it before taking a planar area.

use geo::{Area, BoundingRect, Coord, LineString, Polygon};

use crate::bbox::BoundingBox;
use crate::error::{CoreError, CoreResult};
use crate::types::STANDARD_SRID;

/// Latitude band covered by northern UTM zones.
const UTM_NORTH: (f64, f64) = (0.0, 84.0);
/// Latitude band covered by southern UTM zones.
const UTM_SOUTH: (f64, f64) = (-80.0, 0.0);

/// Find the EPSG code of the first UTM zone whose area of use contains
/// (`contains = true`) or intersects (`contains = false`) the bounding box.
///
/// Zones are scanned west to east, northern hemisphere first; codes are
/// 326xx (north) / 327xx (south). Only the WGS84 datum (`source_srid =
/// 4326`) is supported; a box outside every zone's area of use (or spanning
/// zones when `contains` is requested) is a validation error.
pub fn utm_zone_epsg(source_srid: i32, bbox: &BoundingBox, contains: bool) -> CoreResult<u32> {
    if source_srid != STANDARD_SRID {
        return Err(CoreError::Validation(format!(
            "Unsupported source SRID {source_srid}; only WGS84 ({STANDARD_SRID}) is supported"
        )));
    }

    for zone in 1u32..=60 {
        let west = -180.0 + 6.0 * f64::from(zone - 1);
        let east = west + 6.0;
        for (epsg_base, (south, north)) in [(32600, UTM_NORTH), (32700, UTM_SOUTH)] {
            let zone_area = BoundingBox {
                min_x: west,
                min_y: south,
                max_x: east,
                max_y: north,
            };
            let qualifies = if contains {
                zone_area.contains(bbox)
            } else {
                zone_area.intersects(bbox)
            };
            if qualifies {
                return Ok(epsg_base + zone);
            }
        }
    }

    Err(CoreError::Validation(format!(
        "No UTM zone {} ({}, {}, {}, {})",
        if contains { "contains" } else { "intersects" },
        bbox.min_x,
        bbox.min_y,
        bbox.max_x,
        bbox.max_y
    )))
}

/// Planar area of a WGS84 polygon in km², computed in its local UTM zone.
pub fn area_km2(polygon: &Polygon<f64>) -> CoreResult<f64> {
    let rect = polygon.bounding_rect().ok_or_else(|| {
        CoreError::Validation("Polygon has no extent".to_string())
    })?;
    let bbox = BoundingBox {
        min_x: rect.min().x,
        min_y: rect.min().y,
        max_x: rect.max().x,
        max_y: rect.max().y,
    };

    let epsg = utm_zone_epsg(STANDARD_SRID, &bbox, false)?;
    let zone = (epsg % 100) as u8;

    let projected = Polygon::new(
        project_ring(polygon.exterior(), zone),
        polygon
            .interiors()
            .iter()
            .map(|ring| project_ring(ring, zone))
            .collect(),
    );

    Ok(projected.unsigned_area() / 1e6)
}

/// Project every vertex of a lon/lat ring into UTM easting/northing meters.
fn project_ring(ring: &LineString<f64>, zone: u8) -> LineString<f64> {
    ring.coords()
        .map(|c| {
            let (northing, easting, _convergence) = utm::to_utm_wgs84(c.y, c.x, zone);
            Coord {
                x: easting,
                y: northing,
            }
        })
        .collect()
}
