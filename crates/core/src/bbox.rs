//! Axis-aligned bounding boxes in WGS84 lon/lat order.

use crate::error::{CoreError, CoreResult};

/// A geographic bounding box: `(min_x, min_y, max_x, max_y)` in degrees,
/// x = longitude, y = latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// The whole-world bounding box.
pub const WORLD_BBOX: BoundingBox = BoundingBox {
    min_x: -180.0,
    min_y: -90.0,
    max_x: 180.0,
    max_y: 90.0,
};

/// Query-string form of [`WORLD_BBOX`], used as the default `bbox` parameter.
pub const WORLD_BBOX_STR: &str = "-180,-90,180,90";

impl BoundingBox {
    /// Parse a comma-separated `minLon,minLat,maxLon,maxLat` string.
    ///
    /// Exactly four numeric fields are required; anything else is a
    /// validation error.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(CoreError::Validation(format!(
                "Expected 4 comma-separated bbox values, got {}",
                fields.len()
            )));
        }

        let mut coords = [0.0f64; 4];
        for (i, field) in fields.iter().enumerate() {
            coords[i] = field.parse::<f64>().map_err(|_| {
                CoreError::Validation(format!("Invalid bbox coordinate: '{field}'"))
            })?;
        }

        Ok(Self {
            min_x: coords[0],
            min_y: coords[1],
            max_x: coords[2],
            max_y: coords[3],
        })
    }

    /// Border-inclusive containment test: does `self` fully contain `inner`?
    pub fn contains(&self, inner: &BoundingBox) -> bool {
        self.min_x <= inner.min_x
            && self.min_y <= inner.min_y
            && self.max_x >= inner.max_x
            && self.max_y >= inner.max_y
    }

    /// Do the two boxes share any area (border-inclusive)?
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }
}
