//! Scene Classification Layer taxonomy.
//!
//! The fixed 12-value per-pixel classification produced by the Sentinel-2
//! L2A processor. Codes are stable and 0-based; anything outside 0-11 must
//! be rejected at the API boundary before reaching a query.

use serde::Serialize;

/// Scene classification codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scl {
    NoData = 0,
    Saturated = 1,
    Shadows = 2,
    CloudShadows = 3,
    Vegetation = 4,
    NotVegetated = 5,
    Water = 6,
    Unclassified = 7,
    CloudMediumProb = 8,
    CloudHighProb = 9,
    ThinCirrus = 10,
    SnowIce = 11,
}

impl Scl {
    /// Closed membership check over the taxonomy.
    pub fn from_code(code: i32) -> Option<Scl> {
        match code {
            0 => Some(Scl::NoData),
            1 => Some(Scl::Saturated),
            2 => Some(Scl::Shadows),
            3 => Some(Scl::CloudShadows),
            4 => Some(Scl::Vegetation),
            5 => Some(Scl::NotVegetated),
            6 => Some(Scl::Water),
            7 => Some(Scl::Unclassified),
            8 => Some(Scl::CloudMediumProb),
            9 => Some(Scl::CloudHighProb),
            10 => Some(Scl::ThinCirrus),
            11 => Some(Scl::SnowIce),
            _ => None,
        }
    }

    /// Human-readable taxonomy label.
    pub fn label(&self) -> &'static str {
        match self {
            Scl::NoData => "NO_DATA",
            Scl::Saturated => "SATURATED",
            Scl::Shadows => "SHADOWS",
            Scl::CloudShadows => "CLOUD_SHADOWS",
            Scl::Vegetation => "VEGETATION",
            Scl::NotVegetated => "NOT_VEGETATED",
            Scl::Water => "WATER",
            Scl::Unclassified => "UNCLASSIFIED",
            Scl::CloudMediumProb => "CLOUD_MEDIUM_PROB",
            Scl::CloudHighProb => "CLOUD_HIGH_PROB",
            Scl::ThinCirrus => "THIN_CIRRUS",
            Scl::SnowIce => "SNOW_ICE",
        }
    }

    pub fn code(&self) -> i32 {
        *self as i32
    }
}
