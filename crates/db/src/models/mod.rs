//! Entity models and request/response DTOs.
//!
//! Geometry-bearing rows carry their geometry as GeoJSON strings produced
//! by `ST_AsGeoJSON`; the API layer parses them into GeoJSON values when
//! shaping responses.

pub mod aoi;
pub mod image;
pub mod job;
pub mod model;
pub mod prediction;
pub mod satellite;
pub mod scl;
