//! HTTP handlers, one module per resource.

pub mod aoi;
pub mod jobs;
pub mod models;
pub mod predictions;
pub mod satellites;
pub mod scl;
