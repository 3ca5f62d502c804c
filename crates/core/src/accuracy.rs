//! Scaling between percent thresholds and stored pixel values.
//!
//! Segmentation model outputs are persisted as 0-255 pixel values that
//! encode a 0-100% confidence score. Both directions are a plain linear
//! scale with no clamping or rounding; call sites that need an integer
//! cutoff round explicitly.

/// Convert a `[0, 100]` percent threshold to the `[0, 255]` pixel domain.
pub fn percent_to_accuracy(percent: f64) -> f64 {
    255.0 / 100.0 * percent
}

/// Convert a `[0, 255]` pixel value back to a `[0, 100]` percent.
pub fn accuracy_to_percent(value: f64) -> f64 {
    value / 255.0 * 100.0
}

/// Integer pixel cutoff for a percent threshold.
///
/// Rounds half-to-even, matching the rounding the stored thresholds were
/// originally derived with. The choice is load-bearing at the boundary:
/// e.g. 50% maps to 127.5, which rounds to 128, not 127.
pub fn pixel_cutoff(percent: f64) -> i32 {
    percent_to_accuracy(percent).round_ties_even() as i32
}
