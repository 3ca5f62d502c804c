//! Job time-range validation/splitting and UTC day bucketing.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::error::{CoreError, CoreResult};
use crate::types::Timestamp;

/// Reject ranges that run backwards or span more than `max_days` days.
pub fn validate_time_range(start: Timestamp, end: Timestamp, max_days: i64) -> CoreResult<()> {
    if start > end {
        return Err(CoreError::Validation(
            "The start date must be before the end date".to_string(),
        ));
    }
    if (end - start).num_days() > max_days {
        return Err(CoreError::Validation(format!(
            "The time range must be less than {max_days} days"
        )));
    }
    Ok(())
}

/// Split `[start, end]` into consecutive sub-ranges of at most `max_days`
/// days.
///
/// Each sub-range ends at `min(start + max_days, end)`; the next one starts
/// one day after the previous end, so the ranges are non-overlapping and
/// their union equals the input range. An empty range (`start >= end`)
/// yields no sub-ranges.
pub fn split_date_range(
    start: Timestamp,
    end: Timestamp,
    max_days: i64,
) -> Vec<(Timestamp, Timestamp)> {
    let delta = Duration::days(max_days);
    let mut ranges = Vec::new();
    let mut current_start = start;
    while current_start < end {
        let current_end = (current_start + delta).min(end);
        ranges.push((current_start, current_end));
        current_start = current_end + Duration::days(1);
    }
    ranges
}

/// Unix timestamp of 00:00:00 UTC on the UTC calendar date of `ts`.
///
/// Bucketing always uses the UTC date, never a calendar-local one.
pub fn start_of_utc_day(ts: Timestamp) -> i64 {
    let date = ts.date_naive();
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid"))
        .timestamp()
}

/// The 24-hour window `[day, day + 1d)` for a unix-timestamp day marker.
pub fn day_window(day_unix: i64) -> CoreResult<(Timestamp, Timestamp)> {
    let start = DateTime::<Utc>::from_timestamp(day_unix, 0)
        .ok_or_else(|| CoreError::Validation(format!("Invalid unix timestamp: {day_unix}")))?;
    Ok((start, start + Duration::days(1)))
}
