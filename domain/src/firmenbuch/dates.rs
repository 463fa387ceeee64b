//! Registry date codecs.
//!
//! Responses encode dates as a single packed integer
//! (`YYYY * 10000 + MM * 100 + DD`); requests take ISO calendar dates.

use chrono::NaiveDate;
use tracing::warn;

/// Decode a packed `YYYYMMDD` integer into `YYYY-MM-DD`.
///
/// No calendar validation is applied: `20240230` decodes to `2024-02-30`
/// just as the registry encoded it. Such values are reported through a
/// warning so they stay visible.
pub fn decode_packed_date(value: i64) -> String {
    let day = value % 100;
    let month = (value / 100) % 100;
    let year = value / 10_000;

    if !is_calendar_date(value) {
        warn!(packed = value, "Packed date does not denote a calendar day");
    }

    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Whether a packed `YYYYMMDD` integer names a real calendar day
pub fn is_calendar_date(value: i64) -> bool {
    let day = u32::try_from(value % 100).ok();
    let month = u32::try_from((value / 100) % 100).ok();
    let year = i32::try_from(value / 10_000).ok();

    match (year, month, day) {
        (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d).is_some(),
        _ => false,
    }
}

/// Format a calendar date for an outbound request fragment
pub fn to_date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
