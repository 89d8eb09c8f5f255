//! Calendar-day arithmetic for booking ranges.

use chrono::NaiveDate;

/// Number of calendar days between two dates.
///
/// The result is the absolute difference, so the function is symmetric
/// in its arguments and `days_between(d, d) == 0`. Inputs are already
/// at calendar-day granularity (`NaiveDate`), matching how booking
/// ranges are stored.
#[must_use]
pub fn days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days().unsigned_abs();
    u32::try_from(days).unwrap_or(u32::MAX)
}
