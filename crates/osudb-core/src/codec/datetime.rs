//! Conversion between .NET tick counts and `chrono` timestamps.

use chrono::{DateTime, Utc};

/// Ticks (100 ns) per second.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Tick count of 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// Converts a tick count to a UTC timestamp. Negative counts have no meaning.
pub fn ticks_to_datetime(ticks: i64) -> Option<DateTime<Utc>> {
    if ticks < 0 {
        return None;
    }
    let relative = ticks - UNIX_EPOCH_TICKS;
    let secs = relative.div_euclid(TICKS_PER_SECOND);
    let nanos = (relative.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
    DateTime::from_timestamp(secs, nanos)
}

/// Converts a UTC timestamp back to ticks, truncating below 100 ns.
pub fn datetime_to_ticks(datetime: &DateTime<Utc>) -> i64 {
    datetime.timestamp() * TICKS_PER_SECOND
        + i64::from(datetime.timestamp_subsec_nanos() / 100)
        + UNIX_EPOCH_TICKS
}

/// The zero tick count, 0001-01-01T00:00:00Z. The client writes it for
/// "never".
pub fn min_datetime() -> DateTime<Utc> {
    DateTime::from_timestamp(-UNIX_EPOCH_TICKS / TICKS_PER_SECOND, 0).unwrap_or_default()
}
