//! Device time helpers.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};

/// Wall-clock time reported by the unit, pinned to the offset it was read in.
pub type DeviceTime = DateTime<FixedOffset>;

/// Build a [`DeviceTime`] from calendar parts interpreted in the local zone.
///
/// Returns `None` when the parts do not form a valid local date-time
/// (e.g. month 13, or a time skipped by a DST transition).
#[must_use]
pub fn local_time(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<DeviceTime> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}
