//! Wall-clock time helpers for zoned event schedules.
//!
//! Event schedules are stored as UTC instants with an IANA zone name alongside.
//! The editing operations work in wall-clock terms (what the user sees on the
//! calendar), so this module provides the conversions between the two views.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Display format used when a schedule is re-zoned: the wall-clock reading is
/// formatted in the old zone and re-read in the new one. Seconds are not part
/// of the format, so re-zoned values are minute-precision.
pub const WALL_CLOCK_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Resolve a naive local datetime in a zone.
///
/// Ambiguous readings (clocks rolled back) resolve to the earliest mapping.
/// Nonexistent readings (clocks rolled forward) probe forward in half-hour
/// steps until a valid local time is found; DST gaps are at most a few hours
/// wide.
pub fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut candidate = naive;
    for _ in 0..48 {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(dt) => return dt,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            LocalResult::None => candidate = candidate + Duration::minutes(30),
        }
    }
    tz.from_utc_datetime(&naive)
}

/// Midnight at the start of the instant's local day.
pub fn start_of_day(dt: DateTime<Tz>) -> DateTime<Tz> {
    resolve_local(dt.timezone(), dt.date_naive().and_time(NaiveTime::MIN))
}

/// Last representable instant of the local day (23:59:59.999999999).
pub fn end_of_day(dt: DateTime<Tz>) -> DateTime<Tz> {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap();
    resolve_local(dt.timezone(), dt.date_naive().and_time(last))
}

/// Replace the time-of-day of an instant, keeping its local date and zone.
pub fn merge_time_of_day(dt: DateTime<Tz>, time: NaiveTime) -> DateTime<Tz> {
    resolve_local(dt.timezone(), dt.date_naive().and_time(time))
}

/// Move an instant to another zone keeping the wall-clock reading.
///
/// The instant changes; the calendar date and `HH:mm` stay what the user saw.
/// This is the round trip through [`WALL_CLOCK_FORMAT`], so seconds are
/// dropped.
pub fn rezone_keep_wall_clock(dt: DateTime<Tz>, to: Tz) -> DateTime<Tz> {
    let wall = dt.format(WALL_CLOCK_FORMAT).to_string();
    match NaiveDateTime::parse_from_str(&wall, WALL_CLOCK_FORMAT) {
        Ok(naive) => resolve_local(to, naive),
        // The round trip is total for representable dates; keep the instant
        // if it ever is not.
        Err(_) => dt.with_timezone(&to),
    }
}

/// First day of the week containing `date`.
///
/// `start_of_week` counts from Sunday: 0 = Sunday, 1 = Monday, ... 6 = Saturday.
pub fn week_anchor(date: NaiveDate, start_of_week: u8) -> NaiveDate {
    let start = u32::from(start_of_week % 7);
    let offset = (7 + date.weekday().num_days_from_sunday() - start) % 7;
    date - Duration::days(i64::from(offset))
}
