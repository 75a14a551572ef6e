//! Calendar and wall-clock helpers
//!
//! All records are stamped with local wall-clock time (`NaiveDateTime`).
//! Date comparisons are always done on calendar days, never on raw time
//! differences, so two readings taken on the same date at different hours
//! behave identically.
//!
//! - `Clock` - Source of the current time
//! - `DayPart` - Morning/afternoon temperature-check windows
//! - `deserialize_timestamp` - Reads every timestamp form found in stored blobs

use crate::error::{Error, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Source of the current local time
pub trait Clock {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// Current calendar date
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock reading the system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Date `days` calendar days after `date`
pub fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate> {
    date.checked_add_days(chrono::Days::new(u64::from(days)))
        .ok_or_else(|| Error::DateOutOfRange(format!("{} + {} days", date, days)))
}

/// Local wall-clock time of an epoch-millisecond instant
pub fn from_epoch_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|utc| utc.with_timezone(&Local).naive_local())
}

/// Parse a stored timestamp string.
///
/// Accepts the naive local form written today (`2026-02-28T09:15:00`) and
/// RFC 3339 with an offset (`2026-02-28T09:15:00.000Z`), which is converted
/// to local wall-clock time.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    text.parse::<NaiveDateTime>().ok().or_else(|| {
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| dt.with_timezone(&Local).naive_local())
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTimestamp {
    Millis(i64),
    Text(String),
}

/// Serde helper for record timestamps.
///
/// Older devices stored temperature timestamps as epoch milliseconds and
/// everything else as UTC ISO strings.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    match StoredTimestamp::deserialize(deserializer)? {
        StoredTimestamp::Millis(millis) => from_epoch_millis(millis)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp {} ms out of range", millis))),
        StoredTimestamp::Text(text) => parse_timestamp(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp {:?}", text))),
    }
}

/// Half of the day a temperature check belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPart {
    /// Before noon
    Morning,
    /// Noon onwards
    Afternoon,
}

impl DayPart {
    /// Bucket a time of day
    pub fn of(time: NaiveTime) -> Self {
        if time.hour() < 12 {
            DayPart::Morning
        } else {
            DayPart::Afternoon
        }
    }

    /// Hour by which this check is due
    pub fn deadline_hour(&self) -> u32 {
        match self {
            DayPart::Morning => 10,
            DayPart::Afternoon => 15,
        }
    }

    /// Whether `time` is strictly past this check's deadline
    pub fn is_past_deadline(&self, time: NaiveTime) -> bool {
        NaiveTime::from_hms_opt(self.deadline_hour(), 0, 0)
            .is_some_and(|deadline| time > deadline)
    }
}

impl fmt::Display for DayPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayPart::Morning => write!(f, "AM"),
            DayPart::Afternoon => write!(f, "PM"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2026, 2, 28), date(2026, 3, 1)), 1);
        assert_eq!(days_between(date(2026, 2, 28), date(2026, 2, 27)), -1);
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2); // leap year
    }

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(date(2026, 2, 26), 3).unwrap(), date(2026, 3, 1));
        assert_eq!(add_days(date(2026, 2, 26), 0).unwrap(), date(2026, 2, 26));
        assert!(add_days(NaiveDate::MAX, 1).is_err());
    }

    #[test]
    fn test_day_part_buckets() {
        assert_eq!(DayPart::of(time(0, 0)), DayPart::Morning);
        assert_eq!(DayPart::of(time(11, 59)), DayPart::Morning);
        assert_eq!(DayPart::of(time(12, 0)), DayPart::Afternoon);
        assert_eq!(DayPart::of(time(23, 59)), DayPart::Afternoon);
    }

    #[test]
    fn test_deadlines() {
        assert!(!DayPart::Morning.is_past_deadline(time(10, 0)));
        assert!(DayPart::Morning.is_past_deadline(time(10, 1)));
        assert!(!DayPart::Afternoon.is_past_deadline(time(14, 59)));
        assert!(DayPart::Afternoon.is_past_deadline(time(15, 30)));
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let naive = date(2026, 2, 28).and_time(time(9, 15));
        assert_eq!(parse_timestamp("2026-02-28T09:15:00"), Some(naive));
        assert_eq!(parse_timestamp("2026-02-28T09:15:00.000"), Some(naive));

        let utc = date(2026, 2, 28).and_time(time(9, 15)).and_utc();
        assert_eq!(
            parse_timestamp("2026-02-28T09:15:00.000Z"),
            Some(utc.with_timezone(&Local).naive_local())
        );
        assert_eq!(
            from_epoch_millis(utc.timestamp_millis()),
            Some(utc.with_timezone(&Local).naive_local())
        );

        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(from_epoch_millis(i64::MAX), None);
    }

    #[test]
    fn test_fixed_clock() {
        let now = date(2026, 2, 28).and_time(time(9, 30));
        let clock = FixedClock(now);
        assert_eq!(clock.now(), now);
        assert_eq!(clock.today(), date(2026, 2, 28));
    }
}
