//! Wall-clock formatting for the face
//!
//! Everything works from epoch milliseconds plus a fixed UTC offset, so the
//! engine never needs a platform clock or a time zone database.

use core::fmt::Write;

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use heapless::String;

/// "HH:mm" or "hh:mm"
pub type TimeText = String<5>;
/// "WED, SEP 30 2026"
pub type DateText = String<24>;

const WEEKDAYS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];
const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// A point in time seen from the wearer's zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime(DateTime<FixedOffset>);

impl LocalTime {
    /// `None` when the offset is out of range (beyond ±24h) or the
    /// timestamp is outside chrono's calendar.
    pub fn at(now_ms: i64, utc_offset_s: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(utc_offset_s)?;
        let utc = DateTime::from_timestamp_millis(now_ms)?;
        Some(Self(utc.with_timezone(&offset)))
    }

    /// Hours and minutes, zero padded. 12-hour time runs 01..=12.
    pub fn time_text(&self, is_24_hour: bool) -> TimeText {
        let hour = if is_24_hour {
            self.0.hour()
        } else {
            self.0.hour12().1
        };
        let mut out = String::new();
        let _ = write!(out, "{:02}:{:02}", hour, self.0.minute());
        out
    }

    pub fn is_pm(&self) -> bool {
        self.0.hour12().0
    }

    /// Upper-case "<DOW>, <MON> <dd> <yyyy>"
    pub fn date_text(&self) -> DateText {
        let weekday = WEEKDAYS[self.0.weekday().num_days_from_monday() as usize];
        let month = MONTHS[self.0.month0() as usize];
        let mut out = String::new();
        let _ = write!(
            out,
            "{}, {} {:02} {}",
            weekday,
            month,
            self.0.day(),
            self.0.year()
        );
        out
    }
}
