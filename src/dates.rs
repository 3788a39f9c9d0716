//! Date normalization
//!
//! Log dates are plain calendar dates. They are anchored at local midnight
//! of one fixed UTC offset, chosen once per run, so parsing never depends on
//! the host clock.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};
use thiserror::Error;

/// A log date anchored to local midnight
pub type Instant = DateTime<FixedOffset>;

/// Date parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid calendar date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("UTC offset out of range: {minutes_west} minutes west")]
    InvalidOffset { minutes_west: i32 },
}

/// Minutes west of UTC for the host clock right now
pub fn local_minutes_west() -> i32 {
    -(Local::now().offset().local_minus_utc() / 60)
}

/// Convert minutes west of UTC into a "+HH:MM" / "-HH:MM" zone string.
///
/// The stored offset counts westward, so the printed sign is the opposite
/// one. A zero offset prints as "-00:00".
pub fn format_offset(minutes_west: i32) -> String {
    let sign = if minutes_west < 0 { '+' } else { '-' };
    let minutes = minutes_west.unsigned_abs();
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

/// Parse "YYYY-MM-DD" into the instant of local midnight at `offset`
pub fn parse_calendar_date(s: &str, offset: FixedOffset) -> Result<Instant, DateError> {
    let invalid = || DateError::InvalidDate {
        value: s.to_string(),
    };

    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;

    offset.from_local_datetime(&midnight).single().ok_or_else(invalid)
}

/// ISO calendar date of the instant in its own offset
pub fn format_iso_date(instant: &Instant) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// Locale-style display date, e.g. "Monday, 1/4/2016"
pub fn format_display_date(instant: &Instant) -> String {
    instant.format("%A, %-m/%-d/%Y").to_string()
}

/// Short axis label, e.g. "Jan 4"
pub fn format_axis_date(instant: &Instant) -> String {
    instant.format("%b %-d").to_string()
}

/// Holds the single UTC offset used for a whole rendering pass
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    minutes_west: i32,
    offset: FixedOffset,
}

impl DateNormalizer {
    pub fn new(minutes_west: i32) -> Result<Self, DateError> {
        let offset = minutes_west
            .checked_mul(60)
            .and_then(FixedOffset::west_opt)
            .ok_or(DateError::InvalidOffset { minutes_west })?;

        Ok(Self {
            minutes_west,
            offset,
        })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Zone string for display, e.g. "-05:00"
    pub fn zone(&self) -> String {
        format_offset(self.minutes_west)
    }

    pub fn parse(&self, s: &str) -> Result<Instant, DateError> {
        parse_calendar_date(s, self.offset)
    }
}
