//! DateTime display utilities.
//!
//! Wrapper types for formatting timestamps and durations consistently.

use std::fmt;

use jiff::{tz::TimeZone, SignedDuration, Timestamp};

/// A wrapper around `Timestamp` that formats in the system time zone.
///
/// # Format
///
/// `YYYY-MM-DD HH:MM:SS TZ`, 24-hour clock, zero-padded, with the time zone
/// abbreviation (e.g. UTC, CET, JST).
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ZonedDateTime(self.0, &TimeZone::system()))
    }
}

/// Like [`LocalDateTime`] but in an explicit time zone.
pub struct ZonedDateTime<'a>(pub &'a Timestamp, pub &'a TimeZone);

impl<'a> fmt::Display for ZonedDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_zoned(self.1.clone()).strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Compact `dd.mm.yy, HH:MM` form used in the plain-text export.
///
/// ```rust
/// use jiff::{tz::TimeZone, Timestamp};
/// use levain_core::display::ShortDateTime;
///
/// let ts: Timestamp = "2026-10-17T06:30:00Z".parse().unwrap();
/// assert_eq!(ShortDateTime(&ts, &TimeZone::UTC).to_string(), "17.10.26, 06:30");
/// ```
pub struct ShortDateTime<'a>(pub &'a Timestamp, pub &'a TimeZone);

impl<'a> fmt::Display for ShortDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_zoned(self.1.clone()).strftime("%d.%m.%y, %H:%M")
        )
    }
}

/// Friendly duration such as `1h 30m`.
pub struct FriendlyDuration(pub SignedDuration);

impl fmt::Display for FriendlyDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoned_date_time_format() {
        let ts: Timestamp = "2022-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(
            ZonedDateTime(&ts, &TimeZone::UTC).to_string(),
            "2022-01-01 00:00:00 UTC"
        );
    }

    #[test]
    fn test_friendly_duration() {
        assert_eq!(FriendlyDuration(SignedDuration::from_mins(90)).to_string(), "1h 30m");
        assert_eq!(FriendlyDuration(SignedDuration::from_mins(45)).to_string(), "45m");
    }
}
