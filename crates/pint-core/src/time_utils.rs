//! Clock and calendar helpers.
//!
//! Chat exports carry naive wall-clock timestamps. Everything the analyzer
//! computes (weekday, hour, "today", start of week) works on those naive
//! values; the only timezone conversion happens here, when the system clock
//! or an offset-carrying `--now` is turned into chat-local wall time.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{ChatError, Result};

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|err| {
        warn!("Could not detect system timezone ({}), using UTC", err);
        "UTC".to_string()
    })
}

// ── ChatClock ─────────────────────────────────────────────────────────────────

/// Produces reference times in the chat's wall-clock timezone.
#[derive(Debug, Clone, Copy)]
pub struct ChatClock {
    tz: Tz,
}

impl ChatClock {
    /// Create a clock for the given IANA timezone name.
    pub fn new(tz_name: &str) -> Result<Self> {
        tz_name
            .parse::<Tz>()
            .map(|tz| Self { tz })
            .map_err(|_| ChatError::InvalidTimezone(tz_name.to_string()))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Current wall-clock time in the chat timezone.
    pub fn now(&self) -> NaiveDateTime {
        self.to_wall_clock(Utc::now())
    }

    /// Convert an instant into chat-local wall time.
    pub fn to_wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }

    /// Parse a `--now` override.
    ///
    /// RFC 3339 values (with an offset) are converted into the chat timezone.
    /// Naive values are taken as chat-local already. A bare date means
    /// midnight.
    pub fn parse_reference_time(&self, s: &str) -> Result<NaiveDateTime> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(self.to_wall_clock(dt.with_timezone(&Utc)));
        }

        const FORMATS: &[&str] = &[
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y-%m-%dT%H:%M",
        ];
        for fmt in FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(naive);
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(date.and_time(NaiveTime::MIN));
        }

        Err(ChatError::InvalidReferenceTime(s.to_string()))
    }
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

/// Midnight of the most recent Sunday at or before `now`.
///
/// Clamps to the earliest representable date when that Sunday would fall
/// before it.
pub fn start_of_week(now: NaiveDateTime) -> NaiveDateTime {
    let offset = u64::from(now.weekday().num_days_from_sunday());
    now.date()
        .checked_sub_days(Days::new(offset))
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
}

/// Weekday bucket index, `0` = Sunday.
pub fn weekday_index(ts: NaiveDateTime) -> usize {
    ts.weekday().num_days_from_sunday() as usize
}

/// Format a post time as `"1 Jun 2024, 12:00"`.
pub fn format_latest_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%-d %b %Y, %H:%M").to_string()
}

/// Format a calendar day as `"1 Jun 2024"`.
pub fn format_day(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Chart label for an hour bucket, e.g. `"9:00"`.
pub fn hour_label(hour: u32) -> String {
    format!("{}:00", hour)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike, Weekday};

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_get_system_timezone_non_empty() {
        assert!(!get_system_timezone().is_empty());
    }

    #[test]
    fn test_chat_clock_known_timezone() {
        let clock = ChatClock::new("Europe/London").unwrap();
        assert_eq!(clock.timezone(), chrono_tz::Europe::London);
    }

    #[test]
    fn test_chat_clock_rejects_unknown() {
        let err = ChatClock::new("Not/AZone").unwrap_err();
        assert!(matches!(err, ChatError::InvalidTimezone(name) if name == "Not/AZone"));
    }

    #[test]
    fn test_to_wall_clock_applies_offset() {
        let clock = ChatClock::new("Europe/London").unwrap();
        // BST is UTC+1 in June.
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 22, 30, 0).unwrap();
        assert_eq!(clock.to_wall_clock(instant), dt(2024, 6, 1, 23, 30, 0));
    }

    #[test]
    fn test_to_wall_clock_crosses_midnight() {
        let clock = ChatClock::new("Asia/Tokyo").unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();
        let local = clock.to_wall_clock(instant);
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(local.hour(), 5);
    }

    #[test]
    fn test_parse_reference_time_naive() {
        let clock = ChatClock::new("UTC").unwrap();
        assert_eq!(
            clock.parse_reference_time("2024-06-01 23:00:00").unwrap(),
            dt(2024, 6, 1, 23, 0, 0)
        );
        assert_eq!(
            clock.parse_reference_time("2024-06-01T08:15").unwrap(),
            dt(2024, 6, 1, 8, 15, 0)
        );
    }

    #[test]
    fn test_parse_reference_time_date_only_is_midnight() {
        let clock = ChatClock::new("UTC").unwrap();
        assert_eq!(
            clock.parse_reference_time("2024-06-01").unwrap(),
            dt(2024, 6, 1, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_reference_time_rfc3339_converted() {
        let clock = ChatClock::new("Europe/London").unwrap();
        assert_eq!(
            clock
                .parse_reference_time("2024-06-01T22:00:00Z")
                .unwrap(),
            dt(2024, 6, 1, 23, 0, 0)
        );
    }

    #[test]
    fn test_parse_reference_time_invalid() {
        let clock = ChatClock::new("UTC").unwrap();
        let err = clock.parse_reference_time("last tuesday").unwrap_err();
        assert!(matches!(err, ChatError::InvalidReferenceTime(_)));
    }

    #[test]
    fn test_start_of_week_midweek() {
        // 2024-06-05 is a Wednesday; the previous Sunday is 2024-06-02.
        let now = dt(2024, 6, 5, 14, 30, 0);
        assert_eq!(start_of_week(now), dt(2024, 6, 2, 0, 0, 0));
    }

    #[test]
    fn test_start_of_week_on_sunday_is_same_day() {
        let now = dt(2024, 6, 2, 18, 0, 0);
        assert_eq!(now.weekday(), Weekday::Sun);
        assert_eq!(start_of_week(now), dt(2024, 6, 2, 0, 0, 0));
    }

    #[test]
    fn test_start_of_week_saturday_crosses_month() {
        // 2024-06-01 is a Saturday; the week began on 2024-05-26.
        let now = dt(2024, 6, 1, 23, 0, 0);
        assert_eq!(start_of_week(now), dt(2024, 5, 26, 0, 0, 0));
    }

    #[test]
    fn test_start_of_week_clamps_at_earliest_date() {
        let now = NaiveDate::MIN.and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(start_of_week(now), NaiveDate::MIN.and_time(NaiveTime::MIN));
    }

    #[test]
    fn test_start_of_week_far_past_reference_time() {
        let clock = ChatClock::new("UTC").unwrap();
        let now = clock.parse_reference_time("-262143-01-01").unwrap();
        assert!(start_of_week(now) <= now);
    }

    #[test]
    fn test_weekday_index_sunday_first() {
        assert_eq!(weekday_index(dt(2024, 6, 2, 0, 0, 0)), 0);
        assert_eq!(weekday_index(dt(2024, 6, 1, 0, 0, 0)), 6);
    }

    #[test]
    fn test_format_latest_timestamp() {
        assert_eq!(
            format_latest_timestamp(dt(2024, 6, 1, 9, 5, 42)),
            "1 Jun 2024, 09:05"
        );
        assert_eq!(
            format_latest_timestamp(dt(2023, 12, 25, 23, 59, 0)),
            "25 Dec 2023, 23:59"
        );
    }

    #[test]
    fn test_format_day() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(format_day(date), "1 Jun 2024");
    }

    #[test]
    fn test_hour_label() {
        assert_eq!(hour_label(0), "0:00");
        assert_eq!(hour_label(23), "23:00");
    }
}
