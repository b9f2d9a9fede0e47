use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::config::MSK_OFFSET_HOURS;

/// Named shorthand for a date interval
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum DatePreset {
    #[default]
    Today,
    /// Trailing 24 hours, not aligned to calendar days
    Last24h,
    Week,
    Month,
    All,
    Custom,
}

impl DatePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Last24h => "24h",
            DatePreset::Week => "week",
            DatePreset::Month => "month",
            DatePreset::All => "all",
            DatePreset::Custom => "custom",
        }
    }

    /// Parses a preset tag. Unknown tags resolve to `Today`.
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "today" => DatePreset::Today,
            "24h" => DatePreset::Last24h,
            "week" => DatePreset::Week,
            "month" => DatePreset::Month,
            "all" => DatePreset::All,
            "custom" => DatePreset::Custom,
            other => {
                debug!(preset = other, "unknown date preset, using today");
                DatePreset::Today
            }
        }
    }
}

impl From<&str> for DatePreset {
    fn from(tag: &str) -> Self {
        DatePreset::parse(tag)
    }
}

impl From<String> for DatePreset {
    fn from(tag: String) -> Self {
        DatePreset::parse(&tag)
    }
}

impl From<DatePreset> for String {
    fn from(preset: DatePreset) -> Self {
        preset.as_str().to_string()
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed instant interval `[from, to]`
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }
}

fn msk_offset() -> Duration {
    Duration::hours(MSK_OFFSET_HOURS)
}

/// Calendar date in UTC+3 of the given instant
pub fn msk_date(instant: DateTime<Utc>) -> NaiveDate {
    (instant + msk_offset()).date_naive()
}

/// Instant of 00:00 UTC+3 on the given calendar date
pub fn msk_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc() - msk_offset()
}

pub fn start_of_day_msk(instant: DateTime<Utc>) -> DateTime<Utc> {
    msk_midnight(msk_date(instant))
}

/// Last millisecond of the UTC+3 day containing `instant`
pub fn end_of_day_msk(instant: DateTime<Utc>) -> DateTime<Utc> {
    start_of_day_msk(instant) + Duration::days(1) - Duration::milliseconds(1)
}

fn parse_calendar_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(value, error = %e, "ignoring malformed custom date");
            None
        }
    }
}

/// Resolves a preset into a closed interval relative to `now`.
///
/// `custom_from` and `custom_to` are `YYYY-MM-DD` dates and are only read for
/// [`DatePreset::Custom`]. A custom range missing either date falls back to
/// today. Reversed custom dates are swapped so that `from <= to` holds.
pub fn resolve_range(
    preset: DatePreset,
    custom_from: Option<&str>,
    custom_to: Option<&str>,
    now: DateTime<Utc>,
) -> DateRange {
    let today_start = start_of_day_msk(now);
    let today_end = end_of_day_msk(now);
    let today = DateRange {
        from: today_start,
        to: today_end,
    };

    match preset {
        DatePreset::Today => today,
        DatePreset::Last24h => DateRange {
            from: now - Duration::hours(24),
            to: now,
        },
        DatePreset::Week => DateRange {
            from: today_start - Duration::days(6),
            to: today_end,
        },
        DatePreset::Month => {
            let date = msk_date(now);
            let first = date.with_day(1).unwrap_or(date);
            DateRange {
                from: msk_midnight(first),
                to: today_end,
            }
        }
        DatePreset::All => {
            let from = NaiveDate::from_ymd_opt(2020, 1, 1)
                .map(msk_midnight)
                .unwrap_or(today_start);
            DateRange {
                from: from.min(today_start),
                to: today_end,
            }
        }
        DatePreset::Custom => {
            match (
                parse_calendar_date(custom_from),
                parse_calendar_date(custom_to),
            ) {
                (Some(from), Some(to)) => {
                    let (first, last) = if from <= to { (from, to) } else { (to, from) };
                    DateRange {
                        from: msk_midnight(first),
                        to: msk_midnight(last) + Duration::days(1) - Duration::milliseconds(1),
                    }
                }
                _ => today,
            }
        }
    }
}

/// [`resolve_range`] against the wall clock
pub fn resolve_range_now(
    preset: DatePreset,
    custom_from: Option<&str>,
    custom_to: Option<&str>,
) -> DateRange {
    resolve_range(preset, custom_from, custom_to, Utc::now())
}

/// ISO 8601 forms with an explicit offset, `+03:00` or `+0300`
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];
/// ISO 8601 forms without an offset, read as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ISO 8601 timestamp.
///
/// Accepts RFC 3339, date-times with a basic (`+0300`) or extended offset,
/// minute precision, and `Z` or no designator at all (UTC). A bare
/// `YYYY-MM-DD` date is UTC midnight.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Some(instant) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
    {
        return Some(instant.with_timezone(&Utc));
    }

    let naive = value
        .strip_suffix('Z')
        .or_else(|| value.strip_suffix('z'))
        .unwrap_or(value);
    if let Some(instant) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
    {
        return Some(instant.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// True when `timestamp` falls within `range`, both ends inclusive.
/// Timestamps that don't parse are treated as out of range.
pub fn is_in_range(timestamp: &str, range: &DateRange) -> bool {
    match parse_timestamp(timestamp) {
        Some(instant) => range.contains(instant),
        None => {
            debug!(timestamp, "excluding record with malformed timestamp");
            false
        }
    }
}

/// Records that carry an ISO 8601 timestamp
pub trait Dated {
    fn timestamp(&self) -> &str;
}

impl Dated for crate::models::Purchase {
    fn timestamp(&self) -> &str {
        &self.date
    }
}

impl Dated for crate::models::ChartPoint {
    fn timestamp(&self) -> &str {
        &self.date
    }
}

/// Keeps the records whose timestamp is within `range`, in input order
pub fn filter_in_range<T: Dated + Clone>(records: &[T], range: &DateRange) -> Vec<T> {
    records
        .iter()
        .filter(|record| is_in_range(record.timestamp(), range))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_today_is_msk_calendar_day() {
        // 22:30 UTC on March 10 is already March 11 in Moscow
        let range = resolve_range(DatePreset::Today, None, None, utc(2025, 3, 10, 22, 30));
        assert_eq!(range.from, utc(2025, 3, 10, 21, 0));
        assert_eq!(
            range.to,
            utc(2025, 3, 11, 21, 0) - Duration::milliseconds(1)
        );
    }

    #[test]
    fn test_last_24h_is_not_calendar_aligned() {
        let now = utc(2025, 3, 10, 12, 17);
        let range = resolve_range(DatePreset::Last24h, None, None, now);
        assert_eq!(range.from, utc(2025, 3, 9, 12, 17));
        assert_eq!(range.to, now);
    }

    #[test]
    fn test_month_starts_on_first_msk_day() {
        // 21:30 UTC on Feb 28 is March 1 in Moscow
        let range = resolve_range(DatePreset::Month, None, None, utc(2025, 2, 28, 21, 30));
        assert_eq!(range.from, utc(2025, 2, 28, 21, 0));
        assert_eq!(range.to, utc(2025, 3, 1, 21, 0) - Duration::milliseconds(1));
    }

    #[test]
    fn test_custom_range_covers_whole_days() {
        let range = resolve_range(
            DatePreset::Custom,
            Some("2025-01-05"),
            Some("2025-01-07"),
            utc(2025, 3, 10, 12, 0),
        );
        assert_eq!(range.from, utc(2025, 1, 4, 21, 0));
        assert_eq!(range.to, utc(2025, 1, 7, 21, 0) - Duration::milliseconds(1));
    }

    #[test]
    fn test_custom_range_missing_date_falls_back_to_today() {
        let now = utc(2025, 3, 10, 12, 0);
        let today = resolve_range(DatePreset::Today, None, None, now);
        assert_eq!(
            resolve_range(DatePreset::Custom, Some("2025-01-05"), None, now),
            today
        );
        assert_eq!(
            resolve_range(DatePreset::Custom, Some("05.01.2025"), Some("2025-01-07"), now),
            today
        );
    }

    #[test]
    fn test_reversed_custom_dates_are_swapped() {
        let now = utc(2025, 3, 10, 12, 0);
        let forward = resolve_range(DatePreset::Custom, Some("2025-01-05"), Some("2025-01-07"), now);
        let reversed = resolve_range(DatePreset::Custom, Some("2025-01-07"), Some("2025-01-05"), now);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_unknown_preset_is_today() {
        assert_eq!(DatePreset::parse("fortnight"), DatePreset::Today);
        assert_eq!(DatePreset::from("24h"), DatePreset::Last24h);
        let preset: DatePreset = serde_json::from_str("\"yesterday\"").unwrap();
        assert_eq!(preset, DatePreset::Today);
    }

    #[test]
    fn test_is_in_range_inclusive_bounds() {
        let range = resolve_range(DatePreset::Today, None, None, utc(2025, 3, 10, 12, 0));
        assert!(is_in_range("2025-03-09T21:00:00Z", &range));
        assert!(is_in_range("2025-03-10T20:59:59.999Z", &range));
        assert!(!is_in_range("2025-03-10T21:00:00Z", &range));
        assert!(is_in_range("2025-03-10T15:00:00+03:00", &range));

        assert!(is_in_range("2025-03-10T10:00Z", &range));
        assert!(is_in_range("2025-03-10T10:00:00", &range));
        assert!(is_in_range("2025-03-10T10:00:00.000", &range));
        assert!(is_in_range("2025-03-10T10:00:00+0300", &range));
        assert!(is_in_range("2025-03-10T23:30+03:00", &range));
        assert!(!is_in_range("2025-03-10T21:00", &range));
        assert!(!is_in_range("2025-03-09T23:59:59+0300", &range));
    }

    #[test]
    fn test_parse_timestamp_iso_forms() {
        let expected = utc(2025, 3, 10, 7, 0);
        for value in [
            "2025-03-10T07:00:00.000Z",
            "2025-03-10T07:00Z",
            "2025-03-10T07:00:00",
            "2025-03-10T07:00",
            "2025-03-10T10:00:00+03:00",
            "2025-03-10T10:00:00.000+0300",
            "2025-03-10T10:00+03:00",
            " 2025-03-10T07:00:00z ",
        ] {
            assert_eq!(parse_timestamp(value), Some(expected), "{}", value);
        }
        assert_eq!(parse_timestamp("2025-03-10"), Some(utc(2025, 3, 10, 0, 0)));
        assert_eq!(parse_timestamp("2025-03-10T07"), None);
        assert_eq!(parse_timestamp("2025-03-10T07:00:00+3"), None);
    }

    #[test]
    fn test_is_in_range_fails_closed() {
        let range = resolve_range(DatePreset::All, None, None, utc(2025, 3, 10, 12, 0));
        assert!(!is_in_range("not a date", &range));
        assert!(!is_in_range("", &range));
        assert!(is_in_range("2024-06-01", &range));
    }
}
