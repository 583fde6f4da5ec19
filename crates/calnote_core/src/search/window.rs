//! Date-range windows for creation-time filtering.
//!
//! # Invariants
//! - Relative ranges are resolved against a caller-supplied reference instant
//!   and use the calendar of that instant's UTC offset.
//! - Relative windows end at the reference instant (inclusive).
//! - Explicit bounds are inclusive; either end may be open.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, TimeZone, Utc};

/// Creation-time range selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateRange {
    #[default]
    All,
    /// Local midnight today to now.
    Today,
    /// Most recent Sunday midnight to now.
    Week,
    /// First of the current month to now.
    Month,
    /// First day of the current three-month block to now.
    Quarter,
    /// January 1st of the current year to now.
    Year,
    /// Explicit inclusive bounds.
    Between {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
}

impl DateRange {
    /// Parses a named range; unknown names mean no filtering.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "today" => Self::Today,
            "week" => Self::Week,
            "month" => Self::Month,
            "quarter" => Self::Quarter,
            "year" => Self::Year,
            _ => Self::All,
        }
    }

    pub fn between(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self::Between { start, end }
    }
}

/// Resolved instant interval; `None` bounds are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateWindow {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Inclusive on both ends.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| instant >= start)
            && self.end.map_or(true, |end| instant <= end)
    }
}

/// Resolves a range into concrete bounds relative to `now`.
pub fn resolve_window(range: &DateRange, now: DateTime<FixedOffset>) -> DateWindow {
    let today = now.date_naive();
    let first_day = match range {
        DateRange::All => return DateWindow::unbounded(),
        DateRange::Between { start, end } => {
            return DateWindow {
                start: *start,
                end: *end,
            }
        }
        DateRange::Today => Some(today),
        DateRange::Week => {
            today.checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_sunday())))
        }
        DateRange::Month => today.with_day(1),
        DateRange::Quarter => {
            NaiveDate::from_ymd_opt(today.year(), today.month0() / 3 * 3 + 1, 1)
        }
        DateRange::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1),
    };

    let start = first_day.and_then(|day| local_midnight(day, now.offset()));
    DateWindow {
        start,
        end: Some(now.with_timezone(&Utc)),
    }
}

/// Local midnight of `day` in `offset`, as a UTC instant.
pub fn local_midnight(day: NaiveDate, offset: &FixedOffset) -> Option<DateTime<Utc>> {
    let naive = day.and_hms_opt(0, 0, 0)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::{resolve_window, DateRange, DateWindow};
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn unknown_names_parse_as_all() {
        assert_eq!(DateRange::parse("fortnight"), DateRange::All);
        assert_eq!(DateRange::parse(" Month "), DateRange::Month);
        assert_eq!(
            resolve_window(&DateRange::parse("nope"), at("2024-02-15T12:00:00Z")),
            DateWindow::unbounded()
        );
    }

    #[test]
    fn week_starts_on_most_recent_sunday() {
        // 2024-02-15 is a Thursday.
        let window = resolve_window(&DateRange::Week, at("2024-02-15T12:00:00Z"));
        assert_eq!(window.start, Some(utc(2024, 2, 11, 0)));
        assert_eq!(window.end, Some(utc(2024, 2, 15, 12)));
    }

    #[test]
    fn week_on_sunday_starts_same_day() {
        let window = resolve_window(&DateRange::Week, at("2024-02-11T08:00:00Z"));
        assert_eq!(window.start, Some(utc(2024, 2, 11, 0)));
    }

    #[test]
    fn quarter_and_year_align_to_calendar() {
        let now = at("2024-05-20T09:00:00Z");
        assert_eq!(
            resolve_window(&DateRange::Quarter, now).start,
            Some(utc(2024, 4, 1, 0))
        );
        assert_eq!(
            resolve_window(&DateRange::Year, now).start,
            Some(utc(2024, 1, 1, 0))
        );
    }

    #[test]
    fn today_uses_local_midnight_of_offset() {
        let window = resolve_window(&DateRange::Today, at("2024-02-15T01:30:00+02:00"));
        assert_eq!(window.start, Some(utc(2024, 2, 14, 22)));
    }

    #[test]
    fn explicit_bounds_are_inclusive_and_may_be_open() {
        let window = resolve_window(
            &DateRange::between(Some(utc(2024, 1, 10, 0)), None),
            at("2024-02-15T12:00:00Z"),
        );
        assert!(window.contains(utc(2024, 1, 10, 0)));
        assert!(!window.contains(utc(2024, 1, 9, 23)));
        assert!(window.contains(utc(2030, 1, 1, 0)));
    }
}
