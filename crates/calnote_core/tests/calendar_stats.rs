use calnote_core::service::calendar::{step, week_days};
use calnote_core::service::stats::{month_buckets, notes_on_day};
use calnote_core::{month_grid, month_metrics, CalendarView, Note, NoteDraft};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

fn note_on(month: u32, day: u32, hour: u32) -> Note {
    let created = Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap();
    Note::from_draft(NoteDraft::new(format!("{month}-{day}"), ""), created)
}

fn now() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-02-15T12:00:00Z").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn month_metrics_summarize_the_visible_month() {
    let notes = vec![
        note_on(1, 31, 9),
        note_on(2, 1, 9),
        note_on(2, 5, 9),
        note_on(2, 5, 15),
        note_on(2, 12, 9),
        note_on(2, 13, 9),
        note_on(2, 14, 9),
        note_on(2, 15, 9),
    ];

    let metrics = month_metrics(&notes, 2024, 2, now()).unwrap();
    assert_eq!(metrics.total_notes, 7);
    assert!((metrics.notes_per_day - 7.0 / 29.0).abs() < f64::EPSILON);
    assert_eq!(metrics.most_active_day, Some(5));
    assert_eq!(metrics.current_streak, 4);
    assert_eq!(metrics.this_week, 4);
    assert_eq!(metrics.last_week, 2);
    assert_eq!(metrics.weekly_change_percent, 100);
}

#[test]
fn most_active_day_prefers_earliest_and_empty_last_week_reports_zero() {
    let notes = vec![note_on(2, 3, 9), note_on(2, 13, 9)];

    let metrics = month_metrics(&notes, 2024, 2, now()).unwrap();
    assert_eq!(metrics.most_active_day, Some(3));
    assert_eq!(metrics.last_week, 0);
    assert_eq!(metrics.this_week, 1);
    assert_eq!(metrics.weekly_change_percent, 0);
    assert_eq!(metrics.current_streak, 0);
}

#[test]
fn empty_or_invalid_month() {
    let metrics = month_metrics(&[], 2024, 3, now()).unwrap();
    assert_eq!(metrics.total_notes, 0);
    assert_eq!(metrics.most_active_day, None);
    assert_eq!(metrics.notes_per_day, 0.0);

    assert!(month_metrics(&[], 2024, 0, now()).is_none());
}

#[test]
fn day_lookup_uses_local_calendar() {
    let notes = vec![note_on(2, 29, 22), note_on(3, 1, 9)];
    let utc = FixedOffset::east_opt(0).unwrap();
    let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();

    assert_eq!(notes_on_day(&notes, date(2024, 3, 1), &utc).len(), 1);
    assert_eq!(notes_on_day(&notes, date(2024, 3, 1), &plus_three).len(), 2);
    assert!(month_buckets(&notes, 2024, 2, &plus_three).is_empty());
}

#[test]
fn grid_and_navigation_agree() {
    let grid = month_grid(2024, 9).unwrap();
    // 2024-09-01 is a Sunday.
    assert_eq!(grid.leading_blanks, 0);
    assert_eq!(grid.days_in_month, 30);

    let next = step(date(2024, 9, 30), CalendarView::Month, 1).unwrap();
    assert_eq!(next, date(2024, 10, 30));
    let back = step(next, CalendarView::Year, -1).unwrap();
    assert_eq!(back, date(2023, 10, 30));
    assert_eq!(week_days(date(2024, 9, 1))[0], date(2024, 9, 1));
}
