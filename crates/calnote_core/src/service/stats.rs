//! Dashboard counters and calendar bucketing.
//!
//! # Invariants
//! - Calendar days are local days in the supplied UTC offset.
//! - Weeks start on Sunday.
//! - Every function is pure over its inputs.

use crate::model::note::Note;
use crate::service::calendar::{days_in_month, week_start};
use chrono::{DateTime, Datelike, Days, Duration, FixedOffset, NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Dashboard header counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_notes: usize,
    pub favorite_notes: usize,
    /// Created within the trailing seven days.
    pub notes_this_week: usize,
    pub unique_tags: usize,
}

/// Counters for the calendar month currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthMetrics {
    pub total_notes: usize,
    /// `total_notes / days in month`.
    pub notes_per_day: f64,
    /// Day of month with the most notes; earliest day wins ties.
    pub most_active_day: Option<u32>,
    /// Consecutive days with a note, ending today (or yesterday).
    pub current_streak: u32,
    pub this_week: usize,
    pub last_week: usize,
    /// Rounded percent change from last week; 0 when last week was empty.
    pub weekly_change_percent: i64,
}

pub fn dashboard_stats(notes: &[Note], now: DateTime<Utc>) -> DashboardStats {
    let week_ago = now - Duration::days(7);
    let unique_tags: HashSet<&str> = notes
        .iter()
        .flat_map(|note| note.tags.iter().map(String::as_str))
        .collect();

    DashboardStats {
        total_notes: notes.len(),
        favorite_notes: notes.iter().filter(|note| note.is_favorite).count(),
        notes_this_week: notes.iter().filter(|note| note.created_at >= week_ago).count(),
        unique_tags: unique_tags.len(),
    }
}

/// Local calendar day a note was created on.
pub fn local_day(note: &Note, offset: &FixedOffset) -> NaiveDate {
    note.created_at.with_timezone(offset).date_naive()
}

/// Notes created on `day`, in input order.
pub fn notes_on_day<'a>(notes: &'a [Note], day: NaiveDate, offset: &FixedOffset) -> Vec<&'a Note> {
    notes
        .iter()
        .filter(|note| local_day(note, offset) == day)
        .collect()
}

/// Notes of one month grouped by creation day; empty days are absent.
pub fn month_buckets<'a>(
    notes: &'a [Note],
    year: i32,
    month: u32,
    offset: &FixedOffset,
) -> BTreeMap<NaiveDate, Vec<&'a Note>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&'a Note>> = BTreeMap::new();
    for note in notes {
        let day = local_day(note, offset);
        if day.year() == year && day.month() == month {
            buckets.entry(day).or_default().push(note);
        }
    }
    buckets
}

/// Productivity metrics for `year`/`month`, relative to `now`.
///
/// Returns `None` for an invalid month.
pub fn month_metrics(
    notes: &[Note],
    year: i32,
    month: u32,
    now: DateTime<FixedOffset>,
) -> Option<MonthMetrics> {
    let days = days_in_month(year, month)?;
    let offset = now.offset();
    let buckets = month_buckets(notes, year, month, offset);
    let total_notes: usize = buckets.values().map(Vec::len).sum();

    let mut most_active: Option<(NaiveDate, usize)> = None;
    for (day, bucket) in &buckets {
        if most_active.map_or(true, |(_, best)| bucket.len() > best) {
            most_active = Some((*day, bucket.len()));
        }
    }

    let today = now.date_naive();
    let this_week_start = week_start(today);
    let last_week_start = this_week_start.checked_sub_days(Days::new(7))?;
    let mut this_week = 0;
    let mut last_week = 0;
    for note in notes {
        let day = local_day(note, offset);
        if day >= this_week_start && day <= today {
            this_week += 1;
        } else if day >= last_week_start && day < this_week_start {
            last_week += 1;
        }
    }
    let weekly_change_percent = if last_week > 0 {
        ((this_week as f64 - last_week as f64) / last_week as f64 * 100.0).round() as i64
    } else {
        0
    };

    Some(MonthMetrics {
        total_notes,
        notes_per_day: total_notes as f64 / f64::from(days),
        most_active_day: most_active.map(|(day, _)| day.day()),
        current_streak: current_streak(notes, today, offset),
        this_week,
        last_week,
        weekly_change_percent,
    })
}

/// Consecutive local days with at least one note.
///
/// Counting starts at `today`, or at yesterday when today has no note yet.
pub fn current_streak(notes: &[Note], today: NaiveDate, offset: &FixedOffset) -> u32 {
    let days: BTreeSet<NaiveDate> = notes.iter().map(|note| local_day(note, offset)).collect();

    let mut cursor = if days.contains(&today) {
        Some(today)
    } else {
        today.pred_opt().filter(|yesterday| days.contains(yesterday))
    };

    let mut streak = 0;
    while let Some(day) = cursor.filter(|day| days.contains(day)) {
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::{current_streak, dashboard_stats, month_buckets};
    use crate::model::note::{Note, NoteDraft};
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    fn note_at(day: u32, hour: u32) -> Note {
        let created = Utc.with_ymd_and_hms(2024, 2, day, hour, 0, 0).unwrap();
        Note::from_draft(NoteDraft::new("n", "c").with_tags(["a", "b"]), created)
    }

    #[test]
    fn dashboard_counts_trailing_week_and_unique_tags() {
        let notes = vec![note_at(1, 9), note_at(10, 9), note_at(14, 9)];
        let now = Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap();
        let stats = dashboard_stats(&notes, now);
        assert_eq!(stats.total_notes, 3);
        assert_eq!(stats.notes_this_week, 2);
        assert_eq!(stats.unique_tags, 2);
        assert_eq!(stats.favorite_notes, 0);
    }

    #[test]
    fn buckets_follow_local_offset() {
        // 23:00 UTC on Feb 1 is Feb 2 in UTC+2.
        let notes = vec![note_at(1, 23)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let buckets = month_buckets(&notes, 2024, 2, &plus_two);
        let day = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        assert_eq!(buckets.get(&day).map(Vec::len), Some(1));
    }

    #[test]
    fn streak_may_end_yesterday() {
        let notes = vec![note_at(12, 9), note_at(13, 9), note_at(14, 9), note_at(10, 9)];
        let utc = FixedOffset::east_opt(0).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        assert_eq!(current_streak(&notes, today, &utc), 3);

        let later = NaiveDate::from_ymd_opt(2024, 2, 17).unwrap();
        assert_eq!(current_streak(&notes, later, &utc), 0);
    }
}
