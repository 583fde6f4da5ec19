//! Calendar grid geometry and navigation.
//!
//! Weeks start on Sunday. Month steps clamp the day of month (Jan 31 + 1
//! month = Feb 29 in a leap year).

use chrono::{Datelike, Days, Months, NaiveDate};

/// Calendar zoom level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Year,
}

/// Month layout for a Sunday-first grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st (weekday of the 1st, Sunday = 0).
    pub leading_blanks: u32,
    pub days_in_month: u32,
}

impl MonthGrid {
    /// Every date of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.days_in_month).filter_map(|day| NaiveDate::from_ymd_opt(self.year, self.month, day))
    }
}

/// Number of days in `month`; `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Grid geometry for one month.
pub fn month_grid(year: i32, month: u32) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(MonthGrid {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days_in_month: days_in_month(year, month)?,
    })
}

/// Sunday on or before `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day.checked_sub_days(Days::new(u64::from(day.weekday().num_days_from_sunday())))
        .unwrap_or(day)
}

/// The seven dates of the week containing `day`, Sunday first.
pub fn week_days(day: NaiveDate) -> Vec<NaiveDate> {
    week_start(day).iter_days().take(7).collect()
}

/// Moves `date` by `delta` views; `None` when leaving chrono's range.
pub fn step(date: NaiveDate, view: CalendarView, delta: i32) -> Option<NaiveDate> {
    let magnitude = delta.unsigned_abs();
    match view {
        CalendarView::Month => shift_months(date, magnitude, delta < 0),
        CalendarView::Year => shift_months(date, magnitude.checked_mul(12)?, delta < 0),
        CalendarView::Week => {
            let days = Days::new(u64::from(magnitude) * 7);
            if delta < 0 {
                date.checked_sub_days(days)
            } else {
                date.checked_add_days(days)
            }
        }
    }
}

fn shift_months(date: NaiveDate, months: u32, backwards: bool) -> Option<NaiveDate> {
    if backwards {
        date.checked_sub_months(Months::new(months))
    } else {
        date.checked_add_months(Months::new(months))
    }
}
