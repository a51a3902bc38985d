//! Calendar partitioning: month bounds, week-of-month partitions,
//! holiday-aware business-day counts and rolling month windows.

use crate::errors::{AppError, AppResult};
use crate::models::holiday::HolidaySet;
use crate::models::period::{MonthKey, WeekPartition};
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Length of the month-of-year view.
pub const ROLLING_MONTHS: usize = 12;

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidMonth(format!("{year}-{month:02}"));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(invalid)?;

    Ok((first, last))
}

pub fn days_in_month(year: i32, month: u32) -> AppResult<u32> {
    let (_, last) = month_bounds(year, month)?;
    Ok(last.day())
}

/// Monday–Friday and not a holiday.
pub fn is_business_day(date: NaiveDate, holidays: &HolidaySet) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(&date)
}

/// Business days in `[start, end]`.
pub fn business_days(start: NaiveDate, end: NaiveDate, holidays: &HolidaySet) -> u32 {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_business_day(*d, holidays))
        .count() as u32
}

/// Split a month into weeks that close on Saturday.
///
/// Each week starts on the 1st or on the day after the previous week ended,
/// and ends on the next Saturday (or the same day when it is a Saturday),
/// clipped to the last day of the month.
pub fn month_weeks(year: i32, month: u32, holidays: &HolidaySet) -> AppResult<Vec<WeekPartition>> {
    let (first, last) = month_bounds(year, month)?;

    let mut weeks = Vec::new();
    let mut start = first;
    let mut index = 1;

    while start <= last {
        let to_saturday = 6 - start.weekday().num_days_from_sunday();
        let end = start
            .checked_add_days(Days::new(u64::from(to_saturday)))
            .map_or(last, |d| d.min(last));

        weeks.push(WeekPartition {
            index,
            start,
            end,
            business_days: business_days(start, end, holidays),
        });

        match end.succ_opt() {
            Some(next) => start = next,
            None => break,
        }
        index += 1;
    }

    Ok(weeks)
}

/// A free 7-day window starting at `start`.
///
/// No weekday or holiday exclusion applies here: `business_days` reports the
/// full day count.
pub fn custom_week(start: NaiveDate) -> AppResult<WeekPartition> {
    let end = start
        .checked_add_days(Days::new(6))
        .ok_or_else(|| AppError::InvalidDate(start.to_string()))?;

    Ok(WeekPartition {
        index: 1,
        start,
        end,
        business_days: 7,
    })
}

/// The last `count` months ending with the month of `now`, oldest first.
pub fn rolling_months(now: NaiveDate, count: usize) -> Vec<MonthKey> {
    let mut keys = Vec::with_capacity(count);
    let mut key = MonthKey::of(now);

    for _ in 0..count {
        keys.push(key);
        key = key.pred();
    }

    keys.reverse();
    keys
}

/// The partition that contains `date`, if any.
pub fn week_containing(weeks: &[WeekPartition], date: NaiveDate) -> Option<&WeekPartition> {
    weeks.iter().find(|w| w.contains(date))
}

/// The `count` days ending with `now`, oldest first.
pub fn trailing_days(now: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = std::iter::successors(Some(now), |d| d.pred_opt())
        .take(count)
        .collect();
    days.reverse();
    days
}
