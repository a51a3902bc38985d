//! Percentages and averages for the dashboard tables.
//! Every division is guarded: an empty denominator yields `"0.0"`.

use crate::core::aggregate::HourWindow;
use crate::core::calendar;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceEvent;
use crate::models::period::WeekPartition;
use crate::utils::formatting::one_decimal;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// `numerator / denominator`, or `0.0` when the denominator is zero.
pub fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Percentage with one decimal, e.g. `"33.3"`.
pub fn percentage(numerator: u64, denominator: u64) -> String {
    one_decimal(ratio(numerator, denominator) * 100.0)
}

/// Average per day with one decimal, e.g. `"2.5"`.
pub fn average(count: u64, days: u64) -> String {
    one_decimal(ratio(count, days))
}

/// One row of the hour table: share of the period and average per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareRow {
    pub label: String,
    pub count: u32,
    pub percentage: String,
    pub average: String,
}

/// Hour-by-hour share of the check-ins dated within `[from, to]`.
///
/// Percentages are relative to every check-in of the period, including the
/// ones outside `window`; averages divide by `days`.
pub fn hourly_share(
    events: &[AttendanceEvent],
    window: HourWindow,
    from: NaiveDate,
    to: NaiveDate,
    days: u32,
) -> Vec<ShareRow> {
    let mut per_hour: BTreeMap<u32, u32> = BTreeMap::new();
    let mut total = 0u64;

    for ev in events.iter().filter(|e| from <= e.date && e.date <= to) {
        *per_hour.entry(ev.hour()).or_default() += 1;
        total += 1;
    }

    window
        .hours()
        .map(|h| {
            let count = per_hour.get(&h).copied().unwrap_or(0);
            ShareRow {
                label: HourWindow::label(h),
                count,
                percentage: percentage(u64::from(count), total),
                average: average(u64::from(count), u64::from(days)),
            }
        })
        .collect()
}

/// Hour table for one week partition; averages use the calendar days of the week.
pub fn hourly_share_for_week(
    events: &[AttendanceEvent],
    week: &WeekPartition,
    window: HourWindow,
) -> Vec<ShareRow> {
    hourly_share(events, window, week.start, week.end, week.days())
}

/// Hour table for a whole month; averages use the days of the month.
pub fn hourly_share_for_month(
    events: &[AttendanceEvent],
    year: i32,
    month: u32,
    window: HourWindow,
) -> AppResult<Vec<ShareRow>> {
    let (first, last) = calendar::month_bounds(year, month)?;
    let days = calendar::days_in_month(year, month)?;
    Ok(hourly_share(events, window, first, last, days))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekStatRow {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total: u32,
    pub business_days: u32,
    pub average: String,
    pub percentage: String,
}

/// Totals per week partition with the average per business day and the
/// share of the month.
pub fn weekly_stats(events: &[AttendanceEvent], weeks: &[WeekPartition]) -> Vec<WeekStatRow> {
    let totals: Vec<u32> = weeks
        .iter()
        .map(|w| events.iter().filter(|e| w.contains(e.date)).count() as u32)
        .collect();
    let month_total: u64 = totals.iter().map(|t| u64::from(*t)).sum();

    weeks
        .iter()
        .zip(totals)
        .map(|(w, total)| WeekStatRow {
            label: w.label(),
            start: w.start,
            end: w.end,
            total,
            business_days: w.business_days,
            average: average(u64::from(total), u64::from(w.business_days)),
            percentage: percentage(u64::from(total), month_total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::holiday::HolidaySet;
    use chrono::NaiveTime;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ev(date: NaiveDate, hh: u32) -> AttendanceEvent {
        AttendanceEvent::new("u", date, NaiveTime::from_hms_opt(hh, 5, 0).unwrap())
    }

    #[test]
    fn zero_denominators_yield_zero_strings() {
        assert_eq!(percentage(0, 0), "0.0");
        assert_eq!(percentage(7, 0), "0.0");
        assert_eq!(average(5, 0), "0.0");
        assert_eq!(ratio(3, 0), 0.0);
    }

    #[test]
    fn one_decimal_rounding() {
        assert_eq!(percentage(1, 3), "33.3");
        assert_eq!(percentage(2, 3), "66.7");
        assert_eq!(percentage(4, 4), "100.0");
        assert_eq!(average(7, 2), "3.5");
    }

    #[test]
    fn exact_halves_round_up() {
        // one check-in over a 4-day first partition
        assert_eq!(average(1, 4), "0.3");
        assert_eq!(average(5, 4), "1.3");
        assert_eq!(percentage(1, 16), "6.3");
        assert_eq!(percentage(1, 8), "12.5");
    }

    #[test]
    fn hourly_share_counts_out_of_window_hours_in_the_total() {
        let events = vec![
            ev(d(2026, 4, 1), 7),
            ev(d(2026, 4, 2), 7),
            ev(d(2026, 4, 3), 9),
            ev(d(2026, 4, 3), 23),
            ev(d(2026, 4, 20), 9), // outside the week
        ];
        let weeks = calendar::month_weeks(2026, 4, &HolidaySet::new()).unwrap();
        let rows = hourly_share_for_week(&events, &weeks[0], HourWindow::new(7, 21).unwrap());

        assert_eq!(rows.len(), 15);
        assert_eq!(rows[0].label, "07:00");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].percentage, "50.0");
        assert_eq!(rows[0].average, "0.5");
        assert_eq!(rows[2].count, 1);
        assert_eq!(rows[2].percentage, "25.0");
    }

    #[test]
    fn empty_month_has_all_zero_rows() {
        let rows = hourly_share_for_month(&[], 2026, 2, HourWindow::default()).unwrap();
        assert!(rows.iter().all(|r| r.count == 0 && r.percentage == "0.0" && r.average == "0.0"));
    }

    #[test]
    fn weekly_stats_guard_weeks_without_business_days() {
        // November 2025: week 1 is a lone Saturday.
        let weeks = calendar::month_weeks(2025, 11, &HolidaySet::new()).unwrap();
        let events = vec![ev(d(2025, 11, 1), 10), ev(d(2025, 11, 3), 10), ev(d(2025, 11, 4), 10)];

        let rows = weekly_stats(&events, &weeks);
        assert_eq!(rows[0].total, 1);
        assert_eq!(rows[0].business_days, 0);
        assert_eq!(rows[0].average, "0.0");
        assert_eq!(rows[0].percentage, "33.3");

        assert_eq!(rows[1].total, 2);
        assert_eq!(rows[1].average, "0.4");
    }
}
