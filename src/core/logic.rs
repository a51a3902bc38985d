use crate::core::aggregate::{BucketSpec, HourWindow, StatsView, aggregate};
use crate::core::calendar;
use crate::core::risk::{RiskRules, classify_all};
use crate::core::stats::{
    ShareRow, WeekStatRow, hourly_share_for_month, hourly_share_for_week, weekly_stats,
};
use crate::errors::{AppError, AppResult};
use crate::models::bucket::Bucket;
use crate::models::period::{MonthKey, WeekPartition};
use crate::models::risk::RiskVerdict;
use crate::models::snapshot::Snapshot;
use chrono::NaiveDate;
use std::fmt;

/// Period requested for the hour table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourPeriod {
    /// The week of the month containing this date, or the whole month when
    /// the date falls outside it.
    Current(NaiveDate),
    /// 1-based week of the month.
    Week(usize),
    Month,
    /// Free 7-day window starting at this date.
    From(NaiveDate),
}

/// Days an hour table actually covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourSpan {
    /// A week partition of the month; the flag marks the current week.
    Week(MonthKey, WeekPartition, bool),
    Month(MonthKey),
    Custom(WeekPartition),
}

impl fmt::Display for HourSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HourSpan::Week(m, w, current) => {
                write!(f, "{m} {} ({} – {})", w.label(), w.start, w.end)?;
                if *current {
                    f.write_str(", current week")?;
                }
                Ok(())
            }
            HourSpan::Month(m) => write!(f, "{m}"),
            HourSpan::Custom(w) => write!(f, "{} – {}", w.start, w.end),
        }
    }
}

/// Report entry points over a loaded snapshot. "now" is always passed in.
pub struct Core;

impl Core {
    pub fn buckets(
        snapshot: &Snapshot,
        view: StatsView,
        now: NaiveDate,
        month: MonthKey,
        window: HourWindow,
    ) -> AppResult<Vec<Bucket>> {
        let spec = BucketSpec::for_view(view, now, month, &snapshot.holidays, window)?;
        aggregate(&snapshot.events, &snapshot.members, &spec)
    }

    pub fn verdicts(
        snapshot: &Snapshot,
        rules: &RiskRules,
        now: NaiveDate,
    ) -> AppResult<Vec<RiskVerdict>> {
        classify_all(&snapshot.members, &snapshot.events, rules, now)
    }

    pub fn weeks(snapshot: &Snapshot, month: MonthKey) -> AppResult<Vec<WeekPartition>> {
        calendar::month_weeks(month.year, month.month, &snapshot.holidays)
    }

    /// Select a week by its 1-based index within the month.
    pub fn week(snapshot: &Snapshot, month: MonthKey, index: usize) -> AppResult<WeekPartition> {
        let weeks = Self::weeks(snapshot, month)?;
        let count = weeks.len();
        index
            .checked_sub(1)
            .and_then(|i| weeks.into_iter().nth(i))
            .ok_or(AppError::UnknownWeek { index, count })
    }

    /// Resolve which days an hour table covers.
    pub fn hour_span(
        snapshot: &Snapshot,
        month: MonthKey,
        period: HourPeriod,
    ) -> AppResult<HourSpan> {
        match period {
            HourPeriod::Current(now) => {
                let weeks = Self::weeks(snapshot, month)?;
                Ok(match calendar::week_containing(&weeks, now) {
                    Some(w) => HourSpan::Week(month, *w, true),
                    None => HourSpan::Month(month),
                })
            }
            HourPeriod::Week(index) => {
                Ok(HourSpan::Week(month, Self::week(snapshot, month, index)?, false))
            }
            HourPeriod::Month => Ok(HourSpan::Month(month)),
            HourPeriod::From(start) => Ok(HourSpan::Custom(calendar::custom_week(start)?)),
        }
    }

    pub fn hour_table(
        snapshot: &Snapshot,
        span: &HourSpan,
        window: HourWindow,
    ) -> AppResult<Vec<ShareRow>> {
        match span {
            HourSpan::Week(_, w, _) | HourSpan::Custom(w) => {
                Ok(hourly_share_for_week(&snapshot.events, w, window))
            }
            HourSpan::Month(m) => hourly_share_for_month(&snapshot.events, m.year, m.month, window),
        }
    }

    pub fn week_table(snapshot: &Snapshot, month: MonthKey) -> AppResult<Vec<WeekStatRow>> {
        let weeks = Self::weeks(snapshot, month)?;
        Ok(weekly_stats(&snapshot.events, &weeks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceEvent;
    use crate::models::gender::Gender;
    use crate::models::holiday::HolidaySet;
    use crate::models::member::Member;
    use chrono::NaiveTime;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn snapshot() -> Snapshot {
        let members = vec![
            Member::new("a", Some(Gender::Male), d(2025, 1, 1)),
            Member::new("b", Some(Gender::Female), d(2025, 1, 1)),
        ];
        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let events = vec![
            AttendanceEvent::new("a", d(2026, 4, 1), t(7)),
            AttendanceEvent::new("b", d(2026, 4, 2), t(18)),
            AttendanceEvent::new("ghost", d(2026, 4, 7), t(9)),
        ];
        Snapshot::new(members, events, HolidaySet::new())
    }

    #[test]
    fn week_index_is_one_based_and_checked() {
        let snap = snapshot();
        let april = MonthKey::new(2026, 4).unwrap();

        let w1 = Core::week(&snap, april, 1).unwrap();
        assert_eq!((w1.start, w1.end), (d(2026, 4, 1), d(2026, 4, 4)));

        assert!(matches!(
            Core::week(&snap, april, 0),
            Err(AppError::UnknownWeek { index: 0, count: 5 })
        ));
        assert!(matches!(
            Core::week(&snap, april, 6),
            Err(AppError::UnknownWeek { index: 6, count: 5 })
        ));
    }

    #[test]
    fn hour_span_defaults_to_the_week_containing_now() {
        let snap = snapshot();
        let april = MonthKey::new(2026, 4).unwrap();

        let span = Core::hour_span(&snap, april, HourPeriod::Current(d(2026, 4, 7))).unwrap();
        match span {
            HourSpan::Week(_, w, current) => {
                assert!(current);
                assert_eq!((w.index, w.start, w.end), (2, d(2026, 4, 5), d(2026, 4, 11)));
            }
            other => panic!("unexpected span {other:?}"),
        }
        let rows = Core::hour_table(&snap, &span, HourWindow::default()).unwrap();
        assert_eq!(rows.iter().map(|r| r.count).sum::<u32>(), 1);

        let outside = Core::hour_span(&snap, april, HourPeriod::Current(d(2026, 5, 2))).unwrap();
        assert_eq!(outside, HourSpan::Month(april));
    }

    #[test]
    fn custom_hour_span_covers_seven_calendar_days() {
        let snap = snapshot();
        let april = MonthKey::new(2026, 4).unwrap();

        let span = Core::hour_span(&snap, april, HourPeriod::From(d(2026, 4, 2))).unwrap();
        assert_eq!(span.to_string(), "2026-04-02 – 2026-04-08");

        let rows = Core::hour_table(&snap, &span, HourWindow::default()).unwrap();
        let total: u32 = rows.iter().map(|r| r.count).sum();
        assert_eq!(total, 2);
        // 18:00 once over 7 days
        let evening = rows.iter().find(|r| r.label == "18:00").unwrap();
        assert_eq!((evening.percentage.as_str(), evening.average.as_str()), ("50.0", "0.1"));
    }

    #[test]
    fn weekly_buckets_count_unknown_members_in_total_only() {
        let snap = snapshot();
        let april = MonthKey::new(2026, 4).unwrap();
        let buckets = Core::buckets(
            &snap,
            StatsView::Weekly,
            d(2026, 4, 30),
            april,
            HourWindow::default(),
        )
        .unwrap();

        assert_eq!(buckets.len(), 5);
        assert_eq!((buckets[0].total, buckets[0].male, buckets[0].female), (2, 1, 1));
        assert_eq!((buckets[1].total, buckets[1].male, buckets[1].female), (1, 0, 0));
    }

    #[test]
    fn week_table_shares_sum_to_the_month() {
        let snap = snapshot();
        let rows = Core::week_table(&snap, MonthKey::new(2026, 4).unwrap()).unwrap();
        assert_eq!(rows[0].percentage, "66.7");
        assert_eq!(rows[1].percentage, "33.3");
    }
}
