//! Bucket aggregation of attendance events with gender breakdown.

use crate::core::calendar;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceEvent;
use crate::models::bucket::Bucket;
use crate::models::holiday::HolidaySet;
use crate::models::member::{Member, MemberIndex};
use crate::models::period::{MonthKey, WeekPartition};
use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Opening hours covered by the hourly view. Each hour `h` is the slot `[h, h+1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourWindow {
    pub first_hour: u32,
    pub last_hour: u32,
}

impl Default for HourWindow {
    fn default() -> Self {
        Self {
            first_hour: 7,
            last_hour: 22,
        }
    }
}

impl HourWindow {
    pub fn new(first_hour: u32, last_hour: u32) -> AppResult<Self> {
        if first_hour > last_hour || last_hour > 23 {
            return Err(AppError::InvalidWindow(format!(
                "hour window {first_hour}..={last_hour} is not within 0..=23"
            )));
        }
        Ok(Self {
            first_hour,
            last_hour,
        })
    }

    pub fn hours(&self) -> std::ops::RangeInclusive<u32> {
        self.first_hour..=self.last_hour
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.hours().contains(&hour)
    }

    pub fn label(hour: u32) -> String {
        format!("{hour:02}:00")
    }
}

/// Which buckets to build, in output order.
#[derive(Debug, Clone, PartialEq)]
pub enum BucketSpec {
    Hourly(HourWindow),
    DayOfMonth { year: i32, month: u32 },
    Weeks(Vec<WeekPartition>),
    Months(Vec<MonthKey>),
    Days(Vec<NaiveDate>),
}

/// Dashboard views selectable from the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatsView {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Last7,
}

impl StatsView {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsView::Hourly => "hourly",
            StatsView::Daily => "daily",
            StatsView::Weekly => "weekly",
            StatsView::Monthly => "monthly",
            StatsView::Last7 => "last7",
        }
    }
}

impl BucketSpec {
    /// Build the bucket layout behind a dashboard view.
    ///
    /// `month` selects the month for the daily and weekly views; the monthly
    /// and last-7-days views are anchored on `now`.
    pub fn for_view(
        view: StatsView,
        now: NaiveDate,
        month: MonthKey,
        holidays: &HolidaySet,
        window: HourWindow,
    ) -> AppResult<Self> {
        Ok(match view {
            StatsView::Hourly => BucketSpec::Hourly(window),
            StatsView::Daily => BucketSpec::DayOfMonth {
                year: month.year,
                month: month.month,
            },
            StatsView::Weekly => {
                BucketSpec::Weeks(calendar::month_weeks(month.year, month.month, holidays)?)
            }
            StatsView::Monthly => {
                BucketSpec::Months(calendar::rolling_months(now, calendar::ROLLING_MONTHS))
            }
            StatsView::Last7 => BucketSpec::Days(calendar::trailing_days(now, 7)),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BucketSpec::Hourly(_) => "hourly",
            BucketSpec::DayOfMonth { .. } => "day_of_month",
            BucketSpec::Weeks(_) => "weeks",
            BucketSpec::Months(_) => "months",
            BucketSpec::Days(_) => "days",
        }
    }
}

type Resolver<'s> = Box<dyn Fn(&AttendanceEvent) -> Option<usize> + 's>;

/// Labels in output order plus a function mapping an event to its bucket slot.
fn layout(spec: &BucketSpec) -> AppResult<(Vec<String>, Resolver<'_>)> {
    match spec {
        BucketSpec::Hourly(window) => {
            let window = *window;
            let labels = window.hours().map(HourWindow::label).collect();
            let resolve: Resolver<'_> = Box::new(move |ev: &AttendanceEvent| {
                let h = ev.hour();
                window
                    .contains(h)
                    .then(|| (h - window.first_hour) as usize)
            });
            Ok((labels, resolve))
        }
        BucketSpec::DayOfMonth { year, month } => {
            let (year, month) = (*year, *month);
            let days = calendar::days_in_month(year, month)?;
            let labels = (1..=days).map(|d| d.to_string()).collect();
            let resolve: Resolver<'_> = Box::new(move |ev: &AttendanceEvent| {
                (ev.date.year() == year && ev.date.month() == month)
                    .then(|| (ev.date.day() - 1) as usize)
            });
            Ok((labels, resolve))
        }
        BucketSpec::Weeks(weeks) => {
            let labels = weeks.iter().map(WeekPartition::label).collect();
            let resolve: Resolver<'_> = Box::new(move |ev: &AttendanceEvent| {
                weeks.iter().position(|w| w.contains(ev.date))
            });
            Ok((labels, resolve))
        }
        BucketSpec::Months(keys) => {
            let labels = keys.iter().map(MonthKey::to_string).collect();
            let slots: HashMap<MonthKey, usize> =
                keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();
            let resolve: Resolver<'_> = Box::new(move |ev: &AttendanceEvent| {
                slots.get(&MonthKey::of(ev.date)).copied()
            });
            Ok((labels, resolve))
        }
        BucketSpec::Days(days) => {
            let labels = days
                .iter()
                .map(|d| d.format("%Y-%m-%d (%a)").to_string())
                .collect();
            let slots: HashMap<NaiveDate, usize> =
                days.iter().enumerate().map(|(i, d)| (*d, i)).collect();
            let resolve: Resolver<'_> =
                Box::new(move |ev: &AttendanceEvent| slots.get(&ev.date).copied());
            Ok((labels, resolve))
        }
    }
}

/// Count events per bucket, in the order defined by `spec`.
///
/// Events that match no bucket are dropped. Events whose member is unknown,
/// or has no gender, count towards `total` only.
pub fn aggregate(
    events: &[AttendanceEvent],
    members: &[Member],
    spec: &BucketSpec,
) -> AppResult<Vec<Bucket>> {
    let index = MemberIndex::new(members);
    let (labels, resolve) = layout(spec)?;

    let mut buckets: Vec<Bucket> = labels.into_iter().map(Bucket::empty).collect();
    let mut dropped = 0usize;

    for ev in events {
        match resolve(ev).and_then(|slot| buckets.get_mut(slot)) {
            Some(bucket) => bucket.record(index.gender_of(&ev.member_id)),
            None => dropped += 1,
        }
    }

    debug!(
        kind = spec.kind(),
        buckets = buckets.len(),
        events = events.len(),
        dropped,
        "attendance aggregated"
    );

    Ok(buckets)
}
