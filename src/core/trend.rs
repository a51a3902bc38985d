//! Visit-frequency trends over fixed 7-day blocks counted back from "now".

use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceEvent;
use crate::models::risk::Recency;
use chrono::{Days, NaiveDate};
use std::collections::HashMap;

/// Inclusive date range `[now - (weeks_ago + window_weeks) * 7, now - weeks_ago * 7]`.
pub fn window_bounds(
    now: NaiveDate,
    weeks_ago: i64,
    window_weeks: i64,
) -> AppResult<(NaiveDate, NaiveDate)> {
    if window_weeks <= 0 {
        return Err(AppError::InvalidWindow(format!(
            "window_weeks must be positive, got {window_weeks}"
        )));
    }
    if weeks_ago < 0 {
        return Err(AppError::InvalidWindow(format!(
            "weeks_ago must not be negative, got {weeks_ago}"
        )));
    }

    let back = |weeks: i64| {
        u64::try_from(weeks)
            .ok()
            .and_then(|w| w.checked_mul(7))
            .and_then(|days| now.checked_sub_days(Days::new(days)))
            .ok_or_else(|| AppError::InvalidWindow(format!("{weeks} weeks before {now}")))
    };

    let oldest = weeks_ago.checked_add(window_weeks).ok_or_else(|| {
        AppError::InvalidWindow(format!("{weeks_ago} + {window_weeks} weeks is out of range"))
    })?;

    Ok((back(oldest)?, back(weeks_ago)?))
}

/// Visits of `member_id` inside the window, divided by the window length in weeks.
pub fn weekly_average(
    member_id: &str,
    events: &[AttendanceEvent],
    weeks_ago: i64,
    window_weeks: i64,
    now: NaiveDate,
) -> AppResult<f64> {
    let (start, end) = window_bounds(now, weeks_ago, window_weeks)?;

    let visits = events
        .iter()
        .filter(|e| e.member_id == member_id && start <= e.date && e.date <= end)
        .count();

    Ok(visits as f64 / window_weeks as f64)
}

/// Visit dates per member, sorted ascending. Built once per snapshot so that
/// classifying many members does not rescan the whole event list.
#[derive(Debug, Default)]
pub struct VisitHistory {
    visits: HashMap<String, Vec<NaiveDate>>,
}

impl VisitHistory {
    pub fn new(events: &[AttendanceEvent]) -> Self {
        let mut visits: HashMap<String, Vec<NaiveDate>> = HashMap::new();
        for e in events {
            visits.entry(e.member_id.clone()).or_default().push(e.date);
        }
        for dates in visits.values_mut() {
            dates.sort_unstable();
        }
        Self { visits }
    }

    pub fn dates(&self, member_id: &str) -> &[NaiveDate] {
        self.visits.get(member_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Most recent visit on or before `now`.
    pub fn last_visit(&self, member_id: &str, now: NaiveDate) -> Option<NaiveDate> {
        let dates = self.dates(member_id);
        let upto = dates.partition_point(|d| *d <= now);
        upto.checked_sub(1).map(|i| dates[i])
    }

    pub fn recency(&self, member_id: &str, now: NaiveDate) -> Recency {
        match self.last_visit(member_id, now) {
            Some(last) => Recency::Days((now - last).num_days()),
            None => Recency::Never,
        }
    }

    /// Same contract as [`weekly_average`], answered from the sorted history.
    pub fn weekly_average(
        &self,
        member_id: &str,
        weeks_ago: i64,
        window_weeks: i64,
        now: NaiveDate,
    ) -> AppResult<f64> {
        let (start, end) = window_bounds(now, weeks_ago, window_weeks)?;
        let dates = self.dates(member_id);

        let from = dates.partition_point(|d| *d < start);
        let to = dates.partition_point(|d| *d <= end);

        Ok(to.saturating_sub(from) as f64 / window_weeks as f64)
    }
}
