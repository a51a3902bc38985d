//! Dashboard summaries: member counts, per-day totals and the monthly grid.

use crate::core::calendar;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceEvent;
use crate::models::gender::Gender;
use crate::models::member::Member;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenderCount {
    pub total: u32,
    pub male: u32,
    pub female: u32,
}

impl GenderCount {
    fn add(&mut self, gender: Option<Gender>) {
        self.total += 1;
        match gender {
            Some(Gender::Male) => self.male += 1,
            Some(Gender::Female) => self.female += 1,
            None => {}
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub active: GenderCount,
    pub expired: GenderCount,
}

/// Active vs expired members; open-ended memberships count as active.
pub fn member_summary(members: &[Member], now: NaiveDate) -> MemberSummary {
    let mut summary = MemberSummary::default();
    for m in members {
        if m.is_expired(now) {
            summary.expired.add(m.gender);
        } else {
            summary.active.add(m.gender);
        }
    }
    summary
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub total: u32,
    pub unique_members: u32,
}

/// Check-ins and distinct members per day in `[from, to]`, days without
/// check-ins omitted.
pub fn daily_counts(events: &[AttendanceEvent], from: NaiveDate, to: NaiveDate) -> Vec<DailyCount> {
    let mut per_day: BTreeMap<NaiveDate, (u32, BTreeSet<&str>)> = BTreeMap::new();

    for ev in events.iter().filter(|e| from <= e.date && e.date <= to) {
        let (total, members) = per_day.entry(ev.date).or_default();
        *total += 1;
        members.insert(ev.member_id.as_str());
    }

    per_day
        .into_iter()
        .map(|(date, (total, members))| DailyCount {
            date,
            total,
            unique_members: members.len() as u32,
        })
        .collect()
}

/// One member's row of the monthly attendance grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub member_id: String,
    /// Hour of the first check-in for each day of the month.
    pub first_hours: Vec<Option<u32>>,
    pub attended_days: u32,
    pub days_in_month: u32,
}

impl GridRow {
    pub fn attendance_rate(&self) -> String {
        crate::core::stats::percentage(
            u64::from(self.attended_days),
            u64::from(self.days_in_month),
        )
    }
}

pub fn monthly_grid(
    members: &[Member],
    events: &[AttendanceEvent],
    year: i32,
    month: u32,
) -> AppResult<Vec<GridRow>> {
    let days = calendar::days_in_month(year, month)?;

    let mut first_seen: HashMap<&str, Vec<Option<NaiveTime>>> = HashMap::new();
    for ev in events
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
    {
        let slots = first_seen
            .entry(ev.member_id.as_str())
            .or_insert_with(|| vec![None; days as usize]);
        if let Some(slot) = slots.get_mut(ev.date.day0() as usize)
            && slot.is_none_or(|t| ev.time < t)
        {
            *slot = Some(ev.time);
        }
    }

    Ok(members
        .iter()
        .map(|m| {
            let first_hours: Vec<Option<u32>> = match first_seen.get(m.id.as_str()) {
                Some(slots) => slots
                    .iter()
                    .map(|t| t.map(|t| t.hour()))
                    .collect(),
                None => vec![None; days as usize],
            };
            let attended_days = first_hours.iter().filter(|h| h.is_some()).count() as u32;
            GridRow {
                member_id: m.id.clone(),
                first_hours,
                attended_days,
                days_in_month: days,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ev(id: &str, date: NaiveDate, hh: u32) -> AttendanceEvent {
        AttendanceEvent::new(id, date, NaiveTime::from_hms_opt(hh, 0, 0).unwrap())
    }

    #[test]
    fn member_summary_treats_open_ended_as_active() {
        let now = d(2025, 10, 18);
        let members = vec![
            Member::new("a", Some(Gender::Male), d(2025, 1, 1)),
            Member::new("b", Some(Gender::Female), d(2025, 1, 1)).with_end(Some(d(2025, 10, 17))),
            Member::new("c", None, d(2025, 1, 1)).with_end(Some(d(2025, 12, 31))),
        ];

        let s = member_summary(&members, now);
        assert_eq!(s.active, GenderCount { total: 2, male: 1, female: 0 });
        assert_eq!(s.expired, GenderCount { total: 1, male: 0, female: 1 });
    }

    #[test]
    fn daily_counts_report_unique_members() {
        let events = vec![
            ev("a", d(2025, 10, 2), 8),
            ev("a", d(2025, 10, 2), 19),
            ev("b", d(2025, 10, 2), 9),
            ev("b", d(2025, 10, 5), 9),
            ev("b", d(2025, 11, 1), 9),
        ];
        let rows = daily_counts(&events, d(2025, 10, 1), d(2025, 10, 31));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, d(2025, 10, 2));
        assert_eq!((rows[0].total, rows[0].unique_members), (3, 2));
        assert_eq!((rows[1].total, rows[1].unique_members), (1, 1));
    }

    #[test]
    fn grid_keeps_the_earliest_check_in_of_the_day() {
        let members = vec![
            Member::new("a", None, d(2025, 1, 1)),
            Member::new("b", None, d(2025, 1, 1)),
        ];
        let events = vec![
            ev("a", d(2026, 2, 3), 19),
            ev("a", d(2026, 2, 3), 7),
            ev("a", d(2026, 2, 28), 12),
            ev("a", d(2026, 3, 1), 12),
        ];

        let grid = monthly_grid(&members, &events, 2026, 2).unwrap();
        assert_eq!(grid.len(), 2);

        let a = &grid[0];
        assert_eq!(a.days_in_month, 28);
        assert_eq!(a.first_hours[2], Some(7));
        assert_eq!(a.first_hours[27], Some(12));
        assert_eq!(a.attended_days, 2);
        assert_eq!(a.attendance_rate(), "7.1");

        assert_eq!(grid[1].attended_days, 0);
        assert_eq!(grid[1].attendance_rate(), "0.0");
    }
}
