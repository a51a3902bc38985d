//! Churn-risk classification.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. membership ended before "now" → `none` (expired)
//! 2. absent for `danger_days` or more, or never visited → `danger`
//! 3. prior weekly average ≥ `prior_min_avg` and recent ≤ `recent_max_avg` → `warning`
//! 4. absent for `caution_days` or more → `caution`
//! 5. otherwise → `none` (normal)

use crate::core::trend::VisitHistory;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceEvent;
use crate::models::member::Member;
use crate::models::risk::{Intervention, Recency, RiskLevel, RiskReason, RiskVerdict};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Thresholds of the rule set. Loaded from the `risk` section of the config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskRules {
    pub danger_days: i64,
    pub caution_days: i64,
    /// Width of the recent window, also the offset of the prior window.
    pub recent_weeks: i64,
    pub prior_weeks: i64,
    pub prior_min_avg: f64,
    pub recent_max_avg: f64,
}

impl Default for RiskRules {
    fn default() -> Self {
        Self {
            danger_days: 14,
            caution_days: 7,
            recent_weeks: 2,
            prior_weeks: 4,
            prior_min_avg: 3.0,
            recent_max_avg: 1.0,
        }
    }
}

/// Classify one member against a prebuilt visit history.
pub fn classify(
    member: &Member,
    history: &VisitHistory,
    rules: &RiskRules,
    now: NaiveDate,
) -> AppResult<RiskVerdict> {
    let days_since_visit = history.recency(&member.id, now);
    let last_visit = history.last_visit(&member.id, now);

    let verdict = |level: RiskLevel, reason: RiskReason, action: Option<Intervention>| RiskVerdict {
        member_id: member.id.clone(),
        level,
        reason,
        action,
        days_since_visit,
        last_visit,
    };

    if member.is_expired(now) {
        return Ok(verdict(RiskLevel::None, RiskReason::Expired, None));
    }

    if days_since_visit.at_least(rules.danger_days) {
        return Ok(verdict(
            RiskLevel::Danger,
            RiskReason::Absent {
                days: days_since_visit,
            },
            Some(Intervention::ReRegistrationOffer),
        ));
    }

    let recent_avg = history.weekly_average(&member.id, 0, rules.recent_weeks, now)?;
    let prior_avg =
        history.weekly_average(&member.id, rules.recent_weeks, rules.prior_weeks, now)?;

    if prior_avg >= rules.prior_min_avg && recent_avg <= rules.recent_max_avg {
        return Ok(verdict(
            RiskLevel::Warning,
            RiskReason::FrequencyDrop {
                prior_avg,
                recent_avg,
            },
            Some(Intervention::CoachConsultation),
        ));
    }

    if let Recency::Days(days) = days_since_visit
        && days >= rules.caution_days
    {
        return Ok(verdict(
            RiskLevel::Caution,
            RiskReason::Inactive { days },
            None,
        ));
    }

    Ok(verdict(RiskLevel::None, RiskReason::Normal, None))
}

/// Classify a single member straight from the event list.
pub fn classify_member(
    member: &Member,
    events: &[AttendanceEvent],
    rules: &RiskRules,
    now: NaiveDate,
) -> AppResult<RiskVerdict> {
    classify(member, &VisitHistory::new(events), rules, now)
}

/// One verdict per member, in member order.
pub fn classify_all(
    members: &[Member],
    events: &[AttendanceEvent],
    rules: &RiskRules,
    now: NaiveDate,
) -> AppResult<Vec<RiskVerdict>> {
    let history = VisitHistory::new(events);

    let verdicts = members
        .iter()
        .map(|m| classify(m, &history, rules, now))
        .collect::<AppResult<Vec<_>>>()?;

    debug!(
        members = members.len(),
        events = events.len(),
        at_risk = verdicts.iter().filter(|v| v.level != RiskLevel::None).count(),
        %now,
        "risk classification done"
    );

    Ok(verdicts)
}

/// Verdicts above `none`, most severe first, ties by member id.
pub fn at_risk(verdicts: &[RiskVerdict]) -> Vec<RiskVerdict> {
    let mut out: Vec<RiskVerdict> = verdicts
        .iter()
        .filter(|v| v.level != RiskLevel::None)
        .cloned()
        .collect();

    out.sort_by(|a, b| {
        b.level
            .cmp(&a.level)
            .then_with(|| a.member_id.cmp(&b.member_id))
    });
    out
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RiskCategories {
    pub caution: Vec<RiskVerdict>,
    pub warning: Vec<RiskVerdict>,
    pub danger: Vec<RiskVerdict>,
}

pub fn categorize(verdicts: &[RiskVerdict]) -> RiskCategories {
    let mut cats = RiskCategories::default();
    for v in at_risk(verdicts) {
        match v.level {
            RiskLevel::Caution => cats.caution.push(v),
            RiskLevel::Warning => cats.warning.push(v),
            RiskLevel::Danger => cats.danger.push(v),
            RiskLevel::None => {}
        }
    }
    cats
}

/// Row of the long-absence list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbsenceRow {
    pub member_id: String,
    pub last_visit: Option<NaiveDate>,
    pub days_since_visit: Recency,
    pub expired: bool,
}

/// Members ordered by days since their last visit, never-visited first.
pub fn absence_ranking(
    members: &[Member],
    events: &[AttendanceEvent],
    now: NaiveDate,
) -> Vec<AbsenceRow> {
    let history = VisitHistory::new(events);

    let mut rows: Vec<AbsenceRow> = members
        .iter()
        .map(|m| AbsenceRow {
            member_id: m.id.clone(),
            last_visit: history.last_visit(&m.id, now),
            days_since_visit: history.recency(&m.id, now),
            expired: m.is_expired(now),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.days_since_visit
            .cmp(&a.days_since_visit)
            .then_with(|| a.member_id.cmp(&b.member_id))
    });
    rows
}
