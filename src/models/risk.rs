//! Churn-risk verdict types.

use crate::utils::formatting::one_decimal;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Severity of a verdict. Ordering follows severity: `None < Caution < Warning < Danger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    None,
    Caution,
    Warning,
    Danger,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::None => "none",
            RiskLevel::Caution => "caution",
            RiskLevel::Warning => "warning",
            RiskLevel::Danger => "danger",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Days since the last visit. `Never` sorts after every finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Recency {
    Days(i64),
    Never,
}

impl Recency {
    /// True when the recency is at least `days` (always true for `Never`).
    pub fn at_least(&self, days: i64) -> bool {
        match self {
            Recency::Days(d) => *d >= days,
            Recency::Never => true,
        }
    }

    pub fn days(&self) -> Option<i64> {
        match self {
            Recency::Days(d) => Some(*d),
            Recency::Never => None,
        }
    }
}

impl fmt::Display for Recency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recency::Days(d) => write!(f, "{d}"),
            Recency::Never => f.write_str("∞"),
        }
    }
}

/// Why a verdict was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RiskReason {
    Expired,
    Absent { days: Recency },
    FrequencyDrop { prior_avg: f64, recent_avg: f64 },
    Inactive { days: i64 },
    Normal,
}

impl fmt::Display for RiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskReason::Expired => f.write_str("expired membership"),
            RiskReason::Absent {
                days: Recency::Never,
            } => f.write_str("never visited (∞ days)"),
            RiskReason::Absent { days } => write!(f, "absent for {days} consecutive days"),
            RiskReason::FrequencyDrop {
                prior_avg,
                recent_avg,
            } => write!(
                f,
                "weekly visits dropped from {} to {}",
                one_decimal(*prior_avg),
                one_decimal(*recent_avg)
            ),
            RiskReason::Inactive { days } => write!(f, "last visit {days} days ago"),
            RiskReason::Normal => f.write_str("normal"),
        }
    }
}

/// Recommended follow-up for warning and danger verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intervention {
    /// Coach reaches out for a 1:1 consultation or a trial PT session.
    CoachConsultation,
    /// Re-registration benefit or dormancy-prevention promotion.
    ReRegistrationOffer,
}

impl Intervention {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intervention::CoachConsultation => "coach_consultation",
            Intervention::ReRegistrationOffer => "re_registration_offer",
        }
    }
}

impl fmt::Display for Intervention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskVerdict {
    pub member_id: String,
    pub level: RiskLevel,
    pub reason: RiskReason,
    pub action: Option<Intervention>,
    pub days_since_visit: Recency,
    pub last_visit: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_sorts_after_any_day_count() {
        assert!(Recency::Never > Recency::Days(10_000));
        assert!(Recency::Days(3) < Recency::Days(4));
        assert!(Recency::Never.at_least(14));
        assert!(!Recency::Days(13).at_least(14));
    }

    #[test]
    fn reason_text_carries_day_count_or_infinity() {
        let r = RiskReason::Absent {
            days: Recency::Days(20),
        };
        assert_eq!(r.to_string(), "absent for 20 consecutive days");

        let r = RiskReason::Absent {
            days: Recency::Never,
        };
        assert!(r.to_string().contains('∞'));
    }

    #[test]
    fn levels_order_by_severity() {
        let mut v = vec![RiskLevel::Caution, RiskLevel::Danger, RiskLevel::None, RiskLevel::Warning];
        v.sort();
        assert_eq!(
            v,
            vec![RiskLevel::None, RiskLevel::Caution, RiskLevel::Warning, RiskLevel::Danger]
        );
    }
}
