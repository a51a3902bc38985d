// src/export/model.rs

use crate::core::summary::DailyCount;
use crate::models::bucket::Bucket;
use crate::models::risk::RiskVerdict;
use serde::Serialize;

/// Flat bucket row for CSV / JSON.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct BucketExport {
    pub view: String,
    pub label: String,
    pub total: u32,
    pub male: u32,
    pub female: u32,
}

impl BucketExport {
    pub fn from_bucket(view: &str, b: &Bucket) -> Self {
        Self {
            view: view.to_string(),
            label: b.label.clone(),
            total: b.total,
            male: b.male,
            female: b.female,
        }
    }
}

/// Flat verdict row. `days_since_visit` is empty for members who never came.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct VerdictExport {
    pub member_id: String,
    pub level: String,
    pub reason: String,
    pub action: String,
    pub days_since_visit: Option<i64>,
    pub last_visit: Option<String>,
}

impl From<&RiskVerdict> for VerdictExport {
    fn from(v: &RiskVerdict) -> Self {
        Self {
            member_id: v.member_id.clone(),
            level: v.level.as_str().to_string(),
            reason: v.reason.to_string(),
            action: v.action.map(|a| a.as_str()).unwrap_or("").to_string(),
            days_since_visit: v.days_since_visit.days(),
            last_visit: v.last_visit.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DailyExport {
    pub date: String,
    pub total: u32,
    pub unique_members: u32,
}

impl From<&DailyCount> for DailyExport {
    fn from(d: &DailyCount) -> Self {
        Self {
            date: d.date.format("%Y-%m-%d").to_string(),
            total: d.total,
            unique_members: d.unique_members,
        }
    }
}
