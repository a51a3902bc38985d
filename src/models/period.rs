//! Calendar periods produced by the partitioner and consumed as bucket keys.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// One week-of-month partition, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekPartition {
    pub index: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub business_days: u32,
}

impl WeekPartition {
    /// Calendar days covered by the partition.
    pub fn days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn label(&self) -> String {
        format!("W{}", self.index)
    }
}

/// Year + month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidMonth(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> AppResult<Self> {
        let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|_| AppError::InvalidMonth(s.to_string()))?;
        Ok(Self::of(d))
    }

    /// The month before this one.
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
