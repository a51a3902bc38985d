// src/export/range.rs

use crate::core::calendar::month_bounds;
use crate::errors::{AppError, AppResult};
use crate::models::period::MonthKey;
use chrono::NaiveDate;

/// Bounds of a single period expression: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((first, last))
        }
        // YYYY-MM
        7 => {
            let m = MonthKey::parse(p)?;
            month_bounds(m.year, m.month)
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

/// Parse `--range`.
///
/// Accepts a single period (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`) or two periods
/// of the same shape joined by `:`; the result is an inclusive date range.
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let Some((start_raw, end_raw)) = r.split_once(':') else {
        return period_bounds(r);
    };

    let (start, end) = (start_raw.trim(), end_raw.trim());
    if start.len() != end.len() {
        return Err(AppError::InvalidDate(format!(
            "{r}: start and end must have the same format"
        )));
    }

    let (from, _) = period_bounds(start)?;
    let (_, to) = period_bounds(end)?;
    if from > to {
        return Err(AppError::InvalidDate(format!("{r}: start is after end")));
    }
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_periods() {
        assert_eq!(parse_range("2025").unwrap(), (d(2025, 1, 1), d(2025, 12, 31)));
        assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(parse_range("2025-10-18").unwrap(), (d(2025, 10, 18), d(2025, 10, 18)));
    }

    #[test]
    fn spans() {
        assert_eq!(
            parse_range("2025-09:2025-10").unwrap(),
            (d(2025, 9, 1), d(2025, 10, 31))
        );
        assert!(parse_range("2025:2025-10").is_err());
        assert!(parse_range("2025-10:2025-09").is_err());
        assert!(parse_range("yesterday").is_err());
    }
}
