use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// The local calendar date. Only the CLI layer calls this; the engine
/// always receives "now" as an argument.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Resolve the `--now` override, falling back to today.
pub fn resolve_now(arg: Option<&str>) -> AppResult<NaiveDate> {
    match arg {
        Some(s) => parse_date(s.trim()).ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(today()),
    }
}
