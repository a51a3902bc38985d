pub mod config;
pub mod export;
pub mod grid;
pub mod hours;
pub mod import;
pub mod init;
pub mod log;
pub mod members;
pub mod risk;
pub mod stats;
pub mod weeks;

use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::pool::DbPool;
use crate::db::queries::load_snapshot;
use crate::errors::AppResult;
use crate::models::period::MonthKey;
use crate::models::snapshot::Snapshot;
use crate::ui::messages::note;
use chrono::NaiveDate;

/// Open the configured database and load the whole snapshot.
pub(crate) fn open_snapshot(cfg: &Config) -> AppResult<(DbPool, Snapshot)> {
    let pool = open_db(&cfg.database)?;
    let snapshot = load_snapshot(&pool.conn)?;
    Ok((pool, snapshot))
}

/// `--month` when given, otherwise the month containing "now".
pub(crate) fn month_or_now(month: &Option<String>, now: NaiveDate) -> AppResult<MonthKey> {
    match month {
        Some(m) => MonthKey::parse(m),
        None => Ok(MonthKey::of(now)),
    }
}

/// Report preamble: evaluation date and holiday calendar in use.
pub(crate) fn print_context(snapshot: &Snapshot, now: NaiveDate) {
    let holidays = match &snapshot.holidays.version {
        Some(v) => format!("{} holidays ({v})", snapshot.holidays.len()),
        None => format!("{} holidays", snapshot.holidays.len()),
    };
    note(format!(
        "as of {now} · {} members · {} check-ins · {holidays}\n",
        snapshot.members.len(),
        snapshot.events.len()
    ));
}
