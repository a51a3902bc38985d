use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::initialize::open_db;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        members,
        events,
        holidays,
    } = cmd
    {
        if members.is_none() && events.is_none() && holidays.is_none() {
            return Err(AppError::Other(
                "nothing to import: pass --members, --events and/or --holidays".to_string(),
            ));
        }

        let members: Option<PathBuf> = members.as_deref().map(expand_tilde);
        let events: Option<PathBuf> = events.as_deref().map(expand_tilde);
        let holidays: Option<PathBuf> = holidays.as_deref().map(expand_tilde);

        let mut pool = open_db(&cfg.database)?;
        let report = ImportLogic::import_files(
            &mut pool.conn,
            members.as_deref(),
            events.as_deref(),
            holidays.as_deref(),
        )?;

        info!(
            members = report.members,
            events = report.events,
            holidays = report.holidays,
            "import done"
        );

        success(format!(
            "Imported {} members, {} check-ins, {} holidays",
            report.members, report.events, report.holidays
        ));
        if report.duplicate_events > 0 {
            warning(format!(
                "{} duplicate check-ins were already stored and skipped",
                report.duplicate_events
            ));
        }

        let target = [members.as_deref(), events.as_deref(), holidays.as_deref()]
            .into_iter()
            .flatten()
            .filter_map(Path::file_name)
            .map(|n| n.to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        if let Err(e) = ttlog(
            &pool.conn,
            "import",
            &target,
            &format!(
                "members={} events={} duplicates={} holidays={}",
                report.members, report.events, report.duplicate_events, report.holidays
            ),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }
    }

    Ok(())
}
