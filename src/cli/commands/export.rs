use crate::cli::commands::{month_or_now, open_snapshot};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::export::logic::ExportRequest;
use crate::ui::messages::warning;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, now: NaiveDate) -> AppResult<()> {
    if let Commands::Export {
        target,
        format,
        file,
        view,
        month,
        range,
        force,
    } = cmd
    {
        let req = ExportRequest {
            target: *target,
            format: *format,
            file: file.clone(),
            view: *view,
            month: month_or_now(month, now)?,
            range: range.clone(),
            now,
            force: *force,
        };

        let (pool, snapshot) = open_snapshot(cfg)?;
        let rows = ExportLogic::export(&snapshot, cfg, &req)?;

        if let Err(e) = ttlog(
            &pool.conn,
            "export",
            file,
            &format!("{} rows of {} as {}", rows, target.as_str(), format.as_str()),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }
    }
    Ok(())
}
