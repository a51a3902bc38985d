// src/export/logic.rs

use crate::config::Config;
use crate::core::aggregate::StatsView;
use crate::core::logic::Core;
use crate::core::summary::daily_counts;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{BucketExport, DailyExport, VerdictExport};
use crate::export::range::parse_range;
use crate::export::{ExportFormat, ExportTarget};
use crate::models::period::MonthKey;
use crate::models::snapshot::Snapshot;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Parameters shared by every export target.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub target: ExportTarget,
    pub format: ExportFormat,
    pub file: String,
    pub view: StatsView,
    pub month: MonthKey,
    pub range: Option<String>,
    pub now: NaiveDate,
    pub force: bool,
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Build the rows for `req.target` and write them to `req.file`.
    /// Returns the number of rows written.
    pub fn export(snapshot: &Snapshot, cfg: &Config, req: &ExportRequest) -> AppResult<usize> {
        let path = expand_tilde(&req.file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {}",
                req.file
            )));
        }

        ensure_writable(&path, req.force)?;

        let written = match req.target {
            ExportTarget::Buckets => {
                let buckets =
                    Core::buckets(snapshot, req.view, req.now, req.month, cfg.hour_window)?;
                let rows: Vec<BucketExport> = buckets
                    .iter()
                    .map(|b| BucketExport::from_bucket(req.view.as_str(), b))
                    .collect();
                write_rows("Buckets", req.format, &rows, &path)?
            }
            ExportTarget::Verdicts => {
                let verdicts = Core::verdicts(snapshot, &cfg.risk, req.now)?;
                let rows: Vec<VerdictExport> = verdicts.iter().map(VerdictExport::from).collect();
                write_rows("Verdicts", req.format, &rows, &path)?
            }
            ExportTarget::Daily => {
                let (from, to) = match &req.range {
                    Some(r) if !r.eq_ignore_ascii_case("all") => parse_range(r)?,
                    Some(_) => (NaiveDate::MIN, NaiveDate::MAX),
                    None => crate::core::calendar::month_bounds(req.month.year, req.month.month)?,
                };
                let rows: Vec<DailyExport> = daily_counts(&snapshot.events, from, to)
                    .iter()
                    .map(DailyExport::from)
                    .collect();
                write_rows("Daily", req.format, &rows, &path)?
            }
        };

        info!(
            target_kind = req.target.as_str(),
            format = req.format.as_str(),
            rows = written,
            "export written"
        );
        Ok(written)
    }
}

fn write_rows<T: Serialize>(
    label: &str,
    format: ExportFormat,
    rows: &[T],
    path: &Path,
) -> AppResult<usize> {
    if rows.is_empty() {
        warning("No rows for the selected period; writing an empty file.");
    }

    match format {
        ExportFormat::Csv => export_csv(label, rows, path)?,
        ExportFormat::Json => export_json(label, rows, path)?,
    }
    Ok(rows.len())
}
