// src/export/mod.rs

mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
pub mod range;

pub use logic::ExportLogic;
pub use model::{BucketExport, DailyExport, VerdictExport};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Common completion message for every export.
pub(crate) fn notify_export_success(label: &str, rows: usize, path: &Path) {
    success(format!("{label} export completed ({rows} rows): {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// What to export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportTarget {
    /// Buckets of one dashboard view
    Buckets,
    /// One risk verdict per member
    Verdicts,
    /// Per-day check-ins and unique members
    Daily,
}

impl ExportTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportTarget::Buckets => "buckets",
            ExportTarget::Verdicts => "verdicts",
            ExportTarget::Daily => "daily",
        }
    }
}
