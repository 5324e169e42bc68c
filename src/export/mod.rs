// src/export/mod.rs

pub mod logic;
mod model;
mod render;
pub mod sink;

pub use logic::ExportLogic;
pub use model::EntryExport;
pub use render::render;
pub use sink::{ExportSink, FileSink, StdoutSink};

use crate::ui::messages::success;
use clap::ValueEnum;

/// Helper comune per messaggi di completamento export.
pub(crate) fn notify_export_success(label: &str, target: &str) {
    success(format!("{label} export completed: {target}"));
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

    /// Pick the format from a file name, defaulting to CSV.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}
