// src/export/render.rs

use crate::core::ledger::TallyLedger;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::model::entries_for_export;

/// Render the ledger in the requested format.
///
/// CSV is the ledger's own export text; JSON is a pretty-printed array with
/// the same column names, oldest entry first.
pub fn render(ledger: &TallyLedger, format: ExportFormat) -> AppResult<String> {
    match format {
        ExportFormat::Csv => Ok(ledger.export_log()),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&entries_for_export(ledger))?),
    }
}
