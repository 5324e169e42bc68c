// src/export/logic.rs

use crate::core::ledger::TallyLedger;
use crate::errors::AppResult;
use crate::export::sink::ExportSink;
use crate::export::{ExportFormat, notify_export_success, render};
use crate::ui::messages::warning;

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Render the ledger and hand it to `sink`.
    ///
    /// An empty ledger still exports its header row; the operator is warned.
    pub fn export(
        ledger: &TallyLedger,
        format: ExportFormat,
        sink: &mut dyn ExportSink,
    ) -> AppResult<()> {
        let quiet = sink.is_console();
        if ledger.is_empty() && !quiet {
            warning("No vehicles counted yet, exporting an empty log.");
        }

        let content = render(ledger, format)?;
        sink.deliver(&content)?;

        if !quiet {
            notify_export_success(&format.as_str().to_uppercase(), &sink.describe());
        }
        Ok(())
    }
}
