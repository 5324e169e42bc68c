// src/export/model.rs

use crate::core::ledger::TallyLedger;
use crate::models::entry::LogEntry;
use serde::Serialize;

/// Struttura “piatta” per export delle entry, stesse colonne del CSV.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EntryExport {
    #[serde(rename = "Vehicle#")]
    pub vehicle: u32,
    #[serde(rename = "Counted At")]
    pub counted_at: String,
    #[serde(rename = "Triggered By")]
    pub triggered_by: String,
    #[serde(rename = "Video Time")]
    pub video_time: String,
}

impl From<&LogEntry> for EntryExport {
    fn from(e: &LogEntry) -> Self {
        Self {
            vehicle: e.sequence_id,
            counted_at: e.wall_clock_time.clone(),
            triggered_by: e.source.as_str().to_string(),
            video_time: e.playback_position_label.clone(),
        }
    }
}

/// Entries in counting order (oldest first).
pub(crate) fn entries_for_export(ledger: &TallyLedger) -> Vec<EntryExport> {
    ledger.entries_oldest_first().map(EntryExport::from).collect()
}
