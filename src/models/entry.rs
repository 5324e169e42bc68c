use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

/// Where a count came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum TriggerSource {
    /// The on-screen "+ Count Vehicle" control.
    ManualButton,
    /// The designated keyboard key.
    ManualKey,
}

impl TriggerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerSource::ManualButton => "manual-button",
            TriggerSource::ManualKey => "manual-key",
        }
    }
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One counted vehicle. Never modified after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub sequence_id: u32,
    pub counted_at: DateTime<Local>, // wall clock instant
    pub wall_clock_time: String,     // same instant, formatted for the log
    pub source: TriggerSource,
    pub playback_position_label: String, // "MM:SS", "00:00" if unknown
}

impl LogEntry {
    /// Export row: `[sequence_id, wall_clock_time, source, position]`.
    pub fn to_row(&self) -> [String; 4] {
        [
            self.sequence_id.to_string(),
            self.wall_clock_time.clone(),
            self.source.as_str().to_string(),
            self.playback_position_label.clone(),
        ]
    }
}
