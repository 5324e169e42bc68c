//! Tally ledger: the running count and its newest-first log of entries.
//!
//! Increments are gated on playback: while the video is not playing an
//! increment is a no-op. Undo is strictly LIFO and never goes below zero.

use crate::core::playback::PlaybackSnapshot;
use crate::errors::AppResult;
use crate::models::entry::{LogEntry, TriggerSource};
use crate::utils::time::{DEFAULT_TIME_FORMAT, wall_clock};
use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Header row of the exported log.
pub const EXPORT_HEADERS: [&str; 4] = ["Vehicle#", "Counted At", "Triggered By", "Video Time"];

/// Result of a single increment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Counted; carries the new entry's sequence id (the new count).
    Accepted(u32),
    /// Playback was not running, nothing changed.
    Rejected,
}

impl Transition {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Transition::Accepted(_))
    }
}

pub struct TallyLedger {
    count: u32,
    log: VecDeque<LogEntry>,
    session_started: DateTime<Local>,
    time_format: String,
}

impl Default for TallyLedger {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_FORMAT)
    }
}

impl TallyLedger {
    /// Empty ledger; `time_format` is the chrono format for wall clock labels.
    pub fn new(time_format: &str) -> Self {
        Self {
            count: 0,
            log: VecDeque::new(),
            session_started: Local::now(),
            time_format: time_format.to_string(),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.iter()
    }

    /// Entries in the order they were counted.
    pub fn entries_oldest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.iter().rev()
    }

    /// Most recent entry.
    pub fn head(&self) -> Option<&LogEntry> {
        self.log.front()
    }

    pub fn session_started(&self) -> DateTime<Local> {
        self.session_started
    }

    /// Count one vehicle if playback is running.
    pub fn increment(&mut self, source: TriggerSource, playback: &PlaybackSnapshot) -> Transition {
        self.increment_at(source, playback, Local::now())
    }

    /// Same as [`increment`](Self::increment) with an explicit wall clock.
    pub fn increment_at(
        &mut self,
        source: TriggerSource,
        playback: &PlaybackSnapshot,
        now: DateTime<Local>,
    ) -> Transition {
        if !playback.is_playing {
            return Transition::Rejected;
        }

        let new_count = self.count + 1;
        let entry = LogEntry {
            sequence_id: new_count,
            counted_at: now,
            wall_clock_time: wall_clock(&now, &self.time_format),
            source,
            playback_position_label: playback.position_label(),
        };

        self.log.push_front(entry);
        self.count = new_count;
        Transition::Accepted(new_count)
    }

    /// Remove the most recent entry. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<LogEntry> {
        if self.count == 0 {
            return None;
        }
        self.count -= 1;
        self.log.pop_front()
    }

    /// Drop every entry and restart the session clock.
    pub fn reset(&mut self) {
        self.reset_at(Local::now());
    }

    pub fn reset_at(&mut self, now: DateTime<Local>) {
        self.count = 0;
        self.log.clear();
        self.session_started = now;
    }

    /// Comma separated log: header, then one row per entry oldest first.
    /// Rows are joined by `\n` with no trailing newline.
    pub fn export_log(&self) -> String {
        // rows built here cannot fail to serialise; fall back to the plain join
        self.write_csv().unwrap_or_else(|_| self.join_rows())
    }

    fn write_csv(&self) -> AppResult<String> {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        wtr.write_record(EXPORT_HEADERS)?;
        for entry in self.entries_oldest_first() {
            wtr.write_record(entry.to_row())?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        let mut text = String::from_utf8_lossy(&bytes).into_owned();
        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }

    fn join_rows(&self) -> String {
        std::iter::once(EXPORT_HEADERS.map(str::to_string).to_vec())
            .chain(self.entries_oldest_first().map(|e| e.to_row().to_vec()))
            .map(|row| row.join(","))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
