//! Counting session: the host event loop.
//!
//! Commands (media controls, triggers, ledger operations) are processed one
//! at a time, each to completion, in the order they arrive.

use crate::config::Config;
use crate::core::ledger::{TallyLedger, Transition};
use crate::core::media::SimulatedMedia;
use crate::core::oplog::OpLog;
use crate::core::playback::{PlaybackMonitor, PlaybackSnapshot};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ExportLogic, FileSink};
use crate::models::entry::TriggerSource;
use crate::ui::messages::{counted, error, header, hint, info, warning};
use crate::utils::colors::{color_for_source, colorize_clock, RESET};
use crate::utils::formatting::{bold, playing_badge};
use crate::utils::table::{Column, Table};
use crate::utils::time::{parse_seconds, wall_clock};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

pub const HELP: &str = "\
Media:    play | pause | meta <secs> | time <secs> | tick <secs>
Count:    count (button) | key <name>
Ledger:   undo | reset
Show:     status | log | ops | csv
Export:   export [FILE] [force]
Session:  help | quit";

/// One line of session input.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Play,
    Pause,
    /// Metadata loaded with this total duration.
    Metadata(f64),
    /// Position update to an absolute time.
    Seek(f64),
    /// Position advanced by a delta.
    Tick(f64),
    /// On-screen count control.
    Count,
    /// A key press; only the configured key counts.
    Key(String),
    Undo,
    Reset,
    Status,
    Log,
    Ops,
    Csv,
    Export { file: Option<PathBuf>, force: bool },
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse a line; blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> AppResult<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

fn required<'a>(cmd: &str, arg: Option<&'a str>) -> AppResult<&'a str> {
    arg.ok_or_else(|| AppError::InvalidCommand(format!("'{cmd}' needs a value")))
}

impl FromStr for SessionCommand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let Some(word) = parts.next() else {
            return Err(AppError::InvalidCommand(s.to_string()));
        };
        let word = word.to_lowercase();
        let arg = parts.next();

        let cmd = match word.as_str() {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "meta" | "metadata" => Self::Metadata(parse_seconds(required(&word, arg)?)),
            "time" | "seek" => Self::Seek(parse_seconds(required(&word, arg)?)),
            "tick" => {
                let raw = required(&word, arg)?;
                let delta = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|d| d.is_finite())
                    .ok_or_else(|| AppError::InvalidNumber(raw.to_string()))?;
                Self::Tick(delta)
            }
            "count" | "button" | "+" => Self::Count,
            "key" => Self::Key(required(&word, arg)?.to_string()),
            "undo" => Self::Undo,
            "reset" => Self::Reset,
            "status" => Self::Status,
            "log" => Self::Log,
            "ops" => Self::Ops,
            "csv" => Self::Csv,
            "export" => {
                let mut file = None;
                let mut force = false;
                for token in arg.into_iter().chain(parts) {
                    if token.eq_ignore_ascii_case("force") || token == "--force" {
                        force = true;
                    } else {
                        file = Some(PathBuf::from(token));
                    }
                }
                Self::Export { file, force }
            }
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Err(AppError::InvalidCommand(s.to_string())),
        };
        Ok(cmd)
    }
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    cfg: Config,
    media: SimulatedMedia,
    monitor: Rc<RefCell<PlaybackMonitor>>,
    ledger: TallyLedger,
    ops: OpLog,
    /// Print operator feedback on stdout.
    echo: bool,
}

impl Session {
    /// New session with a fresh media source already attached.
    pub fn new(cfg: Config) -> Self {
        let media = SimulatedMedia::new();
        let monitor = PlaybackMonitor::shared();
        let mut ops = OpLog::new();

        if PlaybackMonitor::attach(&monitor, Some(&media)) {
            ops.record("attach", "media", "Playback monitor attached");
        }

        let ledger = TallyLedger::new(&cfg.time_format);
        Self {
            cfg,
            media,
            monitor,
            ledger,
            ops,
            echo: true,
        }
    }

    /// Keep stdout clean (used when the export itself goes to stdout).
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn ledger(&self) -> &TallyLedger {
        &self.ledger
    }

    pub fn media(&self) -> &SimulatedMedia {
        &self.media
    }

    pub fn ops(&self) -> &OpLog {
        &self.ops
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.monitor.borrow().snapshot()
    }

    /// Execute one command to completion.
    pub fn apply(&mut self, cmd: SessionCommand) -> AppResult<Flow> {
        match cmd {
            SessionCommand::Play => {
                self.media.play();
                let at = self.snapshot().position_label();
                self.ops.record("play", "", &format!("at {at}"));
                self.say(|| info(format!("Playing at {at}")));
            }
            SessionCommand::Pause => {
                self.media.pause();
                let at = self.snapshot().position_label();
                self.ops.record("pause", "", &format!("at {at}"));
                self.say(|| info(format!("Paused at {at}")));
            }
            SessionCommand::Metadata(total) => {
                self.media.load_metadata(total);
                let duration = self.snapshot().duration_label();
                self.ops
                    .record("metadata", "", &format!("duration {duration}"));
                self.say(|| info(format!("Video duration {duration}")));
            }
            SessionCommand::Seek(secs) => self.media.seek(secs),
            SessionCommand::Tick(delta) => self.media.advance(delta),
            SessionCommand::Count => self.count(TriggerSource::ManualButton),
            SessionCommand::Key(name) => {
                if self.cfg.is_count_key(&name) {
                    self.count(TriggerSource::ManualKey);
                } else {
                    self.say(|| hint(format!("Key '{name}' is not bound.")));
                }
            }
            SessionCommand::Undo => match self.ledger.undo() {
                Some(entry) => {
                    self.ops.record(
                        "undo",
                        &format!("#{}", entry.sequence_id),
                        &format!("Removed entry counted at {}", entry.wall_clock_time),
                    );
                    let total = self.ledger.count();
                    self.say(|| info(format!("Undid #{} (total {total})", entry.sequence_id)));
                }
                None => self.say(|| hint("Nothing to undo.")),
            },
            SessionCommand::Reset => {
                let dropped = self.ledger.count();
                self.ledger.reset();
                let started = wall_clock(&self.ledger.session_started(), &self.cfg.time_format);
                self.ops.record(
                    "reset",
                    "",
                    &format!("Cleared {dropped} entries, session restarted at {started}"),
                );
                self.say(|| info(format!("Counter reset. Session started at {started}")));
            }
            SessionCommand::Status => self.say(|| self.print_status()),
            SessionCommand::Log => self.say(|| self.print_recent_log()),
            SessionCommand::Ops => self.say(|| print!("{}", self.ops.render())),
            SessionCommand::Csv => self.say(|| println!("{}", self.ledger.export_log())),
            SessionCommand::Export { file, force } => {
                let path = file.unwrap_or_else(|| self.cfg.export_target("csv"));
                let format = ExportFormat::from_path(&path);
                let mut sink = FileSink::new(path.clone(), force);
                ExportLogic::export(&self.ledger, format, &mut sink)?;
                self.ops.record(
                    "export",
                    &path.display().to_string(),
                    &format!("{} entries as {}", self.ledger.count(), format.as_str()),
                );
            }
            SessionCommand::Help => self.say(|| println!("{HELP}")),
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Process every line of `input` in order.
    ///
    /// Bad lines and failed commands are reported and skipped; only a read
    /// error ends the loop early.
    pub fn run<R: BufRead>(&mut self, input: R, interactive: bool) -> AppResult<()> {
        if interactive {
            prompt();
        }

        for line in input.lines() {
            let line = line?;
            let flow = match SessionCommand::parse_line(&line) {
                Ok(Some(cmd)) => self.apply(cmd).unwrap_or_else(|e| {
                    error(e);
                    Flow::Continue
                }),
                Ok(None) => Flow::Continue,
                Err(e) if self.echo => {
                    warning(format!("{e} (type 'help')"));
                    Flow::Continue
                }
                Err(e) => {
                    error(e);
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
            if interactive {
                prompt();
            }
        }

        Ok(())
    }

    fn count(&mut self, source: TriggerSource) {
        let snapshot = self.snapshot();
        match self.ledger.increment(source, &snapshot) {
            Transition::Accepted(id) => {
                if let Some(entry) = self.ledger.head() {
                    self.ops.record(
                        "count",
                        source.as_str(),
                        &format!("#{id} at video {}", entry.playback_position_label),
                    );
                    self.say(|| {
                        counted(format!(
                            "#{} – {} • {} • {} (total {})",
                            id,
                            entry.wall_clock_time,
                            entry.playback_position_label,
                            source,
                            self.ledger.count()
                        ))
                    });
                }
            }
            Transition::Rejected => {
                self.ops
                    .record("rejected", source.as_str(), "Video not playing");
                self.say(|| warning("Play the video to start counting."));
            }
        }
    }

    fn say(&self, show: impl FnOnce()) {
        if self.echo {
            show();
        }
    }

    fn print_status(&self) {
        let snapshot = self.snapshot();
        header("Vehicle Pickup Counter");
        println!(
            "{} {}",
            playing_badge(snapshot.is_playing),
            self.monitor.borrow().timer_label()
        );
        println!(
            "Total Cars Served: {}",
            bold(&self.ledger.count().to_string())
        );
        println!(
            "Session started at: {}",
            wall_clock(&self.ledger.session_started(), &self.cfg.time_format)
        );
    }

    fn print_recent_log(&self) {
        if self.ledger.is_empty() {
            hint("No vehicles counted yet.");
            return;
        }

        let mut table = Table::new(vec![
            Column::new("#"),
            Column::new("Counted At"),
            Column::new("Video"),
            Column::new("Triggered By"),
        ]);

        for entry in self.ledger.entries().take(self.cfg.recent_log_size) {
            let source = entry.source.as_str();
            table.add_row(vec![
                format!("#{}", entry.sequence_id),
                entry.wall_clock_time.clone(),
                colorize_clock(&entry.playback_position_label),
                format!("{}{}{}", color_for_source(source), source, RESET),
            ]);
        }

        println!("Recent Vehicle Log");
        print!("{}", table.render());
    }
}

fn prompt() {
    print!("vtally> ");
    std::io::stdout().flush().ok();
}
