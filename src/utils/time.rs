//! Time utilities: playback clock labels ("MM:SS") and wall clock labels.

use chrono::{DateTime, Local};
use std::fmt::Write;

/// Label used whenever a playback time is unknown or invalid.
pub const ZERO_CLOCK: &str = "00:00";

/// Default wall clock format for log entries (e.g. `14:03:27`).
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Format a playback position as `MM:SS`.
///
/// `None`, NaN, infinities and negative values all map to `00:00`: media
/// sources report NaN before their metadata is loaded. Minutes are not
/// capped, so one hour reads `60:00`.
pub fn format_time(seconds: Option<f64>) -> String {
    match seconds.and_then(valid_seconds) {
        Some(t) => {
            let m = (t / 60.0).floor() as u64;
            let s = (t % 60.0).floor() as u64;
            format!("{:02}:{:02}", m, s)
        }
        None => ZERO_CLOCK.to_string(),
    }
}

/// Keep a raw seconds value only when it is a usable playback time.
pub fn valid_seconds(seconds: f64) -> Option<f64> {
    (seconds.is_finite() && seconds >= 0.0).then_some(seconds)
}

/// Parse a seconds value typed by the operator.
///
/// Anything that is not a number becomes NaN, mirroring what a media element
/// reports before it knows its timing. Downstream guards turn it into `00:00`.
pub fn parse_seconds(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Check a chrono format string without panicking on bad specifiers.
pub fn is_valid_time_format(fmt: &str) -> bool {
    let mut out = String::new();
    write!(out, "{}", Local::now().format(fmt)).is_ok()
}

/// Human readable wall clock label.
/// Falls back to [`DEFAULT_TIME_FORMAT`] when `fmt` cannot be rendered.
pub fn wall_clock(at: &DateTime<Local>, fmt: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(fmt)).is_err() {
        out.clear();
        out.push_str(&at.format(DEFAULT_TIME_FORMAT).to_string());
    }
    out
}
