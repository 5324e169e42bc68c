//! ANSI color helper utilities for terminal output.

use crate::utils::time::ZERO_CLOCK;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Colour used for the provenance column of the recent log.
pub fn color_for_source(source: &str) -> &'static str {
    match source {
        "manual-button" => BLUE,
        "manual-key" => CYAN,
        _ => RESET,
    }
}

/// Grey out a playback label that carries no information.
pub fn colorize_clock(value: &str) -> String {
    if value.trim() == ZERO_CLOCK {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
