//! Formatting utilities used for CLI outputs.

use crate::utils::colors::{GREEN, RESET, YELLOW};
use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Pad on the right using the display width, so icons and accented text
/// line up in the terminal.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Playback badge shown in the status line.
pub fn playing_badge(is_playing: bool) -> String {
    if is_playing {
        format!("{GREEN}[Playing]{RESET}")
    } else {
        format!("{YELLOW}[Paused]{RESET}")
    }
}
