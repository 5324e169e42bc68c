use crate::config::Config;
use crate::core::session::{HELP, Session};
use crate::errors::AppResult;
use crate::ui::messages::{header, hint};
use std::io;

/// Handle the `session` command: read commands from stdin until EOF or `quit`.
pub fn handle(cfg: &Config) -> AppResult<()> {
    header("Vehicle Pickup Counter");
    hint("Rule: count only when a vehicle stops at the pickup zone.");
    hint(format!(
        "Type 'key {}' or 'count' while the video plays.",
        cfg.count_key
    ));
    println!("{HELP}\n");

    let mut session = Session::new(cfg.clone());
    let stdin = io::stdin();
    session.run(stdin.lock(), true)?;

    println!();
    Ok(())
}
