use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportSink, FileSink, StdoutSink};
use std::fs;

/// Handle the `replay` command: run a script, then export the log.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Replay {
        script,
        out,
        format,
        force,
    } = cmd
    {
        let content = fs::read_to_string(script)?;

        let mut session = Session::new(cfg.clone()).with_echo(out.is_some());
        session.run(content.as_bytes(), false)?;

        let mut sink: Box<dyn ExportSink> = match out {
            Some(path) => Box::new(FileSink::new(path.clone(), *force).with_confirmation()),
            None => Box::new(StdoutSink),
        };
        ExportLogic::export(session.ledger(), *format, sink.as_mut())?;
    }
    Ok(())
}
