// src/export/sink.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Receives the rendered export text and delivers it to the operator.
pub trait ExportSink {
    fn deliver(&mut self, content: &str) -> AppResult<()>;

    /// Where the export went, for messages.
    fn describe(&self) -> String;

    /// Sinks writing to the terminal get no status messages mixed in.
    fn is_console(&self) -> bool {
        false
    }
}

/// Writes the export to a file.
pub struct FileSink {
    pub path: PathBuf,
    pub force: bool,
    /// Ask on stdin before overwriting instead of failing.
    pub confirm: bool,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, force: bool) -> Self {
        Self {
            path: path.into(),
            force,
            confirm: false,
        }
    }

    pub fn with_confirmation(mut self) -> Self {
        self.confirm = true;
        self
    }
}

impl ExportSink for FileSink {
    fn deliver(&mut self, content: &str) -> AppResult<()> {
        if self.confirm {
            let stdin = io::stdin();
            ensure_writable(&self.path, self.force, &mut stdin.lock())?;
        } else if self.path.exists() && !self.force {
            return Err(AppError::Export(format!(
                "'{}' already exists (use force to overwrite)",
                self.path.display()
            )));
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, content)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Prints the export on standard output.
#[derive(Default)]
pub struct StdoutSink;

impl ExportSink for StdoutSink {
    fn deliver(&mut self, content: &str) -> AppResult<()> {
        let mut out = io::stdout().lock();
        out.write_all(content.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        "stdout".to_string()
    }

    fn is_console(&self) -> bool {
        true
    }
}

/// Verifica se un file può essere creato o sovrascritto.
///
/// - Se il file NON esiste → Ok
/// - Se esiste ed è abilitato `force` → Ok
/// - Se esiste e `force == false` → chiede conferma all'utente.
pub(crate) fn ensure_writable(path: &Path, force: bool, input: &mut dyn BufRead) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "Export cancelled: existing file not overwritten".into(),
        ))
    }
}
