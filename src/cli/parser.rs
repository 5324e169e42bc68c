use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for vtally
/// CLI application to count vehicles served while watching a video feed
#[derive(Parser)]
#[command(
    name = "vtally",
    version = env!("CARGO_PKG_VERSION"),
    about = "A manual vehicle tally: count while the video plays, undo, reset and export a timestamped log",
    long_about = None
)]
pub struct Cli {
    /// Override the directory exports are written to
    #[arg(global = true, long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<String>,

    /// Run in test mode (config file ignored and never written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Start an interactive counting session (commands on stdin, 'help' for the list)
    Session,

    /// Run a session script and export the resulting log
    Replay {
        /// Script with one session command per line
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
