use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// Creates the config directory and writes a default configuration file.
/// With `--test` nothing is written.
pub fn handle(cli: &Cli) -> AppResult<()> {
    println!("⚙️  Initializing vtally…");

    let path = Config::init_all(cli.test)?;
    let cfg = Config::default();

    println!("📄 Config file : {}", path.display());
    println!("📁 Export dir  : {}", cfg.export_path().display());

    success("vtally initialization completed!");
    Ok(())
}
