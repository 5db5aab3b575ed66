//! X1 command line: entry point.

use clap::Parser;
use x1_cli::Cli;
use x1_types::SystemClock;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = x1_cli::load_config(cli.config.as_deref())?;
    let (format, level) = x1_cli::log_settings(&cli, &config)?;
    x1_utils::init_logging(format, &level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let output = x1_cli::execute(&cli.command, &cli.state, &config, SystemClock, cli.json)?;
    println!("{output}");
    Ok(())
}
