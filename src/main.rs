//! EMA trend backtester CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use trading_config::load_config;
use trading_monitor::setup_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    let log_level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    setup_logging(&log_level, cli.json_logs || config.logging.is_json())
        .context("Failed to install logger")?;

    match cli.command {
        Commands::Backtest(args) => cli::commands::backtest::run(args, config),
        Commands::ValidateConfig => cli::commands::validate::run(&config, &cli.config),
    }
}
