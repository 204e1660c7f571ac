//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use trading_config::AppConfig;

#[derive(Parser)]
#[command(name = "trend-trader")]
#[command(author, version, about = "EMA trend-following backtester")]
pub struct Cli {
    /// Configuration file path (may be absent)
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level, overrides the configuration file
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a backtest over a CSV file of bars
    Backtest(BacktestArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Data file (CSV with time, open, high, low, close, volume)
    #[arg(short, long, env = "TREND_TRADER_DATA")]
    pub data: PathBuf,

    /// Starting cash
    #[arg(long)]
    pub cash: Option<Decimal>,

    /// Commission rate as a fraction of traded value
    #[arg(long)]
    pub commission: Option<Decimal>,

    /// Fast EMA period
    #[arg(long)]
    pub fast: Option<usize>,

    /// Slow EMA period
    #[arg(long)]
    pub slow: Option<usize>,

    /// Entry size from flat
    #[arg(long)]
    pub unit: Option<Decimal>,

    /// Size of the order that flips a position
    #[arg(long)]
    pub flip: Option<Decimal>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Save the JSON report to file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Write the equity curve as CSV
    #[arg(long)]
    pub equity_csv: Option<PathBuf>,

    /// Log per-bar status lines at debug level
    #[arg(long)]
    pub quiet_status: bool,
}

impl BacktestArgs {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(cash) = self.cash {
            config.backtest.starting_cash = cash;
        }
        if let Some(rate) = self.commission {
            config.backtest.commission_rate = rate;
        }
        if let Some(fast) = self.fast {
            config.strategy.fast_period = fast;
        }
        if let Some(slow) = self.slow {
            config.strategy.slow_period = slow;
        }
        if let Some(unit) = self.unit {
            config.strategy.unit_size = unit;
        }
        if let Some(flip) = self.flip {
            config.strategy.flip_size = flip;
        }
        if self.quiet_status {
            config.logging.quiet_status = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "trend-trader",
            "backtest",
            "--data",
            "bars.csv",
            "--cash",
            "2500.5",
            "--fast",
            "8",
            "--slow",
            "32",
            "--output",
            "json",
        ]);
        let Commands::Backtest(args) = cli.command else {
            panic!("expected backtest");
        };

        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.backtest.starting_cash, dec!(2500.5));
        assert_eq!(config.strategy.fast_period, 8);
        assert_eq!(config.strategy.slow_period, 32);
        // Untouched values come from the configuration
        assert_eq!(config.strategy.flip_size, dec!(2));
        assert!(matches!(args.output, OutputFormat::Json));
    }

    #[test]
    fn test_cli_requires_data() {
        assert!(Cli::try_parse_from(["trend-trader", "backtest"]).is_err());
    }
}
