//! Configuration management.
//!
//! Layered, lowest priority first: built-in defaults, the TOML file (may be
//! absent), then `TRADING__<SECTION>__<KEY>` environment variables.

mod settings;

pub use settings::{AppConfig, AppSettings, BacktestSettings, LoggingConfig, StrategySettings};

use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use trading_core::error::ConfigError;

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("TRADING")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config(Path::new("/no/such/trend-trader.toml")).unwrap();
        assert_eq!(config.strategy.fast_period, 64);
        assert_eq!(config.backtest.starting_cash, dec!(100000));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("trend-trader-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[strategy]\nfast_period = 10\nslow_period = 40\n").unwrap();
        writeln!(file, "[backtest]\nstarting_cash = 5000\n").unwrap();
        drop(file);

        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.strategy.fast_period, 10);
        assert_eq!(config.strategy.slow_period, 40);
        // Untouched keys keep their defaults
        assert_eq!(config.strategy.flip_size, dec!(2));
        assert_eq!(config.backtest.starting_cash, dec!(5000));
        assert_eq!(config.backtest.commission_rate, dec!(0.0004));
    }
}
