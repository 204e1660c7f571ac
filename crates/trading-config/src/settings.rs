//! Configuration structures.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use trading_backtest::BacktestConfig;
use trading_core::error::ConfigError;
use trading_strategies::TrendConfig;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backtest: BacktestSettings,
    #[serde(default)]
    pub strategy: StrategySettings,
}

impl AppConfig {
    /// Check every parameter before a run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backtest_config().validate()
    }

    /// Engine configuration for a backtest run.
    pub fn backtest_config(&self) -> BacktestConfig {
        BacktestConfig {
            starting_cash: self.backtest.starting_cash,
            commission_rate: self.backtest.commission_rate,
            strategy: TrendConfig {
                fast_period: self.strategy.fast_period,
                slow_period: self.strategy.slow_period,
                unit_size: self.strategy.unit_size,
                flip_size: self.strategy.flip_size,
            },
        }
    }

    /// Render as TOML, in the layout the config file uses.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Load(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "trend-trader".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Log per-bar status lines at debug level
    #[serde(default)]
    pub quiet_status: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            quiet_status: false,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Backtest settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    pub starting_cash: Decimal,
    /// Fraction of traded value, 0.0004 = 0.04%
    pub commission_rate: Decimal,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            starting_cash: dec!(100000),
            commission_rate: dec!(0.0004),
        }
    }
}

/// Strategy settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategySettings {
    pub fast_period: usize,
    pub slow_period: usize,
    pub unit_size: Decimal,
    pub flip_size: Decimal,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            fast_period: 64,
            slow_period: 256,
            unit_size: dec!(1),
            flip_size: dec!(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backtest_config(), BacktestConfig::default());
    }

    #[test]
    fn test_zero_period() {
        let mut config = AppConfig::default();
        config.strategy.fast_period = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "strategy.fast_period", .. })
        ));
    }

    #[test]
    fn test_period_order() {
        let mut config = AppConfig::default();
        config.strategy.fast_period = 256;
        assert_eq!(
            config.validate(),
            Err(ConfigError::PeriodOrder { fast: 256, slow: 256 })
        );
    }

    #[test]
    fn test_sizes_and_money() {
        let mut config = AppConfig::default();
        config.strategy.flip_size = Decimal::ZERO;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "strategy.flip_size", .. })
        ));

        let mut config = AppConfig::default();
        config.backtest.commission_rate = dec!(-0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { name: "backtest.commission_rate", .. })
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[strategy]"));
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
