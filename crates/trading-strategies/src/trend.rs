//! EMA trend strategy.
//!
//! Enters on a fast/slow crossover while flat and flips the position when
//! the fast average moves to the wrong side of the slow one.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trading_core::{
    error::{ConfigError, IndicatorError, StrategyError},
    traits::{Strategy, StrategyConfig, StrategyContext, StrategyState},
    types::OrderIntent,
};
use trading_indicators::IndicatorEngine;

/// Configuration for the trend strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Fast EMA period
    pub fast_period: usize,
    /// Slow EMA period
    pub slow_period: usize,
    /// Size of an entry from flat
    pub unit_size: Decimal,
    /// Size of the order that turns a position around
    pub flip_size: Decimal,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            fast_period: 64,
            slow_period: 256,
            unit_size: dec!(1),
            flip_size: dec!(2),
        }
    }
}

impl TrendConfig {
    /// Indicator pair matching these periods.
    pub fn indicators(&self) -> Result<IndicatorEngine, IndicatorError> {
        IndicatorEngine::new(self.fast_period, self.slow_period)
    }
}

impl StrategyConfig for TrendConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        for (name, period) in [
            ("strategy.fast_period", self.fast_period),
            ("strategy.slow_period", self.slow_period),
        ] {
            if period == 0 {
                return Err(ConfigError::NonPositive {
                    name,
                    value: period.to_string(),
                }
                .into());
            }
        }
        if self.fast_period >= self.slow_period {
            return Err(ConfigError::PeriodOrder {
                fast: self.fast_period,
                slow: self.slow_period,
            }
            .into());
        }
        for (name, size) in [
            ("strategy.unit_size", self.unit_size),
            ("strategy.flip_size", self.flip_size),
        ] {
            if size <= Decimal::ZERO {
                return Err(ConfigError::NonPositive {
                    name,
                    value: size.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Crossover entries, flip on trend reversal.
///
/// Evaluated against the position as reported at the start of the bar:
/// 1. flat and fast crosses above slow: buy `unit_size`
/// 2. flat and fast crosses below slow: sell `unit_size`
/// 3. long and fast below slow: sell `flip_size`
/// 4. short and fast above slow: buy `flip_size`
pub struct TrendStrategy {
    config: TrendConfig,
    bars_processed: usize,
    intents_emitted: usize,
    last_fast: Option<f64>,
    last_slow: Option<f64>,
}

impl TrendStrategy {
    pub fn new(config: TrendConfig) -> Self {
        Self {
            config,
            bars_processed: 0,
            intents_emitted: 0,
            last_fast: None,
            last_slow: None,
        }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }
}

impl Strategy for TrendStrategy {
    fn name(&self) -> &str {
        "EMA Trend"
    }

    fn description(&self) -> &str {
        "Enters on fast/slow EMA crossovers and flips when the trend reverses"
    }

    fn on_bar(&mut self, ctx: &StrategyContext<'_>) -> Vec<OrderIntent> {
        self.bars_processed += 1;
        let r = ctx.readings;
        self.last_fast = Some(r.fast);
        self.last_slow = Some(r.slow);

        let mut intents = Vec::new();
        let position = ctx.position;

        if position.is_zero() {
            if r.crossed_up() {
                intents.push(OrderIntent::buy(self.config.unit_size).with_reason("cross up"));
            } else if r.crossed_down() {
                intents.push(OrderIntent::sell(self.config.unit_size).with_reason("cross down"));
            }
        }

        if position > Decimal::ZERO && r.fast_below() {
            intents.push(OrderIntent::sell(self.config.flip_size).with_reason("flip to short"));
        } else if position < Decimal::ZERO && r.fast_above() {
            intents.push(OrderIntent::buy(self.config.flip_size).with_reason("flip to long"));
        }

        if !intents.is_empty() {
            debug!(
                "{} intents at fast={:.4} slow={:.4} position={}",
                intents.len(),
                r.fast,
                r.slow,
                position
            );
        }
        self.intents_emitted += intents.len();
        intents
    }

    fn reset(&mut self) {
        self.bars_processed = 0;
        self.intents_emitted = 0;
        self.last_fast = None;
        self.last_slow = None;
    }

    fn state(&self) -> StrategyState {
        StrategyState {
            name: self.name().to_string(),
            bars_processed: self.bars_processed,
            intents_emitted: self.intents_emitted,
            indicators: [("fast_ema", self.last_fast), ("slow_ema", self.last_slow)]
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
                .collect(),
            custom: serde_json::json!({
                "fast_period": self.config.fast_period,
                "slow_period": self.config.slow_period,
                "unit_size": self.config.unit_size,
                "flip_size": self.config.flip_size,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trading_core::traits::CrossReadings;
    use trading_core::types::{Bar, Side};

    fn readings(fast: f64, slow: f64, prev: Option<(f64, f64)>) -> CrossReadings {
        CrossReadings {
            fast,
            slow,
            prev_fast: prev.map(|p| p.0),
            prev_slow: prev.map(|p| p.1),
        }
    }

    fn decide(
        strategy: &mut TrendStrategy,
        readings: CrossReadings,
        position: Decimal,
    ) -> Vec<OrderIntent> {
        let bar = Bar::flat(0, 100.0);
        strategy.on_bar(&StrategyContext {
            bar: &bar,
            readings,
            position,
        })
    }

    fn strategy() -> TrendStrategy {
        TrendStrategy::new(TrendConfig::default())
    }

    #[test]
    fn test_config_validation() {
        assert!(TrendConfig::default().validate().is_ok());

        let swapped = TrendConfig {
            fast_period: 300,
            ..Default::default()
        };
        assert!(matches!(
            swapped.validate(),
            Err(StrategyError::InvalidConfig(ConfigError::PeriodOrder { fast: 300, slow: 256 }))
        ));

        let zero = TrendConfig {
            fast_period: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let no_size = TrendConfig {
            unit_size: Decimal::ZERO,
            ..Default::default()
        };
        assert!(no_size.validate().is_err());
    }

    #[test]
    fn test_indicators_use_configured_periods() {
        let engine = TrendConfig::default().indicators().unwrap();
        assert_eq!(engine.warmup_period(), 256);
    }

    #[test]
    fn test_flat_cross_up_buys_unit() {
        let mut s = strategy();
        let intents = decide(&mut s, readings(11.0, 10.0, Some((9.0, 10.0))), Decimal::ZERO);
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].side, Side::Buy);
        assert_eq!(intents[0].size, dec!(1));
    }

    #[test]
    fn test_flat_cross_down_sells_unit() {
        let mut s = strategy();
        let intents = decide(&mut s, readings(9.0, 10.0, Some((10.0, 10.0))), Decimal::ZERO);
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].side, Side::Sell);
        assert_eq!(intents[0].size, dec!(1));
    }

    #[test]
    fn test_flat_without_cross_does_nothing() {
        let mut s = strategy();
        assert!(decide(&mut s, readings(11.0, 10.0, Some((10.5, 10.0))), Decimal::ZERO).is_empty());
        assert!(decide(&mut s, readings(10.0, 10.0, Some((9.0, 10.0))), Decimal::ZERO).is_empty());
    }

    #[test]
    fn test_long_flips_when_fast_below() {
        let mut s = strategy();
        // No cross needed: fast was already below
        let intents = decide(&mut s, readings(9.0, 10.0, Some((9.0, 10.0))), dec!(1));
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].side, Side::Sell);
        assert_eq!(intents[0].size, dec!(2));
    }

    #[test]
    fn test_short_flips_when_fast_above() {
        let mut s = strategy();
        let intents = decide(&mut s, readings(11.0, 10.0, Some((11.0, 10.0))), dec!(-1));
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].side, Side::Buy);
        assert_eq!(intents[0].size, dec!(2));
    }

    #[test]
    fn test_positioned_ignores_crosses() {
        let mut s = strategy();
        // Long and fast above slow: hold
        assert!(decide(&mut s, readings(11.0, 10.0, Some((9.0, 10.0))), dec!(1)).is_empty());
        // Short and fast below slow: hold
        assert!(decide(&mut s, readings(9.0, 10.0, Some((11.0, 10.0))), dec!(-1)).is_empty());
    }

    #[test]
    fn test_state_tracks_counts() {
        let mut s = strategy();
        decide(&mut s, readings(11.0, 10.0, None), Decimal::ZERO);
        decide(&mut s, readings(12.0, 10.0, Some((11.0, 10.0))), dec!(1));

        let state = s.state();
        assert_eq!(state.bars_processed, 2);
        assert_eq!(state.intents_emitted, 1);
        assert_eq!(state.indicators.get("fast_ema"), Some(&12.0));

        s.reset();
        assert_eq!(s.state().bars_processed, 0);
        assert!(s.state().indicators.is_empty());
    }
}
