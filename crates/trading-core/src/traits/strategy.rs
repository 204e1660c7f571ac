//! Strategy trait definitions.

use crate::error::StrategyError;
use crate::types::{Bar, Order, OrderIntent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration trait for strategies.
pub trait StrategyConfig: Send + Sync + Clone + 'static {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), StrategyError>;
}

/// Fast and slow moving-average readings for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossReadings {
    pub fast: f64,
    pub slow: f64,
    /// Fast value one bar earlier, `None` on its first defined bar
    pub prev_fast: Option<f64>,
    /// Slow value one bar earlier, `None` on its first defined bar
    pub prev_slow: Option<f64>,
}

impl CrossReadings {
    /// Fast above slow now and not above it one bar earlier.
    ///
    /// An undefined prior relation counts as not above, so the first bar
    /// where both averages exist can open a position.
    pub fn crossed_up(&self) -> bool {
        self.fast > self.slow
            && match (self.prev_fast, self.prev_slow) {
                (Some(f), Some(s)) => f <= s,
                _ => true,
            }
    }

    /// Fast below slow now and not below it one bar earlier.
    pub fn crossed_down(&self) -> bool {
        self.fast < self.slow
            && match (self.prev_fast, self.prev_slow) {
                (Some(f), Some(s)) => f >= s,
                _ => true,
            }
    }

    pub fn fast_above(&self) -> bool {
        self.fast > self.slow
    }

    pub fn fast_below(&self) -> bool {
        self.fast < self.slow
    }
}

/// Everything a strategy may read when deciding on a bar.
#[derive(Debug, Clone, Copy)]
pub struct StrategyContext<'a> {
    /// The bar being processed
    pub bar: &'a Bar,
    /// Indicator readings after this bar's update
    pub readings: CrossReadings,
    /// Signed position size as reported by the broker
    pub position: Decimal,
}

/// State of a strategy for monitoring and serialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyState {
    /// Strategy name
    pub name: String,
    /// Number of bars evaluated
    pub bars_processed: usize,
    /// Number of intents emitted
    pub intents_emitted: usize,
    /// Latest indicator values
    pub indicators: BTreeMap<String, f64>,
    /// Custom strategy-specific state
    pub custom: serde_json::Value,
}

/// Core strategy trait.
///
/// Called once per bar after warm-up. Strategies never touch the broker;
/// they return intents and the engine forwards them.
pub trait Strategy {
    /// Get the unique name of this strategy.
    fn name(&self) -> &str;

    /// Decide on the current bar.
    ///
    /// # Returns
    /// Zero or more intents, submitted in order
    fn on_bar(&mut self, ctx: &StrategyContext<'_>) -> Vec<OrderIntent>;

    /// Called when an order reaches a terminal status.
    fn on_order(&mut self, _order: &Order) {}

    /// Reset the strategy state.
    fn reset(&mut self);

    /// Get the current strategy state for monitoring.
    fn state(&self) -> StrategyState;

    /// Get a description of the strategy.
    fn description(&self) -> &str {
        ""
    }
}
