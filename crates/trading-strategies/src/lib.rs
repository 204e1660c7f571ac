//! Trading strategy implementations.
//!
//! - EMA trend: fast/slow crossover entries with a flip when the trend turns

mod trend;

pub use trend::{TrendConfig, TrendStrategy};
