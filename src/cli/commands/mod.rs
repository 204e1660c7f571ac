//! CLI command implementations.

pub mod backtest;
pub mod validate;
