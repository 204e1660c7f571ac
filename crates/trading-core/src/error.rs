//! Error types for the backtester.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error. Only feed and configuration failures abort a run.
#[derive(Error, Debug)]
pub enum TradingError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),
}

/// Invalid startup parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be greater than 0, got {value}")]
    NonPositive { name: &'static str, value: String },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: String },

    #[error("Fast period ({fast}) must be less than slow period ({slow})")]
    PeriodOrder { fast: usize, slow: usize },

    #[error("Could not load configuration: {0}")]
    Load(String),
}

/// Bar feed errors: missing or malformed input data.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Data file not found: {0}")]
    NotFound(String),

    #[error("Parse error at record {record}: {message}")]
    Parse { record: u64, message: String },

    #[error("Bar at record {record} is out of order: {timestamp} does not follow {previous}")]
    OutOfOrder {
        record: u64,
        timestamp: i64,
        previous: i64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why the broker refused an order. Carried on the order, never thrown.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderError {
    #[error("Insufficient cash: required {required}, available {available}")]
    InsufficientCash { required: Decimal, available: Decimal },

    #[error("Invalid order size: {0}")]
    InvalidSize(Decimal),

    #[error("Invalid execution price: {0}")]
    InvalidPrice(f64),

    #[error("Order value out of range: {size} at {price}")]
    Overflow { price: Decimal, size: Decimal },
}

/// Strategy-specific errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
