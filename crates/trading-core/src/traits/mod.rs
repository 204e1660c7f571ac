//! Core traits for the backtester.

mod broker;
mod data_source;
mod indicator;
mod strategy;

pub use broker::{Broker, ExecutionReport, TradeUpdate};
pub use data_source::BarFeed;
pub use indicator::{Indicator, StreamingIndicator};
pub use strategy::{CrossReadings, Strategy, StrategyConfig, StrategyContext, StrategyState};
