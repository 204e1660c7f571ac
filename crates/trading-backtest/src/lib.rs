//! Backtesting engine.

mod engine;
mod events;
mod report;
mod statistics;

pub use engine::{BacktestConfig, BacktestEngine};
pub use events::{EngineEvent, EventSink};
pub use report::BacktestReport;
pub use statistics::BacktestStats;
