//! Core data types for the backtester.

mod ohlcv;
mod order;
mod position;
mod trade;

pub use ohlcv::Bar;
pub use order::{Execution, Order, OrderId, OrderIntent, OrderStatus, Side};
pub use position::{FillLegs, Portfolio, Position};
pub use trade::{Trade, TradeDirection, TradeId};
