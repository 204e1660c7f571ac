//! Core types and traits for the trend-following backtester.
//!
//! This crate provides the foundational building blocks including:
//! - Market data (`Bar`)
//! - Orders, positions, trades and the cash portfolio
//! - The error taxonomy shared by every crate
//! - Traits for bar feeds, streaming indicators, strategies and brokers

pub mod types;
pub mod traits;
pub mod error;

pub use error::TradingError;
pub use types::*;
pub use traits::*;
