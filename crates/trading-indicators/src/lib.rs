//! Streaming technical indicators.
//!
//! - Exponential moving average, in batch form (reference) and streaming form
//! - `IndicatorEngine`, the fast/slow pair updated once per bar
//!
//! The streaming EMA reproduces the batch EMA bit for bit, so the batch form
//! doubles as the oracle in tests.

pub mod engine;
pub mod moving_average;

pub use engine::IndicatorEngine;
pub use moving_average::{Ema, StreamingEma};
