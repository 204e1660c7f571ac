//! Simulated brokers.

mod paper;

pub use paper::{PaperBroker, DEFAULT_COMMISSION_RATE};
