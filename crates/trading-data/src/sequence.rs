//! Ordering and sanity checks shared by every feed.

use trading_core::error::FeedError;
use trading_core::types::Bar;

/// Admits bars only in strictly increasing timestamp order.
#[derive(Debug, Clone, Default)]
pub struct SequenceGuard {
    last_timestamp: Option<i64>,
    records: u64,
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the next bar against the previous one.
    pub fn admit(&mut self, bar: Bar) -> Result<Bar, FeedError> {
        self.records += 1;

        if !bar.is_finite() {
            return Err(FeedError::Parse {
                record: self.records,
                message: "price or volume is not a finite number".to_string(),
            });
        }

        if let Some(previous) = self.last_timestamp {
            if bar.timestamp <= previous {
                return Err(FeedError::OutOfOrder {
                    record: self.records,
                    timestamp: bar.timestamp,
                    previous,
                });
            }
        }

        self.last_timestamp = Some(bar.timestamp);
        Ok(bar)
    }

    /// Records seen so far, including the current one.
    pub fn records(&self) -> u64 {
        self.records
    }
}
