//! In-memory bar feed.

use std::vec::IntoIter;
use trading_core::error::FeedError;
use trading_core::traits::BarFeed;
use trading_core::types::Bar;

use crate::SequenceGuard;

/// Serves a vector of bars in order.
#[derive(Debug, Clone)]
pub struct VecFeed {
    name: String,
    bars: IntoIter<Bar>,
    guard: SequenceGuard,
}

impl VecFeed {
    pub fn new(name: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            name: name.into(),
            bars: bars.into_iter(),
            guard: SequenceGuard::new(),
        }
    }

    /// Flat bars from a list of closes, `step_ms` apart starting at `start_ms`.
    pub fn from_closes(closes: &[f64], start_ms: i64, step_ms: i64) -> Self {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar::flat(start_ms + i as i64 * step_ms, close))
            .collect();
        Self::new("synthetic", bars)
    }

    /// Bars not yet served.
    pub fn remaining(&self) -> usize {
        self.bars.len()
    }
}

impl BarFeed for VecFeed {
    fn next_bar(&mut self) -> Result<Option<Bar>, FeedError> {
        self.bars.next().map(|bar| self.guard.admit(bar)).transpose()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_closes() {
        let mut feed = VecFeed::from_closes(&[1.0, 2.0, 3.0], 1_000, 60_000);
        assert_eq!(feed.remaining(), 3);

        let first = feed.next_bar().unwrap().unwrap();
        assert_eq!(first.timestamp, 1_000);
        assert_eq!(first.close, 1.0);

        let second = feed.next_bar().unwrap().unwrap();
        assert_eq!(second.timestamp, 61_000);

        feed.next_bar().unwrap();
        assert!(feed.next_bar().unwrap().is_none());
    }

    #[test]
    fn test_empty_feed() {
        let mut feed = VecFeed::new("empty", Vec::new());
        assert!(feed.next_bar().unwrap().is_none());
    }

    #[test]
    fn test_out_of_order_is_error() {
        let bars = vec![Bar::flat(2, 1.0), Bar::flat(1, 1.0)];
        let mut feed = VecFeed::new("bad", bars);
        assert!(feed.next_bar().is_ok());
        assert!(matches!(
            feed.next_bar(),
            Err(FeedError::OutOfOrder { .. })
        ));
    }
}
