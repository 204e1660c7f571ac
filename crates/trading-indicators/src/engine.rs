//! Fast/slow indicator pair driven one close at a time.

use trading_core::error::IndicatorError;
use trading_core::traits::{CrossReadings, StreamingIndicator};

use crate::StreamingEma;

/// Owns the fast and slow averages. Nothing else mutates them.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    fast: StreamingEma,
    slow: StreamingEma,
}

impl IndicatorEngine {
    /// Create the pair. Both periods must be positive.
    pub fn new(fast_period: usize, slow_period: usize) -> Result<Self, IndicatorError> {
        for (name, period) in [("fast", fast_period), ("slow", slow_period)] {
            if period == 0 {
                return Err(IndicatorError::InvalidParameter(format!(
                    "{} period must be greater than 0",
                    name
                )));
            }
        }
        Ok(Self {
            fast: StreamingEma::new(fast_period),
            slow: StreamingEma::new(slow_period),
        })
    }

    /// Feed one close to both averages.
    pub fn update(&mut self, close: f64) {
        self.fast.update(close);
        self.slow.update(close);
    }

    /// Readings for the latest bar, `None` until both averages are seeded.
    pub fn readings(&self) -> Option<CrossReadings> {
        Some(CrossReadings {
            fast: self.fast.value()?,
            slow: self.slow.value()?,
            prev_fast: self.fast.previous(),
            prev_slow: self.slow.previous(),
        })
    }

    /// Bars needed before `readings` returns a value.
    pub fn warmup_period(&self) -> usize {
        self.fast.period().max(self.slow.period())
    }

    pub fn is_warmed_up(&self) -> bool {
        self.fast.is_ready() && self.slow.is_ready()
    }

    pub fn fast(&self) -> &StreamingEma {
        &self.fast
    }

    pub fn slow(&self) -> &StreamingEma {
        &self.slow
    }

    pub fn reset(&mut self) {
        self.fast.reset();
        self.slow.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_period() {
        assert!(IndicatorEngine::new(0, 10).is_err());
        assert!(IndicatorEngine::new(3, 0).is_err());
    }

    #[test]
    fn test_warmup() {
        let mut engine = IndicatorEngine::new(2, 4).unwrap();
        assert_eq!(engine.warmup_period(), 4);

        for close in [1.0, 2.0, 3.0] {
            engine.update(close);
            assert!(engine.readings().is_none());
        }
        assert!(engine.fast().is_ready());
        assert!(!engine.is_warmed_up());

        engine.update(4.0);
        let r = engine.readings().unwrap();
        assert!(engine.is_warmed_up());
        assert!((r.slow - 2.5).abs() < 1e-12);
        // Slow has no prior value on its first defined bar
        assert!(r.prev_slow.is_none());
        assert!(r.prev_fast.is_some());
    }

    #[test]
    fn test_previous_tracks_last_update() {
        let mut engine = IndicatorEngine::new(1, 2).unwrap();
        engine.update(10.0);
        engine.update(20.0);
        engine.update(30.0);

        let r = engine.readings().unwrap();
        assert_eq!(r.fast, 30.0);
        assert_eq!(r.prev_fast, Some(20.0));
        assert_eq!(r.prev_slow, Some(15.0));
    }

    #[test]
    fn test_reset() {
        let mut engine = IndicatorEngine::new(1, 2).unwrap();
        engine.update(1.0);
        engine.update(2.0);
        assert!(engine.is_warmed_up());

        engine.reset();
        assert!(engine.readings().is_none());
    }
}
