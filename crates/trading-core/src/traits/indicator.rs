//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Batch indicator over a full price slice.
///
/// Used as the reference computation for streaming indicators.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically prices)
    ///
    /// # Returns
    /// One value per input point from index `period - 1` onwards
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Streaming indicator that maintains recurrence state.
///
/// Updated exactly once per bar. Keeps the value before the latest update
/// so callers can detect crossings without retaining history.
pub trait StreamingIndicator: Send + Sync {
    /// Update the indicator with a new value.
    ///
    /// # Returns
    /// The current indicator value, or None while warming up
    fn update(&mut self, value: f64) -> Option<f64>;

    /// Current value, `None` until `period` updates have happened.
    fn value(&self) -> Option<f64>;

    /// Value before the most recent update.
    fn previous(&self) -> Option<f64>;

    /// Reset the indicator state.
    fn reset(&mut self);

    /// Check if the indicator has enough data to produce values.
    fn is_ready(&self) -> bool {
        self.value().is_some()
    }

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestIndicator {
        period: usize,
    }

    impl Indicator for TestIndicator {
        type Output = f64;

        fn calculate(&self, data: &[f64]) -> Vec<f64> {
            if data.len() < self.period {
                return vec![];
            }
            data.windows(self.period).map(|w| w.iter().sum()).collect()
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    /// Running maximum, ready after two points.
    #[derive(Default)]
    struct RunningMax {
        count: usize,
        current: Option<f64>,
        previous: Option<f64>,
        max: f64,
    }

    impl StreamingIndicator for RunningMax {
        fn update(&mut self, value: f64) -> Option<f64> {
            self.count += 1;
            self.max = if self.count == 1 { value } else { self.max.max(value) };
            self.previous = self.current;
            if self.count >= 2 {
                self.current = Some(self.max);
            }
            self.current
        }

        fn value(&self) -> Option<f64> {
            self.current
        }

        fn previous(&self) -> Option<f64> {
            self.previous
        }

        fn reset(&mut self) {
            *self = Self::default();
        }

        fn period(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "max"
        }
    }

    #[test]
    fn test_indicator_validation() {
        let indicator = TestIndicator { period: 5 };

        assert!(indicator.validate_data(&[1.0, 2.0, 3.0]).is_err());
        assert!(indicator.validate_data(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_ok());
    }

    #[test]
    fn test_streaming_default_is_ready() {
        let mut max = RunningMax::default();
        assert!(max.update(3.0).is_none());
        assert!(!max.is_ready());

        assert_eq!(max.update(1.0), Some(3.0));
        assert!(max.is_ready());
        assert_eq!(max.previous(), None);

        assert_eq!(max.update(5.0), Some(5.0));
        assert_eq!(max.previous(), Some(3.0));

        max.reset();
        assert!(!max.is_ready());
    }
}
