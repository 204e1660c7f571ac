//! Exponential moving average.

use serde::{Deserialize, Serialize};
use trading_core::traits::{Indicator, StreamingIndicator};

/// Exponential Moving Average (EMA), batch form.
///
/// Seeded with the simple average of the first `period` values, then
/// `ema = price * alpha + ema * (1 - alpha)` with `alpha = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }

    /// Smoothing factor.
    pub fn alpha(&self) -> f64 {
        self.multiplier
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);

        // Initialize with SMA
        let initial_sma: f64 = data[..self.period].iter().sum::<f64>() / self.period as f64;
        result.push(initial_sma);

        let mut ema = initial_sma;
        let one_minus_mult = 1.0 - self.multiplier;

        for &price in &data[self.period..] {
            ema = price * self.multiplier + ema * one_minus_mult;
            result.push(ema);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// Streaming EMA that maintains state for incremental updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingEma {
    period: usize,
    multiplier: f64,
    current: Option<f64>,
    previous: Option<f64>,
    count: usize,
    sum: f64,
}

impl StreamingEma {
    /// Create a new streaming EMA.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self {
            period,
            multiplier,
            current: None,
            previous: None,
            count: 0,
            sum: 0.0,
        }
    }

    /// Number of updates seen.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl StreamingIndicator for StreamingEma {
    fn update(&mut self, value: f64) -> Option<f64> {
        self.count += 1;
        self.previous = self.current;

        self.current = match self.current {
            Some(ema) => Some(value * self.multiplier + ema * (1.0 - self.multiplier)),
            None => {
                // Accumulating for the initial SMA
                self.sum += value;
                (self.count == self.period).then(|| self.sum / self.period as f64)
            }
        };
        self.current
    }

    fn value(&self) -> Option<f64> {
        self.current
    }

    fn previous(&self) -> Option<f64> {
        self.previous
    }

    fn reset(&mut self) {
        self.current = None;
        self.previous = None;
        self.count = 0;
        self.sum = 0.0;
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
