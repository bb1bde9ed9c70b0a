//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! TR[0] = high[0] - low[0] (no previous close).
//! ATR uses the host's Wilder recursion with a growing divisor:
//! ATR[t] = ((n - 1) * ATR[t-1] + TR[t]) / n, n = min(t + 1, period).
//! The first `period` values are therefore the running mean of TR.

use super::Indicator;

/// The slice of a bar that true range needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// True range of a bar given the previous close (if any).
pub fn true_range(range: PriceRange, prev_close: Option<f64>) -> f64 {
    let hl = range.high - range.low;
    match prev_close {
        None => hl,
        Some(pc) => hl
            .max((range.high - pc).abs())
            .max((range.low - pc).abs()),
    }
}

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
    prev_close: Option<f64>,
    bars_seen: usize,
    value: f64,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
            prev_close: None,
            bars_seen: 0,
            value: 0.0,
        }
    }
}

impl Indicator for Atr {
    type Input = PriceRange;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn update(&mut self, range: PriceRange) -> f64 {
        let tr = true_range(range, self.prev_close);
        self.prev_close = Some(range.close);
        self.bars_seen += 1;

        let n = self.bars_seen.min(self.period) as f64;
        self.value = if self.bars_seen == 1 {
            tr
        } else {
            ((n - 1.0) * self.value + tr) / n
        };
        self.value
    }
}
