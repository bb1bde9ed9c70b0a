//! Weighted Moving Average (WMA).
//!
//! Linear weights: the newest value weighs `n`, the oldest weighs 1.
//! WMA = Σ(w_i · x_i) / Σ w_i
//! Until the window fills, `n` is the number of values seen so far.

use super::Indicator;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct Wma {
    period: usize,
    name: String,
    window: VecDeque<f64>,
}

impl Wma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "WMA period must be >= 1");
        Self {
            period,
            name: format!("wma_{period}"),
            window: VecDeque::with_capacity(period),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Wma {
    type Input = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn update(&mut self, value: f64) -> f64 {
        if self.window.len() == self.period {
            self.window.pop_front();
        }
        self.window.push_back(value);

        let n = self.window.len();
        let weighted: f64 = self
            .window
            .iter()
            .enumerate()
            .map(|(i, &x)| (i + 1) as f64 * x)
            .sum();
        let weight_sum = (n * (n + 1) / 2) as f64;
        weighted / weight_sum
    }
}
