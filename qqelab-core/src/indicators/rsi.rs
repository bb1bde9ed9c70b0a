//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Seed: mean gain and mean loss over the first `period` changes.
//! Before the seed forms the output is the neutral 50.
//! Edge cases: no movement → 50; avg_loss == 0 → 100; avg_gain == 0 → 0.

use super::Indicator;

pub const NEUTRAL_RSI: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
    prev_close: Option<f64>,
    seed_changes: usize,
    avg_gain: f64,
    avg_loss: f64,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
            prev_close: None,
            seed_changes: 0,
            avg_gain: 0.0,
            avg_loss: 0.0,
        }
    }

    fn is_seeded(&self) -> bool {
        self.seed_changes >= self.period
    }
}

impl Indicator for Rsi {
    type Input = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn update(&mut self, close: f64) -> f64 {
        let Some(prev) = self.prev_close.replace(close) else {
            return NEUTRAL_RSI;
        };

        let change = close - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        if !self.is_seeded() {
            // Accumulate sums; divided once the seed window is complete.
            self.avg_gain += gain;
            self.avg_loss += loss;
            self.seed_changes += 1;
            if !self.is_seeded() {
                return NEUTRAL_RSI;
            }
            self.avg_gain /= self.period as f64;
            self.avg_loss /= self.period as f64;
        } else {
            let alpha = 1.0 / self.period as f64;
            self.avg_gain = alpha * gain + (1.0 - alpha) * self.avg_gain;
            self.avg_loss = alpha * loss + (1.0 - alpha) * self.avg_loss;
        }

        compute_rsi(self.avg_gain, self.avg_loss)
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        NEUTRAL_RSI // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
