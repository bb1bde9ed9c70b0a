//! Volatility stage: Wilder average of |ΔSmoothedRSI| and the band width.
//!
//! AvgAbsDelta[t] = (AvgAbsDelta[t-1]·(N−1) + |ΔSmoothedRSI[t]|) / N, N = 2P − 1.
//! From the third eligible bar on, a second Wilder step of the same length is
//! applied to AvgAbsDelta itself:
//! maAtrRsi = (AvgAbsDelta[t-1]·(N−1) + AvgAbsDelta[t]) / N
//! Band width dar = maAtrRsi · qqeFactor.

use crate::series::Window;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityReading {
    /// |SmoothedRSI[0] − SmoothedRSI[1]|, 0 on the seed bar.
    pub delta: f64,
    pub avg_abs_delta: f64,
    /// Second-order average (maAtrRsi).
    pub smoothed_avg: f64,
    /// dar
    pub band_width: f64,
}

#[derive(Debug, Clone)]
pub struct BandWidth {
    length: f64,
    qqe_factor: f64,
    avg: Window<f64, 2>,
    bars: usize,
}

impl BandWidth {
    pub fn new(wilders_length: usize, qqe_factor: f64) -> Self {
        assert!(wilders_length >= 1, "Wilder length must be >= 1");
        Self {
            length: wilders_length as f64,
            qqe_factor,
            avg: Window::new(),
            bars: 0,
        }
    }

    /// Advance one bar given the current and previous SmoothedRSI.
    pub fn update(&mut self, smoothed: f64, prev_smoothed: Option<f64>) -> VolatilityReading {
        let n = self.length;
        let delta = prev_smoothed.map_or(0.0, |prev| (smoothed - prev).abs());

        let avg_abs_delta = match self.avg.current() {
            None => delta,
            Some(prev_avg) => (prev_avg * (n - 1.0) + delta) / n,
        };
        self.avg.push(avg_abs_delta);
        self.bars += 1;

        let smoothed_avg = match self.avg.previous() {
            Some(prev_avg) if self.bars > 2 => (prev_avg * (n - 1.0) + avg_abs_delta) / n,
            _ => avg_abs_delta,
        };

        VolatilityReading {
            delta,
            avg_abs_delta,
            smoothed_avg,
            band_width: smoothed_avg * self.qqe_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn seed_bar_has_zero_width() {
        let mut w = BandWidth::new(27, 4.238);
        let r = w.update(55.0, None);
        assert_eq!(r.delta, 0.0);
        assert_eq!(r.avg_abs_delta, 0.0);
        assert_eq!(r.band_width, 0.0);
    }

    #[test]
    fn second_bar_uses_first_order_average_only() {
        let mut w = BandWidth::new(3, 2.0);
        w.update(50.0, None);
        let r = w.update(56.0, Some(50.0));
        // avg = (0*2 + 6)/3 = 2; no second-order step yet
        assert_approx(r.avg_abs_delta, 2.0, 1e-12);
        assert_approx(r.smoothed_avg, 2.0, 1e-12);
        assert_approx(r.band_width, 4.0, 1e-12);
    }

    #[test]
    fn third_bar_applies_second_order_average() {
        let mut w = BandWidth::new(3, 2.0);
        w.update(50.0, None);
        w.update(56.0, Some(50.0)); // avg = 2
        let r = w.update(53.0, Some(56.0));
        // avg = (2*2 + 3)/3 = 7/3
        // ma = (2*2 + 7/3)/3 = 19/9
        assert_approx(r.delta, 3.0, 1e-12);
        assert_approx(r.avg_abs_delta, 7.0 / 3.0, 1e-12);
        assert_approx(r.smoothed_avg, 19.0 / 9.0, 1e-12);
        assert_approx(r.band_width, 38.0 / 9.0, 1e-12);
    }

    #[test]
    fn flat_input_keeps_width_at_zero() {
        let mut w = BandWidth::new(27, 4.238);
        let mut prev = None;
        for _ in 0..50 {
            let r = w.update(50.0, prev);
            assert_eq!(r.band_width, 0.0);
            prev = Some(50.0);
        }
    }
}
