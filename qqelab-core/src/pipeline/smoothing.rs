//! Smoothing stage: exponential smoothing of raw RSI.
//!
//! SmoothedRSI[t] = SmoothedRSI[t-1] + α·(RSI[t] − SmoothedRSI[t-1]), α = 2/(S+1).
//! The first eligible bar seeds SmoothedRSI directly with RSI.

use crate::series::Window;

#[derive(Debug, Clone)]
pub struct RsiSmoother {
    alpha: f64,
    values: Window<f64, 2>,
}

impl RsiSmoother {
    /// `alpha` comes from `QqeConfig::smoothing_alpha`.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            values: Window::new(),
        }
    }

    pub fn update(&mut self, rsi: f64) -> f64 {
        let smoothed = match self.values.current() {
            None => rsi,
            Some(prev) => prev + self.alpha * (rsi - prev),
        };
        self.values.push(smoothed);
        smoothed
    }

    /// SmoothedRSI `bars_ago` bars back.
    pub fn get(&self, bars_ago: usize) -> Option<f64> {
        self.values.get(bars_ago)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QqeConfig;
    use crate::indicators::assert_approx;

    fn smoother(smoothing_factor: usize) -> RsiSmoother {
        let config = QqeConfig {
            smoothing_factor,
            ..Default::default()
        };
        RsiSmoother::new(config.smoothing_alpha())
    }

    #[test]
    fn first_value_seeds_directly() {
        let mut s = smoother(5);
        assert_eq!(s.update(63.0), 63.0);
        assert_eq!(s.get(1), None);
    }

    #[test]
    fn ema_step_uses_two_over_s_plus_one() {
        let mut s = smoother(5);
        s.update(50.0);
        // α = 1/3: 50 + (80 - 50)/3 = 60
        assert_approx(s.update(80.0), 60.0, 1e-12);
        // 60 + (30 - 60)/3 = 50
        assert_approx(s.update(30.0), 50.0, 1e-12);
        assert_approx(s.get(1).unwrap(), 60.0, 1e-12);
    }

    #[test]
    fn factor_one_tracks_input() {
        let mut s = smoother(1);
        s.update(10.0);
        assert_eq!(s.update(90.0), 90.0);
    }
}
