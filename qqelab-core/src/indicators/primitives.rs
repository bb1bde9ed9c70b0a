//! The fixed set of host primitives the pipeline consumes each bar.

use super::{Atr, Indicator, PriceRange, Rsi, Sma, Wma};
use crate::config::QqeConfig;
use crate::domain::Bar;
use serde::{Deserialize, Serialize};

/// ATR length used by the volatility score.
pub const SCORE_ATR_PERIOD: usize = 14;
/// SMA length for the ATR and volume baselines.
pub const SCORE_AVERAGE_PERIOD: usize = 20;

/// Primitive values at the current bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveSnapshot {
    /// RSI(close, P)
    pub rsi: f64,
    /// WMA(close, floor(H/2))
    pub wma_half: f64,
    /// WMA(close, H)
    pub wma_full: f64,
    /// ATR(14)
    pub atr: f64,
    /// SMA(ATR(14), 20)
    pub atr_average: f64,
    pub volume: f64,
    /// SMA(volume, 20)
    pub volume_average: f64,
}

/// Supplier of primitive values, advanced exactly once per bar.
///
/// The default implementation is `StandardPrimitives`; a charting host with
/// its own RSI/WMA/SMA/ATR can plug those in instead.
pub trait Primitives {
    fn update(&mut self, bar: &Bar) -> PrimitiveSnapshot;
}

/// Primitives built from this crate's streaming indicators.
#[derive(Debug, Clone)]
pub struct StandardPrimitives {
    rsi: Rsi,
    wma_half: Wma,
    wma_full: Wma,
    atr: Atr,
    atr_average: Sma,
    volume_average: Sma,
}

impl StandardPrimitives {
    pub fn new(config: &QqeConfig) -> Self {
        Self {
            rsi: Rsi::new(config.rsi_period),
            wma_half: Wma::new(config.hma_length / 2),
            wma_full: Wma::new(config.hma_length),
            atr: Atr::new(SCORE_ATR_PERIOD),
            atr_average: Sma::new(SCORE_AVERAGE_PERIOD),
            volume_average: Sma::new(SCORE_AVERAGE_PERIOD),
        }
    }
}

impl Primitives for StandardPrimitives {
    fn update(&mut self, bar: &Bar) -> PrimitiveSnapshot {
        let atr = self.atr.update(PriceRange {
            high: bar.high,
            low: bar.low,
            close: bar.close,
        });
        PrimitiveSnapshot {
            rsi: self.rsi.update(bar.close),
            wma_half: self.wma_half.update(bar.close),
            wma_full: self.wma_full.update(bar.close),
            atr,
            atr_average: self.atr_average.update(atr),
            volume: bar.volume,
            volume_average: self.volume_average.update(bar.volume),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn flat_bar(close: f64) -> Bar {
        Bar {
            time: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn half_length_wma_uses_floor() {
        let config = QqeConfig {
            hma_length: 9,
            ..Default::default()
        };
        let p = StandardPrimitives::new(&config);
        assert_eq!(p.wma_half.period(), 4);
        assert_eq!(p.wma_full.period(), 9);
    }

    #[test]
    fn flat_series_snapshot() {
        let mut p = StandardPrimitives::new(&QqeConfig::default());
        let mut last = None;
        for _ in 0..40 {
            last = Some(p.update(&flat_bar(100.0)));
        }
        let snap = last.unwrap();
        assert_eq!(snap.rsi, 50.0);
        assert_eq!(snap.atr, 0.0);
        assert_eq!(snap.atr_average, 0.0);
        assert_eq!(snap.volume_average, 1000.0);
        assert!((snap.wma_half - 100.0).abs() < 1e-9);
        assert!((snap.wma_full - 100.0).abs() < 1e-9);
    }
}
