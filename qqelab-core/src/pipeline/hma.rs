//! HMA stage: two-term Hull value and its trend flags.
//!
//! HmaValue = 2·WMA(close, ⌊H/2⌋) − WMA(close, H). The third stage of the
//! textbook HMA (a √H-period WMA of that difference) is not applied; the trend
//! flags below read the raw two-term value. `sqrt_length` is still derived for
//! hosts that draw the full HMA.
//!
//! - hmaTrend: close above HmaValue
//! - hmaLong: HmaValue turned upward this bar (rose after not rising) with close above it
//! - hmaShort: HmaValue turned downward this bar with close below it

use crate::series::Window;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HmaReading {
    pub value: f64,
    pub trend: bool,
    pub long: bool,
    pub short: bool,
}

#[derive(Debug, Clone)]
pub struct HullTrend {
    sqrt_length: usize,
    values: Window<f64, 3>,
}

impl HullTrend {
    pub fn new(hma_length: usize) -> Self {
        Self {
            sqrt_length: (hma_length as f64).sqrt().round() as usize,
            values: Window::new(),
        }
    }

    pub fn sqrt_length(&self) -> usize {
        self.sqrt_length
    }

    /// Advance one bar from the two WMA primitives.
    pub fn update(&mut self, close: f64, wma_half: f64, wma_full: f64) -> HmaReading {
        let value = 2.0 * wma_half - wma_full;
        self.values.push(value);

        let turned = match (self.values.get(1), self.values.get(2)) {
            (Some(prev), Some(prev2)) => Some((value > prev && prev <= prev2, value < prev && prev >= prev2)),
            _ => None,
        };
        let (rising_turn, falling_turn) = turned.unwrap_or((false, false));

        HmaReading {
            value,
            trend: close > value,
            long: rising_turn && close > value,
            short: falling_turn && close < value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_two_term_hull() {
        let mut h = HullTrend::new(9);
        let r = h.update(101.0, 100.5, 100.0);
        assert_eq!(r.value, 101.0);
        assert!(!r.trend); // close == value is not above
    }

    #[test]
    fn sqrt_length_is_rounded() {
        assert_eq!(HullTrend::new(9).sqrt_length(), 3);
        assert_eq!(HullTrend::new(7).sqrt_length(), 3);
        assert_eq!(HullTrend::new(13).sqrt_length(), 4);
    }

    #[test]
    fn needs_three_values_for_turn_flags() {
        let mut h = HullTrend::new(9);
        // value = 2*w - w = w when both WMAs are equal
        let r1 = h.update(200.0, 100.0, 100.0);
        let r2 = h.update(200.0, 99.0, 99.0);
        assert!(!r1.long && !r2.long);
    }

    #[test]
    fn upward_turn_with_close_above_is_long() {
        let mut h = HullTrend::new(9);
        h.update(0.0, 100.0, 100.0);
        h.update(0.0, 99.0, 99.0);
        let r = h.update(105.0, 101.0, 101.0);
        assert!(r.long);
        assert!(r.trend);
        assert!(!r.short);
    }

    #[test]
    fn continued_rise_is_not_a_new_turn() {
        let mut h = HullTrend::new(9);
        h.update(0.0, 99.0, 99.0);
        h.update(0.0, 100.0, 100.0);
        let r = h.update(105.0, 101.0, 101.0);
        assert!(!r.long);
        assert!(r.trend);
    }

    #[test]
    fn downward_turn_requires_close_below() {
        let mut h = HullTrend::new(9);
        h.update(0.0, 100.0, 100.0);
        h.update(0.0, 101.0, 101.0);
        let above = h.clone().update(102.0, 99.0, 99.0);
        assert!(!above.short);
        let below = h.update(98.0, 99.0, 99.0);
        assert!(below.short);
        assert!(!below.trend);
    }

    #[test]
    fn flat_hull_sets_no_flags() {
        let mut h = HullTrend::new(9);
        for _ in 0..5 {
            let r = h.update(100.0, 100.0, 100.0);
            assert!(!r.trend && !r.long && !r.short);
        }
    }
}
