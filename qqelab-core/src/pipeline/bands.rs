//! Band/Trend stage: ratcheting long/short bands and the trend state machine.
//!
//! Per bar, with s = SmoothedRSI and dar the band width:
//! - newLong = s[0] − dar, newShort = s[0] + dar
//! - LongBand ratchets up while s stays above it, otherwise resets to newLong
//! - ShortBand ratchets down while s stays below it, otherwise resets to newShort
//! - s crossing above the previous ShortBand → Up; else crossing below the
//!   previous LongBand → Down; else the trend holds.
//!
//! The cross tests compare s[1] and s[0] against the band level in force before
//! this bar (ShortBand[1] / LongBand[1]).

use super::ratchet::{RatchetDirection, RatchetState, RatchetStep};
use crate::domain::Trend;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandReading {
    pub long_band: f64,
    pub short_band: f64,
    pub trend: Trend,
    /// Trend turned Up on this bar.
    pub qqe_long: bool,
    /// Trend turned Down on this bar.
    pub qqe_short: bool,
    pub long_reset: bool,
    pub short_reset: bool,
}

impl BandReading {
    /// The band currently acting as the trailing line: LongBand in an
    /// uptrend, ShortBand in a downtrend.
    pub fn trailing_line(&self) -> f64 {
        match self.trend {
            Trend::Up => self.long_band,
            Trend::Down => self.short_band,
        }
    }
}

/// `prev <= level < current`
pub fn crosses_above(prev: f64, current: f64, level: f64) -> bool {
    prev <= level && current > level
}

/// `prev >= level > current`
pub fn crosses_below(prev: f64, current: f64, level: f64) -> bool {
    prev >= level && current < level
}

#[derive(Debug, Clone)]
pub struct TrailingBands {
    long: RatchetState,
    short: RatchetState,
    trend: Option<Trend>,
}

impl Default for TrailingBands {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailingBands {
    pub fn new() -> Self {
        Self {
            long: RatchetState::new(RatchetDirection::Rising),
            short: RatchetState::new(RatchetDirection::Falling),
            trend: None,
        }
    }

    pub fn trend(&self) -> Option<Trend> {
        self.trend
    }

    /// Advance one bar. `prev_smoothed` is `None` only on the seed bar.
    pub fn update(&mut self, smoothed: f64, prev_smoothed: Option<f64>, band_width: f64) -> BandReading {
        let new_long = smoothed - band_width;
        let new_short = smoothed + band_width;

        let (prev, prev_long, prev_short, prev_trend) = match (
            prev_smoothed,
            self.long.current_level(),
            self.short.current_level(),
            self.trend,
        ) {
            (Some(p), Some(l), Some(s), Some(t)) => (p, l, s, t),
            _ => return self.seed(new_long, new_short),
        };

        let long_step = self.long.step(prev, smoothed, new_long);
        let short_step = self.short.step(prev, smoothed, new_short);

        let trend = if crosses_above(prev, smoothed, prev_short) {
            Trend::Up
        } else if crosses_below(prev, smoothed, prev_long) {
            Trend::Down
        } else {
            prev_trend
        };
        self.trend = Some(trend);

        if trend != prev_trend {
            debug!(
                from = prev_trend.sign(),
                to = trend.sign(),
                smoothed_rsi = smoothed,
                "QQE trend flip"
            );
        }

        let long_reset = matches!(long_step, RatchetStep::Reset(_));
        let short_reset = matches!(short_step, RatchetStep::Reset(_));
        if long_reset || short_reset {
            debug!(long_reset, short_reset, "band reset");
        }

        BandReading {
            long_band: long_step.level(),
            short_band: short_step.level(),
            trend,
            qqe_long: trend == Trend::Up && prev_trend != Trend::Up,
            qqe_short: trend == Trend::Down && prev_trend != Trend::Down,
            long_reset,
            short_reset,
        }
    }

    fn seed(&mut self, new_long: f64, new_short: f64) -> BandReading {
        self.long.reset(new_long);
        self.short.reset(new_short);
        self.trend = Some(Trend::Up);
        BandReading {
            long_band: new_long,
            short_band: new_short,
            trend: Trend::Up,
            qqe_long: false,
            qqe_short: false,
            long_reset: false,
            short_reset: false,
        }
    }
}
