//! Per-bar pipeline output.

use crate::domain::{SignalEvent, Trend};
use serde::{Deserialize, Serialize};

/// Everything the pipeline computed for one eligible bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarOutput {
    pub bar_index: usize,
    pub rsi: f64,
    pub smoothed_rsi: f64,
    pub avg_abs_delta: f64,
    /// dar
    pub band_width: f64,
    pub long_band: f64,
    pub short_band: f64,
    pub trend: Trend,
    /// LongBand in an uptrend, ShortBand in a downtrend.
    pub trailing_line: f64,
    pub hma: f64,
    pub hma_trend: bool,
    pub hma_long: bool,
    pub hma_short: bool,
    pub qqe_long: bool,
    pub qqe_short: bool,
    pub score: u8,
    pub signal: Option<SignalEvent>,
}

impl BarOutput {
    pub fn has_signal(&self) -> bool {
        self.signal.is_some()
    }
}
