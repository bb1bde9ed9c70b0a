//! QQE × HMA pipeline: one pass through the stages per bar.
//!
//! Stages, in evaluation order:
//!
//! 1. Primitives: RSI, the two HMA WMAs, ATR and volume averages (every bar)
//! 2. HMA: two-term Hull value and turn flags (every bar)
//! 3. Smoothing: EMA of RSI
//! 4. Volatility: two-stage Wilder average of |ΔSmoothedRSI| → band width
//! 5. Bands/Trend: ratcheting trailing bands and the trend state machine
//! 6. Scoring: 0–100 AI score
//! 7. Classification: tiered signal event
//!
//! Stages 3–7 only run once the warm-up threshold is reached.

pub mod bands;
pub mod classify;
pub mod hma;
pub mod output;
pub mod ratchet;
pub mod runner;
pub mod score;
pub mod smoothing;
pub mod volatility;
pub mod warmup;

pub use bands::{BandReading, TrailingBands};
pub use classify::classify;
pub use hma::{HmaReading, HullTrend};
pub use output::BarOutput;
pub use ratchet::{RatchetDirection, RatchetState, RatchetStep};
pub use runner::{QqePipeline, DEFAULT_TICK_SIZE};
pub use score::{ai_score, ScoreBreakdown, ScoreInputs};
pub use smoothing::RsiSmoother;
pub use volatility::{BandWidth, VolatilityReading};
pub use warmup::WarmupState;
