//! Streaming technical primitives.
//!
//! These are the building blocks a charting host normally supplies: RSI, WMA,
//! SMA and ATR, each returning the value at the current bar given the full
//! history seen so far. Every primitive is O(1) (or O(period) for WMA) per bar
//! and is fed exactly once per bar, in bar order.
//!
//! `primitives` bundles them into the fixed set the pipeline consumes, behind
//! the `Primitives` trait so a host can inject its own implementations.

pub mod atr;
pub mod primitives;
pub mod rsi;
pub mod sma;
pub mod wma;

pub use atr::{Atr, PriceRange};
pub use primitives::{PrimitiveSnapshot, Primitives, StandardPrimitives};
pub use rsi::Rsi;
pub use sma::Sma;
pub use wma::Wma;

/// Streaming indicator: one input per bar, one output per bar.
///
/// # Look-ahead contamination guard
/// The value returned for bar t may only depend on inputs up to and including bar t.
pub trait Indicator: Send + Sync {
    type Input: Copy;

    /// Human-readable name (e.g., "sma_20", "atr_14").
    fn name(&self) -> &str;

    /// Number of bars needed before the output is fully formed.
    fn lookback(&self) -> usize;

    /// Feed the next bar's input and return the value at that bar.
    fn update(&mut self, input: Self::Input) -> f64;
}

/// Feed a whole series through a fresh indicator, collecting every output.
pub fn compute_series<I: Indicator>(mut indicator: I, inputs: &[I::Input]) -> Vec<f64> {
    inputs.iter().map(|&x| indicator.update(x)).collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
