//! Signal classification stage.
//!
//! Only a QQE transition bar whose score reaches `min_score` is classified.
//! The ladder is walked strongest first; the HMA requirement loosens as the
//! score drops:
//!
//! - score ≥ 90 → BIG CHANCE
//! - score ≥ 80 → SUPER
//! - score ≥ 70 and the HMA turned in the signal's direction → POWER
//! - score ≥ 60 and close is on the signal's side of the HMA → STRONG
//!
//! A bar that passes the event/score gate but matches no rung emits nothing.

use super::hma::HmaReading;
use crate::domain::{Side, SignalEvent, SignalTier};

/// Pick the tier for one side, or `None` if no rung matches.
pub fn tier_for(side: Side, score: u8, hma: &HmaReading) -> Option<SignalTier> {
    let (slope_agrees, trend_agrees) = match side {
        Side::Buy => (hma.long, hma.trend),
        Side::Sell => (hma.short, !hma.trend),
    };

    if score >= SignalTier::BigChance.min_score() {
        Some(SignalTier::BigChance)
    } else if score >= SignalTier::Super.min_score() {
        Some(SignalTier::Super)
    } else if score >= SignalTier::Power.min_score() && slope_agrees {
        Some(SignalTier::Power)
    } else if score >= SignalTier::Strong.min_score() && trend_agrees {
        Some(SignalTier::Strong)
    } else {
        None
    }
}

/// Classify a bar. At most one event per bar: QQE transitions are exclusive.
pub fn classify(
    bar_index: usize,
    qqe_long: bool,
    qqe_short: bool,
    score: u8,
    min_score: u8,
    hma: &HmaReading,
) -> Option<SignalEvent> {
    if score < min_score {
        return None;
    }
    let side = if qqe_long {
        Side::Buy
    } else if qqe_short {
        Side::Sell
    } else {
        return None;
    };

    tier_for(side, score, hma).map(|tier| SignalEvent {
        bar_index,
        side,
        tier,
        score,
    })
}
