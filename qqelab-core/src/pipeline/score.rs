//! Scoring stage: the heuristic 0–100 "AI score".
//!
//! A pure function of current-bar quantities; nothing carries over between bars.
//!
//! | Component | Rule |
//! |---|---|
//! | signal base | 35 for an agreeing QQE+HMA pair, 25 for exactly one flag, else 0 |
//! | QQE strength | \|SmoothedRSI − 50\|: >30 → 25, >20 → 20, >10 → 15, else 10 |
//! | volatility | ATR / SMA(ATR): in (1.1, 2.0) → +15, < 0.8 → −10, else +5 |
//! | volume | volume / SMA(volume): > 1.2 → +15, < 0.8 → −5, else 0 |
//! | baseline | +15 |
//!
//! The sum is clamped to [0, 100].

use serde::{Deserialize, Serialize};

pub const BASELINE: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreInputs {
    pub qqe_long: bool,
    pub qqe_short: bool,
    pub hma_long: bool,
    pub hma_short: bool,
    pub smoothed_rsi: f64,
    pub atr: f64,
    pub atr_average: f64,
    pub volume: f64,
    pub volume_average: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub signal_base: i32,
    pub qqe_strength: i32,
    pub volatility: i32,
    pub volume: i32,
    pub total: u8,
}

/// `numerator / denominator`, falling back to 1.0 when the denominator is not positive.
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        1.0
    }
}

fn signal_base(i: &ScoreInputs) -> i32 {
    let agreeing = (i.qqe_long && i.hma_long) || (i.qqe_short && i.hma_short);
    let flags = [i.qqe_long, i.qqe_short, i.hma_long, i.hma_short]
        .iter()
        .filter(|&&f| f)
        .count();
    if agreeing {
        35
    } else if flags == 1 {
        25
    } else {
        0
    }
}

fn qqe_strength(smoothed_rsi: f64) -> i32 {
    let dist = (smoothed_rsi - 50.0).abs();
    if dist > 30.0 {
        25
    } else if dist > 20.0 {
        20
    } else if dist > 10.0 {
        15
    } else {
        10
    }
}

fn volatility_score(atr_ratio: f64) -> i32 {
    if atr_ratio > 1.1 && atr_ratio < 2.0 {
        15
    } else if atr_ratio < 0.8 {
        -10
    } else {
        5
    }
}

fn volume_score(volume_ratio: f64) -> i32 {
    if volume_ratio > 1.2 {
        15
    } else if volume_ratio < 0.8 {
        -5
    } else {
        0
    }
}

pub fn ai_score(inputs: &ScoreInputs) -> ScoreBreakdown {
    let signal_base = signal_base(inputs);
    let qqe_strength = qqe_strength(inputs.smoothed_rsi);
    let volatility = volatility_score(guarded_ratio(inputs.atr, inputs.atr_average));
    let volume = volume_score(guarded_ratio(inputs.volume, inputs.volume_average));

    let raw = signal_base + qqe_strength + volatility + volume + BASELINE;
    ScoreBreakdown {
        signal_base,
        qqe_strength,
        volatility,
        volume,
        total: raw.clamp(0, 100) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral() -> ScoreInputs {
        ScoreInputs {
            smoothed_rsi: 50.0,
            atr: 1.0,
            atr_average: 1.0,
            volume: 1000.0,
            volume_average: 1000.0,
            ..Default::default()
        }
    }

    #[test]
    fn neutral_bar_scores_baseline_components_only() {
        let s = ai_score(&neutral());
        assert_eq!(s.signal_base, 0);
        assert_eq!(s.qqe_strength, 10);
        assert_eq!(s.volatility, 5);
        assert_eq!(s.volume, 0);
        assert_eq!(s.total, 30);
    }

    #[test]
    fn agreeing_pair_scores_35() {
        let s = ai_score(&ScoreInputs {
            qqe_long: true,
            hma_long: true,
            ..neutral()
        });
        assert_eq!(s.signal_base, 35);
        let s = ai_score(&ScoreInputs {
            qqe_short: true,
            hma_short: true,
            ..neutral()
        });
        assert_eq!(s.signal_base, 35);
    }

    #[test]
    fn single_flag_scores_25() {
        for inputs in [
            ScoreInputs { qqe_long: true, ..neutral() },
            ScoreInputs { qqe_short: true, ..neutral() },
            ScoreInputs { hma_long: true, ..neutral() },
            ScoreInputs { hma_short: true, ..neutral() },
        ] {
            assert_eq!(ai_score(&inputs).signal_base, 25);
        }
    }

    #[test]
    fn conflicting_flags_score_zero_base() {
        let s = ai_score(&ScoreInputs {
            qqe_long: true,
            hma_short: true,
            ..neutral()
        });
        assert_eq!(s.signal_base, 0);
    }

    #[test]
    fn qqe_strength_thresholds_are_strict() {
        assert_eq!(qqe_strength(80.0), 20); // dist 30 is not > 30
        assert_eq!(qqe_strength(80.5), 25);
        assert_eq!(qqe_strength(29.0), 20);
        assert_eq!(qqe_strength(61.0), 15);
        assert_eq!(qqe_strength(60.0), 10);
    }

    #[test]
    fn volatility_band_edges() {
        assert_eq!(volatility_score(1.1), 5);
        assert_eq!(volatility_score(1.5), 15);
        assert_eq!(volatility_score(2.0), 5);
        assert_eq!(volatility_score(0.79), -10);
        assert_eq!(volatility_score(0.8), 5);
    }

    #[test]
    fn zero_averages_fall_back_to_unit_ratio() {
        assert_eq!(guarded_ratio(5.0, 0.0), 1.0);
        assert_eq!(guarded_ratio(5.0, -1.0), 1.0);
        let s = ai_score(&ScoreInputs {
            atr: 3.0,
            atr_average: 0.0,
            volume: 0.0,
            volume_average: 0.0,
            ..neutral()
        });
        assert_eq!(s.volatility, 5);
        assert_eq!(s.volume, 0);
    }

    #[test]
    fn best_case_is_clamped_to_100() {
        let s = ai_score(&ScoreInputs {
            qqe_long: true,
            hma_long: true,
            smoothed_rsi: 95.0,
            atr: 1.5,
            atr_average: 1.0,
            volume: 5000.0,
            volume_average: 1000.0,
            ..Default::default()
        });
        // 35 + 25 + 15 + 15 + 15 = 105
        assert_eq!(s.total, 100);
    }

    #[test]
    fn worst_case_stays_non_negative() {
        let s = ai_score(&ScoreInputs {
            smoothed_rsi: 50.0,
            atr: 0.1,
            atr_average: 1.0,
            volume: 1.0,
            volume_average: 1000.0,
            ..Default::default()
        });
        // 0 + 10 - 10 - 5 + 15 = 10
        assert_eq!(s.total, 10);
    }

    #[test]
    fn runaway_atr_ratio_is_not_rewarded() {
        let s = ai_score(&ScoreInputs {
            atr: 1e12,
            atr_average: 1.0,
            ..neutral()
        });
        assert_eq!(s.volatility, 5);
    }
}
