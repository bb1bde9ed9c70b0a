/// Ratchet for the trailing QQE bands
///
/// **Core Rule:** while the smoothed RSI stays on the favorable side of the
/// band, the band may only tighten (rise for the long band, fall for the short
/// band), even if the band width expands. Once the smoothed RSI breaks through,
/// the band resets to the freshly proposed level.
use serde::{Deserialize, Serialize};

/// Which way a band is allowed to move while it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatchetDirection {
    /// Long band: support below the smoothed RSI, may only rise.
    Rising,
    /// Short band: resistance above the smoothed RSI, may only fall.
    Falling,
}

/// Outcome of one ratchet step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatchetStep {
    /// First level: initialized to the proposal.
    Seeded(f64),
    /// Ratchet held: level is the tighter of previous and proposed.
    Held(f64),
    /// Favorable side broken: level reset to the proposal.
    Reset(f64),
}

impl RatchetStep {
    pub fn level(self) -> f64 {
        match self {
            RatchetStep::Seeded(level) | RatchetStep::Held(level) | RatchetStep::Reset(level) => {
                level
            }
        }
    }
}

/// Ratchet state for one trailing band
#[derive(Debug, Clone, PartialEq)]
pub struct RatchetState {
    /// Band level at the close of the last processed bar
    current_level: Option<f64>,

    direction: RatchetDirection,
}

impl RatchetState {
    pub fn new(direction: RatchetDirection) -> Self {
        Self {
            current_level: None,
            direction,
        }
    }

    pub fn with_initial_level(direction: RatchetDirection, initial_level: f64) -> Self {
        Self {
            current_level: Some(initial_level),
            direction,
        }
    }

    /// True when `value` lies strictly on the favorable side of `level`.
    fn favorable(&self, value: f64, level: f64) -> bool {
        match self.direction {
            RatchetDirection::Rising => value > level,
            RatchetDirection::Falling => value < level,
        }
    }

    /// Advance the band by one bar.
    ///
    /// `prev_value` and `value` are the smoothed RSI on the previous and
    /// current bar. The ratchet holds only if both sit on the favorable side
    /// of the previous band level; otherwise the band resets to `proposed`.
    ///
    /// # Example
    /// ```
    /// use qqelab_core::pipeline::ratchet::{RatchetDirection, RatchetState};
    ///
    /// let mut band = RatchetState::with_initial_level(RatchetDirection::Rising, 40.0);
    ///
    /// // RSI stays above 40: a lower proposal is blocked.
    /// assert_eq!(band.step(55.0, 52.0, 38.0).level(), 40.0);
    ///
    /// // RSI falls through the band: reset to the proposal.
    /// assert_eq!(band.step(52.0, 35.0, 31.0).level(), 31.0);
    /// ```
    pub fn step(&mut self, prev_value: f64, value: f64, proposed: f64) -> RatchetStep {
        let step = match self.current_level {
            None => RatchetStep::Seeded(proposed),
            Some(current)
                if self.favorable(prev_value, current) && self.favorable(value, current) =>
            {
                let tightened = match self.direction {
                    RatchetDirection::Rising => current.max(proposed),
                    RatchetDirection::Falling => current.min(proposed),
                };
                RatchetStep::Held(tightened)
            }
            Some(_) => RatchetStep::Reset(proposed),
        };

        self.current_level = Some(step.level());
        step
    }

    /// Band level at the close of the last processed bar (if set)
    pub fn current_level(&self) -> Option<f64> {
        self.current_level
    }

    pub fn direction(&self) -> RatchetDirection {
        self.direction
    }

    /// Seed the band directly.
    pub fn reset(&mut self, new_level: f64) {
        self.current_level = Some(new_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_tightening_allowed() {
        let mut band = RatchetState::with_initial_level(RatchetDirection::Rising, 40.0);

        let step = band.step(50.0, 55.0, 45.0);
        assert_eq!(step, RatchetStep::Held(45.0));
        assert_eq!(band.current_level(), Some(45.0));
    }

    #[test]
    fn test_rising_loosening_blocked() {
        let mut band = RatchetState::with_initial_level(RatchetDirection::Rising, 40.0);

        // Width expanded: proposal is lower, band stays
        let step = band.step(50.0, 48.0, 30.0);
        assert_eq!(step, RatchetStep::Held(40.0));
    }

    #[test]
    fn test_falling_tightening_allowed() {
        let mut band = RatchetState::with_initial_level(RatchetDirection::Falling, 60.0);

        let step = band.step(50.0, 45.0, 55.0);
        assert_eq!(step, RatchetStep::Held(55.0));
    }

    #[test]
    fn test_falling_loosening_blocked() {
        let mut band = RatchetState::with_initial_level(RatchetDirection::Falling, 60.0);

        let step = band.step(50.0, 52.0, 70.0);
        assert_eq!(step, RatchetStep::Held(60.0));
    }

    #[test]
    fn test_reset_when_current_breaks_through() {
        let mut band = RatchetState::with_initial_level(RatchetDirection::Rising, 40.0);

        // Current value falls below the band: reset even though proposal is lower
        let step = band.step(45.0, 39.0, 25.0);
        assert_eq!(step, RatchetStep::Reset(25.0));
        assert_eq!(band.current_level(), Some(25.0));
    }

    #[test]
    fn test_reset_when_previous_was_unfavorable() {
        let mut band = RatchetState::with_initial_level(RatchetDirection::Falling, 60.0);

        // Previous value sat above the short band: reset
        let step = band.step(61.0, 55.0, 70.0);
        assert_eq!(step, RatchetStep::Reset(70.0));
    }

    #[test]
    fn test_touching_the_band_is_not_favorable() {
        let mut band = RatchetState::with_initial_level(RatchetDirection::Rising, 40.0);

        let step = band.step(40.0, 50.0, 35.0);
        assert_eq!(step, RatchetStep::Reset(35.0));
    }

    #[test]
    fn test_initialization() {
        let mut band = RatchetState::new(RatchetDirection::Rising);
        assert_eq!(band.current_level(), None);

        let step = band.step(50.0, 50.0, 45.0);
        assert_eq!(step, RatchetStep::Seeded(45.0));
        assert_eq!(band.current_level(), Some(45.0));
    }

    #[test]
    fn test_reset_seeds_level() {
        let mut band = RatchetState::new(RatchetDirection::Falling);
        band.reset(62.0);
        assert_eq!(band.current_level(), Some(62.0));
        assert_eq!(band.direction(), RatchetDirection::Falling);
    }
}
