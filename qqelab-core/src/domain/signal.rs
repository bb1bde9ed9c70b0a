//! Trend regime, signal side, and the signal tier ladder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete QQE regime. Serialized as the host's integer sign (+1 / -1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn sign(self) -> i8 {
        match self {
            Trend::Up => 1,
            Trend::Down => -1,
        }
    }

    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Trend::Up),
            -1 => Some(Trend::Down),
            _ => None,
        }
    }
}

impl Serialize for Trend {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.sign())
    }
}

impl<'de> Deserialize<'de> for Trend {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let sign = i8::deserialize(deserializer)?;
        Trend::from_sign(sign)
            .ok_or_else(|| serde::de::Error::custom(format!("trend sign must be +1 or -1, got {sign}")))
    }
}

/// Direction of an emitted marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signal strength ladder, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalTier {
    BigChance,
    Super,
    Power,
    Strong,
}

impl SignalTier {
    /// Lowest score at which this tier can be selected.
    pub fn min_score(self) -> u8 {
        match self {
            SignalTier::BigChance => 90,
            SignalTier::Super => 80,
            SignalTier::Power => 70,
            SignalTier::Strong => 60,
        }
    }

    /// Label drawn on the chart.
    pub fn label(self) -> &'static str {
        match self {
            SignalTier::BigChance => "BIG CHANCE",
            SignalTier::Super => "SUPER",
            SignalTier::Power => "POWER",
            SignalTier::Strong => "STRONG",
        }
    }
}

impl fmt::Display for SignalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A directional marker event: at most one per bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub bar_index: usize,
    pub side: Side,
    pub tier: SignalTier,
    pub score: u8,
}
