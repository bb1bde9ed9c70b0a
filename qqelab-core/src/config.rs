//! Pipeline configuration.
//!
//! Every numeric parameter carries the host's declared range. Out-of-range
//! values fail `validate()`; nothing is clamped.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// 24-bit display color, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const CYAN: Rgb = Rgb(0x00, 0xFF, 0xFF);
    pub const MAGENTA: Rgb = Rgb(0xFF, 0x00, 0xFF);
    pub const GOLD: Rgb = Rgb(0xFF, 0xD7, 0x00);
    pub const YELLOW: Rgb = Rgb(0xFF, 0xFF, 0x00);
    pub const LIME: Rgb = Rgb(0x00, 0xFF, 0x00);
    pub const RED: Rgb = Rgb(0xFF, 0x00, 0x00);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| ConfigError::InvalidColor(s.to_string()))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ConfigError::InvalidColor(s.to_string()))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parameters of the QQE × HMA pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QqeConfig {
    pub rsi_period: usize,
    pub smoothing_factor: usize,
    pub qqe_factor: f64,
    pub hma_length: usize,
    pub min_score: u8,
    pub enable_ai_score: bool,
    pub show_hma_line: bool,
    pub buy_color: Rgb,
    pub sell_color: Rgb,
    pub big_chance_color: Rgb,
}

impl Default for QqeConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            smoothing_factor: 5,
            qqe_factor: 4.238,
            hma_length: 9,
            min_score: 60,
            enable_ai_score: true,
            show_hma_line: false,
            buy_color: Rgb::CYAN,
            sell_color: Rgb::MAGENTA,
            big_chance_color: Rgb::GOLD,
        }
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    // NaN fails both comparisons, so it is rejected here too.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl QqeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("rsi_period", self.rsi_period as f64, 1.0, 50.0)?;
        check_range("smoothing_factor", self.smoothing_factor as f64, 1.0, 20.0)?;
        check_range("qqe_factor", self.qqe_factor, 1.0, 20.0)?;
        check_range("hma_length", self.hma_length as f64, 3.0, 50.0)?;
        check_range("min_score", f64::from(self.min_score), 40.0, 90.0)?;
        Ok(())
    }

    /// Wilder length used by both volatility averages: 2·P − 1.
    pub fn wilders_length(&self) -> usize {
        (self.rsi_period * 2).saturating_sub(1)
    }

    /// Index of the first bar that produces output.
    pub fn warmup_bars(&self) -> usize {
        self.wilders_length().max(self.hma_length) + 10
    }

    /// EMA weight of the RSI smoother: 2 / (S + 1).
    pub fn smoothing_alpha(&self) -> f64 {
        2.0 / (self.smoothing_factor as f64 + 1.0)
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: QqeConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
