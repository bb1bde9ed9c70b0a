//! Structured error types.
//!
//! Bar processing itself never fails: insufficient history is a silent no-op.
//! Errors only arise at the edges, when configuration is built or bar files are read.

use thiserror::Error;

/// Configuration rejected at construction time. Values are never clamped.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("tick size {0} must be finite and positive")]
    InvalidTickSize(f64),

    #[error("invalid color '{0}' (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from loading or writing bar files.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("bar file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid bar at row {row}: {reason}")]
    InvalidBar { row: usize, reason: String },

    #[error("bar file contains no usable bars")]
    Empty,
}
