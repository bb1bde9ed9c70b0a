//! QQE Lab Core: streaming QQE × HMA signal pipeline.
//!
//! This crate contains the per-bar calculator a charting host drives:
//! - Domain types (bars, trend, signal sides/tiers, run identity)
//! - Streaming host primitives (RSI, WMA, SMA, ATR) behind a `Primitives` trait
//! - Pipeline stages: RSI smoothing, volatility band width, ratcheting
//!   bands + trend state, HMA, AI score, signal classification
//! - Renderer interface for arrows, labels and HMA line color
//! - Configuration, CSV/synthetic bar data, BLAKE3 run fingerprints

pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod indicators;
pub mod pipeline;
pub mod render;
pub mod series;

pub use config::{QqeConfig, Rgb};
pub use domain::{Bar, Side, SignalEvent, SignalTier, Trend};
pub use error::{ConfigError, DataError};
pub use pipeline::{BarOutput, QqePipeline};
pub use render::{DrawCommand, MarkerPainter, NullRenderer, RecordingRenderer, Renderer};
