//! Run fingerprinting: deterministic identification of a pipeline run.
//!
//! - `config_hash`: every `QqeConfig` field, floats by bit pattern.
//! - `dataset_hash`: every bar's timestamp and OHLCV values, in order.
//! - `RunFingerprint`: both hashes plus a summary, printed with run results.
//!
//! Identical fingerprints imply identical outputs: the pipeline is a pure
//! function of configuration and bar history.

use crate::config::QqeConfig;
use crate::domain::{Bar, ConfigHash, DatasetHash, RunId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub fn config_hash(config: &QqeConfig) -> ConfigHash {
    let canonical = format!(
        "rsi_period={};smoothing_factor={};qqe_factor={:016x};hma_length={};min_score={};\
         enable_ai_score={};show_hma_line={};buy_color={};sell_color={};big_chance_color={}",
        config.rsi_period,
        config.smoothing_factor,
        config.qqe_factor.to_bits(),
        config.hma_length,
        config.min_score,
        config.enable_ai_score,
        config.show_hma_line,
        config.buy_color,
        config.sell_color,
        config.big_chance_color,
    );
    ConfigHash::from_bytes(canonical.as_bytes())
}

pub fn dataset_hash(bars: &[Bar]) -> DatasetHash {
    let mut hasher = blake3::Hasher::new();
    for b in bars {
        hasher.update(&b.time.and_utc().timestamp().to_le_bytes());
        for v in [b.open, b.high, b.low, b.close, b.volume] {
            hasher.update(&v.to_bits().to_le_bytes());
        }
    }
    DatasetHash::from_hash(hasher.finalize().to_hex().as_str())
}

/// Identity and summary of one run over a bar history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFingerprint {
    pub run_id: RunId,
    pub run_hash: String,
    pub config: QqeConfig,
    pub bar_count: usize,
    pub first_bar: Option<NaiveDateTime>,
    pub last_bar: Option<NaiveDateTime>,
    pub signal_count: usize,
}

impl RunFingerprint {
    pub fn new(config: &QqeConfig, bars: &[Bar], signal_count: usize) -> Self {
        let run_id = RunId::new(config_hash(config), dataset_hash(bars));
        Self {
            run_hash: run_id.hash(),
            run_id,
            config: config.clone(),
            bar_count: bars.len(),
            first_bar: bars.first().map(|b| b.time),
            last_bar: bars.last().map(|b| b.time),
            signal_count,
        }
    }
}
