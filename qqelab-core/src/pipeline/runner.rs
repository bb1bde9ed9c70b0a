//! `QqePipeline`: the streaming per-bar driver.
//!
//! The host calls `update` once per bar with a monotonically increasing index.
//! Re-evaluating the bar just processed returns its cached output without
//! advancing any state; any other index is ignored.

use super::bands::TrailingBands;
use super::classify::classify;
use super::hma::HullTrend;
use super::output::BarOutput;
use super::score::{ai_score, ScoreInputs};
use super::smoothing::RsiSmoother;
use super::volatility::BandWidth;
use super::warmup::WarmupState;
use crate::config::QqeConfig;
use crate::domain::{Bar, Trend};
use crate::error::ConfigError;
use crate::indicators::{Primitives, StandardPrimitives};
use crate::render::{MarkerPainter, NullRenderer, Renderer};
use tracing::{info, trace, warn};

/// Marker offset unit when the host does not supply a tick size.
pub const DEFAULT_TICK_SIZE: f64 = 0.01;

#[derive(Debug, Clone)]
pub struct QqePipeline<P: Primitives = StandardPrimitives> {
    config: QqeConfig,
    primitives: P,
    warmup: WarmupState,
    smoother: RsiSmoother,
    volatility: BandWidth,
    bands: TrailingBands,
    hull: HullTrend,
    painter: MarkerPainter,
    next_index: usize,
    last: Option<(usize, Option<BarOutput>)>,
}

impl QqePipeline<StandardPrimitives> {
    /// Build a pipeline over this crate's own primitives.
    pub fn new(config: QqeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let primitives = StandardPrimitives::new(&config);
        Self::with_primitives(config, primitives)
    }
}

impl<P: Primitives> QqePipeline<P> {
    /// Build a pipeline over host-supplied primitives.
    pub fn with_primitives(config: QqeConfig, primitives: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            warmup: WarmupState::new(config.warmup_bars()),
            smoother: RsiSmoother::new(config.smoothing_alpha()),
            volatility: BandWidth::new(config.wilders_length(), config.qqe_factor),
            bands: TrailingBands::new(),
            hull: HullTrend::new(config.hma_length),
            painter: MarkerPainter::new(&config, DEFAULT_TICK_SIZE),
            primitives,
            config,
            next_index: 0,
            last: None,
        })
    }

    /// Marker offset unit. Must be finite and positive.
    pub fn with_tick_size(mut self, tick_size: f64) -> Result<Self, ConfigError> {
        if !(tick_size.is_finite() && tick_size > 0.0) {
            return Err(ConfigError::InvalidTickSize(tick_size));
        }
        self.painter = MarkerPainter::new(&self.config, tick_size);
        Ok(self)
    }

    pub fn config(&self) -> &QqeConfig {
        &self.config
    }

    /// Index the next `push` will be evaluated as.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn warmup_bars(&self) -> usize {
        self.warmup.warmup_bars()
    }

    /// Current trend, `None` until the first eligible bar.
    pub fn trend(&self) -> Option<Trend> {
        self.bands.trend()
    }

    /// Evaluate bar `bar_index`.
    ///
    /// Returns `None` during warm-up, for void bars and for out-of-order
    /// indices. Draw commands go to `renderer` only when the bar is first
    /// evaluated.
    pub fn update<R: Renderer + ?Sized>(
        &mut self,
        bar_index: usize,
        bar: &Bar,
        renderer: &mut R,
    ) -> Option<BarOutput> {
        if let Some((last_index, cached)) = self.last {
            if last_index == bar_index {
                return cached;
            }
        }
        if bar_index != self.next_index {
            warn!(
                bar_index,
                expected = self.next_index,
                "out-of-order bar ignored"
            );
            return None;
        }
        self.next_index += 1;

        let output = self.advance(bar_index, bar);
        if let Some(out) = &output {
            self.painter.paint(out, bar, renderer);
        }
        self.last = Some((bar_index, output));
        output
    }

    /// Evaluate `bar` as the next bar in sequence.
    pub fn push<R: Renderer + ?Sized>(&mut self, bar: &Bar, renderer: &mut R) -> Option<BarOutput> {
        self.update(self.next_index, bar, renderer)
    }

    /// Stream a whole history, discarding draw commands.
    pub fn run(&mut self, bars: &[Bar]) -> Vec<BarOutput> {
        self.run_with(bars, &mut NullRenderer)
    }

    pub fn run_with<R: Renderer + ?Sized>(&mut self, bars: &[Bar], renderer: &mut R) -> Vec<BarOutput> {
        let mut outputs = Vec::with_capacity(bars.len().saturating_sub(self.warmup.warmup_bars()));
        for bar in bars {
            outputs.extend(self.push(bar, &mut *renderer));
        }
        outputs
    }

    fn advance(&mut self, bar_index: usize, bar: &Bar) -> Option<BarOutput> {
        if bar.is_void() {
            warn!(bar_index, "void bar skipped");
            self.warmup.process_bar();
            return None;
        }

        let prims = self.primitives.update(bar);
        let hma = self.hull.update(bar.close, prims.wma_half, prims.wma_full);

        let eligible = self.warmup.is_warm();
        self.warmup.process_bar();
        if !eligible {
            trace!(bar_index, remaining = self.warmup.bars_until_warm(), "warming up");
            return None;
        }

        let prev_smoothed = self.smoother.get(0);
        let smoothed = self.smoother.update(prims.rsi);
        let vol = self.volatility.update(smoothed, prev_smoothed);
        let bands = self.bands.update(smoothed, prev_smoothed, vol.band_width);

        let score = if self.config.enable_ai_score {
            ai_score(&ScoreInputs {
                qqe_long: bands.qqe_long,
                qqe_short: bands.qqe_short,
                hma_long: hma.long,
                hma_short: hma.short,
                smoothed_rsi: smoothed,
                atr: prims.atr,
                atr_average: prims.atr_average,
                volume: prims.volume,
                volume_average: prims.volume_average,
            })
            .total
        } else {
            0
        };

        let signal = classify(
            bar_index,
            bands.qqe_long,
            bands.qqe_short,
            score,
            self.config.min_score,
            &hma,
        );
        if let Some(event) = &signal {
            info!(
                bar_index,
                side = %event.side,
                tier = %event.tier,
                score = event.score,
                "signal"
            );
        }

        trace!(
            bar_index,
            smoothed_rsi = smoothed,
            band_width = vol.band_width,
            trend = bands.trend.sign(),
            score,
            "bar evaluated"
        );

        Some(BarOutput {
            bar_index,
            rsi: prims.rsi,
            smoothed_rsi: smoothed,
            avg_abs_delta: vol.avg_abs_delta,
            band_width: vol.band_width,
            long_band: bands.long_band,
            short_band: bands.short_band,
            trend: bands.trend,
            trailing_line: bands.trailing_line(),
            hma: hma.value,
            hma_trend: hma.trend,
            hma_long: hma.long,
            hma_short: hma.short,
            qqe_long: bands.qqe_long,
            qqe_short: bands.qqe_short,
            score,
            signal,
        })
    }
}
