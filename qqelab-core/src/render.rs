//! Renderer interface: the narrow output boundary to the charting host.
//!
//! The pipeline never owns drawing state. It hands `DrawCommand`s to an
//! injected `Renderer`; what the host does with them (arrows, labels, plot
//! brushes) is outside this crate. Tags follow the host's per-bar naming
//! (`BuyArrow<bar>`, `SellText<bar>`, ...).

use crate::config::{QqeConfig, Rgb};
use crate::domain::{Bar, Side, SignalEvent, SignalTier};
use crate::pipeline::BarOutput;
use serde::{Deserialize, Serialize};

/// Arrow offset from the bar extreme, in ticks.
pub const ARROW_OFFSET_TICKS: f64 = 10.0;
/// Label offset from the bar extreme, in ticks.
pub const TEXT_OFFSET_TICKS: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Arrow {
        tag: String,
        bar_index: usize,
        side: Side,
        price: f64,
        color: Rgb,
    },
    Text {
        tag: String,
        bar_index: usize,
        text: String,
        price: f64,
        color: Rgb,
    },
    /// Brush for the HMA plot on this bar.
    LineColor { bar_index: usize, color: Rgb },
}

pub trait Renderer {
    fn draw(&mut self, command: DrawCommand);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw(&mut self, command: DrawCommand) {
        (**self).draw(command);
    }
}

/// Discards every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _command: DrawCommand) {}
}

/// Keeps every command in order, for tests and exports.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arrows(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Arrow { .. }))
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Turns bar outputs into draw commands: marker placement and tier colors.
#[derive(Debug, Clone)]
pub struct MarkerPainter {
    tick_size: f64,
    buy_color: Rgb,
    sell_color: Rgb,
    big_chance_color: Rgb,
    show_hma_line: bool,
}

impl MarkerPainter {
    pub fn new(config: &QqeConfig, tick_size: f64) -> Self {
        Self {
            tick_size,
            buy_color: config.buy_color,
            sell_color: config.sell_color,
            big_chance_color: config.big_chance_color,
            show_hma_line: config.show_hma_line,
        }
    }

    pub fn tick_size(&self) -> f64 {
        self.tick_size
    }

    pub fn tier_color(&self, side: Side, tier: SignalTier) -> Rgb {
        match (tier, side) {
            (SignalTier::BigChance, _) => self.big_chance_color,
            (SignalTier::Super, _) => Rgb::YELLOW,
            (SignalTier::Power, Side::Buy) => self.buy_color,
            (SignalTier::Power, Side::Sell) => self.sell_color,
            (SignalTier::Strong, Side::Buy) => Rgb::LIME,
            (SignalTier::Strong, Side::Sell) => Rgb::RED,
        }
    }

    pub fn paint<R: Renderer + ?Sized>(&self, output: &BarOutput, bar: &Bar, renderer: &mut R) {
        if let Some(event) = output.signal {
            self.paint_signal(&event, bar, renderer);
        }
        if self.show_hma_line {
            let color = if output.hma_trend {
                self.buy_color
            } else {
                self.sell_color
            };
            renderer.draw(DrawCommand::LineColor {
                bar_index: output.bar_index,
                color,
            });
        }
    }

    fn paint_signal<R: Renderer + ?Sized>(&self, event: &SignalEvent, bar: &Bar, renderer: &mut R) {
        let color = self.tier_color(event.side, event.tier);
        let (prefix, arrow_price, text_price) = match event.side {
            Side::Buy => (
                "Buy",
                bar.low - self.tick_size * ARROW_OFFSET_TICKS,
                bar.low - self.tick_size * TEXT_OFFSET_TICKS,
            ),
            Side::Sell => (
                "Sell",
                bar.high + self.tick_size * ARROW_OFFSET_TICKS,
                bar.high + self.tick_size * TEXT_OFFSET_TICKS,
            ),
        };

        renderer.draw(DrawCommand::Arrow {
            tag: format!("{prefix}Arrow{}", event.bar_index),
            bar_index: event.bar_index,
            side: event.side,
            price: arrow_price,
            color,
        });
        renderer.draw(DrawCommand::Text {
            tag: format!("{prefix}Text{}", event.bar_index),
            bar_index: event.bar_index,
            text: format!("{}\n{} {}", event.tier, event.side, event.score),
            price: text_price,
            color,
        });
    }
}
