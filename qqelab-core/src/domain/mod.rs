//! Domain types for QQELab

pub mod bar;
pub mod ids;
pub mod signal;

pub use bar::Bar;
pub use ids::{ConfigHash, DatasetHash, RunId};
pub use signal::{Side, SignalEvent, SignalTier, Trend};
