//! Bar data: CSV files and deterministic synthetic series.

pub mod ingest;
pub mod synthetic;

pub use ingest::{load_bars, parse_time, read_bars, write_bars, write_bars_to, TIME_FORMAT};
pub use synthetic::generate_bars;
