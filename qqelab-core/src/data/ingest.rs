//! CSV bar files.
//!
//! Header: `time,open,high,low,close,volume`. `time` is `YYYY-MM-DD HH:MM:SS`
//! or a bare `YYYY-MM-DD` (midnight). Rows with a NaN or infinite field are void
//! bars and are skipped; any other malformed row fails the load.

use crate::domain::Bar;
use crate::error::DataError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Timestamp format used when writing.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct BarRecord {
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

pub fn parse_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, TIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

pub fn load_bars(path: impl AsRef<Path>) -> Result<Vec<Bar>, DataError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let bars = read_bars(BufReader::new(file))?;
    debug!(path = %path.display(), bars = bars.len(), "loaded bars");
    Ok(bars)
}

/// Read bars from any CSV source. Rows are numbered from 1, header excluded.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<Bar>, DataError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut bars: Vec<Bar> = Vec::new();

    for (i, result) in rdr.deserialize::<BarRecord>().enumerate() {
        let row = i + 1;
        let rec = result?;
        let time = parse_time(&rec.time).ok_or_else(|| DataError::InvalidBar {
            row,
            reason: format!("unparseable time '{}'", rec.time),
        })?;
        let bar = Bar {
            time,
            open: rec.open,
            high: rec.high,
            low: rec.low,
            close: rec.close,
            volume: rec.volume,
        };

        if bar.is_void() {
            warn!(row, time = %bar.time, "void bar skipped");
            continue;
        }
        if !bar.is_sane() {
            return Err(DataError::InvalidBar {
                row,
                reason: "inconsistent OHLCV (high/low/volume)".into(),
            });
        }
        if let Some(prev) = bars.last() {
            if bar.time <= prev.time {
                return Err(DataError::InvalidBar {
                    row,
                    reason: format!("time {} not after {}", bar.time, prev.time),
                });
            }
        }
        bars.push(bar);
    }

    if bars.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(bars)
}

pub fn write_bars(path: impl AsRef<Path>, bars: &[Bar]) -> Result<(), DataError> {
    let file = File::create(path)?;
    write_bars_to(file, bars)
}

pub fn write_bars_to<W: Write>(writer: W, bars: &[Bar]) -> Result<(), DataError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["time", "open", "high", "low", "close", "volume"])?;
    for b in bars {
        wtr.write_record([
            &b.time.format(TIME_FORMAT).to_string(),
            &b.open.to_string(),
            &b.high.to_string(),
            &b.low.to_string(),
            &b.close.to_string(),
            &b.volume.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
