//! Bar file round trips and run fingerprints against real files.

use qqelab_core::data::{generate_bars, load_bars, write_bars};
use qqelab_core::fingerprint::{dataset_hash, RunFingerprint};
use qqelab_core::{DataError, QqeConfig, QqePipeline};
use std::io::Write;

#[test]
fn csv_round_trip_preserves_bars_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bars.csv");

    let bars = generate_bars(250, 17, 123.45);
    write_bars(&path, &bars).unwrap();
    let loaded = load_bars(&path).unwrap();

    assert_eq!(loaded, bars);
    assert_eq!(dataset_hash(&loaded), dataset_hash(&bars));
}

#[test]
fn loaded_file_drives_the_same_run_as_memory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("walk.csv");
    let bars = generate_bars(300, 8, 100.0);
    write_bars(&path, &bars).unwrap();

    let from_file = QqePipeline::new(QqeConfig::default())
        .unwrap()
        .run(&load_bars(&path).unwrap());
    let from_memory = QqePipeline::new(QqeConfig::default()).unwrap().run(&bars);
    assert_eq!(from_file, from_memory);

    let signals = from_file.iter().filter(|o| o.has_signal()).count();
    let fp = RunFingerprint::new(&QqeConfig::default(), &bars, signals);
    assert_eq!(fp.bar_count, 300);
    assert_eq!(fp.signal_count, signals);
}

#[test]
fn void_rows_are_skipped_on_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "time,open,high,low,close,volume").unwrap();
    writeln!(file, "2024-02-01,10,11,9,10.5,100").unwrap();
    writeln!(file, "2024-02-02,NaN,NaN,NaN,NaN,NaN").unwrap();
    writeln!(file, "2024-02-05 00:00:00,10.5,11,10,10.8,120").unwrap();
    file.flush().unwrap();

    let bars = load_bars(file.path()).unwrap();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[1].close, 10.8);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_bars(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, DataError::Io(_)));
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qqe.toml");
    let config = QqeConfig {
        rsi_period: 21,
        qqe_factor: 3.5,
        show_hma_line: true,
        ..Default::default()
    };
    std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
    assert_eq!(QqeConfig::load(&path).unwrap(), config);
}
