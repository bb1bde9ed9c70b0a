//! QQE Lab CLI: run the signal pipeline over bar files.
//!
//! Commands:
//! - `run`: stream a CSV bar file through the pipeline and report signals
//! - `synthetic`: write a deterministic random-walk bar file
//! - `config`: print or write the default configuration as TOML

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use qqelab_core::data::{generate_bars, load_bars, write_bars};
use qqelab_core::fingerprint::RunFingerprint;
use qqelab_core::pipeline::DEFAULT_TICK_SIZE;
use qqelab_core::{Bar, BarOutput, QqeConfig, QqePipeline, RecordingRenderer};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "qqelab",
    about = "QQE Lab CLI: QQE x HMA signal pipeline with AI score"
)]
struct Cli {
    /// Log filter when RUST_LOG is unset (e.g. info, debug, qqelab_core=trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline over a CSV bar file.
    Run {
        /// CSV with header time,open,high,low,close,volume.
        #[arg(long)]
        input: PathBuf,

        /// TOML configuration. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Minimum price increment, used to offset markers.
        #[arg(long, default_value_t = DEFAULT_TICK_SIZE)]
        tick_size: f64,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write results here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report every eligible bar, not just signal bars.
        #[arg(long, default_value_t = false)]
        all_bars: bool,
    },
    /// Write a deterministic random-walk bar file.
    Synthetic {
        #[arg(long, default_value_t = 500)]
        bars: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 100.0)]
        start_price: f64,

        #[arg(long)]
        output: PathBuf,
    },
    /// Print or write the default configuration.
    Config {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_json);

    match cli.command {
        Commands::Run {
            input,
            config,
            tick_size,
            format,
            output,
            all_bars,
        } => run_pipeline_cmd(&input, config.as_deref(), tick_size, format, output.as_deref(), all_bars),
        Commands::Synthetic {
            bars,
            seed,
            start_price,
            output,
        } => run_synthetic(bars, seed, start_price, &output),
        Commands::Config { output } => run_config(output.as_deref()),
    }
}

/// Logs go to stderr so stdout stays clean for results.
fn init_logging(default_filter: &str, json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .init();
    }
}

fn run_pipeline_cmd(
    input: &Path,
    config_path: Option<&Path>,
    tick_size: f64,
    format: OutputFormat,
    output: Option<&Path>,
    all_bars: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => QqeConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => QqeConfig::default(),
    };
    let bars = load_bars(input).with_context(|| format!("failed to load bars from {}", input.display()))?;

    let mut pipeline = QqePipeline::new(config.clone())?
        .with_tick_size(tick_size)
        .context("invalid --tick-size")?;
    let mut renderer = RecordingRenderer::new();
    let outputs = pipeline.run_with(&bars, &mut renderer);

    let signal_count = outputs.iter().filter(|o| o.has_signal()).count();
    let fingerprint = RunFingerprint::new(&config, &bars, signal_count);
    info!(
        bars = bars.len(),
        eligible = outputs.len(),
        signals = signal_count,
        run = %fingerprint.run_hash,
        "run complete"
    );

    let rows: Vec<&BarOutput> = if all_bars {
        outputs.iter().collect()
    } else {
        outputs.iter().filter(|o| o.has_signal()).collect()
    };

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        OutputFormat::Table => write_table(&mut out, &fingerprint, &bars, &rows, pipeline.warmup_bars())?,
        OutputFormat::Json => {
            let report = JsonReport {
                fingerprint: &fingerprint,
                rows: &rows,
                draw_commands: &renderer.commands,
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(&mut out, &bars, &rows)?,
    }
    out.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    fingerprint: &'a RunFingerprint,
    rows: &'a [&'a BarOutput],
    draw_commands: &'a [qqelab_core::DrawCommand],
}

fn bar_time(bars: &[Bar], index: usize) -> String {
    bars.get(index)
        .map(|b| b.time.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn write_table(
    out: &mut dyn Write,
    fp: &RunFingerprint,
    bars: &[Bar],
    rows: &[&BarOutput],
    warmup_bars: usize,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "=== QQE x HMA Run ===")?;
    writeln!(out, "Bars:           {} ({} warmup)", fp.bar_count, warmup_bars)?;
    writeln!(out, "Signals:        {}", fp.signal_count)?;
    writeln!(out, "Config hash:    {}", fp.run_id.config_hash)?;
    writeln!(out, "Dataset hash:   {}", fp.run_id.dataset_hash)?;
    writeln!(out, "Run hash:       {}", fp.run_hash)?;
    writeln!(out)?;
    writeln!(
        out,
        "{:>6} {:<19} {:>8} {:>8} {:>8} {:>5} {:>9} {:>5} {:<4} {:<10}",
        "Bar", "Time", "Close", "sRSI", "Trail", "Trend", "HMA", "Score", "Side", "Tier"
    )?;
    writeln!(out, "{}", "-".repeat(92))?;
    for o in rows {
        let close = bars.get(o.bar_index).map_or(f64::NAN, |b| b.close);
        let (side, tier) = match &o.signal {
            Some(e) => (e.side.label(), e.tier.label()),
            None => ("", ""),
        };
        writeln!(
            out,
            "{:>6} {:<19} {:>8.2} {:>8.2} {:>8.2} {:>5} {:>9.2} {:>5} {:<4} {:<10}",
            o.bar_index,
            bar_time(bars, o.bar_index),
            close,
            o.smoothed_rsi,
            o.trailing_line,
            o.trend.sign(),
            o.hma,
            o.score,
            side,
            tier
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_csv(out: &mut dyn Write, bars: &[Bar], rows: &[&BarOutput]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "bar_index",
        "time",
        "rsi",
        "smoothed_rsi",
        "band_width",
        "long_band",
        "short_band",
        "trend",
        "hma",
        "hma_trend",
        "qqe_long",
        "qqe_short",
        "score",
        "side",
        "tier",
    ])?;
    for o in rows {
        let (side, tier) = match &o.signal {
            Some(e) => (e.side.label(), e.tier.label()),
            None => ("", ""),
        };
        wtr.write_record([
            &o.bar_index.to_string(),
            &bar_time(bars, o.bar_index),
            &format!("{:.6}", o.rsi),
            &format!("{:.6}", o.smoothed_rsi),
            &format!("{:.6}", o.band_width),
            &format!("{:.6}", o.long_band),
            &format!("{:.6}", o.short_band),
            &o.trend.sign().to_string(),
            &format!("{:.6}", o.hma),
            &o.hma_trend.to_string(),
            &o.qqe_long.to_string(),
            &o.qqe_short.to_string(),
            &o.score.to_string(),
            side,
            tier,
        ])?;
    }
    wtr.flush().context("failed to flush CSV writer")?;
    Ok(())
}

fn run_synthetic(count: usize, seed: u64, start_price: f64, output: &Path) -> Result<()> {
    let bars = generate_bars(count, seed, start_price);
    write_bars(output, &bars).with_context(|| format!("failed to write {}", output.display()))?;
    println!("Wrote {} synthetic bars to {}", bars.len(), output.display());
    Ok(())
}

fn run_config(output: Option<&Path>) -> Result<()> {
    let text = QqeConfig::default().to_toml_string()?;
    match output {
        Some(path) => {
            std::fs::write(path, &text).with_context(|| format!("failed to write {}", path.display()))?;
            println!("Default configuration written to {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
