#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the mm-scan binary)
pub use config::{MEASURED_MOVE, MeasuredMoveConfig, ScanSettings};
pub use data::AnalysisInput;
pub use domain::{Candle, Timeframe};
pub use engine::{MultiTimeframeReport, TimeframeScan, run_multi_timeframe, scan_timeframe};
pub use models::{ConfluenceResult, OhlcvTimeSeries, Signal, SignalDigest, TimeframeSnapshot};

// CLI argument parsing
use {
    anyhow::{Context, Result},
    chrono::{DateTime, Utc},
    clap::Parser,
    std::path::{Path, PathBuf},
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Measured-move scanner", long_about = None)]
pub struct Cli {
    /// JSON candle bundle: {"vix_level": .., "series": {"5m": [..], ..}}
    #[arg(short, long)]
    pub input: PathBuf,

    /// Volatility level, overrides the bundle's vix_level
    #[arg(long)]
    pub vix: Option<f64>,

    /// Look-around window for swing detection (2..=20)
    #[arg(long, default_value_t = ScanSettings::DEFAULT.swing_order)]
    pub swing_order: usize,

    /// Minimum RR100 for a signal to stay enabled (0.5..=20)
    #[arg(long, default_value_t = ScanSettings::DEFAULT.min_risk_reward)]
    pub min_rr: f64,

    #[arg(long, default_value_t = false)]
    pub require_volume_confirmation: bool,

    /// Scan only this timeframe (5m, 15m, 1h, 4h, 1d)
    #[arg(short, long)]
    pub timeframe: Option<Timeframe>,

    /// Signals shown per timeframe
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..=200))]
    pub last_n: u64,

    /// JSON file overriding part of the engine parameters
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Print the serialized result instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

fn load_params(path: &Path) -> Result<MeasuredMoveConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read params {}", path.display()))?;
    let params: MeasuredMoveConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse params {}", path.display()))?;
    Ok(params)
}

/// Runs the scanner for the parsed arguments and returns the text to print.
/// This is the public API for the binary to call.
pub fn run_cli(args: &Cli, generated_at: DateTime<Utc>) -> Result<String> {
    let input = AnalysisInput::load(&args.input)?;
    let vix = args
        .vix
        .or(input.vix_level)
        .context("No VIX level: pass --vix or set vix_level in the input bundle")?;

    let settings = ScanSettings::new(args.swing_order, args.min_rr, args.require_volume_confirmation)?;
    let params = match &args.params {
        Some(path) => load_params(path)?,
        None => MEASURED_MOVE,
    };
    let last_n = args.last_n as usize;

    log::info!(
        "Loaded {} candles over {} timeframes from {}",
        input.candle_count(),
        input.series.len(),
        args.input.display()
    );

    match args.timeframe {
        Some(tf) => {
            let candles = input
                .series
                .get(&tf)
                .with_context(|| format!("No {} series in {}", tf, args.input.display()))?;
            let mut scan = scan_timeframe(tf, candles, vix, &settings, &params)?;
            if args.json {
                scan.signals = scan.latest(last_n).to_vec();
                Ok(serde_json::to_string_pretty(&scan)?)
            } else {
                Ok(ui::render_scan(&scan, last_n))
            }
        }
        None => {
            let report = run_multi_timeframe(&input.series, vix, &settings, &params)?
                .with_generated_at(generated_at);
            if args.json {
                Ok(serde_json::to_string_pretty(&report)?)
            } else {
                Ok(ui::render_report(&report, last_n))
            }
        }
    }
}
