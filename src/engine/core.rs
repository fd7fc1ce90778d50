use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{build_confluence, detect_signals, summarize_timeframe};
use crate::config::{MeasuredMoveConfig, ScanSettings, VixLevel};
use crate::domain::{Candle, Result, Timeframe};
use crate::models::{OhlcvTimeSeries, Signal, TimeframeSnapshot};
use crate::trace_time;

use super::report::MultiTimeframeReport;

/// One timeframe's signals and the snapshot derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeScan {
    pub timeframe: Timeframe,
    pub vix_level: f64,
    pub summary: TimeframeSnapshot,
    pub signals: Vec<Signal>,
}

impl TimeframeScan {
    /// The last `n` signals, oldest first.
    pub fn latest(&self, n: usize) -> &[Signal] {
        &self.signals[self.signals.len().saturating_sub(n)..]
    }
}

/// Checked once per run, before any series is touched.
fn validate_run(
    vix: f64,
    settings: &ScanSettings,
    params: &MeasuredMoveConfig,
) -> Result<VixLevel> {
    settings.validate()?;
    params.validate()?;
    Ok(VixLevel::try_new(vix)?)
}

fn scan_series(
    series: &OhlcvTimeSeries,
    vix: VixLevel,
    settings: &ScanSettings,
    params: &MeasuredMoveConfig,
) -> TimeframeScan {
    let signals = detect_signals(series, vix, settings, params);
    TimeframeScan {
        timeframe: series.timeframe,
        vix_level: vix.value(),
        summary: summarize_timeframe(series.timeframe, &signals),
        signals,
    }
}

/// Signals and snapshot for a single timeframe.
pub fn scan_timeframe(
    timeframe: Timeframe,
    candles: &[Candle],
    vix: f64,
    settings: &ScanSettings,
    params: &MeasuredMoveConfig,
) -> Result<TimeframeScan> {
    let vix = validate_run(vix, settings, params)?;
    let series = OhlcvTimeSeries::from_candles(timeframe, candles)?;
    Ok(scan_series(&series, vix, settings, params))
}

/// Scans every supplied timeframe in parallel, then combines the snapshots.
/// Any malformed series fails the whole run.
pub fn run_multi_timeframe(
    candles: &BTreeMap<Timeframe, Vec<Candle>>,
    vix: f64,
    settings: &ScanSettings,
    params: &MeasuredMoveConfig,
) -> Result<MultiTimeframeReport> {
    let vix = validate_run(vix, settings, params)?;

    let scans: BTreeMap<Timeframe, TimeframeScan> = trace_time!("run_multi_timeframe", 5_000, {
        candles
            .par_iter()
            .map(|(tf, bars)| -> Result<(Timeframe, TimeframeScan)> {
                let series = OhlcvTimeSeries::from_candles(*tf, bars)?;
                Ok((*tf, scan_series(&series, vix, settings, params)))
            })
            .collect::<Result<_>>()
    })?;

    let summaries: BTreeMap<Timeframe, TimeframeSnapshot> = scans
        .iter()
        .map(|(tf, scan)| (*tf, scan.summary.clone()))
        .collect();
    let confluence = build_confluence(&summaries, vix, params);

    log::info!(
        "Scanned {} timeframes: {} signals, bias {} (score {:.2}, {})",
        scans.len(),
        scans.values().map(|s| s.signals.len()).sum::<usize>(),
        confluence.bias,
        confluence.score,
        confluence.vix_regime
    );

    Ok(MultiTimeframeReport::new(scans, confluence))
}
