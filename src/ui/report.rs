use std::fmt::Write;

use tabled::{Table, Tabled, settings::Style};

use crate::engine::{MultiTimeframeReport, TimeframeScan};
use crate::models::Signal;

#[derive(Tabled)]
struct RangeRow {
    #[tabled(rename = "Horizon")]
    horizon: String,
    #[tabled(rename = "Low %")]
    low: String,
    #[tabled(rename = "High %")]
    high: String,
}

#[derive(Tabled)]
struct SnapshotRow {
    #[tabled(rename = "TF")]
    timeframe: String,
    #[tabled(rename = "Signals")]
    signals: usize,
    #[tabled(rename = "Enabled")]
    enabled: usize,
    #[tabled(rename = "Latest")]
    direction: String,
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "Stop")]
    stop: String,
    #[tabled(rename = "T100")]
    target_100: String,
}

#[derive(Tabled)]
struct SignalRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Dir")]
    direction: String,
    #[tabled(rename = "Retrace %")]
    retrace: String,
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "Stop")]
    stop: String,
    #[tabled(rename = "T100")]
    target_100: String,
    #[tabled(rename = "T123.6")]
    target_1236: String,
    #[tabled(rename = "RR100")]
    rr: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn price(v: Option<f64>) -> String {
    v.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "-".to_string())
}

fn status(signal: &Signal) -> String {
    if signal.enabled {
        "ON".to_string()
    } else {
        format!("OFF ({})", signal.filter_reason)
    }
}

impl From<&Signal> for SignalRow {
    fn from(s: &Signal) -> Self {
        Self {
            time: s.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            direction: s.direction.to_string(),
            retrace: format!("{:.2}", s.retrace_pct),
            entry: format!("{:.2}", s.entry),
            stop: format!("{:.2}", s.stop),
            target_100: format!("{:.2}", s.target_100),
            target_1236: format!("{:.2}", s.target_1236),
            rr: format!("{:.2}", s.risk_reward_100),
            status: status(s),
        }
    }
}

fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Terminal rendering of a run: header, forecast ranges, snapshots, and the
/// last `last_n` signals of each timeframe.
pub fn render_report(report: &MultiTimeframeReport, last_n: usize) -> String {
    let confluence = &report.confluence;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "VIX {:.2} ({}) | Bias {} | Score {:.2}",
        report.vix_level, report.vix_regime, confluence.bias, confluence.score
    );
    if let Some(at) = report.generated_at {
        let _ = writeln!(out, "Generated {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    out.push('\n');

    out.push_str(&table(confluence.forecast_ranges_pct.iter().map(
        |(horizon, range)| RangeRow {
            horizon: horizon.to_string(),
            low: format!("{:+.2}", range.low()),
            high: format!("{:+.2}", range.high()),
        },
    )));
    out.push_str("\n\n");

    out.push_str(&table(report.timeframe_summaries.values().map(|snap| {
        SnapshotRow {
            timeframe: snap.timeframe.to_string(),
            signals: snap.signal_count,
            enabled: snap.enabled_signal_count,
            direction: snap.latest_direction.to_string(),
            entry: price(snap.latest_entry),
            stop: price(snap.latest_stop),
            target_100: price(snap.latest_target_100),
        }
    })));
    out.push('\n');

    if report.signals.is_empty() {
        out.push_str("\nNo measured-move signals found\n");
    } else {
        for (tf, signals) in &report.signals_by_timeframe {
            if signals.is_empty() {
                let _ = writeln!(out, "\n[{}] none", tf);
                continue;
            }
            let tail = &signals[signals.len().saturating_sub(last_n)..];
            let _ = writeln!(out, "\n[{}] last {} of {}", tf, tail.len(), signals.len());
            out.push_str(&table(tail.iter().map(SignalRow::from)));
            out.push('\n');
        }
    }

    for note in &confluence.notes {
        let _ = writeln!(out, "* {}", note);
    }
    out
}

/// Single-timeframe variant: snapshot line plus the last `last_n` signals.
pub fn render_scan(scan: &TimeframeScan, last_n: usize) -> String {
    let snap = &scan.summary;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] VIX {:.2} | {} signals, {} enabled | latest {} entry {} stop {} t100 {}",
        scan.timeframe,
        scan.vix_level,
        snap.signal_count,
        snap.enabled_signal_count,
        snap.latest_direction,
        price(snap.latest_entry),
        price(snap.latest_stop),
        price(snap.latest_target_100),
    );

    let tail = scan.latest(last_n);
    if tail.is_empty() {
        out.push_str("No measured-move signals found\n");
    } else {
        out.push_str(&table(tail.iter().map(SignalRow::from)));
        out.push('\n');
    }
    out
}
