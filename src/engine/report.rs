use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::latest_signal;
use crate::domain::Timeframe;
use crate::models::{
    ConfluenceResult, Direction, Regime, Signal, SignalDigest, TimeframeSnapshot,
};

use super::core::TimeframeScan;

/// Everything a multi-timeframe run produces. The engine never sets
/// `generated_at`, callers stamp it when they need an audit time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiTimeframeReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    pub vix_level: f64,
    pub vix_regime: Regime,
    pub timeframe_summaries: BTreeMap<Timeframe, TimeframeSnapshot>,
    pub signals_by_timeframe: BTreeMap<Timeframe, Vec<Signal>>,
    /// All timeframes merged, stable-sorted by timestamp.
    pub signals: Vec<Signal>,
    pub confluence: ConfluenceResult,
}

impl MultiTimeframeReport {
    pub(crate) fn new(scans: BTreeMap<Timeframe, TimeframeScan>, confluence: ConfluenceResult) -> Self {
        let mut timeframe_summaries = BTreeMap::new();
        let mut signals_by_timeframe = BTreeMap::new();
        for (tf, scan) in scans {
            timeframe_summaries.insert(tf, scan.summary);
            signals_by_timeframe.insert(tf, scan.signals);
        }

        let mut signals: Vec<Signal> = signals_by_timeframe.values().flatten().cloned().collect();
        signals.sort_by_key(|s| s.timestamp);

        Self {
            generated_at: None,
            vix_level: confluence.vix_level,
            vix_regime: confluence.vix_regime,
            timeframe_summaries,
            signals_by_timeframe,
            signals,
            confluence,
        }
    }

    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    pub fn signals_for(&self, timeframe: Timeframe) -> &[Signal] {
        self.signals_by_timeframe
            .get(&timeframe)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Digest of the timeframe's latest signal, for forecast blending.
    pub fn latest_digest(
        &self,
        timeframe: Timeframe,
        direction: Option<Direction>,
    ) -> Option<SignalDigest> {
        latest_signal(self.signals_for(timeframe), direction).map(Signal::digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::fixtures::{bullish_candles, t0},
        config::{MEASURED_MOVE, ScanSettings},
        engine::run_multi_timeframe,
    };

    fn report() -> MultiTimeframeReport {
        let candles = BTreeMap::from([(Timeframe::H1, bullish_candles())]);
        let settings = ScanSettings::new(2, 2.0, false).unwrap();
        run_multi_timeframe(&candles, 15.0, &settings, &MEASURED_MOVE).unwrap()
    }

    #[test]
    fn test_generated_at_only_when_attached() {
        let plain = serde_json::to_value(report()).unwrap();
        assert!(plain.get("generated_at").is_none());

        let stamped = report().with_generated_at(t0().with_timezone(&Utc));
        let json = serde_json::to_value(&stamped).unwrap();
        assert_eq!(json["generated_at"], "2025-03-03T13:00:00Z");
    }

    #[test]
    fn test_serialized_labels() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["vix_regime"], "LOW_VOL");
        assert_eq!(json["confluence"]["bias"], "LONG");
        assert_eq!(json["timeframe_summaries"]["1h"]["latest_direction"], "LONG");
        assert_eq!(json["signals"][0]["direction"], "LONG");
        assert_eq!(json["signals"][0]["timeframe"], "1h");
        assert_eq!(json["signals"][0]["timestamp"], "2025-03-03T16:00:00-05:00");
        let week = &json["confluence"]["forecast_ranges_pct"]["1_week"];
        assert_eq!(week[0], 0.88);
        assert_eq!(week[1], 3.08);
    }

    #[test]
    fn test_missing_timeframe_is_empty() {
        let r = report();
        assert!(r.signals_for(Timeframe::D1).is_empty());
        assert!(r.latest_digest(Timeframe::D1, None).is_none());
    }
}
