use {
    crate::{
        config::{ConfluenceParams, MeasuredMoveConfig, VixLevel},
        domain::Timeframe,
        models::{Bias, ConfluenceResult, ForecastRange, TimeframeSnapshot},
        utils::round2,
    },
    std::collections::BTreeMap,
};

pub const NOTES: [&str; 3] = [
    "Confluence: 5m/15m entries are read against 1h/4h/1d directional structure.",
    "Fib retrace window is a strict 50%-61.8% band for low-risk measured-move setups.",
    "VIX filter applied: longs are disabled above 18, shorts are disabled below 16.",
];

/// Weighted vote over the timeframes present in `snapshots`.
fn weighted_score(snapshots: &BTreeMap<Timeframe, TimeframeSnapshot>, params: &ConfluenceParams) -> f64 {
    snapshots
        .iter()
        .map(|(tf, snap)| match params.weight_for(*tf) {
            Some(w) => w.value() * snap.latest_direction.vote(),
            None => {
                log::warn!("{}: no confluence weight configured, ignoring", tf);
                0.0
            }
        })
        .sum()
}

fn bias_for(score: f64, threshold: f64) -> Bias {
    if score > threshold {
        Bias::Long
    } else if score < -threshold {
        Bias::Short
    } else {
        Bias::Neutral
    }
}

/// Overall bias, score, regime and dampened horizon ranges.
pub fn build_confluence(
    snapshots: &BTreeMap<Timeframe, TimeframeSnapshot>,
    vix: VixLevel,
    params: &MeasuredMoveConfig,
) -> ConfluenceResult {
    let confluence = &params.confluence;
    let score = weighted_score(snapshots, confluence);
    let bias = bias_for(score, confluence.bias_threshold);

    let vix_regime = params.regime.classify(vix.value());
    let damp = confluence.dampening.for_regime(vix_regime);

    let forecast_ranges_pct = confluence
        .long_bands
        .iter()
        .map(|band| {
            let (low, high) = match bias {
                Bias::Long => (band.low_pct, band.high_pct),
                Bias::Short => (-band.high_pct, -band.low_pct),
                Bias::Neutral => confluence.neutral_band,
            };
            (
                band.horizon,
                ForecastRange(round2(low * damp), round2(high * damp)),
            )
        })
        .collect();

    ConfluenceResult {
        bias,
        score: round2(score),
        vix_level: round2(vix.value()),
        vix_regime,
        forecast_ranges_pct,
        notes: NOTES.to_vec(),
    }
}
