use {
    super::{patterns::match_patterns, swings::build_swing_table, volume::volume_confirmed},
    crate::{
        config::{DEBUG_FLAGS, LevelProjection, MeasuredMoveConfig, ScanSettings, VixLevel},
        models::{Direction, MeasuredMovePattern, OhlcvTimeSeries, Signal},
        trace_time,
        utils::round2,
    },
    std::fmt,
};

pub const PATTERN_LABEL: &str = "A-B impulse, C retrace 50-61.8%";

/// Raw (unrounded) trade levels projected from swing C.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeLevels {
    pub entry: f64,
    pub stop: f64,
    pub target_100: f64,
    pub target_1236: f64,
    pub risk_reward_100: f64,
    pub risk_reward_1236: f64,
}

impl TradeLevels {
    /// Longs project upward from C, shorts downward. A non-positive risk
    /// leaves both ratios at 0.0.
    pub fn project(pattern: &MeasuredMovePattern, projection: &LevelProjection) -> Self {
        let sign = pattern.direction.sign();
        let c = pattern.c.price;
        let impulse = pattern.impulse;
        let pad = impulse * projection.pad_ratio;

        let entry = c + sign * pad;
        let stop = c - sign * pad;
        let target_100 = c + sign * impulse;
        let target_1236 = c + sign * impulse * projection.extension_ratio;

        let risk = sign * (entry - stop);
        let reward_ratio = |target: f64| {
            if risk > 0.0 {
                sign * (target - entry) / risk
            } else {
                0.0
            }
        };

        Self {
            entry,
            stop,
            target_100,
            target_1236,
            risk_reward_100: reward_ratio(target_100),
            risk_reward_1236: reward_ratio(target_1236),
        }
    }
}

/// First filter a signal failed. Rendered into `Signal::filter_reason`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterReason {
    Regime {
        direction: Direction,
        vix: f64,
        limit: f64,
    },
    MinReward {
        direction: Direction,
        rr: f64,
        min: f64,
    },
    NoVolume {
        direction: Direction,
    },
}

impl fmt::Display for FilterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterReason::Regime {
                direction: Direction::Long,
                vix,
                limit,
            } => write!(f, "Filtered long: VIX {:.2} > {:.2}", vix, limit),
            FilterReason::Regime {
                direction: Direction::Short,
                vix,
                limit,
            } => write!(f, "Filtered short: VIX {:.2} < {:.2}", vix, limit),
            FilterReason::MinReward { direction, rr, min } => write!(
                f,
                "Filtered {}: RR100 {:.2} < {:.2}",
                direction.label(),
                rr,
                min
            ),
            FilterReason::NoVolume { direction } => {
                write!(f, "Filtered {}: no volume confirmation", direction.label())
            }
        }
    }
}

/// Turns accepted patterns into signals for one timeframe.
pub struct SignalBuilder<'a> {
    series: &'a OhlcvTimeSeries,
    vix: VixLevel,
    settings: &'a ScanSettings,
    params: &'a MeasuredMoveConfig,
}

impl<'a> SignalBuilder<'a> {
    pub fn new(
        series: &'a OhlcvTimeSeries,
        vix: VixLevel,
        settings: &'a ScanSettings,
        params: &'a MeasuredMoveConfig,
    ) -> Self {
        Self {
            series,
            vix,
            settings,
            params,
        }
    }

    /// Regime, then minimum reward, then volume. The first failure wins.
    fn first_failed_filter(
        &self,
        direction: Direction,
        levels: &TradeLevels,
        volume_ok: bool,
    ) -> Option<FilterReason> {
        let vix = self.vix.value();
        let gate = &self.params.regime_filter;

        let regime_blocked = match direction {
            Direction::Long => (vix > gate.long_max_vix).then_some(gate.long_max_vix),
            Direction::Short => (vix < gate.short_min_vix).then_some(gate.short_min_vix),
        };
        if let Some(limit) = regime_blocked {
            return Some(FilterReason::Regime {
                direction,
                vix,
                limit,
            });
        }

        if levels.risk_reward_100 < self.settings.min_risk_reward {
            return Some(FilterReason::MinReward {
                direction,
                rr: levels.risk_reward_100,
                min: self.settings.min_risk_reward,
            });
        }

        if self.settings.require_volume_confirmation && !volume_ok {
            return Some(FilterReason::NoVolume { direction });
        }

        None
    }

    /// Always yields a signal. Failing a filter only disables it.
    pub fn build(&self, pattern: &MeasuredMovePattern) -> Signal {
        let levels = TradeLevels::project(pattern, &self.params.levels);
        let volume_ok = volume_confirmed(self.series, pattern.c.timestamp, &self.params.volume);
        let reason = self.first_failed_filter(pattern.direction, &levels, volume_ok);

        Signal {
            timeframe: self.series.timeframe,
            timestamp: pattern.c.timestamp,
            direction: pattern.direction,
            pattern: PATTERN_LABEL.to_string(),
            impulse_points: round2(pattern.impulse),
            retrace_pct: round2(pattern.retrace * 100.0),
            entry: round2(levels.entry),
            stop: round2(levels.stop),
            target_100: round2(levels.target_100),
            target_1236: round2(levels.target_1236),
            risk_reward_100: round2(levels.risk_reward_100),
            risk_reward_1236: round2(levels.risk_reward_1236),
            enabled: reason.is_none(),
            filter_reason: reason.map(|r| r.to_string()).unwrap_or_default(),
            volume_confirmed: volume_ok,
        }
    }
}

/// Full single-timeframe pipeline: swings, patterns, signals. Too few candles
/// is a normal outcome and gives an empty list.
pub fn detect_signals(
    series: &OhlcvTimeSeries,
    vix: VixLevel,
    settings: &ScanSettings,
    params: &MeasuredMoveConfig,
) -> Vec<Signal> {
    let needed = settings.min_candles();
    if series.klines() < needed {
        log::warn!(
            "{}: {} candles, need at least {} for swing order {}",
            series.timeframe,
            series.klines(),
            needed,
            settings.swing_order
        );
        return Vec::new();
    }

    let swings = trace_time!("build_swing_table", 1000, {
        build_swing_table(series, settings.swing_order)
    });
    let patterns = match_patterns(&swings, &params.fib_band);

    let builder = SignalBuilder::new(series, vix, settings, params);
    let mut signals: Vec<Signal> = patterns.iter().map(|p| builder.build(p)).collect();
    signals.sort_by_key(|s| s.timestamp);

    if DEBUG_FLAGS.log_timeframe_counts {
        log::debug!(
            "{}: {} swings, {} patterns, {} enabled",
            series.timeframe,
            swings.len(),
            patterns.len(),
            signals.iter().filter(|s| s.enabled).count()
        );
    }
    signals
}
