use crate::{
    domain::Timeframe,
    models::{Bias, Direction, Signal, TimeframeSnapshot},
};

/// Most recent enabled signal (optionally of one direction). Without one,
/// falls back to the last signal of any state and any direction, so a
/// non-empty slice always yields something. Expects `signals` sorted by time.
pub fn latest_signal(signals: &[Signal], direction: Option<Direction>) -> Option<&Signal> {
    signals
        .iter()
        .rev()
        .filter(|s| direction.is_none_or(|d| s.direction == d))
        .find(|s| s.enabled)
        .or_else(|| signals.last())
}

/// Reduces one timeframe's signals to its latest state.
pub fn summarize_timeframe(timeframe: Timeframe, signals: &[Signal]) -> TimeframeSnapshot {
    let Some(latest) = latest_signal(signals, None) else {
        return TimeframeSnapshot::neutral(timeframe);
    };

    TimeframeSnapshot {
        timeframe,
        signal_count: signals.len(),
        enabled_signal_count: signals.iter().filter(|s| s.enabled).count(),
        latest_direction: Bias::from(latest.direction),
        latest_entry: Some(latest.entry),
        latest_stop: Some(latest.stop),
        latest_target_100: Some(latest.target_100),
    }
}
