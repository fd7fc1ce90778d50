use {
    crate::{config::VolumeRule, models::OhlcvTimeSeries, utils::mean_volume},
    chrono::{DateTime, FixedOffset},
};

/// Recent participation versus a trailing baseline, both ending at the bar
/// found as-of `ts`. Too little history or a zero baseline is never confirmed.
pub fn volume_confirmed(
    series: &OhlcvTimeSeries,
    ts: DateTime<FixedOffset>,
    rule: &VolumeRule,
) -> bool {
    let Some(i) = series.index_as_of(ts) else {
        return false;
    };
    if i < rule.min_index {
        return false;
    }

    let baseline = mean_volume(&series.volumes[i.saturating_sub(rule.baseline_bars)..=i]);
    let recent = mean_volume(&series.volumes[(i + 1).saturating_sub(rule.recent_bars)..=i]);

    if baseline <= 0.0 {
        return false;
    }
    recent >= baseline * rule.min_ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::fixtures::{C_BAR, bar, bullish_candles, series, with_volumes},
        config::MEASURED_MOVE,
    };
    use chrono::Duration;

    const RULE: VolumeRule = MEASURED_MOVE.volume;

    #[test]
    fn test_flat_volume_confirms() {
        let s = series(&bullish_candles());
        assert!(volume_confirmed(&s, s.timestamps[C_BAR], &RULE));
    }

    #[test]
    fn test_quiet_pullback_not_confirmed() {
        // bars 6..=8 at 100 vs 1000 elsewhere: recent 100, baseline 700
        let vols = [1000, 1000, 1000, 1000, 1000, 1000, 100, 100, 100, 1000, 1000, 1000, 1000];
        let s = series(&with_volumes(bullish_candles(), &vols));
        assert!(!volume_confirmed(&s, s.timestamps[C_BAR], &RULE));
    }

    #[test]
    fn test_ratio_threshold() {
        // recent = 900 (bars 6..=8), baseline over bars 0..=8 = 900
        let vols = [900; 13];
        let s = series(&with_volumes(bullish_candles(), &vols));
        assert!(volume_confirmed(&s, s.timestamps[C_BAR], &RULE));

        // baseline 1000*6 + 810*3 = 8430 / 9 = 936.67, 0.9x = 843 > 810
        let vols = [1000, 1000, 1000, 1000, 1000, 1000, 810, 810, 810, 0, 0, 0, 0];
        let s = series(&with_volumes(bullish_candles(), &vols));
        assert!(!volume_confirmed(&s, s.timestamps[C_BAR], &RULE));
    }

    #[test]
    fn test_baseline_spans_twenty_bars_before_c() {
        // C at 22: baseline is bars 2..=22, recent 20..=22 at 900.
        // Bars 0 and 1 sit outside the window, bar 2 is its oldest member.
        let with_oldest = |oldest: u64| {
            let candles: Vec<_> = (0..23)
                .map(|i| {
                    let volume = match i {
                        0 | 1 => 0,
                        2 => oldest,
                        20..=22 => 900,
                        _ => 1000,
                    };
                    bar(i, 101.0, 100.0, volume)
                })
                .collect();
            series(&candles)
        };

        // (1000 + 17 * 1000 + 3 * 900) / 21 = 985.7, 0.9x = 887.1
        let s = with_oldest(1000);
        assert!(volume_confirmed(&s, s.timestamps[22], &RULE));

        // (2000 + 17 * 1000 + 3 * 900) / 21 = 1033.3, 0.9x = 930
        let s = with_oldest(2000);
        assert!(!volume_confirmed(&s, s.timestamps[22], &RULE));
    }

    #[test]
    fn test_zero_baseline_not_confirmed() {
        let s = series(&with_volumes(bullish_candles(), &[0; 13]));
        assert!(!volume_confirmed(&s, s.timestamps[C_BAR], &RULE));
    }

    #[test]
    fn test_needs_two_prior_bars() {
        let s = series(&bullish_candles());
        assert!(!volume_confirmed(&s, s.timestamps[1], &RULE));
        assert!(volume_confirmed(&s, s.timestamps[2], &RULE));
        assert!(!volume_confirmed(&s, s.timestamps[0] - Duration::hours(1), &RULE));
    }

    #[test]
    fn test_as_of_lookup_between_bars() {
        let s = series(&bullish_candles());
        let between = s.timestamps[C_BAR] + Duration::minutes(30);
        assert_eq!(
            volume_confirmed(&s, between, &RULE),
            volume_confirmed(&s, s.timestamps[C_BAR], &RULE)
        );
    }
}
