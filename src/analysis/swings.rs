use {
    crate::{
        config::DEBUG_FLAGS,
        models::{OhlcvTimeSeries, Swing, SwingKind},
        utils::{get_max, get_min},
    },
    itertools::Itertools,
};

/// Indices whose value is the extreme of the closed window `[i-order, i+order]`.
/// The window is clipped at the series edges, so the first and last bars qualify
/// against their truncated neighbourhood. Ties count as extrema.
fn extrema_indices(values: &[f64], order: usize, kind: SwingKind) -> Vec<usize> {
    let n = values.len();
    (0..n)
        .filter(|&i| {
            let window = &values[i.saturating_sub(order)..=(i + order).min(n - 1)];
            match kind {
                SwingKind::High => values[i] >= get_max(window),
                SwingKind::Low => values[i] <= get_min(window),
            }
        })
        .collect()
}

fn swings_of_kind(series: &OhlcvTimeSeries, order: usize, kind: SwingKind) -> Vec<Swing> {
    let prices = match kind {
        SwingKind::High => &series.high_prices,
        SwingKind::Low => &series.low_prices,
    };

    let swings: Vec<Swing> = extrema_indices(prices, order, kind)
        .into_iter()
        .map(|index| Swing {
            timestamp: series.timestamps[index],
            index,
            kind,
            price: prices[index],
        })
        .collect();

    // Keep the last swing per timestamp.
    let mut deduped: Vec<Swing> = swings
        .into_iter()
        .rev()
        .unique_by(|s| s.timestamp)
        .collect();
    deduped.reverse();
    deduped
}

/// Swing highs and lows, each time-ordered. Both empty when the series is
/// shorter than `2 * order + 1` bars.
pub fn find_swings(series: &OhlcvTimeSeries, order: usize) -> (Vec<Swing>, Vec<Swing>) {
    if order == 0 || series.klines() < order * 2 + 1 {
        return (Vec::new(), Vec::new());
    }
    (
        swings_of_kind(series, order, SwingKind::High),
        swings_of_kind(series, order, SwingKind::Low),
    )
}

/// Highs and lows merged into one time-sorted table. Kinds are not forced to
/// alternate. A bar that is both a high and a low yields HIGH then LOW.
pub fn build_swing_table(series: &OhlcvTimeSeries, order: usize) -> Vec<Swing> {
    let (highs, lows) = find_swings(series, order);
    let table: Vec<Swing> = highs
        .into_iter()
        .chain(lows)
        .sorted_by_key(|s| s.timestamp)
        .collect();

    if DEBUG_FLAGS.log_swings {
        for s in &table {
            log::trace!("{} swing {}", series.timeframe, s);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{bar, bullish_candles, series};

    #[test]
    fn test_fixture_swings() {
        let table = build_swing_table(&series(&bullish_candles()), 2);
        let summary: Vec<(usize, SwingKind, f64)> =
            table.iter().map(|s| (s.index, s.kind, s.price)).collect();
        assert_eq!(
            summary,
            vec![
                (0, SwingKind::High, 104.0),
                (3, SwingKind::Low, 100.0),
                (6, SwingKind::High, 110.0),
                (8, SwingKind::Low, 104.0),
                (12, SwingKind::High, 109.5),
            ]
        );
    }

    #[test]
    fn test_sparse_series_yields_nothing() {
        let candles: Vec<_> = (0..10).map(|i| bar(i, 101.0 + i as f64, 100.0, 10)).collect();
        let (highs, lows) = find_swings(&series(&candles), 5);
        assert!(highs.is_empty());
        assert!(lows.is_empty());
        assert!(build_swing_table(&series(&candles), 5).is_empty());
    }

    #[test]
    fn test_exact_minimum_length_is_scanned() {
        // 5 bars, order 2: the middle bar is the only interior peak.
        let hl = [(10.0, 9.0), (11.0, 9.5), (12.0, 10.0), (11.0, 9.5), (10.0, 9.0)];
        let candles: Vec<_> = hl
            .iter()
            .enumerate()
            .map(|(i, &(h, l))| bar(i, h, l, 10))
            .collect();
        let (highs, _) = find_swings(&series(&candles), 2);
        assert_eq!(highs.iter().map(|s| s.index).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_plateau_counts_every_tied_bar() {
        let hl = [
            (10.0, 9.0),
            (12.0, 9.0),
            (12.0, 9.0),
            (11.0, 9.0),
            (10.0, 9.0),
            (9.5, 9.0),
        ];
        let candles: Vec<_> = hl
            .iter()
            .enumerate()
            .map(|(i, &(h, l))| bar(i, h, l, 10))
            .collect();
        let (highs, lows) = find_swings(&series(&candles), 2);
        assert_eq!(highs.iter().map(|s| s.index).collect::<Vec<_>>(), vec![1, 2]);
        // Flat lows: every bar ties the window minimum.
        assert_eq!(lows.len(), 6);
    }

    #[test]
    fn test_high_sorted_before_low_on_same_bar() {
        let hl = [(10.0, 9.0), (10.0, 9.0), (10.0, 9.0), (10.0, 9.0), (10.0, 9.0)];
        let candles: Vec<_> = hl
            .iter()
            .enumerate()
            .map(|(i, &(h, l))| bar(i, h, l, 10))
            .collect();
        let table = build_swing_table(&series(&candles), 2);
        assert_eq!(table.len(), 10);
        for pair in table.chunks(2) {
            assert_eq!(pair[0].kind, SwingKind::High);
            assert_eq!(pair[1].kind, SwingKind::Low);
            assert_eq!(pair[0].timestamp, pair[1].timestamp);
        }
    }
}
