//! Hand-built candle series shared by the analysis and engine tests.

use {
    crate::{
        domain::{Candle, Timeframe},
        models::OhlcvTimeSeries,
    },
    chrono::{DateTime, Duration, FixedOffset, TimeZone},
};

/// (high, low) per bar. With order 2 the swings are
/// HIGH@104 (edge), LOW@100 (A), HIGH@110 (B), LOW@104 (C, bar 8), HIGH@109.5 (edge).
pub(crate) const BULLISH_HL: [(f64, f64); 13] = [
    (104.0, 102.0),
    (103.0, 101.0),
    (102.0, 100.5),
    (101.0, 100.0),
    (105.0, 101.0),
    (108.0, 103.0),
    (110.0, 107.0),
    (108.0, 106.0),
    (106.0, 104.0),
    (107.0, 105.0),
    (108.0, 106.5),
    (109.0, 107.0),
    (109.5, 108.0),
];

pub(crate) const C_BAR: usize = 8;

/// Mirrors prices around this level to turn the bullish fixture into a bearish one.
const MIRROR: f64 = 220.0;

pub(crate) fn t0() -> DateTime<FixedOffset> {
    FixedOffset::west_opt(5 * 3600)
        .and_then(|tz| tz.with_ymd_and_hms(2025, 3, 3, 8, 0, 0).single())
        .expect("valid fixture timestamp")
}

pub(crate) fn bar(i: usize, high: f64, low: f64, volume: u64) -> Candle {
    let mid = (high + low) / 2.0;
    Candle::new(t0() + Duration::hours(i as i64), mid, high, low, mid, volume)
}

pub(crate) fn bullish_candles() -> Vec<Candle> {
    BULLISH_HL
        .iter()
        .enumerate()
        .map(|(i, &(h, l))| bar(i, h, l, 1_000))
        .collect()
}

/// A HIGH@120 -> B LOW@110 -> C HIGH@116 (bar 8).
pub(crate) fn bearish_candles() -> Vec<Candle> {
    BULLISH_HL
        .iter()
        .enumerate()
        .map(|(i, &(h, l))| bar(i, MIRROR - l, MIRROR - h, 1_000))
        .collect()
}

pub(crate) fn with_volumes(mut candles: Vec<Candle>, volumes: &[u64]) -> Vec<Candle> {
    for (c, &v) in candles.iter_mut().zip(volumes) {
        c.volume = v;
    }
    candles
}

pub(crate) fn series(candles: &[Candle]) -> OhlcvTimeSeries {
    OhlcvTimeSeries::from_candles(Timeframe::H1, candles).expect("valid fixture series")
}

/// Asserts two floats agree to within 1e-9.
pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
