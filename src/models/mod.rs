mod confluence;
mod ohlcv;
mod pattern;
mod signal;
mod snapshot;
mod swing;

pub use {
    confluence::{ConfluenceResult, ForecastRange, Horizon, Regime},
    ohlcv::OhlcvTimeSeries,
    pattern::MeasuredMovePattern,
    signal::{Direction, Signal, SignalDigest},
    snapshot::{Bias, TimeframeSnapshot},
    swing::{Swing, SwingKind},
};
