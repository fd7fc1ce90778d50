use {crate::domain::Timeframe, thiserror::Error};

pub type Result<T> = std::result::Result<T, ScanError>;

/// Malformed caller data. Never retried inside the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{timeframe}: candle series is empty")]
    EmptySeries { timeframe: Timeframe },

    #[error("{timeframe}: timestamps not strictly increasing at index {index}")]
    NonMonotonic { timeframe: Timeframe, index: usize },

    #[error("{timeframe}: invalid OHLC at index {index}: {reason}")]
    InvalidOhlc {
        timeframe: Timeframe,
        index: usize,
        reason: &'static str,
    },

    #[error("volatility level {0} must be finite and non-negative")]
    InvalidVolatility(f64),
}

/// Out-of-range run settings or engine parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
