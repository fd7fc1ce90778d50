// Domain types and value objects
mod candle;
mod errors;
mod timeframe;

// Re-export commonly used types to the world
pub use candle::{Candle, CandleType};
pub use errors::{ConfigError, InputError, Result, ScanError};
pub use timeframe::Timeframe;
