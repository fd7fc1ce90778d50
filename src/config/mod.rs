//! Configuration module for the measured-move scanner.

// Can all be private now because we have a public re-export.
mod analysis;
mod debug;
mod types;

// Re-export commonly used items
pub use analysis::{
    ConfluenceParams, FibBand, HorizonBand, LevelProjection, MEASURED_MOVE, MeasuredMoveConfig,
    RegimeFilter, RegimeMultipliers, RegimeThresholds, TimeframeWeight, VolumeRule,
};
pub use debug::{DEBUG_FLAGS, LogFlags};
pub use types::{MIN_RISK_REWARD_RANGE, SWING_ORDER_RANGE, ScanSettings, VixLevel, Weight};
