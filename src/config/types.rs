//! Small validated value types shared by the configuration blueprints.

use {
    crate::domain::{ConfigError, InputError},
    serde::{Deserialize, Serialize},
    std::ops::RangeInclusive,
};

pub const SWING_ORDER_RANGE: RangeInclusive<usize> = 2..=20;
pub const MIN_RISK_REWARD_RANGE: RangeInclusive<f64> = 0.5..=20.0;

/// Current volatility reference (VIX close).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct VixLevel(f64);

impl VixLevel {
    pub fn try_new(val: f64) -> Result<Self, InputError> {
        if !val.is_finite() || val < 0.0 {
            return Err(InputError::InvalidVolatility(val));
        }
        Ok(Self(val))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for VixLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 { 0.0 } else { val };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Per-run knobs exposed to callers (CLI flags, endpoint query params).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Look-around window for swing detection.
    pub swing_order: usize,
    /// Signals with RR100 below this are disabled.
    pub min_risk_reward: f64,
    pub require_volume_confirmation: bool,
}

impl ScanSettings {
    pub const DEFAULT: Self = Self {
        swing_order: 5,
        min_risk_reward: 2.0,
        require_volume_confirmation: false,
    };

    pub fn new(
        swing_order: usize,
        min_risk_reward: f64,
        require_volume_confirmation: bool,
    ) -> Result<Self, ConfigError> {
        let settings = Self {
            swing_order,
            min_risk_reward,
            require_volume_confirmation,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SWING_ORDER_RANGE.contains(&self.swing_order) {
            return Err(ConfigError::OutOfRange {
                field: "swing_order",
                value: self.swing_order as f64,
                min: *SWING_ORDER_RANGE.start() as f64,
                max: *SWING_ORDER_RANGE.end() as f64,
            });
        }
        // NaN fails `contains`
        if !MIN_RISK_REWARD_RANGE.contains(&self.min_risk_reward) {
            return Err(ConfigError::OutOfRange {
                field: "min_risk_reward",
                value: self.min_risk_reward,
                min: *MIN_RISK_REWARD_RANGE.start(),
                max: *MIN_RISK_REWARD_RANGE.end(),
            });
        }
        Ok(())
    }

    /// Minimum bar count before any swing can be detected.
    pub fn min_candles(&self) -> usize {
        self.swing_order * 2 + 1
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
