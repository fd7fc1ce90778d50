//! Measured-move engine parameters (Immutable Blueprint)

use {
    super::types::Weight,
    crate::{
        domain::{ConfigError, Timeframe},
        models::{Horizon, Regime},
    },
    itertools::Itertools,
    serde::{Deserialize, Serialize},
};

/// Accepted retracement window, as a fraction of the impulse. Both ends inclusive.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibBand {
    pub min: f64,
    pub max: f64,
}

impl FibBand {
    #[inline]
    pub fn contains(&self, retrace: f64) -> bool {
        self.min <= retrace && retrace <= self.max
    }
}

/// Entry/stop padding and target extension, both as multiples of the impulse.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProjection {
    pub pad_ratio: f64,
    pub extension_ratio: f64,
}

#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeRule {
    /// Bars (ending at C) averaged for the "recent" side.
    pub recent_bars: usize,
    /// Bars before C included in the baseline mean (C itself is added on top).
    pub baseline_bars: usize,
    /// Recent mean must reach this fraction of the baseline mean.
    pub min_ratio: f64,
    /// C must sit at or beyond this bar index to be judged at all.
    pub min_index: usize,
}

/// VIX gates applied to individual signals. Both comparisons are strict.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeFilter {
    /// Longs disabled when VIX is above this.
    pub long_max_vix: f64,
    /// Shorts disabled when VIX is below this.
    pub short_min_vix: f64,
}

#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeThresholds {
    pub high_vol: f64,
    pub elevated: f64,
    pub low_vol: f64,
}

impl RegimeThresholds {
    /// Ordered checks, first match wins. [low_vol, elevated) falls through to Moderate.
    pub fn classify(&self, vix: f64) -> Regime {
        if vix >= self.high_vol {
            Regime::HighVol
        } else if vix >= self.elevated {
            Regime::Elevated
        } else if vix < self.low_vol {
            Regime::LowVol
        } else {
            Regime::Moderate
        }
    }
}

/// Forecast range scaling per regime. Higher volatility narrows the ranges.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeMultipliers {
    pub low_vol: f64,
    pub moderate: f64,
    pub elevated: f64,
    pub high_vol: f64,
}

impl RegimeMultipliers {
    pub fn for_regime(&self, regime: Regime) -> f64 {
        match regime {
            Regime::LowVol => self.low_vol,
            Regime::Moderate => self.moderate,
            Regime::Elevated => self.elevated,
            Regime::HighVol => self.high_vol,
        }
    }

    fn all(&self) -> [f64; 4] {
        [self.low_vol, self.moderate, self.elevated, self.high_vol]
    }
}

#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeframeWeight {
    pub timeframe: Timeframe,
    pub weight: Weight,
}

/// Base percentage band for a LONG bias. SHORT uses the mirror.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonBand {
    pub horizon: Horizon,
    pub low_pct: f64,
    pub high_pct: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfluenceParams {
    pub weights: [TimeframeWeight; 5],
    /// |score| must exceed this for a directional bias.
    pub bias_threshold: f64,
    pub long_bands: [HorizonBand; 4],
    pub neutral_band: (f64, f64),
    pub dampening: RegimeMultipliers,
}

impl ConfluenceParams {
    pub fn weight_for(&self, timeframe: Timeframe) -> Option<Weight> {
        self.weights
            .iter()
            .find(|tw| tw.timeframe == timeframe)
            .map(|tw| tw.weight)
    }
}

/// The Master Engine Configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasuredMoveConfig {
    pub fib_band: FibBand,
    pub levels: LevelProjection,
    pub volume: VolumeRule,
    pub regime_filter: RegimeFilter,
    pub regime: RegimeThresholds,
    pub confluence: ConfluenceParams,
}

impl Default for MeasuredMoveConfig {
    fn default() -> Self {
        MEASURED_MOVE
    }
}

impl MeasuredMoveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let band = self.fib_band;
        if !(band.min > 0.0 && band.min <= band.max && band.max < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "fib_band must satisfy 0 < min <= max < 1 (got {} .. {})",
                band.min, band.max
            )));
        }

        let levels = self.levels;
        if !(levels.pad_ratio.is_finite() && levels.pad_ratio >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "pad_ratio must be finite and >= 0 (got {})",
                levels.pad_ratio
            )));
        }
        if !(levels.extension_ratio.is_finite() && levels.extension_ratio > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "extension_ratio must be finite and > 1 (got {})",
                levels.extension_ratio
            )));
        }

        let volume = self.volume;
        if volume.recent_bars == 0 || volume.baseline_bars + 1 < volume.recent_bars {
            return Err(ConfigError::Invalid(
                "volume windows must satisfy 1 <= recent_bars <= baseline_bars + 1".to_string(),
            ));
        }
        if !(volume.min_ratio.is_finite() && volume.min_ratio > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "volume min_ratio must be finite and > 0 (got {})",
                volume.min_ratio
            )));
        }

        let filter = self.regime_filter;
        if !(filter.long_max_vix.is_finite() && filter.short_min_vix.is_finite()) {
            return Err(ConfigError::Invalid(
                "regime filter thresholds must be finite".to_string(),
            ));
        }

        let regime = self.regime;
        if !(regime.low_vol <= regime.elevated && regime.elevated <= regime.high_vol) {
            return Err(ConfigError::Invalid(format!(
                "regime thresholds must satisfy low_vol <= elevated <= high_vol (got {}, {}, {})",
                regime.low_vol, regime.elevated, regime.high_vol
            )));
        }

        let confluence = &self.confluence;
        if !confluence
            .weights
            .iter()
            .map(|tw| tw.timeframe)
            .all_unique()
        {
            return Err(ConfigError::Invalid(
                "timeframe weights must not repeat a timeframe".to_string(),
            ));
        }
        if !confluence.weights.iter().all(|tw| tw.weight.value().is_finite()) {
            return Err(ConfigError::Invalid(
                "timeframe weights must be finite".to_string(),
            ));
        }
        if !(confluence.bias_threshold.is_finite() && confluence.bias_threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "bias_threshold must be finite and >= 0 (got {})",
                confluence.bias_threshold
            )));
        }
        if !confluence.long_bands.iter().map(|b| b.horizon).all_unique() {
            return Err(ConfigError::Invalid(
                "forecast bands must not repeat a horizon".to_string(),
            ));
        }
        if let Some(bad) = confluence
            .long_bands
            .iter()
            .find(|b| !(b.low_pct <= b.high_pct))
        {
            return Err(ConfigError::Invalid(format!(
                "forecast band {} has low > high",
                bad.horizon
            )));
        }
        let (n_low, n_high) = confluence.neutral_band;
        if !(n_low <= n_high) {
            return Err(ConfigError::Invalid(
                "neutral band has low > high".to_string(),
            ));
        }
        if !confluence
            .dampening
            .all()
            .iter()
            .all(|m| m.is_finite() && *m > 0.0)
        {
            return Err(ConfigError::Invalid(
                "regime dampening multipliers must be finite and > 0".to_string(),
            ));
        }

        Ok(())
    }
}

mod fib {
    use super::*;
    pub const BAND: FibBand = FibBand {
        min: 0.50,
        max: 0.618,
    };
    pub const LEVELS: LevelProjection = LevelProjection {
        pad_ratio: 0.05,
        extension_ratio: 1.236,
    };
}

mod volume {
    use super::*;
    pub const RULE: VolumeRule = VolumeRule {
        recent_bars: 3,
        baseline_bars: 20,
        min_ratio: 0.9,
        min_index: 2,
    };
}

mod regime {
    use super::*;
    pub const FILTER: RegimeFilter = RegimeFilter {
        long_max_vix: 18.0,
        short_min_vix: 16.0,
    };
    pub const THRESHOLDS: RegimeThresholds = RegimeThresholds {
        high_vol: 20.0,
        elevated: 18.0,
        low_vol: 16.0,
    };
    pub const DAMPENING: RegimeMultipliers = RegimeMultipliers {
        low_vol: 1.1,
        moderate: 1.0,
        elevated: 0.9,
        high_vol: 0.75,
    };
}

mod confluence {
    use super::*;
    pub const WEIGHTS: [TimeframeWeight; 5] = [
        TimeframeWeight {
            timeframe: Timeframe::M5,
            weight: Weight::new(1.0),
        },
        TimeframeWeight {
            timeframe: Timeframe::M15,
            weight: Weight::new(1.5),
        },
        TimeframeWeight {
            timeframe: Timeframe::H1,
            weight: Weight::new(2.0),
        },
        TimeframeWeight {
            timeframe: Timeframe::H4,
            weight: Weight::new(2.5),
        },
        TimeframeWeight {
            timeframe: Timeframe::D1,
            weight: Weight::new(3.0),
        },
    ];
    pub const BIAS_THRESHOLD: f64 = 1.5;
    pub const LONG_BANDS: [HorizonBand; 4] = [
        HorizonBand {
            horizon: Horizon::OneWeek,
            low_pct: 0.8,
            high_pct: 2.8,
        },
        HorizonBand {
            horizon: Horizon::OneMonth,
            low_pct: 2.0,
            high_pct: 6.0,
        },
        HorizonBand {
            horizon: Horizon::OneQuarter,
            low_pct: 4.5,
            high_pct: 12.0,
        },
        HorizonBand {
            horizon: Horizon::SixYear,
            low_pct: 25.0,
            high_pct: 85.0,
        },
    ];
    pub const NEUTRAL_BAND: (f64, f64) = (-1.0, 1.0);
}

pub const MEASURED_MOVE: MeasuredMoveConfig = MeasuredMoveConfig {
    fib_band: fib::BAND,
    levels: fib::LEVELS,
    volume: volume::RULE,
    regime_filter: regime::FILTER,
    regime: regime::THRESHOLDS,
    confluence: ConfluenceParams {
        weights: confluence::WEIGHTS,
        bias_threshold: confluence::BIAS_THRESHOLD,
        long_bands: confluence::LONG_BANDS,
        neutral_band: confluence::NEUTRAL_BAND,
        dampening: regime::DAMPENING,
    },
};
