use {
    crate::domain::Timeframe,
    chrono::{DateTime, FixedOffset},
    serde::{Deserialize, Serialize},
    std::fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Lowercase word used inside filter reasons.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }

    /// +1 for long, -1 for short. Levels are projected along this sign.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

/// A fully-specified measured-move setup. Built once, never mutated.
/// Disabled signals are kept so callers can see why they were filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub timeframe: Timeframe,
    /// Timestamp of swing C.
    pub timestamp: DateTime<FixedOffset>,
    pub direction: Direction,
    pub pattern: String,
    pub impulse_points: f64,
    /// Retracement in percent of the impulse (e.g. 60.0).
    pub retrace_pct: f64,
    pub entry: f64,
    pub stop: f64,
    pub target_100: f64,
    pub target_1236: f64,
    pub risk_reward_100: f64,
    pub risk_reward_1236: f64,
    pub enabled: bool,
    /// Empty iff `enabled`.
    pub filter_reason: String,
    pub volume_confirmed: bool,
}

impl Signal {
    pub fn digest(&self) -> SignalDigest {
        SignalDigest {
            timeframe: self.timeframe,
            timestamp: self.timestamp,
            direction: self.direction,
            entry: self.entry,
            stop: self.stop,
            target_100: self.target_100,
            target_1236: self.target_1236,
            retrace_pct: self.retrace_pct,
            risk_reward_100: self.risk_reward_100,
            enabled: self.enabled,
        }
    }
}

/// Compact projection of a [`Signal`] handed to forecast-blending layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDigest {
    pub timeframe: Timeframe,
    pub timestamp: DateTime<FixedOffset>,
    pub direction: Direction,
    pub entry: f64,
    pub stop: f64,
    pub target_100: f64,
    pub target_1236: f64,
    pub retrace_pct: f64,
    pub risk_reward_100: f64,
    pub enabled: bool,
}
