use {
    super::Direction,
    crate::domain::Timeframe,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Directional stance of a timeframe or of the whole confluence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Long,
    Short,
    #[default]
    Neutral,
}

impl Bias {
    /// Contribution sign in the confluence score.
    #[inline]
    pub fn vote(&self) -> f64 {
        match self {
            Bias::Long => 1.0,
            Bias::Short => -1.0,
            Bias::Neutral => 0.0,
        }
    }
}

impl From<Direction> for Bias {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Long => Bias::Long,
            Direction::Short => Bias::Short,
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bias::Long => write!(f, "LONG"),
            Bias::Short => write!(f, "SHORT"),
            Bias::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeSnapshot {
    pub timeframe: Timeframe,
    pub signal_count: usize,
    pub enabled_signal_count: usize,
    pub latest_direction: Bias,
    pub latest_entry: Option<f64>,
    pub latest_stop: Option<f64>,
    pub latest_target_100: Option<f64>,
}

impl TimeframeSnapshot {
    pub fn neutral(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            signal_count: 0,
            enabled_signal_count: 0,
            latest_direction: Bias::Neutral,
            latest_entry: None,
            latest_stop: None,
            latest_target_100: None,
        }
    }
}
