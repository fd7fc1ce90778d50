use {
    super::Bias,
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
    strum_macros::{Display, EnumIter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Regime {
    #[strum(to_string = "LOW_VOL")]
    LowVol,
    #[strum(to_string = "MODERATE")]
    Moderate,
    #[strum(to_string = "ELEVATED")]
    Elevated,
    #[strum(to_string = "HIGH_VOL")]
    HighVol,
}

/// Planning horizons for the projected percentage ranges.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum Horizon {
    #[serde(rename = "1_week")]
    #[strum(to_string = "1_week")]
    OneWeek,
    #[serde(rename = "1_month")]
    #[strum(to_string = "1_month")]
    OneMonth,
    #[serde(rename = "1_quarter")]
    #[strum(to_string = "1_quarter")]
    OneQuarter,
    #[serde(rename = "6_year")]
    #[strum(to_string = "6_year")]
    SixYear,
}

/// (low %, high %) move projected over a horizon. Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRange(pub f64, pub f64);

impl ForecastRange {
    #[inline]
    pub fn low(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn high(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfluenceResult {
    pub bias: Bias,
    pub score: f64,
    pub vix_level: f64,
    pub vix_regime: Regime,
    pub forecast_ranges_pct: BTreeMap<Horizon, ForecastRange>,
    pub notes: Vec<&'static str>,
}
