use {
    crate::domain::{Candle, Timeframe},
    anyhow::{Context, Result},
    serde::{Deserialize, Serialize},
    std::{collections::BTreeMap, fs::File, io::BufReader, path::Path},
};

/// Candles per timeframe plus an optional volatility reading, as handed to
/// the scanner by whatever fetched and resampled the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisInput {
    #[serde(default)]
    pub vix_level: Option<f64>,
    pub series: BTreeMap<Timeframe, Vec<Candle>>,
}

impl AnalysisInput {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let input = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse candle bundle {}", path.display()))?;
        Ok(input)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse candle bundle")
    }

    pub fn candle_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = r#"{
        "vix_level": 17.25,
        "series": {
            "1h": [
                {"timestamp": "2025-03-03T09:00:00-05:00", "open": 100.0, "high": 101.0, "low": 99.5, "close": 100.5, "volume": 1200},
                {"timestamp": "2025-03-03T10:00:00-05:00", "open": 100.5, "high": 102.0, "low": 100.0, "close": 101.5, "volume": 900}
            ],
            "1d": []
        }
    }"#;

    #[test]
    fn test_parse_bundle() {
        let input = AnalysisInput::from_json(BUNDLE).unwrap();
        assert_eq!(input.vix_level, Some(17.25));
        assert_eq!(input.series.len(), 2);
        assert_eq!(input.candle_count(), 2);
        let bars = &input.series[&Timeframe::H1];
        assert_eq!(bars[1].high, 102.0);
        assert_eq!(bars[1].volume, 900);
    }

    #[test]
    fn test_vix_is_optional() {
        let input = AnalysisInput::from_json(r#"{"series": {}}"#).unwrap();
        assert_eq!(input.vix_level, None);
        assert_eq!(input.candle_count(), 0);
    }

    #[test]
    fn test_unknown_timeframe_rejected() {
        assert!(AnalysisInput::from_json(r#"{"series": {"2h": []}}"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = AnalysisInput::load("/nonexistent/bundle.json").unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
