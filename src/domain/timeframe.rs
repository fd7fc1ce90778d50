use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter, EnumString},
};

/// Candle resolutions the scanner runs over, shortest first.
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
    EnumString,
)]
pub enum Timeframe {
    #[serde(rename = "5m")]
    #[strum(serialize = "5m")]
    M5,
    #[serde(rename = "15m")]
    #[strum(serialize = "15m")]
    M15,
    #[serde(rename = "1h")]
    #[strum(serialize = "1h")]
    H1,
    #[serde(rename = "4h")]
    #[strum(serialize = "4h")]
    H4,
    #[serde(rename = "1d")]
    #[strum(serialize = "1d")]
    D1,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display_and_parse_round_trip() {
        for tf in Timeframe::iter() {
            assert_eq!(Timeframe::from_str(&tf.to_string()).unwrap(), tf);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Timeframe::M15).unwrap(), "\"15m\"");
        let tf: Timeframe = serde_json::from_str("\"1d\"").unwrap();
        assert_eq!(tf, Timeframe::D1);
    }

    #[test]
    fn test_order_is_shortest_first() {
        let all: Vec<Timeframe> = Timeframe::iter().collect();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(all.first(), Some(&Timeframe::M5));
        assert_eq!(all.last(), Some(&Timeframe::D1));
    }
}
