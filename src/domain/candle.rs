use {
    chrono::{DateTime, FixedOffset},
    serde::{Deserialize, Serialize},
};

// Define the CandleType enum
#[derive(Debug, PartialEq)]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// One already-resampled OHLCV bar, stamped in exchange session time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<FixedOffset>,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,

    pub volume: u64,
}

impl Candle {
    // A constructor for convenience
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Candle {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn get_type(&self) -> CandleType {
        if self.close >= self.open {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    // Returns the low and high of the candle body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        match self.get_type() {
            CandleType::Bullish => (self.open, self.close),
            CandleType::Bearish => (self.close, self.open),
        }
    }

    /// Checks the price envelope: finite values and low <= body <= high.
    /// Returns the first broken rule.
    pub(crate) fn envelope_violation(&self) -> Option<&'static str> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Some("non-finite price");
        }
        if self.low > self.high {
            return Some("low above high");
        }
        let (body_low, body_high) = self.body_range();
        if body_low < self.low {
            return Some("body below low");
        }
        if body_high > self.high {
            return Some("body above high");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(5 * 3600)
            .and_then(|tz| tz.with_ymd_and_hms(2025, 3, 3, 9, 30, 0).single())
            .unwrap()
    }

    #[test]
    fn test_body_range_bearish() {
        let c = Candle::new(ts(), 105.0, 106.0, 99.0, 100.0, 10);
        assert_eq!(c.get_type(), CandleType::Bearish);
        assert_eq!(c.body_range(), (100.0, 105.0));
    }

    #[test]
    fn test_envelope_valid() {
        let c = Candle::new(ts(), 100.0, 101.0, 99.0, 100.5, 10);
        assert_eq!(c.envelope_violation(), None);
    }

    #[test]
    fn test_envelope_close_above_high() {
        let c = Candle::new(ts(), 100.0, 101.0, 99.0, 102.0, 10);
        assert_eq!(c.envelope_violation(), Some("body above high"));
    }

    #[test]
    fn test_envelope_nan() {
        let c = Candle::new(ts(), f64::NAN, 101.0, 99.0, 100.0, 10);
        assert_eq!(c.envelope_violation(), Some("non-finite price"));
    }
}
