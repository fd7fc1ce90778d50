use {
    crate::domain::{Candle, InputError, Timeframe},
    chrono::{DateTime, FixedOffset},
    serde::{Deserialize, Serialize},
};

/// Column-wise view of one timeframe's candles (the columns the scan reads). Only built through
/// `from_candles`, so every instance is non-empty, time-ordered and has sane OHLC.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OhlcvTimeSeries {
    pub timeframe: Timeframe,
    pub timestamps: Vec<DateTime<FixedOffset>>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub volumes: Vec<u64>,
}

impl OhlcvTimeSeries {
    pub fn from_candles(timeframe: Timeframe, candles: &[Candle]) -> Result<Self, InputError> {
        if candles.is_empty() {
            return Err(InputError::EmptySeries { timeframe });
        }

        let len = candles.len();
        let mut ts_vec = Vec::with_capacity(len);
        let mut high_vec = Vec::with_capacity(len);
        let mut low_vec = Vec::with_capacity(len);
        let mut vol_vec = Vec::with_capacity(len);

        for (i, c) in candles.iter().enumerate() {
            if let Some(reason) = c.envelope_violation() {
                return Err(InputError::InvalidOhlc {
                    timeframe,
                    index: i,
                    reason,
                });
            }
            if let Some(prev) = ts_vec.last() {
                if c.timestamp <= *prev {
                    return Err(InputError::NonMonotonic {
                        timeframe,
                        index: i,
                    });
                }
            }

            ts_vec.push(c.timestamp);
            high_vec.push(c.high);
            low_vec.push(c.low);
            vol_vec.push(c.volume);
        }

        Ok(Self {
            timeframe,
            timestamps: ts_vec,
            high_prices: high_vec,
            low_prices: low_vec,
            volumes: vol_vec,
        })
    }

    pub fn klines(&self) -> usize {
        self.timestamps.len()
    }

    /// Index of the last bar stamped at or before `ts` ("as-of" / pad lookup).
    pub fn index_as_of(&self, ts: DateTime<FixedOffset>) -> Option<usize> {
        let after = self.timestamps.partition_point(|t| *t <= ts);
        after.checked_sub(1)
    }
}
