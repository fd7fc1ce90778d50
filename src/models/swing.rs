use {
    chrono::{DateTime, FixedOffset},
    serde::{Deserialize, Serialize},
    std::fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwingKind {
    High,
    Low,
}

impl fmt::Display for SwingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwingKind::High => write!(f, "HIGH"),
            SwingKind::Low => write!(f, "LOW"),
        }
    }
}

/// A local extremum. `index` points back into the source series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swing {
    pub timestamp: DateTime<FixedOffset>,
    pub index: usize,
    pub kind: SwingKind,
    pub price: f64,
}

impl fmt::Display for Swing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:.2} ({})", self.kind, self.price, self.timestamp)
    }
}
