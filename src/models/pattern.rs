use {
    super::{Direction, Swing},
    serde::Serialize,
};

/// An accepted impulse (A->B) plus retracement (B->C) triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasuredMovePattern {
    pub direction: Direction,
    pub a: Swing,
    pub b: Swing,
    pub c: Swing,
    /// |B - A|, always positive for an accepted pattern.
    pub impulse: f64,
    /// Pullback as a fraction of the impulse.
    pub retrace: f64,
}
