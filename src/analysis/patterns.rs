use {
    crate::{
        config::{DEBUG_FLAGS, FibBand},
        models::{Direction, MeasuredMovePattern, Swing, SwingKind},
    },
    itertools::Itertools,
    std::fmt,
};

/// Why a consecutive (A,B,C) triple did not produce a pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TripleReject {
    /// Kinds are not LOW-HIGH-LOW or HIGH-LOW-HIGH.
    Shape,
    /// Right kinds, but prices do not form an impulse with C inside it.
    Structure,
    OutsideBand(f64),
}

impl fmt::Display for TripleReject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripleReject::Shape => write!(f, "swing kinds do not alternate"),
            TripleReject::Structure => write!(f, "C breaks the impulse structure"),
            TripleReject::OutsideBand(r) => write!(f, "retrace {:.4} outside band", r),
        }
    }
}

/// Checks one triple against both direction shapes and the retracement band.
pub fn evaluate_triple(
    a: &Swing,
    b: &Swing,
    c: &Swing,
    band: &FibBand,
) -> Result<MeasuredMovePattern, TripleReject> {
    let (direction, impulse, retrace) = match (a.kind, b.kind, c.kind) {
        (SwingKind::Low, SwingKind::High, SwingKind::Low) => {
            if !(a.price < b.price && c.price < b.price && c.price > a.price) {
                return Err(TripleReject::Structure);
            }
            let impulse = b.price - a.price;
            (Direction::Long, impulse, (b.price - c.price) / impulse)
        }
        (SwingKind::High, SwingKind::Low, SwingKind::High) => {
            if !(a.price > b.price && c.price > b.price && c.price < a.price) {
                return Err(TripleReject::Structure);
            }
            let impulse = a.price - b.price;
            (Direction::Short, impulse, (c.price - b.price) / impulse)
        }
        _ => return Err(TripleReject::Shape),
    };

    if !band.contains(retrace) {
        return Err(TripleReject::OutsideBand(retrace));
    }

    Ok(MeasuredMovePattern {
        direction,
        a: *a,
        b: *b,
        c: *c,
        impulse,
        retrace,
    })
}

/// Single pass over consecutive swing triples. Failing triples are skipped silently.
pub fn match_patterns(swings: &[Swing], band: &FibBand) -> Vec<MeasuredMovePattern> {
    swings
        .iter()
        .tuple_windows::<(_, _, _)>()
        .filter_map(|(a, b, c)| match evaluate_triple(a, b, c, band) {
            Ok(pattern) => Some(pattern),
            Err(reject) => {
                if DEBUG_FLAGS.log_pattern_rejects {
                    log::trace!("triple {} / {} / {} rejected: {}", a, b, c, reject);
                }
                None
            }
        })
        .collect()
}
