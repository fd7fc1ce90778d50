// Measured-move detection pipeline
mod confluence;
mod patterns;
mod signal_builder;
mod summary;
mod swings;
mod volume;

#[cfg(test)]
pub(crate) mod fixtures;

pub use {
    confluence::{NOTES, build_confluence},
    patterns::{TripleReject, evaluate_triple, match_patterns},
    signal_builder::{FilterReason, PATTERN_LABEL, SignalBuilder, TradeLevels, detect_signals},
    summary::{latest_signal, summarize_timeframe},
    swings::{build_swing_table, find_swings},
    volume::volume_confirmed,
};
