//! Debugging feature flags.

pub struct LogFlags {
    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,

    /// Emit every detected swing at trace level.
    pub log_swings: bool,

    /// Emit rejected (A,B,C) triples with the failing check.
    pub log_pattern_rejects: bool,

    /// One debug line per timeframe with swing/pattern/signal counts.
    pub log_timeframe_counts: bool,
}

pub const DEBUG_FLAGS: LogFlags = LogFlags {
    log_performance: false,
    log_swings: false,
    log_pattern_rejects: false,
    log_timeframe_counts: true,
};
