/// Times a block when `DEBUG_FLAGS.log_performance` is on.
/// Every run is logged at trace level; runs slower than `$threshold_micros`
/// are promoted to a warning. With the flag off the block runs untimed.
#[macro_export]
macro_rules! trace_time {
    ($stage:expr, $threshold_micros:expr, $block:block) => {{
        if $crate::config::DEBUG_FLAGS.log_performance {
            let started = ::std::time::Instant::now();
            let out = $block;
            let micros = started.elapsed().as_micros();
            let build = if cfg!(debug_assertions) { "debug" } else { "release" };
            if micros > $threshold_micros {
                log::warn!(
                    "slow stage '{}' ({} build): {:.3}ms, budget {:.3}ms",
                    $stage,
                    build,
                    micros as f64 / 1000.0,
                    $threshold_micros as f64 / 1000.0
                );
            } else {
                log::trace!("stage '{}': {}us", $stage, micros);
            }
            out
        } else {
            $block
        }
    }};
}
