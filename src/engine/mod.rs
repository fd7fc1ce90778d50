mod core;
mod report;

pub use core::{TimeframeScan, run_multi_timeframe, scan_timeframe};
pub use report::MultiTimeframeReport;
