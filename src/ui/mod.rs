mod report;

pub use report::{render_report, render_scan};
