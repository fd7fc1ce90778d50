mod maths_utils;
mod perf;

pub use maths_utils::{round_to, round2};

pub(crate) use maths_utils::{get_max, get_min, mean_volume};
