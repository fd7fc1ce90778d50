use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

/// Largest value of a non-empty, NaN-free slice.
#[inline]
pub(crate) fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

#[inline]
pub(crate) fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Arithmetic mean of integer volumes. NaN for an empty slice.
#[inline]
pub(crate) fn mean_volume(volumes: &[u64]) -> f64 {
    volumes.iter().map(|&v| v as f64).mean()
}

/// Rounds to `decimals` places against the exact binary value of `val`.
/// Only a true tie (e.g. 5000.125) goes to the even digit; a value stored
/// just below or above the half rounds the way it is stored.
pub fn round_to(val: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = val * factor;
    let lower = scaled.floor();
    if scaled - lower != 0.5 {
        return scaled.round() / factor;
    }

    // the product itself may have been rounded onto the half
    let residual = val.mul_add(factor, -scaled);
    let rounded = if residual > 0.0 {
        lower + 1.0
    } else if residual < 0.0 || lower % 2.0 == 0.0 {
        lower
    } else {
        lower + 1.0
    };
    rounded / factor
}

#[inline]
pub fn round2(val: f64) -> f64 {
    round_to(val, 2)
}
