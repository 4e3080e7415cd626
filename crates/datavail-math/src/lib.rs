//! Deterministic numeric helpers for availability figures.

#![forbid(unsafe_code)]

/// Round a floating point value to `decimals` decimal places.
#[must_use]
pub fn round_f64(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Return `numer / denom`, or 0 when the denominator is zero.
#[must_use]
pub fn safe_ratio(numer: u64, denom: u64) -> f64 {
    if denom == 0 {
        0.0
    } else {
        numer as f64 / denom as f64
    }
}

/// Fraction of `denominator` records in which an item was observed.
///
/// An absent or zero denominator yields 0.
#[must_use]
pub fn availability_ratio(frequency: u64, denominator: Option<u64>) -> f64 {
    denominator.map_or(0.0, |d| safe_ratio(frequency, d))
}

/// Clamp a ratio into `[0, 1]`. NaN becomes 0.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Mean of `count` values summing to `sum`; an empty population averages to 0.
#[must_use]
pub fn guarded_mean(sum: f64, count: u64) -> f64 {
    sum / count.max(1) as f64
}

/// Ratio expressed as a percentage with `decimals` places.
#[must_use]
pub fn percent(ratio: f64, decimals: u32) -> f64 {
    round_f64(ratio * 100.0, decimals)
}
