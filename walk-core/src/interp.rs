//! Scalar remapping helpers used for colors and camera animation.
//!
//! All functions take the input range first and the output range second.
//! A degenerate input range (`x_max == x_min`) is a caller error: the
//! result is then infinite or NaN and is not corrected here.

use std::f64::consts::LN_2;

/// Restricts `x` to `[lo, hi]`.
///
/// Callers must ensure `lo <= hi`; otherwise the result depends on which
/// comparison triggers first and carries no meaning.
#[inline]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Linearly maps `x` from `[x_min, x_max]` to `[y_min, y_max]`.
///
/// Values outside the input range extrapolate.
///
/// ### Parameters
/// - `x` - Value to remap.
/// - `x_min`, `x_max` - Input range; must not be equal.
/// - `y_min`, `y_max` - Output range.
#[inline]
pub fn linear_interp(x: f64, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> f64 {
    debug_assert!(x_max != x_min, "degenerate input range [{x_min}, {x_max}]");
    (x - x_min) * (y_max - y_min) / (x_max - x_min) + y_min
}

/// Maps `x` following a power law.
///
/// `x` is first normalized to `[0, 1]`, raised to `power`, then spread over
/// `[y_min, y_max]`. Inputs below `x_min` with a fractional `power` give NaN.
pub fn power_interp(x: f64, power: f64, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> f64 {
    let t = linear_interp(x, x_min, x_max, 0.0, 1.0);
    linear_interp(t.powf(power), 0.0, 1.0, y_min, y_max)
}

/// Maps `x` following a logarithmic law: `ln(t + 1)` over `[0, ln 2]`,
/// where `t` is `x` normalized to `[0, 1]`.
pub fn log_interp(x: f64, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> f64 {
    let t = linear_interp(x, x_min, x_max, 0.0, 1.0);
    linear_interp((t + 1.0).ln(), 0.0, LN_2, y_min, y_max)
}
