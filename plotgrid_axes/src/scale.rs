// Copyright 2026 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric scale engine.
//!
//! [`adjust_min_max`] turns a raw value range and a target grid-line count
//! into a "nice" `min`/`max`/`step`: the step's leading digit is always 1, 2,
//! or 5 times a power of ten, and the bounds are exact multiples of the step,
//! so axis labels never show ugly fractions unless the data forces it.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A fatal scale-computation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A logarithmic axis saw a value at or below zero.
    NonPositiveLogValue,
}

impl core::fmt::Display for DomainError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NonPositiveLogValue => f.write_str("logarithmic axis requires values > 0"),
        }
    }
}

impl core::error::Error for DomainError {}

/// The output of [`adjust_min_max`]: nice bounds and a nice step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxStep {
    /// Rounded lower bound (a whole multiple of `step` in non-strict mode).
    pub min: f64,
    /// Rounded upper bound (a whole multiple of `step` in non-strict mode).
    pub max: f64,
    /// Grid spacing; leading significant digit is 1, 2, or 5.
    pub step: f64,
}

/// Returns `10^exponent` for fractional exponents, clamped to the f64 range.
pub(crate) fn pow10(exponent: f64) -> f64 {
    let e = exponent.clamp(-300.0, 300.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "clamped to the f64 decimal exponent range"
    )]
    {
        10_f64.powi(e as i32)
    }
}

/// Rounds `value` to `decimals` decimal places.
pub(crate) fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let p = pow10(f64::from(decimals));
    (value * p).round() / p
}

fn ceil_to_decimals(value: f64, decimals: i32) -> f64 {
    let p = pow10(f64::from(decimals));
    (value * p).ceil() / p
}

/// Expands a flat `min == max` range into a usable span.
pub(crate) fn expand_flat_range(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        (min - 0.9, max + 0.9)
    } else {
        (min, max)
    }
}

/// Computes nice `min`/`max`/`step` for a raw range.
///
/// `difference` is the effective span used for step sizing; callers pass the
/// break-adjusted span so the step reflects the visually-displayed range, not
/// the raw one. `strict` keeps the bounds where the caller put them instead
/// of padding and snapping them to the step. `max_precision` caps the number
/// of decimals the step may carry.
///
/// Hosts run this twice per validation: once with the raw extremes, then
/// again with the rounded bounds and their updated difference. The second
/// pass is authoritative; skipping it produces visibly coarser grid spacing
/// when the first pass moves the bounds across a power-of-ten boundary.
pub fn adjust_min_max(
    min: f64,
    max: f64,
    difference: f64,
    grid_count: usize,
    strict: bool,
    max_precision: Option<i32>,
) -> MinMaxStep {
    let grid_count = grid_count.max(1) as f64;
    let initial_min = min;
    let initial_max = max;
    let (mut min, mut max) = (min, max);

    let mut difference = difference.abs();
    if difference == 0.0 {
        difference = max.abs();
    }
    if difference == 0.0 || !difference.is_finite() {
        difference = 0.9;
    }

    // One order of magnitude below the natural scale of the difference.
    let power = pow10(difference.log10().floor()) / 10.0;

    if strict {
        min = (min / power).floor() * power;
        max = (max / power).ceil() * power;
    } else {
        min = (min / power).floor() * power - power;
        max = (max / power).ceil() * power + power;
    }

    // Rounding must not drag the axis across zero when the data never does.
    if min < 0.0 && initial_min >= 0.0 {
        min = 0.0;
    }
    if max > 0.0 && initial_max <= 0.0 {
        max = 0.0;
    }

    // Snap the step's leading digit up to the nearest of 1, 2, 5, 10.
    let mut step = ((difference / grid_count) / power).ceil() * power;
    let step_power = pow10(step.abs().log10().floor());
    let step_divided = step / step_power;
    step = if step_divided > 5.0 {
        10.0 * step_power
    } else if step_divided > 2.0 {
        5.0 * step_power
    } else if step_divided > 1.0 {
        2.0 * step_power
    } else {
        step_power
    };

    if let Some(precision) = max_precision {
        let limit = pow10(f64::from(-precision));
        step = ceil_to_decimals(step, precision).max(limit);
    }

    // Drop float noise beyond the decimals the step's own scale implies.
    let step_exponent = step.abs().log10().floor();
    if step_exponent < 0.0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "step exponents are tiny integers"
        )]
        let decimals = (-step_exponent) as i32 + 1;
        step = round_to_decimals(step, decimals);
    }

    if !strict {
        min = step * (min / step).floor();
        max = step * (max / step).ceil();
        if min < 0.0 && initial_min >= 0.0 {
            min = 0.0;
        }
        if max > 0.0 && initial_max <= 0.0 {
            max = 0.0;
        }
        // Rounding can collapse both bounds onto the same multiple; a
        // zero-width axis is never usable, so push the upper bound out one
        // step.
        if min == max {
            max += step;
        }
    }

    MinMaxStep { min, max, step }
}

/// Rounds a positive range outward to its enclosing powers of ten.
///
/// Fails before any scale state is produced if either extreme is at or below
/// zero; a logarithmic axis over non-positive data has no honest rendering.
pub fn log_min_max(min: f64, max: f64) -> Result<(f64, f64), DomainError> {
    if min <= 0.0 || max <= 0.0 {
        return Err(DomainError::NonPositiveLogValue);
    }
    let lo = pow10(min.log10().floor());
    let mut hi = pow10(max.log10().ceil());
    if hi <= lo {
        hi = lo * 10.0;
    }
    Ok((lo, hi))
}

/// Maps a value into `[0, 1]` on a logarithmic scale over `[min, max]`.
pub fn log_value_to_position(value: f64, min: f64, max: f64) -> f64 {
    let denom = max.ln() - min.ln();
    if denom == 0.0 || value <= 0.0 {
        return 0.0;
    }
    (value.ln() - min.ln()) / denom
}

/// Inverse of [`log_value_to_position`].
pub fn log_position_to_value(position: f64, min: f64, max: f64) -> f64 {
    if min <= 0.0 || max <= 0.0 {
        return min;
    }
    min * (max / min).powf(position)
}
