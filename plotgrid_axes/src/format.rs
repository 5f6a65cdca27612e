// Copyright 2026 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default label formatting.
//!
//! The axis engine only ever hands a formatter the domain value and enough
//! context to pick a precision (the numeric step, or the grid time unit).
//! Hosts plug in their own [`LabelFormatter`] for locale-aware output; the
//! defaults here are deliberately plain.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::time::{TimeUnit, calendar_fields};

/// Turns domain values into display text.
///
/// `step`/`unit` carry the grid spacing so every label on an axis shows the
/// same precision.
pub trait LabelFormatter {
    /// Formats a numeric value given the grid step.
    fn format_value(&self, value: f64, step: f64) -> String;

    /// Formats an epoch-millisecond timestamp given the grid time unit.
    fn format_date(&self, timestamp_ms: f64, unit: TimeUnit) -> String;
}

/// The built-in formatter: step-precision decimals, terse calendar text.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFormatter;

impl LabelFormatter for DefaultFormatter {
    fn format_value(&self, value: f64, step: f64) -> String {
        format_value_with_step(value, step)
    }

    fn format_date(&self, timestamp_ms: f64, unit: TimeUnit) -> String {
        format_date_for_unit(timestamp_ms, unit)
    }
}

/// Number of decimals needed to print `step` exactly (capped at 10).
fn step_decimals(step: f64) -> usize {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    let mut scaled = step;
    let mut decimals = 0;
    while decimals < 10 && (scaled - scaled.round()).abs() > 1.0e-6 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

/// Formats `value` with exactly the decimals its grid step needs.
///
/// A step of 0.25 prints `0.25`, `0.50`, `0.75` — never `0.5000000000000001`.
pub fn format_value_with_step(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return alloc::format!("{value}");
    }
    let decimals = step_decimals(step);
    alloc::format!("{value:.decimals$}")
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Formats a timestamp at the precision of the grid time unit.
///
/// Hours and minutes print as `HH:MM`, days as `Aug 6`, months as
/// `Aug 2026`, years as `2026`.
pub fn format_date_for_unit(timestamp_ms: f64, unit: TimeUnit) -> String {
    let Some((year, month, day, hour, minute, second)) = calendar_fields(timestamp_ms) else {
        return alloc::format!("{timestamp_ms}");
    };
    let month_name = MONTHS[(month as usize - 1).min(11)];
    match unit {
        TimeUnit::Millisecond => {
            let millis = {
                let rounded = timestamp_ms.round();
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "calendar_fields already range-checked the timestamp"
                )]
                {
                    (rounded as i64).rem_euclid(1000)
                }
            };
            alloc::format!("{hour:02}:{minute:02}:{second:02}.{millis:03}")
        }
        TimeUnit::Second => alloc::format!("{hour:02}:{minute:02}:{second:02}"),
        TimeUnit::Minute | TimeUnit::Hour => alloc::format!("{hour:02}:{minute:02}"),
        TimeUnit::Day | TimeUnit::Week => alloc::format!("{month_name} {day}"),
        TimeUnit::Month => alloc::format!("{month_name} {year}"),
        TimeUnit::Year => alloc::format!("{year}"),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::time::epoch_ms;

    #[test]
    fn value_precision_follows_step() {
        assert_eq!(format_value_with_step(5.0, 1.0), "5");
        assert_eq!(format_value_with_step(0.5, 0.25), "0.50");
        assert_eq!(format_value_with_step(1.2, 0.2), "1.2");
        assert_eq!(format_value_with_step(-3.0, 0.5), "-3.0");
        assert_eq!(format_value_with_step(1000.0, 500.0), "1000");
    }

    #[test]
    fn date_text_matches_unit_granularity() {
        let ms = epoch_ms(2026, 8, 6, 14, 5, 9).unwrap();
        assert_eq!(format_date_for_unit(ms, TimeUnit::Hour), "14:05");
        assert_eq!(format_date_for_unit(ms, TimeUnit::Second), "14:05:09");
        assert_eq!(format_date_for_unit(ms + 42.0, TimeUnit::Millisecond), "14:05:09.042");
        assert_eq!(format_date_for_unit(ms, TimeUnit::Day), "Aug 6");
        assert_eq!(format_date_for_unit(ms, TimeUnit::Month), "Aug 2026");
        assert_eq!(format_date_for_unit(ms, TimeUnit::Year), "2026");
    }

    #[test]
    fn malformed_inputs_fall_back_to_raw_text() {
        assert_eq!(format_value_with_step(f64::NAN, 1.0), "NaN");
        assert_eq!(format_date_for_unit(f64::NAN, TimeUnit::Day), "NaN");
    }
}
