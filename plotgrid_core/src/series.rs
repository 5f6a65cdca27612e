// Copyright 2026 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series data access.
//!
//! An axis never owns chart data; it reads extremes and gaps through this
//! trait during its validation pass. Hosts adapt their own storage; the slice
//! adapters here cover tests and demos.

/// Row-wise access to one series' values along an axis.
///
/// `value` returns numbers for value axes and epoch-millisecond timestamps
/// for date axes. `category` returns the row's category name for category
/// axes; the default returns `None` for purely numeric series.
pub trait SeriesData {
    /// Number of rows in the series.
    fn len(&self) -> usize;

    /// Returns `true` if the series has no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric value (or timestamp) at `row`, if present.
    fn value(&self, row: usize) -> Option<f64>;

    /// Category name at `row`, if present.
    fn category(&self, row: usize) -> Option<&str> {
        let _ = row;
        None
    }
}

/// A [`SeriesData`] view over a numeric slice.
#[derive(Clone, Copy, Debug)]
pub struct SliceSeries<'a> {
    values: &'a [f64],
}

impl<'a> SliceSeries<'a> {
    /// Wraps a slice of values (or epoch-millisecond timestamps).
    pub fn new(values: &'a [f64]) -> Self {
        Self { values }
    }
}

impl SeriesData for SliceSeries<'_> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn value(&self, row: usize) -> Option<f64> {
        self.values.get(row).copied()
    }
}

/// A [`SeriesData`] view over a slice of category names.
#[derive(Clone, Copy, Debug)]
pub struct CategorySlice<'a> {
    names: &'a [&'a str],
}

impl<'a> CategorySlice<'a> {
    /// Wraps a slice of category names in axis order.
    pub fn new(names: &'a [&'a str]) -> Self {
        Self { names }
    }
}

impl SeriesData for CategorySlice<'_> {
    fn len(&self) -> usize {
        self.names.len()
    }

    fn value(&self, _row: usize) -> Option<f64> {
        None
    }

    fn category(&self, row: usize) -> Option<&str> {
        self.names.get(row).copied()
    }
}

/// Infers `(min, max)` over a series' finite values.
///
/// Non-finite and missing values are ignored. Returns `None` if no finite
/// values are present.
pub fn series_extremes(series: &dyn SeriesData) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for row in 0..series.len() {
        let Some(v) = series.value(row) else {
            continue;
        };
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// Returns the smallest positive gap between consecutive finite values.
///
/// Rows with missing or non-finite values are skipped without breaking the
/// walk. Returns `None` when fewer than two usable values exist.
pub fn min_series_gap(series: &dyn SeriesData) -> Option<f64> {
    let mut prev: Option<f64> = None;
    let mut min_gap = f64::INFINITY;
    for row in 0..series.len() {
        let Some(v) = series.value(row) else {
            continue;
        };
        if !v.is_finite() {
            continue;
        }
        if let Some(p) = prev {
            let gap = (v - p).abs();
            if gap > 0.0 {
                min_gap = min_gap.min(gap);
            }
        }
        prev = Some(v);
    }
    min_gap.is_finite().then_some(min_gap)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn extremes_skip_non_finite() {
        let values = [3.0, f64::NAN, -1.0, f64::INFINITY, 7.0];
        let s = SliceSeries::new(&values);
        assert_eq!(series_extremes(&s), Some((-1.0, 7.0)));
    }

    #[test]
    fn extremes_of_empty_series_are_none() {
        let s = SliceSeries::new(&[]);
        assert_eq!(series_extremes(&s), None);
        let nan = [f64::NAN];
        assert_eq!(series_extremes(&SliceSeries::new(&nan)), None);
    }

    #[test]
    fn min_gap_skips_malformed_rows() {
        let values = [0.0, 100.0, f64::NAN, 250.0, 260.0];
        let s = SliceSeries::new(&values);
        // NaN row is skipped; gaps considered: 100, 150, 10.
        assert_eq!(min_series_gap(&s), Some(10.0));
    }

    #[test]
    fn min_gap_needs_two_values() {
        let one = [5.0];
        assert_eq!(min_series_gap(&SliceSeries::new(&one)), None);
    }

    #[test]
    fn category_slice_returns_names() {
        let names = ["a", "b"];
        let s = CategorySlice::new(&names);
        assert_eq!(s.category(1), Some("b"));
        assert_eq!(s.category(2), None);
        assert_eq!(s.value(0), None);
    }
}
