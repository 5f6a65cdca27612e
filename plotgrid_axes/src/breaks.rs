// Copyright 2026 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis breaks: excluded sub-ranges that render visually squeezed.
//!
//! A break `[s, e]` with `break_size` `b` keeps a fraction `b` of its width
//! visible: values inside compress linearly by `b`, values above shift left
//! by the removed width `(e - s) * (1 - b)`, values below are untouched. The
//! list is kept sorted and non-overlapping so every conversion can walk it
//! front to back.

use smallvec::SmallVec;

/// A user-declared or auto-generated excluded sub-range of an axis domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBreak {
    /// Raw lower bound as declared (domain units: values, epoch ms, indices).
    pub start_value: f64,
    /// Raw upper bound as declared.
    pub end_value: f64,
    /// Lower bound after overlap resolution; `<= adjusted_end_value`.
    pub adjusted_start_value: f64,
    /// Upper bound after overlap resolution.
    pub adjusted_end_value: f64,
    /// Fraction of the break width that stays visible, in `[0, 1]`.
    /// `0.0` collapses the range to a point, `1.0` disables compression.
    pub break_size: f64,
}

impl AxisBreak {
    /// Width removed from the visible span, before clamping to an axis range.
    fn removed_width(&self) -> f64 {
        (self.adjusted_end_value - self.adjusted_start_value) * (1.0 - self.break_size)
    }

    /// Visible (compressed) width of this break.
    pub fn compressed_width(&self) -> f64 {
        (self.adjusted_end_value - self.adjusted_start_value) - self.removed_width()
    }
}

/// The per-axis break set, kept sorted and non-overlapping.
#[derive(Clone, Debug, Default)]
pub struct BreakList {
    breaks: SmallVec<[AxisBreak; 4]>,
}

impl BreakList {
    /// Creates an empty break list.
    pub fn new() -> Self {
        Self {
            breaks: SmallVec::new(),
        }
    }

    /// Returns `true` when no breaks are declared.
    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty()
    }

    /// Number of declared breaks.
    pub fn len(&self) -> usize {
        self.breaks.len()
    }

    /// Iterates breaks in adjusted-start order.
    pub fn iter(&self) -> impl Iterator<Item = &AxisBreak> {
        self.breaks.iter()
    }

    /// Removes all breaks.
    pub fn clear(&mut self) {
        self.breaks.clear();
    }

    /// Inserts a break. Reversed bounds are swapped, `break_size` is clamped
    /// to `[0, 1]`, and the whole list is re-sorted and re-adjusted.
    pub fn add_break(&mut self, start_value: f64, end_value: f64, break_size: f64) {
        let (start_value, end_value) = if start_value <= end_value {
            (start_value, end_value)
        } else {
            (end_value, start_value)
        };
        self.breaks.push(AxisBreak {
            start_value,
            end_value,
            adjusted_start_value: start_value,
            adjusted_end_value: end_value,
            break_size: break_size.clamp(0.0, 1.0),
        });
        self.fix_breaks();
    }

    /// Re-establishes the sorted non-overlap invariant.
    ///
    /// Adjusted bounds are reset from the raw pair, the list is stable-sorted
    /// by start (ties keep insertion order), and any break starting before
    /// the previous break's adjusted end is clamped forward to begin exactly
    /// there. A break fully covered by its predecessor degenerates to zero
    /// width rather than being dropped.
    pub fn fix_breaks(&mut self) {
        for b in &mut self.breaks {
            let (s, e) = if b.start_value <= b.end_value {
                (b.start_value, b.end_value)
            } else {
                (b.end_value, b.start_value)
            };
            b.adjusted_start_value = s;
            b.adjusted_end_value = e;
        }
        self.breaks.sort_by(|a, b| {
            a.adjusted_start_value
                .partial_cmp(&b.adjusted_start_value)
                .unwrap_or(core::cmp::Ordering::Equal)
        });
        let mut prev_end = f64::NEG_INFINITY;
        for b in &mut self.breaks {
            if b.adjusted_start_value < prev_end {
                b.adjusted_start_value = prev_end;
                if b.adjusted_end_value < prev_end {
                    b.adjusted_end_value = prev_end;
                }
            }
            prev_end = b.adjusted_end_value;
        }
    }

    /// The effective span of `[min, max]` with break widths compressed out.
    ///
    /// Callers feed this to the scale engine so nice steps are sized for the
    /// visually-displayed span, not the raw one.
    pub fn adjust_difference(&self, min: f64, max: f64) -> f64 {
        let mut difference = max - min;
        for b in &self.breaks {
            let s = b.adjusted_start_value.max(min);
            let e = b.adjusted_end_value.min(max);
            if e > s {
                difference -= (e - s) * (1.0 - b.break_size);
            }
        }
        difference
    }

    /// Maps a domain value into a relative position in `[0, 1]` over
    /// `[min, max]`, compressing break ranges.
    pub fn value_to_position(&self, value: f64, min: f64, max: f64) -> f64 {
        let difference = self.adjust_difference(min, max);
        if difference <= 0.0 {
            return 0.0;
        }
        let mut v = value;
        for b in &self.breaks {
            let s = b.adjusted_start_value.max(min);
            let e = b.adjusted_end_value.min(max);
            if e <= s {
                continue;
            }
            if value >= e {
                v -= (e - s) * (1.0 - b.break_size);
            } else if value > s {
                v -= (value - s) * (1.0 - b.break_size);
            }
        }
        (v - min) / difference
    }

    /// Inverse of [`BreakList::value_to_position`].
    pub fn position_to_value(&self, position: f64, min: f64, max: f64) -> f64 {
        let difference = self.adjust_difference(min, max);
        if difference <= 0.0 {
            return min;
        }
        // Walk breaks in compressed space, restoring the removed widths.
        let compressed = min + position * difference;
        let mut removed = 0.0;
        for b in &self.breaks {
            let s = b.adjusted_start_value.max(min);
            let e = b.adjusted_end_value.min(max);
            if e <= s {
                continue;
            }
            let compressed_start = s - removed;
            let compressed_width = (e - s) * b.break_size;
            if compressed <= compressed_start {
                break;
            }
            if compressed <= compressed_start + compressed_width {
                if b.break_size == 0.0 {
                    return s;
                }
                return s + (compressed - compressed_start) / b.break_size;
            }
            removed += (e - s) * (1.0 - b.break_size);
        }
        compressed + removed
    }

    /// Returns the break covering `value`, both adjusted bounds inclusive.
    pub fn covering_break(&self, value: f64) -> Option<&AxisBreak> {
        self.breaks
            .iter()
            .find(|b| value >= b.adjusted_start_value && value <= b.adjusted_end_value)
    }

    /// Total width removed over `[min, max]`.
    pub fn removed_width(&self, min: f64, max: f64) -> f64 {
        (max - min) - self.adjust_difference(min, max)
    }
}
