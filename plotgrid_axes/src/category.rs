// Copyright 2026 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category indexing and cell position math.
//!
//! A category axis maps discrete labels to stable integer indices; every
//! position conversion then runs over the integer-index domain exactly like a
//! value axis runs over numbers, breaks included. Label thinning is a simple
//! stride (`frequency`): only every n-th index materializes a visible label,
//! which is what keeps labels readable as users zoom out.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::breaks::BreakList;

/// A bijective mapping between category names and stable integer indices.
///
/// Indices are assigned in first-seen order and never change while the axis
/// lives; re-inserting a known name returns its existing index.
#[derive(Clone, Debug, Default)]
pub struct CategoryIndexer {
    names: Vec<String>,
    index_of: HashMap<String, usize>,
}

impl CategoryIndexer {
    /// Creates an empty indexer.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            index_of: HashMap::new(),
        }
    }

    /// Number of known categories.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when no categories are known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Forgets all categories.
    pub fn clear(&mut self) {
        self.names.clear();
        self.index_of.clear();
    }

    /// Registers `name`, returning its stable index (existing or new).
    pub fn insert(&mut self, name: &str) -> usize {
        if let Some(&index) = self.index_of.get(name) {
            return index;
        }
        let index = self.names.len();
        self.names.push(String::from(name));
        self.index_of.insert(String::from(name), index);
        index
    }

    /// Looks up the index for `name`. Unknown names are an absence, not
    /// index 0.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index_of.get(name).copied()
    }

    /// Looks up the name at `index`.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Iterates names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Where within a category cell items may sit.
///
/// Shrinking the usable cell (e.g. `0.1..0.9`) leaves gaps between clustered
/// columns without touching the grid geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellLocations {
    /// Start of the usable cell, in cell units from the cell's left edge.
    pub cell_start_location: f64,
    /// End of the usable cell, in cell units.
    pub cell_end_location: f64,
}

impl Default for CellLocations {
    fn default() -> Self {
        Self {
            cell_start_location: 0.0,
            cell_end_location: 1.0,
        }
    }
}

/// Converts a category index to a relative position in `[0, 1]`.
///
/// `location` selects the point within the usable cell: 0 = start, 0.5 =
/// middle, 1 = end. The visible window is `start_index..end_index` (cells);
/// break compensation runs over the integer-index domain.
pub fn index_to_position(
    index: usize,
    location: f64,
    cells: CellLocations,
    start_index: usize,
    end_index: usize,
    breaks: &BreakList,
) -> f64 {
    if end_index <= start_index {
        return 0.0;
    }
    let usable = cells.cell_end_location - cells.cell_start_location;
    let point = index as f64 + cells.cell_start_location + location * usable;
    breaks.value_to_position(point, start_index as f64, end_index as f64)
}

/// Converts a relative position back to the category index whose cell covers
/// it. Positions outside the window clamp to the first/last visible cell.
pub fn position_to_index(
    position: f64,
    start_index: usize,
    end_index: usize,
    breaks: &BreakList,
) -> Option<usize> {
    if end_index <= start_index {
        return None;
    }
    let value = breaks.position_to_value(position, start_index as f64, end_index as f64);
    let clamped = value
        .floor()
        .clamp(start_index as f64, (end_index - 1) as f64);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to a valid index range"
    )]
    Some(clamped as usize)
}

/// Computes the label-thinning stride for a visible index window.
///
/// Only indices where `index % frequency == 0` show labels/ticks; the stride
/// is sized so displayed labels respect `min_grid_distance` pixels.
pub fn frequency(visible_count: usize, axis_length: f64, min_grid_distance: f64) -> usize {
    if visible_count == 0 {
        return 1;
    }
    if !(axis_length > 0.0) || !(min_grid_distance > 0.0) {
        return 1;
    }
    let max_labels = axis_length / min_grid_distance;
    let stride = (visible_count as f64 / max_labels).ceil();
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "stride is a small positive count"
    )]
    {
        (stride as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn indices_are_stable_and_bijective() {
        let mut idx = CategoryIndexer::new();
        assert_eq!(idx.insert("apples"), 0);
        assert_eq!(idx.insert("pears"), 1);
        assert_eq!(idx.insert("apples"), 0);
        assert_eq!(idx.len(), 2);

        assert_eq!(idx.index_of("pears"), Some(1));
        assert_eq!(idx.name_of(1), Some("pears"));
        assert_eq!(idx.index_of("plums"), None);
        assert_eq!(idx.name_of(5), None);
    }

    #[test]
    fn cell_locations_place_points_within_cells() {
        let breaks = BreakList::new();
        let cells = CellLocations::default();
        // Four visible cells: index 1's middle sits at 1.5 / 4.
        let p = index_to_position(1, 0.5, cells, 0, 4, &breaks);
        assert!((p - 1.5 / 4.0).abs() < 1e-12);

        // Shrunken cells move the start point inward.
        let shrunk = CellLocations {
            cell_start_location: 0.1,
            cell_end_location: 0.9,
        };
        let start = index_to_position(1, 0.0, shrunk, 0, 4, &breaks);
        assert!((start - 1.1 / 4.0).abs() < 1e-12);
        let end = index_to_position(1, 1.0, shrunk, 0, 4, &breaks);
        assert!((end - 1.9 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn positions_round_trip_to_indices() {
        let breaks = BreakList::new();
        let cells = CellLocations::default();
        for index in [0_usize, 3, 7, 9] {
            let p = index_to_position(index, 0.5, cells, 0, 10, &breaks);
            assert_eq!(position_to_index(p, 0, 10, &breaks), Some(index));
        }
        // Clamping at the edges.
        assert_eq!(position_to_index(-0.2, 0, 10, &breaks), Some(0));
        assert_eq!(position_to_index(1.2, 0, 10, &breaks), Some(9));
        // Empty window has no indices.
        assert_eq!(position_to_index(0.5, 3, 3, &breaks), None);
    }

    #[test]
    fn index_breaks_compress_cells() {
        let mut breaks = BreakList::new();
        // Collapse indices 10..90 of a 100-cell axis almost entirely.
        breaks.add_break(10.0, 90.0, 0.1);
        let cells = CellLocations::default();
        let before = index_to_position(5, 0.5, cells, 0, 100, &breaks);
        let inside = index_to_position(50, 0.5, cells, 0, 100, &breaks);
        let after = index_to_position(95, 0.5, cells, 0, 100, &breaks);
        assert!(before < inside && inside < after);
        // The 80 compressed cells occupy 8 effective units of 28 total.
        let span = index_to_position(90, 0.0, cells, 0, 100, &breaks)
            - index_to_position(10, 0.0, cells, 0, 100, &breaks);
        assert!((span - 8.0 / 28.0).abs() < 1e-9);
    }

    #[test]
    fn frequency_respects_min_grid_distance() {
        // 300 px axis, 50 px per label: at most 6 labels.
        let f = frequency(1000, 300.0, 50.0);
        assert_eq!(f, 167);
        let visible = 1000_usize.div_ceil(f);
        assert!(visible <= 6, "{visible} labels for stride {f}");

        // Few categories need no thinning.
        assert_eq!(frequency(4, 300.0, 50.0), 1);
        assert_eq!(frequency(0, 300.0, 50.0), 1);
    }
}
