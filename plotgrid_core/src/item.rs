// Copyright 2026 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis data items and the reusable item arena.
//!
//! An axis materializes one [`AxisDataItem`] per visible grid position. Items
//! are slots in a [`DataItemArena`]: a validation pass first recycles every
//! slot, then re-activates the slots it needs. Recycled slots keep their
//! allocation and are reused on the next pass; nothing is destroyed until the
//! axis itself is dropped.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// The authoritative domain value behind an axis data item.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemPayload {
    /// No value assigned yet (freshly created or recycled slot).
    Empty,
    /// A numeric value (value axes).
    Value(f64),
    /// A timestamp in milliseconds since the Unix epoch (date axes).
    Date(f64),
    /// A category name and its stable index (category axes).
    Category(String, usize),
}

/// Whether an arena slot is currently part of the visible axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemState {
    /// The slot backs a visible grid position this validation pass.
    Active,
    /// The slot is parked for reuse; renderers must skip it.
    Recycled,
}

/// One visual marker on an axis: a grid line + tick + label + fill cell.
///
/// `position` is derived from the payload by the owning axis and is not
/// authoritative. Renderers only read items; the axis owns them.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisDataItem {
    /// Slot state; see [`ItemState`].
    pub state: ItemState,
    /// Sequence order within the current validation pass.
    pub item_index: usize,
    /// Relative position in `[0, 1]` along the visible axis length.
    pub position: f64,
    /// Relative position of the far edge of this item's cell (the next grid
    /// position, or the range end for `is_range` items).
    pub end_position: f64,
    /// The domain value this item marks.
    pub payload: ItemPayload,
    /// `true` for user-declared highlighted ranges, `false` for grid items.
    pub is_range: bool,
    /// Optional lower visibility clamp override.
    pub min_position: Option<f64>,
    /// Optional upper visibility clamp override.
    pub max_position: Option<f64>,
}

impl AxisDataItem {
    fn recycled(item_index: usize) -> Self {
        Self {
            state: ItemState::Recycled,
            item_index,
            position: 0.0,
            end_position: 0.0,
            payload: ItemPayload::Empty,
            is_range: false,
            min_position: None,
            max_position: None,
        }
    }

    /// Returns the item position clamped to its visibility overrides.
    pub fn clamped_position(&self) -> f64 {
        let lo = self.min_position.unwrap_or(0.0);
        let hi = self.max_position.unwrap_or(1.0);
        self.position.clamp(lo, hi)
    }
}

/// A pool of reusable [`AxisDataItem`] slots indexed by position in the
/// visible window.
#[derive(Clone, Debug, Default)]
pub struct DataItemArena {
    slots: Vec<AxisDataItem>,
}

impl DataItemArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Parks every slot for reuse. Call at the start of a validation pass.
    pub fn begin_pass(&mut self) {
        for slot in &mut self.slots {
            slot.state = ItemState::Recycled;
        }
    }

    /// Activates the slot at `index`, growing the arena if needed.
    ///
    /// The returned slot has `state == Active` and `item_index == index`; its
    /// payload and position are whatever the caller writes next.
    pub fn activate(&mut self, index: usize) -> &mut AxisDataItem {
        while self.slots.len() <= index {
            let next = self.slots.len();
            self.slots.push(AxisDataItem::recycled(next));
        }
        let slot = &mut self.slots[index];
        slot.state = ItemState::Active;
        slot.item_index = index;
        slot
    }

    /// Returns the slot at `index`, if the arena has grown that far.
    pub fn get(&self, index: usize) -> Option<&AxisDataItem> {
        self.slots.get(index)
    }

    /// Iterates over all slots, recycled ones included.
    pub fn slots(&self) -> impl Iterator<Item = &AxisDataItem> {
        self.slots.iter()
    }

    /// Iterates over the slots that are active this pass.
    pub fn active(&self) -> impl Iterator<Item = &AxisDataItem> {
        self.slots.iter().filter(|s| s.state == ItemState::Active)
    }

    /// Returns the number of active slots.
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Returns the total number of slots ever allocated.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn activate_grows_and_marks_active() {
        let mut arena = DataItemArena::new();
        arena.activate(3).position = 0.5;

        assert_eq!(arena.capacity(), 4);
        assert_eq!(arena.active_count(), 1);
        assert_eq!(arena.get(3).unwrap().state, ItemState::Active);
        assert_eq!(arena.get(0).unwrap().state, ItemState::Recycled);
    }

    #[test]
    fn begin_pass_recycles_without_shrinking() {
        let mut arena = DataItemArena::new();
        for i in 0..5 {
            arena.activate(i);
        }
        arena.begin_pass();

        assert_eq!(arena.capacity(), 5);
        assert_eq!(arena.active_count(), 0);

        // Reactivation reuses the same slot.
        arena.activate(2).payload = ItemPayload::Value(7.0);
        assert_eq!(arena.capacity(), 5);
        assert_eq!(arena.active_count(), 1);
    }

    #[test]
    fn clamped_position_honors_overrides() {
        let mut arena = DataItemArena::new();
        let item = arena.activate(0);
        item.position = 1.2;
        item.max_position = Some(1.0);
        assert_eq!(arena.get(0).unwrap().clamped_position(), 1.0);
    }
}
