// Copyright 2026 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The renderer contract between the axis engine and a host chart.
//!
//! The engine computes relative positions in `[0, 1]`; a renderer turns them
//! into pixels for one concrete orientation (linear, circular, radial). The
//! engine never does pixel math beyond asking for the axis length.

use kurbo::Point;

use crate::item::AxisDataItem;

/// The pure interface the axis engine calls to materialize visuals.
///
/// `start`/`end` arguments are the two relative-position boundaries of the
/// cell an element belongs to. Implementations own all remaining pixel math;
/// the default element hooks are no-ops so a renderer only overrides what it
/// draws.
pub trait AxisItemRenderer {
    /// Converts a relative position into a pixel point.
    fn position_to_point(&self, position: f64) -> Point;

    /// Axis length in pixels, used to derive the target grid count.
    fn axis_length(&self) -> f64;

    /// Called with each active item's grid-line cell boundaries.
    fn update_grid_element(&mut self, item: &AxisDataItem, start: f64, end: f64) {
        let _ = (item, start, end);
    }

    /// Called with each active item's tick cell boundaries.
    fn update_tick_element(&mut self, item: &AxisDataItem, start: f64, end: f64) {
        let _ = (item, start, end);
    }

    /// Called with each active item's label cell boundaries.
    fn update_label_element(&mut self, item: &AxisDataItem, start: f64, end: f64) {
        let _ = (item, start, end);
    }

    /// Called with each active item's fill cell boundaries.
    fn update_fill_element(&mut self, item: &AxisDataItem, start: f64, end: f64) {
        let _ = (item, start, end);
    }
}

/// A horizontal pixel-span renderer.
///
/// Maps relative positions onto a straight segment from `origin` extending
/// `length` pixels along the x axis, and records how many elements of each
/// kind the engine asked for. Suitable for tests and headless layout passes.
#[derive(Clone, Debug)]
pub struct LinearRenderer {
    origin: Point,
    length: f64,
    /// Grid-line updates received this pass.
    pub grid_updates: usize,
    /// Tick updates received this pass.
    pub tick_updates: usize,
    /// Label updates received this pass.
    pub label_updates: usize,
    /// Fill updates received this pass.
    pub fill_updates: usize,
}

impl LinearRenderer {
    /// Creates a renderer covering `length` pixels from `origin`.
    pub fn new(origin: Point, length: f64) -> Self {
        Self {
            origin,
            length,
            grid_updates: 0,
            tick_updates: 0,
            label_updates: 0,
            fill_updates: 0,
        }
    }

    /// Resets the per-pass update counters.
    pub fn begin_pass(&mut self) {
        self.grid_updates = 0;
        self.tick_updates = 0;
        self.label_updates = 0;
        self.fill_updates = 0;
    }
}

impl AxisItemRenderer for LinearRenderer {
    fn position_to_point(&self, position: f64) -> Point {
        Point::new(self.origin.x + position * self.length, self.origin.y)
    }

    fn axis_length(&self) -> f64 {
        self.length
    }

    fn update_grid_element(&mut self, _item: &AxisDataItem, _start: f64, _end: f64) {
        self.grid_updates += 1;
    }

    fn update_tick_element(&mut self, _item: &AxisDataItem, _start: f64, _end: f64) {
        self.tick_updates += 1;
    }

    fn update_label_element(&mut self, _item: &AxisDataItem, _start: f64, _end: f64) {
        self.label_updates += 1;
    }

    fn update_fill_element(&mut self, _item: &AxisDataItem, _start: f64, _end: f64) {
        self.fill_updates += 1;
    }
}
