// Copyright 2026 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core primitives for the plotgrid axis subsystem.
//!
//! This crate is the narrow waist between the axis engine and a host chart:
//! - **Series access** ([`SeriesData`]) is how an axis reads data extremes.
//! - **Data items** ([`AxisDataItem`]) are the markers an axis materializes
//!   (grid line + tick + label + fill cell), held in a reusable arena.
//! - **The renderer contract** ([`AxisItemRenderer`]) is the pure interface
//!   the engine calls with relative positions; all pixel math and drawing
//!   stay on the implementor's side.
//!
//! Scale math, breaks, zoom, and calendar logic live in `plotgrid_axes`.

#![no_std]

extern crate alloc;

mod item;
mod render;
mod series;

pub use item::{AxisDataItem, DataItemArena, ItemPayload, ItemState};
pub use render::{AxisItemRenderer, LinearRenderer};
pub use series::{CategorySlice, SeriesData, SliceSeries, min_series_gap, series_extremes};

/// Identifies an axis within a chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(pub u64);

/// Identifies a series registered against an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(pub u64);
