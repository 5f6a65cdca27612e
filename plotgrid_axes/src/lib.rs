// Copyright 2026 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis scale engines for plotgrid.
//!
//! This crate turns raw data extremes into rendered axis geometry:
//! - **Scales** compute "nice" numeric steps ([`adjust_min_max`]) and
//!   calendar grid intervals ([`choose_interval`]).
//! - **Breaks** ([`BreakList`]) compress excluded sub-ranges in every
//!   conversion instead of hiding them.
//! - **Zoom** ([`ZoomWindow`]) narrows the visible window and re-derives the
//!   zoomed scale.
//! - **The [`Axis`] host** owns all of the above plus the item arena, and
//!   drives the `plotgrid_core` renderer contract.
//!
//! Everything is synchronous and single-threaded: recalculation happens in
//! one `validate` pass, conversions are pure reads in between, and a single
//! generation counter tells consumers when to drop caches.

#![no_std]

extern crate alloc;

mod axis;
mod breaks;
mod category;
#[cfg(not(feature = "std"))]
mod float;
mod format;
#[cfg(test)]
mod pipeline_tests;
mod scale;
mod time;
mod zoom;

pub use axis::{
    Axis, AxisConfig, CategoryScaleOptions, DateScaleOptions, ScaleState, ScaleStep,
    ScaleStrategy, ValueScaleOptions,
};
pub use breaks::{AxisBreak, BreakList};
pub use category::{
    CategoryIndexer, CellLocations, frequency, index_to_position, position_to_index,
};
pub use format::{DefaultFormatter, LabelFormatter, format_date_for_unit, format_value_with_step};
pub use scale::{
    DomainError, MinMaxStep, adjust_min_max, log_min_max, log_position_to_value,
    log_value_to_position,
};
pub use time::{
    GRID_INTERVALS, GridInterval, TimeUnit, add_interval, calendar_fields, choose_interval,
    detect_base_interval, epoch_ms, round_to_interval,
};
pub use zoom::{DEFAULT_MAX_ZOOM_FACTOR, ZoomWindow};
