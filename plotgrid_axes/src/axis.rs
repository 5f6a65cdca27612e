// Copyright 2026 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The axis host.
//!
//! One [`Axis`] type serves every axis flavor; the flavor-specific min/max/
//! step logic is selected by a [`ScaleStrategy`] at construction, while
//! breaks, zoom, item materialization, and the conversion pipeline live here
//! once. All mutation funnels through [`Axis::validate`]; conversions are
//! pure reads of the last validated [`ScaleState`], and every effective state
//! change bumps a single generation counter that downstream caches key on.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chrono::Weekday;
use plotgrid_core::{
    AxisItemRenderer, DataItemArena, ItemPayload, SeriesData, min_series_gap, series_extremes,
};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::breaks::BreakList;
use crate::category::{self, CategoryIndexer, CellLocations};
use crate::format::LabelFormatter;
use crate::scale::{
    self, DomainError, adjust_min_max, expand_flat_range, log_position_to_value,
    log_value_to_position,
};
use crate::time::{self, GRID_INTERVALS, GridInterval};
use crate::zoom::ZoomWindow;

/// Bound on materialized grid items per validation pass.
const MAX_GRID_ITEMS: usize = 10_000;

/// Options for linear and logarithmic value axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScaleOptions {
    /// User-forced lower bound.
    pub min: Option<f64>,
    /// User-forced upper bound.
    pub max: Option<f64>,
    /// Keep the forced bounds verbatim instead of padding and snapping.
    pub strict_min_max: bool,
    /// Fraction of the raw span padded below the data minimum.
    pub extra_min: f64,
    /// Fraction of the raw span padded above the data maximum.
    pub extra_max: f64,
    /// Cap on the number of decimals the grid step may carry.
    pub max_precision: Option<i32>,
    /// The anchor value fills and columns grow from.
    pub base_value: f64,
}

impl Default for ValueScaleOptions {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            strict_min_max: false,
            extra_min: 0.0,
            extra_max: 0.0,
            max_precision: None,
            base_value: 0.0,
        }
    }
}

impl ValueScaleOptions {
    /// Forces both bounds and keeps them verbatim.
    pub fn with_strict_min_max(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self.strict_min_max = true;
        self
    }

    /// Sets fractional padding below/above the raw extremes.
    pub fn with_extra(mut self, extra_min: f64, extra_max: f64) -> Self {
        self.extra_min = extra_min.max(0.0);
        self.extra_max = extra_max.max(0.0);
        self
    }

    /// Caps step decimals.
    pub fn with_max_precision(mut self, decimals: i32) -> Self {
        self.max_precision = Some(decimals);
        self
    }
}

/// Options for date axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DateScaleOptions {
    /// Overrides the detected data granularity.
    pub base_interval: Option<GridInterval>,
    /// First day of the week for weekly grid rounding.
    pub week_start: Weekday,
}

impl Default for DateScaleOptions {
    fn default() -> Self {
        Self {
            base_interval: None,
            week_start: Weekday::Mon,
        }
    }
}

/// Options for category axes.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CategoryScaleOptions {
    /// Usable sub-range of each category cell.
    pub cells: CellLocations,
}

/// Selects an axis flavor and carries its options.
///
/// The set is closed: a strategy is picked at construction and resolves the
/// min/max/step logic statically — there is no runtime type lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleStrategy {
    /// Continuous numeric axis with nice-number steps.
    Linear(ValueScaleOptions),
    /// Continuous positive axis with power-of-ten grid lines.
    Logarithmic(ValueScaleOptions),
    /// Calendar time axis with nice-date intervals.
    Calendar(DateScaleOptions),
    /// Discrete category axis over stable integer indices.
    Categorical(CategoryScaleOptions),
}

/// Axis configuration. Replaced wholesale via [`Axis::configure`]; there are
/// no per-property change triggers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisConfig {
    /// The axis flavor and its options.
    pub strategy: ScaleStrategy,
    /// Minimum pixels between adjacent grid lines; drives the grid count.
    pub min_grid_distance: f64,
}

impl AxisConfig {
    /// A linear value axis with default options.
    pub fn linear() -> Self {
        Self {
            strategy: ScaleStrategy::Linear(ValueScaleOptions::default()),
            min_grid_distance: 60.0,
        }
    }

    /// A logarithmic value axis with default options.
    pub fn logarithmic() -> Self {
        Self {
            strategy: ScaleStrategy::Logarithmic(ValueScaleOptions::default()),
            min_grid_distance: 60.0,
        }
    }

    /// A calendar date axis with default options.
    pub fn calendar() -> Self {
        Self {
            strategy: ScaleStrategy::Calendar(DateScaleOptions::default()),
            min_grid_distance: 60.0,
        }
    }

    /// A category axis with default options.
    pub fn categorical() -> Self {
        Self {
            strategy: ScaleStrategy::Categorical(CategoryScaleOptions::default()),
            min_grid_distance: 60.0,
        }
    }

    /// Replaces the strategy.
    pub fn with_strategy(mut self, strategy: ScaleStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the minimum pixel distance between grid lines.
    pub fn with_min_grid_distance(mut self, distance: f64) -> Self {
        self.min_grid_distance = distance.max(1.0);
        self
    }
}

/// The grid spacing part of a [`ScaleState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleStep {
    /// Numeric delta between grid lines.
    Numeric(f64),
    /// Spacing is implicit in the log-position formula; grid lines sit on
    /// powers of ten.
    Logarithmic,
    /// Calendar interval between grid lines.
    Calendar(GridInterval),
    /// Index stride between materialized category labels.
    CategoryStride(usize),
}

/// An immutable snapshot of the computed scale.
///
/// Produced whole by [`Axis::validate`]; consumers compare generations
/// instead of watching individual fields, so they can never observe a
/// half-updated scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleState {
    /// Full-domain lower bound (nice-rounded unless strict).
    pub min: f64,
    /// Full-domain upper bound.
    pub max: f64,
    /// Lower bound of the zoomed window, in domain units.
    pub min_zoomed: f64,
    /// Upper bound of the zoomed window, in domain units.
    pub max_zoomed: f64,
    /// Grid spacing.
    pub step: ScaleStep,
    /// Target number of grid lines, from axis length / `min_grid_distance`.
    pub grid_count: usize,
}

/// A single axis: scale state, breaks, zoom, and the item arena.
#[derive(Clone, Debug)]
pub struct Axis {
    config: AxisConfig,
    breaks: BreakList,
    zoom: ZoomWindow,
    arena: DataItemArena,
    categories: CategoryIndexer,
    ranges: Vec<(f64, f64)>,
    state: Option<ScaleState>,
    generation: u64,
}

impl Axis {
    /// Creates an axis for the given configuration.
    ///
    /// This is the only construction path: the strategy in `config` fixes the
    /// axis flavor for the life of the value.
    pub fn new(config: AxisConfig) -> Self {
        Self {
            config,
            breaks: BreakList::new(),
            zoom: ZoomWindow::new(),
            arena: DataItemArena::new(),
            categories: CategoryIndexer::new(),
            ranges: Vec::new(),
            state: None,
            generation: 0,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    /// Replaces the configuration. A changed configuration invalidates the
    /// scale state and bumps the generation; an identical one is a no-op.
    pub fn configure(&mut self, config: AxisConfig) {
        if config != self.config {
            self.config = config;
            self.state = None;
            self.generation += 1;
        }
    }

    /// Monotonic change counter. Any of min/max/step/zoom/breaks changing
    /// bumps it exactly once per change; drop conversion caches on a bump.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The last validated scale state, if any.
    pub fn state(&self) -> Option<&ScaleState> {
        self.state.as_ref()
    }

    /// The break list.
    pub fn breaks(&self) -> &BreakList {
        &self.breaks
    }

    /// The zoom window.
    pub fn zoom_window(&self) -> &ZoomWindow {
        &self.zoom
    }

    /// Known categories (category axes only; empty otherwise).
    pub fn categories(&self) -> &CategoryIndexer {
        &self.categories
    }

    /// The item arena, for renderers that walk items directly.
    pub fn items(&self) -> &DataItemArena {
        &self.arena
    }

    /// Declares an axis break. Takes effect fully on the next validation.
    pub fn add_break(&mut self, start_value: f64, end_value: f64, break_size: f64) {
        self.breaks.add_break(start_value, end_value, break_size);
        self.generation += 1;
    }

    /// Removes all breaks.
    pub fn clear_breaks(&mut self) {
        if !self.breaks.is_empty() {
            self.breaks.clear();
            self.generation += 1;
        }
    }

    /// Declares a highlighted range; materialized as an `is_range` item.
    pub fn add_range(&mut self, start_value: f64, end_value: f64) {
        self.ranges.push((start_value, end_value));
        self.generation += 1;
    }

    /// Moves the zoom window. Returns `true` and bumps the generation only
    /// when the window effectively changed; re-zooming to the same window
    /// dispatches nothing.
    pub fn zoom(&mut self, start: f64, end: f64) -> bool {
        let changed = self.zoom.zoom(start, end);
        if changed {
            self.generation += 1;
        }
        changed
    }

    /// Converts a window-relative position to a full-domain one.
    pub fn to_global_position(&self, axis_position: f64) -> f64 {
        self.zoom.to_global_position(axis_position)
    }

    /// Converts a full-domain position to a window-relative one.
    pub fn to_axis_position(&self, global_position: f64) -> f64 {
        self.zoom.to_axis_position(global_position)
    }

    /// The anchor value fills and columns grow from, clamped into the scale.
    pub fn base_value(&self) -> f64 {
        let base = match self.config.strategy {
            ScaleStrategy::Linear(opts) | ScaleStrategy::Logarithmic(opts) => opts.base_value,
            ScaleStrategy::Calendar(_) | ScaleStrategy::Categorical(_) => 0.0,
        };
        match &self.state {
            Some(state) => base.clamp(state.min, state.max),
            None => base,
        }
    }

    /// Recomputes the scale from the registered series and the axis length,
    /// then rebuilds the item arena.
    ///
    /// This is the single mutation entry point: data updates, zooms, and
    /// resizes all funnel here, and the pass runs to completion before any
    /// dependent read. Fails only for domain errors (logarithmic axes over
    /// non-positive data); degenerate inputs recover locally.
    pub fn validate(
        &mut self,
        series: &[&dyn SeriesData],
        axis_length: f64,
    ) -> Result<(), DomainError> {
        self.breaks.fix_breaks();
        let grid_count = grid_count_for(axis_length, self.config.min_grid_distance);

        let strategy = self.config.strategy;
        let new_state = match strategy {
            ScaleStrategy::Linear(opts) => self.compute_value_state(series, grid_count, opts)?,
            ScaleStrategy::Logarithmic(opts) => self.compute_log_state(series, grid_count, opts)?,
            ScaleStrategy::Calendar(opts) => self.compute_date_state(series, grid_count, opts),
            ScaleStrategy::Categorical(opts) => {
                self.compute_category_state(series, grid_count, axis_length, opts)
            }
        };

        if self.state != Some(new_state) {
            self.state = Some(new_state);
            self.generation += 1;
        }
        self.materialize_items();
        Ok(())
    }

    /// Maps a domain value (number, epoch ms, or category index) to a
    /// relative position in `[0, 1]` within the zoomed window.
    ///
    /// Pure: safe to call any number of times between validations. Returns
    /// 0.0 before the first validation.
    pub fn value_to_position(&self, value: f64) -> f64 {
        let Some(state) = &self.state else {
            return 0.0;
        };
        match self.config.strategy {
            ScaleStrategy::Logarithmic(_) => {
                log_value_to_position(value, state.min_zoomed, state.max_zoomed)
            }
            _ => self
                .breaks
                .value_to_position(value, state.min_zoomed, state.max_zoomed),
        }
    }

    /// Inverse of [`Axis::value_to_position`].
    pub fn position_to_value(&self, position: f64) -> f64 {
        let Some(state) = &self.state else {
            return 0.0;
        };
        match self.config.strategy {
            ScaleStrategy::Logarithmic(_) => {
                log_position_to_value(position, state.min_zoomed, state.max_zoomed)
            }
            _ => self
                .breaks
                .position_to_value(position, state.min_zoomed, state.max_zoomed),
        }
    }

    /// Position of a category's cell point, or `None` for unknown names.
    pub fn category_to_position(&self, name: &str, location: f64) -> Option<f64> {
        let state = self.state.as_ref()?;
        let ScaleStrategy::Categorical(opts) = self.config.strategy else {
            return None;
        };
        let index = self.categories.index_of(name)?;
        let (start_index, end_index) = index_window(state);
        Some(category::index_to_position(
            index,
            location,
            opts.cells,
            start_index,
            end_index,
            &self.breaks,
        ))
    }

    /// Category whose cell covers `position`, or `None` off-strategy.
    pub fn position_to_category(&self, position: f64) -> Option<&str> {
        let state = self.state.as_ref()?;
        if !matches!(self.config.strategy, ScaleStrategy::Categorical(_)) {
            return None;
        }
        let (start_index, end_index) = index_window(state);
        let index = category::position_to_index(position, start_index, end_index, &self.breaks)?;
        self.categories.name_of(index)
    }

    /// Display text for the domain value under `position`.
    pub fn tooltip_text(&self, position: f64, formatter: &dyn LabelFormatter) -> String {
        let Some(state) = &self.state else {
            return String::new();
        };
        match (self.config.strategy, state.step) {
            (ScaleStrategy::Calendar(_), ScaleStep::Calendar(interval)) => {
                formatter.format_date(self.position_to_value(position), interval.unit)
            }
            (ScaleStrategy::Categorical(_), _) => {
                self.position_to_category(position).map(String::from).unwrap_or_default()
            }
            (_, ScaleStep::Numeric(step)) => {
                formatter.format_value(self.position_to_value(position), step)
            }
            _ => formatter.format_value(self.position_to_value(position), 0.0),
        }
    }

    /// Pushes the current items through the renderer contract.
    ///
    /// For each active item the renderer receives the two relative-position
    /// boundaries of its cell; pixel math and drawing stay on the renderer's
    /// side.
    pub fn render(&self, renderer: &mut dyn AxisItemRenderer) {
        for item in self.arena.active() {
            renderer.update_grid_element(item, item.position, item.end_position);
            renderer.update_tick_element(item, item.position, item.end_position);
            renderer.update_label_element(item, item.position, item.end_position);
            renderer.update_fill_element(item, item.position, item.end_position);
        }
    }

    fn compute_value_state(
        &mut self,
        series: &[&dyn SeriesData],
        grid_count: usize,
        opts: ValueScaleOptions,
    ) -> Result<ScaleState, DomainError> {
        let (raw_min, raw_max) = combined_extremes(series).unwrap_or((0.0, 1.0));
        let mut min = opts.min.unwrap_or(raw_min);
        let mut max = opts.max.unwrap_or(raw_max);
        (min, max) = expand_flat_range(min, max);

        let span = max - min;
        min -= span * opts.extra_min;
        max += span * opts.extra_max;

        // Nice rounding runs twice: the first pass can move the bounds far
        // enough to shift the ideal step, so the second pass re-derives the
        // step from the updated difference with the bounds pinned.
        let difference = self.breaks.adjust_difference(min, max);
        let first = adjust_min_max(
            min,
            max,
            difference,
            grid_count,
            opts.strict_min_max,
            opts.max_precision,
        );
        let second = adjust_min_max(
            first.min,
            first.max,
            first.max - first.min,
            grid_count,
            true,
            opts.max_precision,
        );

        let mut fin_min = second.min;
        let mut fin_max = second.max;
        if opts.strict_min_max {
            if let Some(m) = opts.min {
                fin_min = m;
            }
            if let Some(m) = opts.max {
                fin_max = m;
            }
        }

        let (min_zoomed, max_zoomed, step) = if self.zoom.is_full() {
            (fin_min, fin_max, second.step)
        } else {
            let lo = self.breaks.position_to_value(self.zoom.start(), fin_min, fin_max);
            let hi = self.breaks.position_to_value(self.zoom.end(), fin_min, fin_max);
            let zoomed_difference = self.breaks.adjust_difference(lo, hi);
            let zoomed =
                adjust_min_max(lo, hi, zoomed_difference, grid_count, true, opts.max_precision);
            (lo, hi, zoomed.step)
        };

        Ok(ScaleState {
            min: fin_min,
            max: fin_max,
            min_zoomed,
            max_zoomed,
            step: ScaleStep::Numeric(step),
            grid_count,
        })
    }

    fn compute_log_state(
        &mut self,
        series: &[&dyn SeriesData],
        grid_count: usize,
        opts: ValueScaleOptions,
    ) -> Result<ScaleState, DomainError> {
        let (raw_min, raw_max) = combined_extremes(series).unwrap_or((1.0, 10.0));
        let min = opts.min.unwrap_or(raw_min);
        let max = opts.max.unwrap_or(raw_max);
        // Fail fast, before any scale state exists: silently clamping would
        // misrepresent the data.
        if min <= 0.0 || max <= 0.0 {
            return Err(DomainError::NonPositiveLogValue);
        }
        let (lo, hi) = scale::log_min_max(min, max)?;

        let min_zoomed = log_position_to_value(self.zoom.start(), lo, hi);
        let max_zoomed = log_position_to_value(self.zoom.end(), lo, hi);

        Ok(ScaleState {
            min: lo,
            max: hi,
            min_zoomed,
            max_zoomed,
            step: ScaleStep::Logarithmic,
            grid_count,
        })
    }

    fn compute_date_state(
        &mut self,
        series: &[&dyn SeriesData],
        grid_count: usize,
        opts: DateScaleOptions,
    ) -> ScaleState {
        let (min, mut max) = combined_extremes(series).unwrap_or((0.0, time::DAY_MS));
        let mut min_gap = f64::INFINITY;
        for s in series {
            if let Some(gap) = min_series_gap(*s) {
                min_gap = min_gap.min(gap);
            }
        }
        let base = opts.base_interval.unwrap_or_else(|| {
            if min_gap.is_finite() {
                time::detect_base_interval(min_gap)
            } else {
                GridInterval::new(time::TimeUnit::Day, 1)
            }
        });
        if min == max {
            max = min + base.approx_duration_ms();
        }

        // One window step per base-interval period at most.
        let periods = ((max - min) / base.approx_duration_ms()).ceil();
        self.zoom.set_max_zoom_factor(periods.max(1.0));

        let min_zoomed = self.breaks.position_to_value(self.zoom.start(), min, max);
        let max_zoomed = self.breaks.position_to_value(self.zoom.end(), min, max);

        let duration = self.breaks.adjust_difference(min_zoomed, max_zoomed);
        let mut interval = time::choose_interval(0, duration, grid_count, GRID_INTERVALS);
        if interval.approx_duration_ms() < base.approx_duration_ms() {
            interval = base;
        }

        ScaleState {
            min,
            max,
            min_zoomed,
            max_zoomed,
            step: ScaleStep::Calendar(interval),
            grid_count,
        }
    }

    fn compute_category_state(
        &mut self,
        series: &[&dyn SeriesData],
        grid_count: usize,
        axis_length: f64,
        _opts: CategoryScaleOptions,
    ) -> ScaleState {
        for s in series {
            for row in 0..s.len() {
                if let Some(name) = s.category(row) {
                    self.categories.insert(name);
                }
            }
        }
        let count = self.categories.len();
        #[allow(clippy::cast_precision_loss, reason = "category counts are small")]
        let max = count as f64;
        self.zoom.set_max_zoom_factor(max.max(1.0));

        let min_zoomed = self.breaks.position_to_value(self.zoom.start(), 0.0, max);
        let max_zoomed = self.breaks.position_to_value(self.zoom.end(), 0.0, max);
        let start_index = clamp_index(min_zoomed.floor(), count);
        let end_index = clamp_index(max_zoomed.ceil(), count).max(start_index);

        let stride = category::frequency(
            end_index - start_index,
            axis_length,
            self.config.min_grid_distance,
        );

        #[allow(clippy::cast_precision_loss, reason = "category counts are small")]
        let (min_zoomed, max_zoomed) = (start_index as f64, end_index as f64);
        ScaleState {
            min: 0.0,
            max,
            min_zoomed,
            max_zoomed,
            step: ScaleStep::CategoryStride(stride),
            grid_count,
        }
    }

    fn materialize_items(&mut self) {
        let Some(state) = self.state else {
            return;
        };
        self.arena.begin_pass();
        let mut slot = 0_usize;

        match state.step {
            ScaleStep::Numeric(step) => {
                let overshoot = step * (state.min_zoomed / step).ceil() > state.max_zoomed;
                if step > 0.0 && !overshoot {
                    let start = step * (state.min_zoomed / step).ceil();
                    let n = count_grid_steps(start, state.max_zoomed, step);
                    for i in 0..=n {
                        let value = start + step * i as f64;
                        let position = self
                            .breaks
                            .value_to_position(value, state.min_zoomed, state.max_zoomed);
                        let end_position = self.breaks.value_to_position(
                            value + step,
                            state.min_zoomed,
                            state.max_zoomed,
                        );
                        let item = self.arena.activate(slot);
                        item.position = position;
                        item.end_position = end_position;
                        item.payload = ItemPayload::Value(value);
                        item.is_range = false;
                        slot += 1;
                    }
                }
            }
            ScaleStep::Logarithmic => {
                let lo = state.min_zoomed;
                let hi = state.max_zoomed;
                if lo > 0.0 && hi > lo {
                    let first = lo.log10().ceil();
                    let last = hi.log10().floor();
                    let mut exponent = first;
                    while exponent <= last + 1.0e-9 && slot < MAX_GRID_ITEMS {
                        let value = scale::pow10(exponent);
                        let next = scale::pow10(exponent + 1.0);
                        let item = self.arena.activate(slot);
                        item.position = log_value_to_position(value, lo, hi);
                        item.end_position = log_value_to_position(next, lo, hi);
                        item.payload = ItemPayload::Value(value);
                        item.is_range = false;
                        slot += 1;
                        exponent += 1.0;
                    }
                }
            }
            ScaleStep::Calendar(interval) => {
                let week_start = match self.config.strategy {
                    ScaleStrategy::Calendar(opts) => opts.week_start,
                    _ => Weekday::Mon,
                };
                let mut current =
                    time::round_to_interval(state.min_zoomed, interval, week_start);
                let mut guard = 0_usize;
                while let Some(value) = current {
                    guard += 1;
                    if value > state.max_zoomed || slot >= MAX_GRID_ITEMS || guard > 4 * MAX_GRID_ITEMS
                    {
                        break;
                    }
                    // A grid date inside a break skips to the break's end and
                    // re-rounds; the squeezed range gets no grid of its own.
                    if let Some(covering) = self.breaks.covering_break(value) {
                        if covering.break_size < 1.0 && value > covering.adjusted_start_value {
                            let end = covering.adjusted_end_value;
                            let rounded = time::round_to_interval(end, interval, week_start);
                            current = match rounded {
                                Some(r) if r > value => Some(r),
                                Some(r) => time::add_interval(r, interval),
                                None => None,
                            };
                            continue;
                        }
                    }
                    let position = self.breaks.value_to_position(
                        value,
                        state.min_zoomed,
                        state.max_zoomed,
                    );
                    let next = time::add_interval(value, interval);
                    let end_position = match next {
                        Some(n) => self.breaks.value_to_position(
                            n,
                            state.min_zoomed,
                            state.max_zoomed,
                        ),
                        None => 1.0,
                    };
                    if position >= -1.0e-9 {
                        let item = self.arena.activate(slot);
                        item.position = position;
                        item.end_position = end_position;
                        item.payload = ItemPayload::Date(value);
                        item.is_range = false;
                        slot += 1;
                    }
                    current = next;
                }
            }
            ScaleStep::CategoryStride(stride) => {
                let cells = match self.config.strategy {
                    ScaleStrategy::Categorical(opts) => opts.cells,
                    _ => CellLocations::default(),
                };
                let (start_index, end_index) = index_window(&state);
                let stride = stride.max(1);
                let mut index = start_index;
                while index < end_index && slot < MAX_GRID_ITEMS {
                    // Thinning: only every stride-th index materializes; the
                    // rest stay recycled, hidden but not destroyed.
                    if index % stride == 0 {
                        let Some(name) = self.categories.name_of(index).map(String::from) else {
                            index += 1;
                            continue;
                        };
                        let position = category::index_to_position(
                            index,
                            0.0,
                            cells,
                            start_index,
                            end_index,
                            &self.breaks,
                        );
                        let end_position = category::index_to_position(
                            (index + stride).min(end_index),
                            0.0,
                            cells,
                            start_index,
                            end_index,
                            &self.breaks,
                        );
                        let item = self.arena.activate(slot);
                        item.position = position;
                        item.end_position = end_position;
                        item.payload = ItemPayload::Category(name, index);
                        item.is_range = false;
                        slot += 1;
                    }
                    index += 1;
                }
            }
        }

        let is_date = matches!(self.config.strategy, ScaleStrategy::Calendar(_));
        let ranges: Vec<(f64, f64)> = self.ranges.clone();
        for (start_value, end_value) in ranges {
            let position = self.value_to_position(start_value);
            let end_position = self.value_to_position(end_value);
            let item = self.arena.activate(slot);
            item.position = position;
            item.end_position = end_position;
            item.payload = if is_date {
                ItemPayload::Date(start_value)
            } else {
                ItemPayload::Value(start_value)
            };
            item.is_range = true;
            slot += 1;
        }
    }
}

fn grid_count_for(axis_length: f64, min_grid_distance: f64) -> usize {
    if !(axis_length > 0.0) || !(min_grid_distance > 0.0) {
        return 1;
    }
    let count = (axis_length / min_grid_distance).floor();
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "positive and bounded by pixel sizes"
    )]
    {
        (count as usize).max(1)
    }
}

fn combined_extremes(series: &[&dyn SeriesData]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for s in series {
        if let Some((lo, hi)) = series_extremes(*s) {
            min = min.min(lo);
            max = max.max(hi);
        }
    }
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

fn count_grid_steps(start: f64, stop: f64, step: f64) -> usize {
    let n = ((stop - start) / step + 1.0e-9).floor();
    if !n.is_finite() || n < 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "capped below")]
    {
        n.min(MAX_GRID_ITEMS as f64) as usize
    }
}

fn clamp_index(value: f64, count: usize) -> usize {
    if !(value > 0.0) {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to the category count"
    )]
    {
        #[allow(clippy::cast_precision_loss, reason = "category counts are small")]
        let v = value.min(count as f64);
        v as usize
    }
}

fn index_window(state: &ScaleState) -> (usize, usize) {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "window bounds are clamped index values"
    )]
    {
        (state.min_zoomed as usize, state.max_zoomed as usize)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use plotgrid_core::{ItemState, SliceSeries};

    use super::*;

    fn linear_axis(values: &[f64]) -> Axis {
        let mut axis = Axis::new(AxisConfig::linear());
        let series = SliceSeries::new(values);
        axis.validate(&[&series], 300.0).unwrap();
        axis
    }

    #[test]
    fn value_positions_round_trip() {
        let axis = linear_axis(&[0.0, 37.0, 99.0]);
        let state = *axis.state().unwrap();
        let mut v = state.min;
        while v <= state.max {
            let p = axis.value_to_position(v);
            let back = axis.position_to_value(p);
            assert!((back - v).abs() < 1e-9, "{v} -> {p} -> {back}");
            v += (state.max - state.min) / 7.0;
        }
    }

    #[test]
    fn double_pass_output_is_pinned() {
        // Regression pin for the two-pass rounding rule: the first pass
        // expands -2..7 to -4..8, and the second pass re-derives the step
        // from the widened difference.
        let mut axis = Axis::new(AxisConfig::linear());
        let values = [-2.0, 7.0];
        let series = SliceSeries::new(&values);
        axis.validate(&[&series], 300.0).unwrap();
        let state = axis.state().unwrap();
        assert_eq!(state.min, -4.0);
        assert_eq!(state.max, 8.0);
        assert_eq!(state.step, ScaleStep::Numeric(5.0));
    }

    #[test]
    fn flat_data_still_produces_a_usable_scale() {
        let axis = linear_axis(&[5.0, 5.0, 5.0]);
        let state = axis.state().unwrap();
        assert!(state.max > state.min);
        let ScaleStep::Numeric(step) = state.step else {
            panic!("expected numeric step");
        };
        assert!(step > 0.0);
    }

    #[test]
    fn logarithmic_axis_rejects_non_positive_data() {
        let mut axis = Axis::new(AxisConfig::logarithmic());
        let values = [-5.0, 10.0];
        let series = SliceSeries::new(&values);
        let err = axis.validate(&[&series], 300.0).unwrap_err();
        assert_eq!(err, DomainError::NonPositiveLogValue);
        // No scale state was produced.
        assert!(axis.state().is_none());
    }

    #[test]
    fn logarithmic_axis_grids_powers_of_ten() {
        let mut axis = Axis::new(AxisConfig::logarithmic());
        let values = [2.0, 700.0];
        let series = SliceSeries::new(&values);
        axis.validate(&[&series], 300.0).unwrap();
        let state = axis.state().unwrap();
        assert_eq!((state.min, state.max), (1.0, 1000.0));

        let grid: std::vec::Vec<f64> = axis
            .items()
            .active()
            .filter_map(|i| match i.payload {
                ItemPayload::Value(v) => Some(v),
                _ => None,
            })
            .collect();
        assert_eq!(grid, std::vec![1.0, 10.0, 100.0, 1000.0]);
        assert!((axis.value_to_position(10.0) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_bumps_generation_once_per_effective_change() {
        let mut axis = linear_axis(&[0.0, 100.0]);
        let g0 = axis.generation();
        assert!(axis.zoom(0.25, 0.75));
        assert_eq!(axis.generation(), g0 + 1);
        // No-op zoom: no dispatch.
        assert!(!axis.zoom(0.25, 0.75));
        assert_eq!(axis.generation(), g0 + 1);
    }

    #[test]
    fn zoomed_scale_rederives_step_for_the_window() {
        let mut axis = Axis::new(AxisConfig::linear());
        // Rounds to 0..100 with step 20.
        let values = [0.0, 99.0];
        let series = SliceSeries::new(&values);
        axis.validate(&[&series], 300.0).unwrap();
        let ScaleStep::Numeric(full_step) = axis.state().unwrap().step else {
            panic!("expected numeric step");
        };

        axis.zoom(0.4, 0.6);
        axis.validate(&[&series], 300.0).unwrap();
        let state = axis.state().unwrap();
        let ScaleStep::Numeric(zoomed_step) = state.step else {
            panic!("expected numeric step");
        };
        assert!(zoomed_step < full_step);
        assert!((state.min_zoomed - 40.0).abs() < 1e-9);
        assert!((state.max_zoomed - 60.0).abs() < 1e-9);
    }

    #[test]
    fn items_recycle_rather_than_vanish() {
        let mut axis = Axis::new(AxisConfig::linear());
        let values = [0.0, 99.0];
        let series = SliceSeries::new(&values);
        axis.validate(&[&series], 300.0).unwrap();
        let full_active = axis.items().active_count();
        assert!(full_active > 0);
        let capacity = axis.items().capacity();

        // Zooming deep into the range leaves fewer grid lines; the surplus
        // slots are recycled, not dropped.
        axis.zoom(0.0, 0.05);
        axis.validate(&[&series], 300.0).unwrap();
        assert!(axis.items().capacity() >= capacity.min(full_active));
        assert!(
            axis.items()
                .slots()
                .any(|item| item.state == ItemState::Recycled)
                || axis.items().active_count() >= full_active
        );
    }

    #[test]
    fn strict_bounds_are_kept_verbatim() {
        let mut axis = Axis::new(
            AxisConfig::linear().with_strategy(ScaleStrategy::Linear(
                ValueScaleOptions::default().with_strict_min_max(-3.0, 17.0),
            )),
        );
        let values = [0.0, 9.0];
        let series = SliceSeries::new(&values);
        axis.validate(&[&series], 300.0).unwrap();
        let state = axis.state().unwrap();
        assert_eq!((state.min, state.max), (-3.0, 17.0));
    }

    #[test]
    fn ranges_materialize_as_range_items() {
        let mut axis = Axis::new(AxisConfig::linear());
        axis.add_range(10.0, 30.0);
        // Rounds to 0..100, so the range edges land at 0.1 and 0.3.
        let values = [0.0, 99.0];
        let series = SliceSeries::new(&values);
        axis.validate(&[&series], 300.0).unwrap();

        let range_items: std::vec::Vec<_> =
            axis.items().active().filter(|i| i.is_range).collect();
        assert_eq!(range_items.len(), 1);
        let item = range_items[0];
        assert!((item.position - 0.1).abs() < 1e-9);
        assert!((item.end_position - 0.3).abs() < 1e-9);
    }

    #[test]
    fn validate_is_idempotent_on_generation() {
        let mut axis = Axis::new(AxisConfig::linear());
        let values = [0.0, 100.0];
        let series = SliceSeries::new(&values);
        axis.validate(&[&series], 300.0).unwrap();
        let g = axis.generation();
        // Same inputs, same state: no change dispatched.
        axis.validate(&[&series], 300.0).unwrap();
        assert_eq!(axis.generation(), g);
    }
}
