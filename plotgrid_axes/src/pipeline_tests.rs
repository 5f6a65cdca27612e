// Copyright 2026 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-module scenarios: data in, scale out, renderer driven.

extern crate alloc;
extern crate std;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use plotgrid_core::{
    AxisItemRenderer, CategorySlice, ItemPayload, LinearRenderer, SliceSeries,
};

use crate::axis::{Axis, AxisConfig, ScaleStep};
use crate::format::DefaultFormatter;
use crate::time::{self, DAY_MS, TimeUnit};

fn daily_timestamps(start: f64, days: usize) -> Vec<f64> {
    (0..=days).map(|d| start + d as f64 * DAY_MS).collect()
}

#[test]
fn value_axis_full_pipeline_drives_renderer() {
    let mut axis = Axis::new(AxisConfig::linear());
    let values = [3.0, 42.0, 97.0];
    let series = SliceSeries::new(&values);
    axis.validate(&[&series], 300.0).unwrap();

    let mut renderer = LinearRenderer::new(Point::new(0.0, 0.0), 300.0);
    axis.render(&mut renderer);

    let active = axis.items().active_count();
    assert!(active > 0);
    assert_eq!(renderer.grid_updates, active);
    assert_eq!(renderer.label_updates, active);

    // Pixel endpoints follow the relative positions.
    let p0 = renderer.position_to_point(axis.value_to_position(0.0));
    let p1 = renderer.position_to_point(axis.value_to_position(100.0));
    assert!((p0.x - 0.0).abs() < 1e-9);
    assert!((p1.x - 300.0).abs() < 1e-9);
}

#[test]
fn ninety_day_axis_grids_on_month_starts() {
    let start = time::epoch_ms(2026, 1, 1, 0, 0, 0).unwrap();
    let timestamps = daily_timestamps(start, 90);
    let series = SliceSeries::new(&timestamps);

    let mut axis = Axis::new(AxisConfig::calendar());
    // 360 px at 60 px per line: six grid lines for a 90-day span.
    axis.validate(&[&series], 360.0).unwrap();

    let state = axis.state().unwrap();
    let ScaleStep::Calendar(interval) = state.step else {
        panic!("expected calendar step");
    };
    assert_eq!(interval.unit, TimeUnit::Month);
    assert_eq!(interval.count, 1);

    let grid: Vec<f64> = axis
        .items()
        .active()
        .filter_map(|i| match i.payload {
            ItemPayload::Date(ms) => Some(ms),
            _ => None,
        })
        .collect();
    let expected: Vec<f64> = [(2026, 1), (2026, 2), (2026, 3), (2026, 4)]
        .iter()
        .map(|&(y, m)| time::epoch_ms(y, m, 1, 0, 0, 0).unwrap())
        .collect();
    assert_eq!(grid, expected);
}

#[test]
fn date_grid_skips_past_breaks() {
    let start = time::epoch_ms(2026, 1, 1, 0, 0, 0).unwrap();
    let timestamps = daily_timestamps(start, 90);
    let series = SliceSeries::new(&timestamps);

    let mut axis = Axis::new(AxisConfig::calendar());
    let break_start = time::epoch_ms(2026, 1, 15, 0, 0, 0).unwrap();
    let break_end = time::epoch_ms(2026, 2, 15, 0, 0, 0).unwrap();
    axis.add_break(break_start, break_end, 0.1);
    axis.validate(&[&series], 360.0).unwrap();

    let grid: Vec<f64> = axis
        .items()
        .active()
        .filter_map(|i| match i.payload {
            ItemPayload::Date(ms) => Some(ms),
            _ => None,
        })
        .collect();

    // Feb 1 falls inside the break and is skipped; the walk resumes after
    // the break's end.
    let feb1 = time::epoch_ms(2026, 2, 1, 0, 0, 0).unwrap();
    assert!(!grid.contains(&feb1), "{grid:?}");
    assert!(grid.contains(&time::epoch_ms(2026, 1, 1, 0, 0, 0).unwrap()));
    assert!(grid.contains(&time::epoch_ms(2026, 3, 1, 0, 0, 0).unwrap()));

    // Positions stay monotonic through the squeeze.
    let positions: Vec<f64> = axis.items().active().map(|i| i.position).collect();
    for pair in positions.windows(2) {
        assert!(pair[0] < pair[1], "{positions:?}");
    }
}

#[test]
fn thousand_categories_thin_to_the_label_limit() {
    let names: Vec<String> = (0..1000).map(|i| alloc::format!("c{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let series = CategorySlice::new(&refs);

    let mut axis = Axis::new(AxisConfig::categorical().with_min_grid_distance(50.0));
    axis.validate(&[&series], 300.0).unwrap();

    let state = axis.state().unwrap();
    let ScaleStep::CategoryStride(stride) = state.step else {
        panic!("expected category stride");
    };
    assert!(stride >= 1);

    // At most axis_length / min_grid_distance labels materialize.
    let active = axis.items().active_count();
    assert!(active <= 6, "{active} labels for stride {stride}");
    assert!(active >= 5);

    // Known categories resolve both ways; unknown ones are an absence.
    let p = axis.category_to_position("c0", 0.5).unwrap();
    assert_eq!(axis.position_to_category(p), Some("c0"));
    assert_eq!(axis.category_to_position("nope", 0.5), None);
}

#[test]
fn cursor_positions_translate_across_zoomed_axes() {
    let mut axis = Axis::new(AxisConfig::linear());
    // Rounds to 0..100 with step 20.
    let values = [0.0, 99.0];
    let series = SliceSeries::new(&values);
    axis.validate(&[&series], 300.0).unwrap();
    axis.zoom(0.2, 0.7);
    axis.validate(&[&series], 300.0).unwrap();

    // A cursor in the middle of the plot (global 0.45) sits halfway through
    // this axis's window.
    let axis_pos = axis.to_axis_position(0.45);
    assert!((axis_pos - 0.5).abs() < 1e-9);
    assert!((axis.to_global_position(axis_pos) - 0.45).abs() < 1e-9);

    // And the domain value under it reflects the zoomed window.
    let value = axis.position_to_value(axis_pos);
    assert!((value - 45.0).abs() < 1e-9);
}

#[test]
fn tooltip_text_matches_axis_flavor() {
    let formatter = DefaultFormatter;

    let mut value_axis = Axis::new(AxisConfig::linear());
    let values = [0.0, 99.0];
    let series = SliceSeries::new(&values);
    value_axis.validate(&[&series], 300.0).unwrap();
    assert_eq!(value_axis.tooltip_text(0.5, &formatter), "50");

    let start = time::epoch_ms(2026, 1, 1, 0, 0, 0).unwrap();
    let timestamps = daily_timestamps(start, 90);
    let date_series = SliceSeries::new(&timestamps);
    let mut date_axis = Axis::new(AxisConfig::calendar());
    date_axis.validate(&[&date_series], 360.0).unwrap();
    assert_eq!(date_axis.tooltip_text(0.0, &formatter), "Jan 2026");

    let names = ["apples", "pears", "plums", "figs"];
    let cat_series = CategorySlice::new(&names);
    let mut cat_axis = Axis::new(AxisConfig::categorical());
    cat_axis.validate(&[&cat_series], 300.0).unwrap();
    assert_eq!(cat_axis.tooltip_text(0.3, &formatter), "pears");
}

#[test]
fn value_breaks_survive_the_whole_pipeline() {
    let mut axis = Axis::new(AxisConfig::linear());
    axis.add_break(40.0, 60.0, 0.2);
    let values = [0.0, 100.0];
    let series = SliceSeries::new(&values);
    axis.validate(&[&series], 300.0).unwrap();

    // Round trip through the compressed region's edges.
    for v in [0.0, 20.0, 40.0, 60.0, 80.0, 100.0] {
        let p = axis.value_to_position(v);
        let back = axis.position_to_value(p);
        assert!((back - v).abs() < 1e-9, "{v} -> {p} -> {back}");
    }

    // The squeezed span occupies less of the axis than an equal raw span.
    let squeezed = axis.value_to_position(60.0) - axis.value_to_position(40.0);
    let plain = axis.value_to_position(80.0) - axis.value_to_position(60.0);
    assert!(squeezed < plain);
}
