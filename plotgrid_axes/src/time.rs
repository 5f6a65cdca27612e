// Copyright 2026 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar-aware scale engine for date axes.
//!
//! Steps on a date axis are not arbitrary numbers: they are drawn from a
//! fixed ascending table of calendar intervals (5 minutes, 3 hours, 1 month,
//! …). Interval selection is a greedy linear scan over that table — interval
//! durations are not uniformly spaced, so there is nothing to bisect. Grid
//! dates are produced by calendar-correct rounding and addition over
//! `chrono`, never by naive duration arithmetic: months and years have
//! unequal lengths.
//!
//! Timestamps are `f64` milliseconds since the Unix epoch throughout; the
//! calendar is proleptic Gregorian in UTC.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc, Weekday};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Milliseconds per second.
pub const SECOND_MS: f64 = 1_000.0;
/// Milliseconds per minute.
pub const MINUTE_MS: f64 = 60.0 * SECOND_MS;
/// Milliseconds per hour.
pub const HOUR_MS: f64 = 60.0 * MINUTE_MS;
/// Milliseconds per day.
pub const DAY_MS: f64 = 24.0 * HOUR_MS;
/// Milliseconds per week.
pub const WEEK_MS: f64 = 7.0 * DAY_MS;
/// Approximate milliseconds per month (30 days), for interval selection only.
pub const MONTH_MS: f64 = 30.0 * DAY_MS;
/// Approximate milliseconds per year (365 days), for interval selection only.
pub const YEAR_MS: f64 = 365.0 * DAY_MS;

/// A calendar time unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// One millisecond.
    Millisecond,
    /// One second.
    Second,
    /// One minute.
    Minute,
    /// One hour.
    Hour,
    /// One calendar day.
    Day,
    /// One calendar week.
    Week,
    /// One calendar month (variable length).
    Month,
    /// One calendar year (variable length).
    Year,
}

impl TimeUnit {
    /// Approximate duration in milliseconds, used for interval selection.
    ///
    /// Exact for sub-day units; months and years use 30/365 days.
    pub fn approx_duration_ms(self) -> f64 {
        match self {
            Self::Millisecond => 1.0,
            Self::Second => SECOND_MS,
            Self::Minute => MINUTE_MS,
            Self::Hour => HOUR_MS,
            Self::Day => DAY_MS,
            Self::Week => WEEK_MS,
            Self::Month => MONTH_MS,
            Self::Year => YEAR_MS,
        }
    }
}

/// A grid spacing on a date axis: a time unit and a repeat count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridInterval {
    /// The calendar unit.
    pub unit: TimeUnit,
    /// How many of `unit` between adjacent grid lines; at least 1.
    pub count: usize,
}

impl GridInterval {
    /// Creates an interval of `count` times `unit`.
    pub const fn new(unit: TimeUnit, count: usize) -> Self {
        Self { unit, count }
    }

    /// Approximate duration in milliseconds.
    pub fn approx_duration_ms(self) -> f64 {
        self.unit.approx_duration_ms() * self.count.max(1) as f64
    }
}

/// The fixed ascending table of candidate grid intervals.
///
/// Only these granularities ever appear on a date axis; anything in between
/// (15 days, 2 weeks, …) reads as arbitrary and is deliberately absent.
pub const GRID_INTERVALS: &[GridInterval] = &[
    GridInterval::new(TimeUnit::Millisecond, 1),
    GridInterval::new(TimeUnit::Millisecond, 5),
    GridInterval::new(TimeUnit::Millisecond, 10),
    GridInterval::new(TimeUnit::Millisecond, 50),
    GridInterval::new(TimeUnit::Millisecond, 100),
    GridInterval::new(TimeUnit::Millisecond, 500),
    GridInterval::new(TimeUnit::Second, 1),
    GridInterval::new(TimeUnit::Second, 5),
    GridInterval::new(TimeUnit::Second, 10),
    GridInterval::new(TimeUnit::Second, 30),
    GridInterval::new(TimeUnit::Minute, 1),
    GridInterval::new(TimeUnit::Minute, 5),
    GridInterval::new(TimeUnit::Minute, 10),
    GridInterval::new(TimeUnit::Minute, 30),
    GridInterval::new(TimeUnit::Hour, 1),
    GridInterval::new(TimeUnit::Hour, 3),
    GridInterval::new(TimeUnit::Hour, 6),
    GridInterval::new(TimeUnit::Hour, 12),
    GridInterval::new(TimeUnit::Day, 1),
    GridInterval::new(TimeUnit::Day, 2),
    GridInterval::new(TimeUnit::Day, 3),
    GridInterval::new(TimeUnit::Day, 4),
    GridInterval::new(TimeUnit::Day, 5),
    GridInterval::new(TimeUnit::Week, 1),
    GridInterval::new(TimeUnit::Month, 1),
    GridInterval::new(TimeUnit::Month, 2),
    GridInterval::new(TimeUnit::Month, 3),
    GridInterval::new(TimeUnit::Month, 6),
    GridInterval::new(TimeUnit::Year, 1),
    GridInterval::new(TimeUnit::Year, 2),
    GridInterval::new(TimeUnit::Year, 5),
    GridInterval::new(TimeUnit::Year, 10),
    GridInterval::new(TimeUnit::Year, 50),
    GridInterval::new(TimeUnit::Year, 100),
];

/// Picks the grid interval for a span of `duration_ms` and a target grid
/// count, scanning `table` from `start_index`.
///
/// Returns the first candidate whose line count fits `grid_count`. When a
/// candidate's single interval already overshoots the whole span, the
/// previous (finer) entry wins; when the table runs out, the last (largest)
/// entry does.
pub fn choose_interval(
    start_index: usize,
    duration_ms: f64,
    grid_count: usize,
    table: &[GridInterval],
) -> GridInterval {
    assert!(!table.is_empty(), "interval table must not be empty");
    let last = table.len() - 1;
    let mut index = start_index.min(last);
    loop {
        if index >= last {
            return table[last];
        }
        let candidate = table[index];
        let candidate_duration = candidate.approx_duration_ms();
        if duration_ms < candidate_duration && index > 0 {
            return table[index - 1];
        }
        if (duration_ms / candidate_duration).ceil() <= grid_count as f64 {
            return candidate;
        }
        index += 1;
    }
}

/// Derives the data granularity (base interval) from the smallest real gap
/// between consecutive timestamps across all series on an axis.
///
/// The raw table lookup is then upgraded across a handful of thresholds that
/// absorb real-world irregularities — daylight-saving days are an hour short,
/// months run 28–31 days, years 365–366 — so a daily feed does not flicker
/// between "23 hours" and "a day" depending on the season.
pub fn detect_base_interval(min_gap_ms: f64) -> GridInterval {
    let mut interval = choose_interval(0, min_gap_ms, 1, GRID_INTERVALS);

    // Short months: a monthly feed sampled across February looks like weeks.
    if min_gap_ms >= 27.0 * DAY_MS && interval.unit == TimeUnit::Week {
        interval = GridInterval::new(TimeUnit::Month, 1);
    }
    if interval.unit == TimeUnit::Month {
        if min_gap_ms >= 29.0 * 2.0 * DAY_MS {
            interval.count = 2;
        }
        if min_gap_ms >= 29.0 * 3.0 * DAY_MS {
            interval.count = 3;
        }
        if min_gap_ms >= 29.0 * 6.0 * DAY_MS {
            interval.count = 6;
        }
    }
    // Daylight saving: a "day" can be 23 hours once a year.
    if min_gap_ms >= 23.0 * HOUR_MS && interval.unit == TimeUnit::Hour {
        interval = GridInterval::new(TimeUnit::Day, 1);
    }
    if min_gap_ms >= WEEK_MS - HOUR_MS && interval.unit == TimeUnit::Day {
        interval = GridInterval::new(TimeUnit::Week, 1);
    }
    if min_gap_ms >= YEAR_MS - 1.01 * DAY_MS && interval.unit == TimeUnit::Month {
        interval = GridInterval::new(TimeUnit::Year, 1);
    }
    interval
}

fn to_datetime(ms: f64) -> Option<NaiveDateTime> {
    if !ms.is_finite() {
        return None;
    }
    let rounded = ms.round();
    if rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, reason = "range-checked above")]
    let millis = rounded as i64;
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

fn to_epoch_ms(dt: NaiveDateTime) -> f64 {
    dt.and_utc().timestamp_millis() as f64
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Floors a timestamp to the calendar start of its interval slot.
///
/// Sub-day units floor on the UTC millisecond line (counts anchor at the
/// epoch, which divides evenly for every table entry). Weeks floor to
/// `week_start`; months and years floor the calendar field to a multiple of
/// `count`, so e.g. `{month, 3}` always lands on quarter starts.
///
/// Returns `None` for timestamps outside the representable calendar range —
/// callers skip such values and keep walking.
pub fn round_to_interval(ms: f64, interval: GridInterval, week_start: Weekday) -> Option<f64> {
    let count = interval.count.max(1) as i64;
    match interval.unit {
        TimeUnit::Millisecond | TimeUnit::Second | TimeUnit::Minute | TimeUnit::Hour
        | TimeUnit::Day => {
            let dt = to_datetime(ms)?;
            let unit_ms = interval.unit.approx_duration_ms();
            #[allow(
                clippy::cast_possible_truncation,
                reason = "sub-day unit durations are small exact integers"
            )]
            let step = unit_ms as i64 * count;
            let millis = dt.and_utc().timestamp_millis();
            Some((millis.div_euclid(step) * step) as f64)
        }
        TimeUnit::Week => {
            let dt = to_datetime(ms)?;
            #[allow(clippy::cast_possible_truncation, reason = "exact small integer constant")]
            let day_step = DAY_MS as i64;
            let day_start = dt.and_utc().timestamp_millis().div_euclid(day_step) * day_step;
            let day = to_datetime(day_start as f64)?;
            let back = (7 + day.weekday().num_days_from_monday()
                - week_start.num_days_from_monday())
                % 7;
            Some((day_start - i64::from(back) * day_step) as f64)
        }
        TimeUnit::Month => {
            let dt = to_datetime(ms)?;
            let months = i64::from(dt.year()) * 12 + i64::from(dt.month0());
            let floored = months.div_euclid(count) * count;
            let year = floored.div_euclid(12);
            let month0 = floored.rem_euclid(12);
            #[allow(clippy::cast_possible_truncation, reason = "derived from a valid chrono year")]
            let date = NaiveDate::from_ymd_opt(year as i32, month0 as u32 + 1, 1)?;
            Some(to_epoch_ms(date.and_hms_opt(0, 0, 0)?))
        }
        TimeUnit::Year => {
            let dt = to_datetime(ms)?;
            let year = i64::from(dt.year()).div_euclid(count) * count;
            #[allow(clippy::cast_possible_truncation, reason = "derived from a valid chrono year")]
            let date = NaiveDate::from_ymd_opt(year as i32, 1, 1)?;
            Some(to_epoch_ms(date.and_hms_opt(0, 0, 0)?))
        }
    }
}

/// Advances a timestamp by one interval, calendar-correctly.
///
/// Month and year addition move the calendar field and clamp the day of
/// month (Jan 31 + 1 month = Feb 28/29); sub-month units add an exact
/// duration. Returns `None` if the result leaves the representable range.
pub fn add_interval(ms: f64, interval: GridInterval) -> Option<f64> {
    let count = interval.count.max(1) as i64;
    match interval.unit {
        TimeUnit::Millisecond | TimeUnit::Second | TimeUnit::Minute | TimeUnit::Hour
        | TimeUnit::Day | TimeUnit::Week => {
            let dt = to_datetime(ms)?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "sub-month unit durations are small exact integers"
            )]
            let step = interval.unit.approx_duration_ms() as i64 * count;
            let millis = dt.and_utc().timestamp_millis().checked_add(step)?;
            to_datetime(millis as f64).map(to_epoch_ms)
        }
        TimeUnit::Month => {
            let dt = to_datetime(ms)?;
            let months = i64::from(dt.year()) * 12 + i64::from(dt.month0()) + count;
            #[allow(clippy::cast_possible_truncation, reason = "derived from a valid chrono year")]
            let (year, month) = (
                months.div_euclid(12) as i32,
                months.rem_euclid(12) as u32 + 1,
            );
            let day = dt.day().min(days_in_month(year, month));
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            Some(to_epoch_ms(date.and_time(dt.time())))
        }
        TimeUnit::Year => {
            let dt = to_datetime(ms)?;
            #[allow(clippy::cast_possible_truncation, reason = "interval counts are small")]
            let year = dt.year().checked_add(count as i32)?;
            let day = dt.day().min(days_in_month(year, dt.month()));
            let date = NaiveDate::from_ymd_opt(year, dt.month(), day)?;
            Some(to_epoch_ms(date.and_time(dt.time())))
        }
    }
}

/// Convenience: epoch milliseconds for a UTC calendar date and time.
pub fn epoch_ms(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Option<f64> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = date.and_hms_opt(hour, minute, second)?;
    Some(to_epoch_ms(time))
}

/// Calendar fields of a timestamp, for label formatting.
///
/// Returns `(year, month, day, hour, minute, second)` or `None` outside the
/// representable range.
pub fn calendar_fields(ms: f64) -> Option<(i32, u32, u32, u32, u32, u32)> {
    let dt = to_datetime(ms)?;
    Some((
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
    ))
}
