//! Simulation time window.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::parse;
use crate::config::resolve::ResolvedTable;
use crate::config::schema::Key;
use crate::error::ConfigError;

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Start, end and step of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Model timestep in whole seconds.
    pub step_seconds: i64,
    /// Number of timesteps from `start` to `end`, both included.
    pub total_steps: i64,
}

impl TimeWindow {
    /// Builds a window, or `None` if `step_seconds` is not positive or `end`
    /// precedes `start`.
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, step_seconds: i64) -> Option<Self> {
        if step_seconds <= 0 || end < start {
            return None;
        }
        let span = (end - start).num_seconds();
        Some(Self {
            start,
            end,
            step_seconds,
            total_steps: span / step_seconds + 1,
        })
    }
}

/// Converts a timestep in hours to whole seconds, truncating fractions.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // fractional seconds are dropped
pub fn step_seconds(hours: f64) -> i64 {
    (hours * SECONDS_PER_HOUR) as i64
}

/// Reads the `[TIME]` section.
///
/// # Errors
///
/// Returns an invalid-value error on `TIME STEP` if it does not parse or is
/// shorter than one second, on either date if it does not parse, and on
/// `MODEL END` if it precedes `MODEL START`.
pub fn read_window(values: &ResolvedTable) -> Result<TimeWindow, ConfigError> {
    let hours = parse::float(Key::TimeStep, values.get(Key::TimeStep))?;
    let step = step_seconds(hours);
    if step <= 0 {
        return Err(Key::TimeStep.invalid(
            values.get(Key::TimeStep),
            "timestep must be at least one second",
        ));
    }

    let start = parse::date(Key::ModelStart, values.get(Key::ModelStart))?;
    let end = parse::date(Key::ModelEnd, values.get(Key::ModelEnd))?;

    TimeWindow::new(start, end, step).ok_or_else(|| {
        Key::ModelEnd.invalid(values.get(Key::ModelEnd), "model end precedes model start")
    })
}
