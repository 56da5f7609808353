// File: crates/plotbridge-core/src/axis.rs
// Summary: Setup-phase commands (axes, limits, formats, ticks, legend, mouse text) forwarded to the engine.

use crate::error::{Error, Result};
use crate::format::FormatterToken;
use crate::grid::linspace;
use crate::types::{Axis, AxisFlags, Condition, LegendFlags, Location, MouseTextFlags};

/// Where custom tick positions come from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickSpec<'a> {
    /// Explicit positions.
    Values(&'a [f64]),
    /// `n` evenly spaced positions over `[min, max]`, endpoints included.
    Range { min: f64, max: f64, n: usize },
}

impl TickSpec<'_> {
    pub fn count(&self) -> usize {
        match self {
            TickSpec::Values(v) => v.len(),
            TickSpec::Range { n, .. } => *n,
        }
    }

    pub fn positions(&self) -> Vec<f64> {
        match *self {
            TickSpec::Values(v) => v.to_vec(),
            TickSpec::Range { min, max, n } => linspace(min, max, n),
        }
    }
}

/// One tick label per tick, or none at all.
pub fn check_tick_labels(ticks: &TickSpec<'_>, labels: Option<&[&str]>) -> Result<()> {
    match labels {
        Some(l) if l.len() != ticks.count() => {
            Err(Error::DataLengthMismatch { x_len: ticks.count(), y_len: l.len() })
        }
        _ => Ok(()),
    }
}

/// Setup-phase call, valid between `begin_plot` and the first item or `setup_finish`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SetupCommand<'a> {
    Axis { axis: Axis, label: Option<&'a str>, flags: AxisFlags },
    AxisLimits { axis: Axis, min: f64, max: f64, cond: Condition },
    /// printf-style format applied to each tick value.
    AxisFormat { axis: Axis, format: &'a str },
    AxisFormatCallback { axis: Axis, token: FormatterToken },
    AxisTicks { axis: Axis, ticks: TickSpec<'a>, labels: Option<&'a [&'a str]>, keep_default: bool },
    /// X1 and Y1 in one call.
    Axes { x_label: Option<&'a str>, y_label: Option<&'a str>, x_flags: AxisFlags, y_flags: AxisFlags },
    AxesLimits { x_min: f64, x_max: f64, y_min: f64, y_max: f64, cond: Condition },
    Legend { location: Location, flags: LegendFlags },
    MouseText { location: Location, flags: MouseTextFlags },
    Finish,
}

impl SetupCommand<'_> {
    pub const fn name(&self) -> &'static str {
        match self {
            SetupCommand::Axis { .. } => "axis",
            SetupCommand::AxisLimits { .. } => "axis_limits",
            SetupCommand::AxisFormat { .. } => "axis_format",
            SetupCommand::AxisFormatCallback { .. } => "axis_format_callback",
            SetupCommand::AxisTicks { .. } => "axis_ticks",
            SetupCommand::Axes { .. } => "axes",
            SetupCommand::AxesLimits { .. } => "axes_limits",
            SetupCommand::Legend { .. } => "legend",
            SetupCommand::MouseText { .. } => "mouse_text",
            SetupCommand::Finish => "finish",
        }
    }
}
