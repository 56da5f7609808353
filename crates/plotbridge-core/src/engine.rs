// File: crates/plotbridge-core/src/engine.rs
// Summary: The seam to the plotting engine: plot lifecycle, setup, items and next-item styles.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::axis::SetupCommand;
use crate::context::UiContext;
use crate::format::TickFormat;
use crate::geometry::{Vec2, Vec4};
use crate::series::PlotItem;
use crate::style::PlotStyle;
use crate::types::{Marker, PlotFlags, SubplotFlags};

/// Style override for the next plotted item only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NextItemStyle {
    Line { color: Vec4, weight: f32 },
    Fill { color: Vec4, alpha: f32 },
    Marker { marker: Marker, size: f32, fill: Vec4, weight: f32, outline: Vec4 },
    ErrorBar { color: Vec4, size: f32, weight: f32 },
}

/// Arguments of `begin_subplots`. Ratios, when given, are read and written back by the engine.
#[derive(Debug)]
pub struct SubplotsSpec<'a> {
    pub title: &'a str,
    pub rows: usize,
    pub cols: usize,
    pub size: Vec2,
    pub flags: SubplotFlags,
    pub row_ratios: Option<&'a mut [f32]>,
    pub col_ratios: Option<&'a mut [f32]>,
}

/// Everything the boundary forwards to the engine. Inputs are borrowed for the
/// call only; an engine must not keep pointers into them.
pub trait PlotEngine {
    fn bind_ui_context(&mut self, _ui: Option<UiContext>) {}

    /// Returns false when the plot is not visible; the caller then skips to the next frame.
    fn begin_plot(&mut self, style: &PlotStyle, title: &str, size: Vec2, flags: PlotFlags) -> bool;

    /// Render the plot; registered tick formatters are reachable through `formatters`.
    fn end_plot(&mut self, style: &PlotStyle, formatters: &mut dyn TickFormat);

    fn begin_subplots(&mut self, style: &PlotStyle, spec: SubplotsSpec<'_>) -> bool;

    fn end_subplots(&mut self);

    fn setup(&mut self, style: &PlotStyle, command: &SetupCommand<'_>);

    fn set_next_item_style(&mut self, next: NextItemStyle);

    fn plot(&mut self, style: &PlotStyle, item: &PlotItem<'_>);

    /// Primary color of the last plotted item.
    fn last_item_color(&self, style: &PlotStyle) -> Vec4;
}

impl<E: PlotEngine + ?Sized> PlotEngine for Box<E> {
    fn bind_ui_context(&mut self, ui: Option<UiContext>) {
        (**self).bind_ui_context(ui)
    }
    fn begin_plot(&mut self, style: &PlotStyle, title: &str, size: Vec2, flags: PlotFlags) -> bool {
        (**self).begin_plot(style, title, size, flags)
    }
    fn end_plot(&mut self, style: &PlotStyle, formatters: &mut dyn TickFormat) {
        (**self).end_plot(style, formatters)
    }
    fn begin_subplots(&mut self, style: &PlotStyle, spec: SubplotsSpec<'_>) -> bool {
        (**self).begin_subplots(style, spec)
    }
    fn end_subplots(&mut self) {
        (**self).end_subplots()
    }
    fn setup(&mut self, style: &PlotStyle, command: &SetupCommand<'_>) {
        (**self).setup(style, command)
    }
    fn set_next_item_style(&mut self, next: NextItemStyle) {
        (**self).set_next_item_style(next)
    }
    fn plot(&mut self, style: &PlotStyle, item: &PlotItem<'_>) {
        (**self).plot(style, item)
    }
    fn last_item_color(&self, style: &PlotStyle) -> Vec4 {
        (**self).last_item_color(style)
    }
}

/// An engine shared with the host, e.g. to inspect a `RecordingEngine` while the C surface owns the other handle.
impl<E: PlotEngine> PlotEngine for Arc<Mutex<E>> {
    fn bind_ui_context(&mut self, ui: Option<UiContext>) {
        locked(self).bind_ui_context(ui)
    }
    fn begin_plot(&mut self, style: &PlotStyle, title: &str, size: Vec2, flags: PlotFlags) -> bool {
        locked(self).begin_plot(style, title, size, flags)
    }
    fn end_plot(&mut self, style: &PlotStyle, formatters: &mut dyn TickFormat) {
        locked(self).end_plot(style, formatters)
    }
    fn begin_subplots(&mut self, style: &PlotStyle, spec: SubplotsSpec<'_>) -> bool {
        locked(self).begin_subplots(style, spec)
    }
    fn end_subplots(&mut self) {
        locked(self).end_subplots()
    }
    fn setup(&mut self, style: &PlotStyle, command: &SetupCommand<'_>) {
        locked(self).setup(style, command)
    }
    fn set_next_item_style(&mut self, next: NextItemStyle) {
        locked(self).set_next_item_style(next)
    }
    fn plot(&mut self, style: &PlotStyle, item: &PlotItem<'_>) {
        locked(self).plot(style, item)
    }
    fn last_item_color(&self, style: &PlotStyle) -> Vec4 {
        locked(self).last_item_color(style)
    }
}

fn locked<E>(shared: &Mutex<E>) -> MutexGuard<'_, E> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
