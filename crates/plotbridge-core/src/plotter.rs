// File: crates/plotbridge-core/src/plotter.rs
// Summary: Plotter ties the context registry, the formatter table and one engine into the boundary API.
// Notes:
// - Style and plot calls act on the current context; without one they return Error::NoContext.
// - Nothing here retains caller data past the call that received it.

use crate::axis::{check_tick_labels, SetupCommand, TickSpec};
use crate::context::{ContextId, ContextRegistry, UiContext};
use crate::engine::{NextItemStyle, PlotEngine, SubplotsSpec};
use crate::error::{Error, Result};
use crate::format::{FormatterTable, FormatterToken, TickLabel};
use crate::geometry::{Vec2, Vec4};
use crate::record::{RecordingEngine, DEFAULT_RECORDING_CAPACITY};
use crate::series::{PlotItem, StridedView, XyData};
use crate::style::{self, PlotStyle, StyleValue};
use crate::theme::ColorScheme;
use crate::types::{
    Axis, AxisFlags, BarGroupsFlags, Condition, LegendFlags, Location, Marker, MouseTextFlags, PlotFlags, StyleCol,
    StyleVar,
};

#[derive(Clone, Debug)]
pub struct PlotterOptions {
    /// Palette applied to every new context.
    pub color_scheme: ColorScheme,
    /// Base style of every new context (colors replaced by `color_scheme`).
    pub style: PlotStyle,
    /// Frame log size when the engine is a `RecordingEngine`.
    pub recording_capacity: usize,
}

impl Default for PlotterOptions {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Auto,
            style: PlotStyle::default(),
            recording_capacity: DEFAULT_RECORDING_CAPACITY,
        }
    }
}

pub struct Plotter<E: PlotEngine> {
    options: PlotterOptions,
    registry: ContextRegistry,
    formatters: FormatterTable,
    engine: E,
}

impl Plotter<RecordingEngine> {
    /// Plotter over the in-process recording engine.
    pub fn recording(options: PlotterOptions) -> Self {
        let engine = RecordingEngine::with_capacity(options.recording_capacity);
        Self::with_options(engine, options)
    }
}

impl<E: PlotEngine> Plotter<E> {
    pub fn new(engine: E) -> Self {
        Self::with_options(engine, PlotterOptions::default())
    }

    pub fn with_options(engine: E, options: PlotterOptions) -> Self {
        Self { options, registry: ContextRegistry::new(), formatters: FormatterTable::new(), engine }
    }

    pub fn options(&self) -> &PlotterOptions { &self.options }
    pub fn registry(&self) -> &ContextRegistry { &self.registry }
    pub fn engine(&self) -> &E { &self.engine }
    pub fn engine_mut(&mut self) -> &mut E { &mut self.engine }

    // ---- contexts ----

    pub fn create_context(&mut self) -> ContextId {
        let mut style = self.options.style;
        style::apply_color_scheme(&mut style, self.options.color_scheme);
        self.registry.create(style)
    }

    pub fn destroy_context(&mut self, id: ContextId) -> Result<()> {
        self.registry.destroy(id)
    }

    pub fn current_context(&self) -> Option<ContextId> {
        self.registry.current()
    }

    pub fn set_current_context(&mut self, id: Option<ContextId>) -> Result<()> {
        self.registry.set_current(id)
    }

    pub fn bind_ui_context(&mut self, ui: UiContext) {
        self.registry.bind_ui_context(ui);
        self.engine.bind_ui_context(self.registry.ui_context());
    }

    // ---- style ----

    pub fn style(&self) -> Result<&PlotStyle> {
        Ok(self.registry.current_context()?.style())
    }

    pub fn style_mut(&mut self) -> Result<&mut PlotStyle> {
        Ok(self.registry.current_context_mut()?.style_mut())
    }

    /// Address of the current context's style; stays valid until that context is destroyed.
    pub fn style_ptr(&mut self) -> Result<*mut PlotStyle> {
        Ok(self.registry.current_context_mut()?.style_ptr())
    }

    /// Apply `scheme` to the current context's style.
    pub fn apply_color_scheme(&mut self, scheme: ColorScheme) -> Result<()> {
        style::apply_color_scheme(self.style_mut()?, scheme);
        tracing::debug!(target: "plotbridge", scheme = scheme.name(), "color scheme applied");
        Ok(())
    }

    pub fn push_style_color(&mut self, col: StyleCol, color: Vec4) -> Result<()> {
        let (style, stack) = self.registry.current_context_mut()?.parts_mut();
        stack.push_color(style, col, color);
        Ok(())
    }

    #[track_caller]
    pub fn pop_style_color(&mut self, count: usize) -> Result<()> {
        let (style, stack) = self.registry.current_context_mut()?.parts_mut();
        stack.pop_color(style, count);
        Ok(())
    }

    #[track_caller]
    pub fn push_style_var(&mut self, var: StyleVar, value: impl Into<StyleValue>) -> Result<()> {
        let (style, stack) = self.registry.current_context_mut()?.parts_mut();
        stack.push_var(style, var, value.into());
        Ok(())
    }

    #[track_caller]
    pub fn push_style_var_float(&mut self, var: StyleVar, value: f32) -> Result<()> {
        self.push_style_var(var, StyleValue::Float(value))
    }

    #[track_caller]
    pub fn push_style_var_int(&mut self, var: StyleVar, value: i32) -> Result<()> {
        self.push_style_var(var, StyleValue::Int(value))
    }

    #[track_caller]
    pub fn push_style_var_vec2(&mut self, var: StyleVar, value: Vec2) -> Result<()> {
        self.push_style_var(var, StyleValue::Vec2(value))
    }

    #[track_caller]
    pub fn pop_style_var(&mut self, count: usize) -> Result<()> {
        let (style, stack) = self.registry.current_context_mut()?.parts_mut();
        stack.pop_var(style, count);
        Ok(())
    }

    pub fn set_next_line_style(&mut self, color: Vec4, weight: f32) {
        self.engine.set_next_item_style(NextItemStyle::Line { color, weight });
    }

    pub fn set_next_fill_style(&mut self, color: Vec4, alpha: f32) {
        self.engine.set_next_item_style(NextItemStyle::Fill { color, alpha });
    }

    pub fn set_next_marker_style(&mut self, marker: Marker, size: f32, fill: Vec4, weight: f32, outline: Vec4) {
        self.engine.set_next_item_style(NextItemStyle::Marker { marker, size, fill, weight, outline });
    }

    pub fn set_next_error_bar_style(&mut self, color: Vec4, size: f32, weight: f32) {
        self.engine.set_next_item_style(NextItemStyle::ErrorBar { color, size, weight });
    }

    pub fn last_item_color(&self) -> Result<Vec4> {
        let style = self.registry.current_context()?.style();
        Ok(self.engine.last_item_color(style))
    }

    // ---- plot lifecycle ----

    pub fn begin_plot(&mut self, title: &str, size: Vec2, flags: PlotFlags) -> Result<bool> {
        let style = self.registry.current_context()?.style();
        let open = self.engine.begin_plot(style, title, size, flags);
        tracing::debug!(target: "plotbridge", title, open, "begin plot");
        Ok(open)
    }

    pub fn end_plot(&mut self) -> Result<()> {
        let style = self.registry.current_context()?.style();
        self.engine.end_plot(style, &mut self.formatters);
        tracing::debug!(target: "plotbridge", "end plot");
        Ok(())
    }

    pub fn begin_subplots(&mut self, spec: SubplotsSpec<'_>) -> Result<bool> {
        let style = self.registry.current_context()?.style();
        let (title, rows, cols) = (spec.title, spec.rows, spec.cols);
        let open = self.engine.begin_subplots(style, spec);
        tracing::debug!(target: "plotbridge", title, rows, cols, open, "begin subplots");
        Ok(open)
    }

    pub fn end_subplots(&mut self) -> Result<()> {
        self.registry.current_context()?;
        self.engine.end_subplots();
        Ok(())
    }

    // ---- setup ----

    pub fn setup(&mut self, command: SetupCommand<'_>) -> Result<()> {
        match command {
            SetupCommand::AxisFormatCallback { token, .. } if !self.formatters.contains(token) => {
                return Err(Error::UnknownFormatter(token));
            }
            SetupCommand::AxisTicks { ticks, labels, .. } => check_tick_labels(&ticks, labels)?,
            _ => {}
        }
        let style = self.registry.current_context()?.style();
        self.engine.setup(style, &command);
        Ok(())
    }

    pub fn setup_axis(&mut self, axis: Axis, label: Option<&str>, flags: AxisFlags) -> Result<()> {
        self.setup(SetupCommand::Axis { axis, label, flags })
    }

    pub fn setup_axis_limits(&mut self, axis: Axis, min: f64, max: f64, cond: Condition) -> Result<()> {
        self.setup(SetupCommand::AxisLimits { axis, min, max, cond })
    }

    pub fn setup_axis_format(&mut self, axis: Axis, format: &str) -> Result<()> {
        self.setup(SetupCommand::AxisFormat { axis, format })
    }

    pub fn setup_axis_format_callback(&mut self, axis: Axis, token: FormatterToken) -> Result<()> {
        self.setup(SetupCommand::AxisFormatCallback { axis, token })
    }

    pub fn setup_axis_ticks(
        &mut self,
        axis: Axis,
        ticks: TickSpec<'_>,
        labels: Option<&[&str]>,
        keep_default: bool,
    ) -> Result<()> {
        self.setup(SetupCommand::AxisTicks { axis, ticks, labels, keep_default })
    }

    pub fn setup_axes(
        &mut self,
        x_label: Option<&str>,
        y_label: Option<&str>,
        x_flags: AxisFlags,
        y_flags: AxisFlags,
    ) -> Result<()> {
        self.setup(SetupCommand::Axes { x_label, y_label, x_flags, y_flags })
    }

    pub fn setup_axes_limits(&mut self, x_min: f64, x_max: f64, y_min: f64, y_max: f64, cond: Condition) -> Result<()> {
        self.setup(SetupCommand::AxesLimits { x_min, x_max, y_min, y_max, cond })
    }

    pub fn setup_legend(&mut self, location: Location, flags: LegendFlags) -> Result<()> {
        self.setup(SetupCommand::Legend { location, flags })
    }

    pub fn setup_mouse_text(&mut self, location: Location, flags: MouseTextFlags) -> Result<()> {
        self.setup(SetupCommand::MouseText { location, flags })
    }

    pub fn setup_finish(&mut self) -> Result<()> {
        self.setup(SetupCommand::Finish)
    }

    // ---- tick formatters ----

    /// Register a tick formatter; a boxed `format::Handler` (e.g. from `format::c_handler`) works too.
    pub fn register_formatter(&mut self, handler: impl FnMut(f64, &mut TickLabel<'_>) + Send + 'static) -> FormatterToken {
        self.formatters.register(handler)
    }

    pub fn unregister_formatter(&mut self, token: FormatterToken) -> bool {
        self.formatters.unregister(token)
    }

    // ---- series ----

    pub fn plot(&mut self, item: PlotItem<'_>) -> Result<()> {
        let style = self.registry.current_context()?.style();
        tracing::trace!(target: "plotbridge", kind = item.kind_name(), label = item.label(), count = item.count(), "plot item");
        self.engine.plot(style, &item);
        Ok(())
    }

    pub fn plot_line(&mut self, label: &str, data: XyData<'_>) -> Result<()> {
        self.plot(PlotItem::Line { label, data })
    }

    pub fn plot_scatter(&mut self, label: &str, data: XyData<'_>) -> Result<()> {
        self.plot(PlotItem::Scatter { label, data })
    }

    pub fn plot_stairs(&mut self, label: &str, data: XyData<'_>) -> Result<()> {
        self.plot(PlotItem::Stairs { label, data })
    }

    pub fn plot_shaded(&mut self, label: &str, data: XyData<'_>, yref: f64) -> Result<()> {
        self.plot(PlotItem::ShadedRef { label, data, yref })
    }

    pub fn plot_shaded_between(&mut self, label: &str, data: XyData<'_>, ys2: StridedView<'_>) -> Result<()> {
        self.plot(PlotItem::shaded_between(label, data, ys2)?)
    }

    pub fn plot_bars(&mut self, label: &str, data: XyData<'_>, width: f64) -> Result<()> {
        self.plot(PlotItem::Bars { label, data, width, horizontal: false })
    }

    /// Horizontal bars: positions (or the synthesized coordinate) run along Y, values along X.
    pub fn plot_bars_h(&mut self, label: &str, data: XyData<'_>, height: f64) -> Result<()> {
        self.plot(PlotItem::Bars { label, data, width: height, horizontal: true })
    }

    pub fn plot_bar_groups(
        &mut self,
        labels: &[&str],
        values: &[f64],
        groups: usize,
        width: f64,
        shift: f64,
        flags: BarGroupsFlags,
    ) -> Result<()> {
        self.plot(PlotItem::bar_groups(labels, values, groups, width, shift, flags, false)?)
    }

    pub fn plot_bar_groups_h(
        &mut self,
        labels: &[&str],
        values: &[f64],
        groups: usize,
        height: f64,
        shift: f64,
        flags: BarGroupsFlags,
    ) -> Result<()> {
        self.plot(PlotItem::bar_groups(labels, values, groups, height, shift, flags, true)?)
    }
}
