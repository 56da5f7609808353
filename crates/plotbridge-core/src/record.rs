// File: crates/plotbridge-core/src/record.rs
// Summary: In-process reference engine that records one plot frame: setup state, materialized items, formatted ticks.
// Notes:
// - The frame log is cleared at every begin_plot and capped at a fixed number of events.
// - Auto item colors cycle the default colormap per plot, like the native engine does.

use crate::axis::{SetupCommand, TickSpec};
use crate::context::UiContext;
use crate::engine::{NextItemStyle, PlotEngine, SubplotsSpec};
use crate::format::{label_from_buffer, FormatterToken, TickFormat, TICK_LABEL_CAPACITY};
use crate::geometry::{Point, Range, Rect, Vec2, Vec4};
use crate::grid::linspace;
use crate::series::PlotItem;
use crate::style::PlotStyle;
use crate::theme::deep_color;
use crate::types::{
    is_auto_color, Axis, AxisFlags, Condition, LegendFlags, Location, MouseTextFlags, PlotFlags, StyleCol,
    SubplotFlags,
};

pub const DEFAULT_RECORDING_CAPACITY: usize = 4096;
/// Tick count used to exercise a callback formatter on an axis without explicit ticks.
pub const DEFAULT_TICK_COUNT: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub enum AxisFormatRecord {
    Printf(String),
    Callback(FormatterToken),
}

/// Setup state of one axis for the current plot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisState {
    pub enabled: bool,
    pub label: Option<String>,
    pub flags: AxisFlags,
    pub limits: Option<(Range, Condition)>,
    pub format: Option<AxisFormatRecord>,
    pub ticks: Vec<f64>,
    pub tick_labels: Vec<String>,
    pub keep_default: bool,
    /// Labels produced by the callback formatter at end_plot, one per tick.
    pub formatted: Vec<String>,
}

impl AxisState {
    fn fresh(axis: Axis) -> Self {
        Self { enabled: matches!(axis, Axis::X1 | Axis::Y1), ..Self::default() }
    }

    /// Positions a formatter is run on: explicit ticks, else an even spread over the limits.
    pub fn tick_positions(&self) -> Vec<f64> {
        if !self.ticks.is_empty() {
            return self.ticks.clone();
        }
        let r = self.limits.map(|(r, _)| r).unwrap_or(Range::new(0.0, 1.0));
        linspace(r.min, r.max, DEFAULT_TICK_COUNT)
    }
}

/// One plotted item with its data materialized in plot coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemRecord {
    pub kind: &'static str,
    pub label: Option<String>,
    /// Per-item labels of grouped bars.
    pub item_labels: Vec<String>,
    pub points: Vec<Point>,
    /// Second curve of a shaded-between item.
    pub ys2: Vec<f64>,
    pub reference: Option<f64>,
    pub width: Option<f64>,
    pub color: Vec4,
    pub next_styles: Vec<NextItemStyle>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Recorded {
    BeginPlot { title: String, size: Vec2, flags: PlotFlags },
    EndPlot,
    BeginSubplots { title: String, rows: usize, cols: usize, flags: SubplotFlags },
    EndSubplots,
    Setup(&'static str),
    Item(ItemRecord),
}

#[derive(Debug)]
pub struct RecordingEngine {
    capacity: usize,
    events: Vec<Recorded>,
    dropped: usize,
    axes: Vec<AxisState>,
    legend: Option<(Location, LegendFlags)>,
    mouse_text: Option<(Location, MouseTextFlags)>,
    setup_finished: bool,
    pending: Vec<NextItemStyle>,
    items_in_plot: usize,
    last_color: Option<Vec4>,
    plots_begun: usize,
    subplot_depth: usize,
    ui: Option<UiContext>,
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_RECORDING_CAPACITY)
    }
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            events: Vec::new(),
            dropped: 0,
            axes: Axis::ALL.iter().map(|&a| AxisState::fresh(a)).collect(),
            legend: None,
            mouse_text: None,
            setup_finished: false,
            pending: Vec::new(),
            items_in_plot: 0,
            last_color: None,
            plots_begun: 0,
            subplot_depth: 0,
            ui: None,
        }
    }

    pub fn events(&self) -> &[Recorded] {
        &self.events
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemRecord> {
        self.events.iter().filter_map(|e| match e {
            Recorded::Item(item) => Some(item),
            _ => None,
        })
    }

    pub fn axis(&self, axis: Axis) -> &AxisState {
        &self.axes[axis as usize]
    }

    pub fn legend(&self) -> Option<(Location, LegendFlags)> {
        self.legend
    }

    pub fn mouse_text(&self) -> Option<(Location, MouseTextFlags)> {
        self.mouse_text
    }

    pub fn setup_finished(&self) -> bool {
        self.setup_finished
    }

    /// Events discarded because the frame log was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn plots_begun(&self) -> usize {
        self.plots_begun
    }

    /// Subplot grids currently open.
    pub fn subplot_depth(&self) -> usize {
        self.subplot_depth
    }

    /// X1/Y1 limits as one rectangle, once both have been set up.
    pub fn primary_limits(&self) -> Option<Rect> {
        let (x, _) = self.axis(Axis::X1).limits?;
        let (y, _) = self.axis(Axis::Y1).limits?;
        Some(Rect { x, y })
    }

    pub fn ui_context(&self) -> Option<UiContext> {
        self.ui
    }

    fn push(&mut self, event: Recorded) {
        if self.events.len() >= self.capacity {
            if self.dropped == 0 {
                tracing::warn!(target: "plotbridge", capacity = self.capacity, "recording full; dropping events");
            }
            self.dropped += 1;
            return;
        }
        self.events.push(event);
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisState {
        &mut self.axes[axis as usize]
    }

    fn resolve_color(&self, style: &PlotStyle) -> Vec4 {
        let next = self.pending.iter().find_map(|n| match *n {
            NextItemStyle::Line { color, .. } | NextItemStyle::Fill { color, .. } if !is_auto_color(color) => {
                Some(color)
            }
            _ => None,
        });
        next.or_else(|| {
            let line = style.colors[StyleCol::Line as usize];
            (!is_auto_color(line)).then_some(line)
        })
        .unwrap_or_else(|| deep_color(self.items_in_plot))
    }
}

fn materialize(item: &PlotItem<'_>) -> (Vec<Point>, Vec<String>) {
    match item {
        PlotItem::Line { data, .. }
        | PlotItem::Scatter { data, .. }
        | PlotItem::Stairs { data, .. }
        | PlotItem::ShadedRef { data, .. }
        | PlotItem::ShadedBetween { data, .. }
        | PlotItem::Bars { data, horizontal: false, .. } => (data.points().collect(), Vec::new()),
        // position runs along Y, value along X
        PlotItem::Bars { data, horizontal: true, .. } => {
            (data.points().map(|p| Point::new(p.y, p.x)).collect(), Vec::new())
        }
        PlotItem::BarGroups { labels, values, groups, shift, horizontal, .. } => {
            let groups = (*groups).max(1);
            let mut points = Vec::with_capacity(values.len());
            for (i, &v) in values.iter().enumerate() {
                let pos = *shift + (i % groups) as f64;
                points.push(if *horizontal { Point::new(v, pos) } else { Point::new(pos, v) });
            }
            (points, labels.iter().map(|l| l.to_string()).collect())
        }
    }
}

impl PlotEngine for RecordingEngine {
    fn bind_ui_context(&mut self, ui: Option<UiContext>) {
        self.ui = ui;
    }

    fn begin_plot(&mut self, _style: &PlotStyle, title: &str, size: Vec2, flags: PlotFlags) -> bool {
        self.events.clear();
        self.dropped = 0;
        self.axes = Axis::ALL.iter().map(|&a| AxisState::fresh(a)).collect();
        self.legend = None;
        self.mouse_text = None;
        self.setup_finished = false;
        self.pending.clear();
        self.items_in_plot = 0;
        self.plots_begun += 1;
        self.push(Recorded::BeginPlot { title: title.to_owned(), size, flags });
        true
    }

    fn end_plot(&mut self, _style: &PlotStyle, formatters: &mut dyn TickFormat) {
        for axis in self.axes.iter_mut() {
            let Some(AxisFormatRecord::Callback(token)) = axis.format else { continue };
            axis.formatted = axis
                .tick_positions()
                .into_iter()
                .map(|v| {
                    let mut buf = [0u8; TICK_LABEL_CAPACITY];
                    formatters.format_tick(token, v, &mut buf);
                    label_from_buffer(&buf).to_owned()
                })
                .collect();
        }
        self.setup_finished = true;
        self.push(Recorded::EndPlot);
    }

    fn begin_subplots(&mut self, _style: &PlotStyle, spec: SubplotsSpec<'_>) -> bool {
        self.subplot_depth += 1;
        self.push(Recorded::BeginSubplots {
            title: spec.title.to_owned(),
            rows: spec.rows,
            cols: spec.cols,
            flags: spec.flags,
        });
        true
    }

    fn end_subplots(&mut self) {
        self.subplot_depth = self.subplot_depth.saturating_sub(1);
        self.push(Recorded::EndSubplots);
    }

    fn setup(&mut self, _style: &PlotStyle, command: &SetupCommand<'_>) {
        match *command {
            SetupCommand::Axis { axis, label, flags } => {
                let a = self.axis_mut(axis);
                a.enabled = true;
                a.label = label.map(str::to_owned);
                a.flags = flags;
            }
            SetupCommand::AxisLimits { axis, min, max, cond } => {
                self.axis_mut(axis).limits = Some((Range::new(min, max), cond));
            }
            SetupCommand::AxisFormat { axis, format } => {
                self.axis_mut(axis).format = Some(AxisFormatRecord::Printf(format.to_owned()));
            }
            SetupCommand::AxisFormatCallback { axis, token } => {
                self.axis_mut(axis).format = Some(AxisFormatRecord::Callback(token));
            }
            SetupCommand::AxisTicks { axis, ticks, labels, keep_default } => {
                let a = self.axis_mut(axis);
                a.ticks = ticks.positions();
                a.tick_labels = labels.unwrap_or_default().iter().map(|l| l.to_string()).collect();
                a.keep_default = keep_default;
                if let TickSpec::Range { .. } = ticks {
                    tracing::trace!(target: "plotbridge", ?axis, n = a.ticks.len(), "tick range expanded");
                }
            }
            SetupCommand::Axes { x_label, y_label, x_flags, y_flags } => {
                for (axis, label, flags) in [(Axis::X1, x_label, x_flags), (Axis::Y1, y_label, y_flags)] {
                    let a = self.axis_mut(axis);
                    a.enabled = true;
                    a.label = label.map(str::to_owned);
                    a.flags = flags;
                }
            }
            SetupCommand::AxesLimits { x_min, x_max, y_min, y_max, cond } => {
                self.axis_mut(Axis::X1).limits = Some((Range::new(x_min, x_max), cond));
                self.axis_mut(Axis::Y1).limits = Some((Range::new(y_min, y_max), cond));
            }
            SetupCommand::Legend { location, flags } => self.legend = Some((location, flags)),
            SetupCommand::MouseText { location, flags } => self.mouse_text = Some((location, flags)),
            SetupCommand::Finish => self.setup_finished = true,
        }
        self.push(Recorded::Setup(command.name()));
    }

    fn set_next_item_style(&mut self, next: NextItemStyle) {
        self.pending.push(next);
    }

    fn plot(&mut self, style: &PlotStyle, item: &PlotItem<'_>) {
        // the first item implicitly ends setup
        self.setup_finished = true;
        let color = self.resolve_color(style);
        let (points, item_labels) = materialize(item);
        let (ys2, reference, width) = match item {
            PlotItem::ShadedBetween { ys2, .. } => (ys2.to_vec(), None, None),
            PlotItem::ShadedRef { yref, .. } => (Vec::new(), Some(*yref), None),
            PlotItem::Bars { width, .. } | PlotItem::BarGroups { width, .. } => (Vec::new(), None, Some(*width)),
            _ => (Vec::new(), None, None),
        };
        let record = ItemRecord {
            kind: item.kind_name(),
            label: item.label().map(str::to_owned),
            item_labels,
            points,
            ys2,
            reference,
            width,
            color,
            next_styles: std::mem::take(&mut self.pending),
        };
        self.items_in_plot += 1;
        self.last_color = Some(color);
        self.push(Recorded::Item(record));
    }

    fn last_item_color(&self, _style: &PlotStyle) -> Vec4 {
        self.last_color.unwrap_or_default()
    }
}
