// File: crates/plotbridge-core/src/style.rs
// Summary: Native-layout style record, the static StyleVar accessor table, and scoped override stacks.
// Notes:
// - STYLE_VARS is indexed by `StyleVar as usize`; entry order must follow the enum.
// - Asking an entry for a kind it does not hold is fatal, never a silent reinterpretation.

use crate::error::fatal;
use crate::geometry::{Vec2, Vec4};
use crate::theme::ColorScheme;
use crate::types::{Colormap, Marker, StyleCol, StyleVar, ValueKind};

/// Plot style record. Field order and types follow the engine's struct so a
/// pointer to it can be handed across the C surface as the style handle.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotStyle {
    // item styling
    pub line_weight: f32,
    pub marker: i32,
    pub marker_size: f32,
    pub marker_weight: f32,
    pub fill_alpha: f32,
    pub error_bar_size: f32,
    pub error_bar_weight: f32,
    pub digital_bit_height: f32,
    pub digital_bit_gap: f32,
    // plot styling
    pub plot_border_size: f32,
    pub minor_alpha: f32,
    pub major_tick_len: Vec2,
    pub minor_tick_len: Vec2,
    pub major_tick_size: Vec2,
    pub minor_tick_size: Vec2,
    pub major_grid_size: Vec2,
    pub minor_grid_size: Vec2,
    pub plot_padding: Vec2,
    pub label_padding: Vec2,
    pub legend_padding: Vec2,
    pub legend_inner_padding: Vec2,
    pub legend_spacing: Vec2,
    pub mouse_pos_padding: Vec2,
    pub annotation_padding: Vec2,
    pub fit_padding: Vec2,
    pub plot_default_size: Vec2,
    pub plot_min_size: Vec2,
    pub colors: [Vec4; StyleCol::COUNT],
    pub colormap: i32,
    pub use_local_time: bool,
    pub use_iso8601: bool,
    pub use_24_hour_clock: bool,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            line_weight: 1.0,
            marker: Marker::None as i32,
            marker_size: 4.0,
            marker_weight: 1.0,
            fill_alpha: 1.0,
            error_bar_size: 5.0,
            error_bar_weight: 1.5,
            digital_bit_height: 8.0,
            digital_bit_gap: 4.0,
            plot_border_size: 1.0,
            minor_alpha: 0.25,
            major_tick_len: Vec2::new(10.0, 10.0),
            minor_tick_len: Vec2::new(5.0, 5.0),
            major_tick_size: Vec2::new(1.0, 1.0),
            minor_tick_size: Vec2::new(1.0, 1.0),
            major_grid_size: Vec2::new(1.0, 1.0),
            minor_grid_size: Vec2::new(1.0, 1.0),
            plot_padding: Vec2::new(10.0, 10.0),
            label_padding: Vec2::new(5.0, 5.0),
            legend_padding: Vec2::new(10.0, 10.0),
            legend_inner_padding: Vec2::new(5.0, 5.0),
            legend_spacing: Vec2::new(5.0, 0.0),
            mouse_pos_padding: Vec2::new(10.0, 10.0),
            annotation_padding: Vec2::new(2.0, 2.0),
            fit_padding: Vec2::new(0.0, 0.0),
            plot_default_size: Vec2::new(400.0, 300.0),
            plot_min_size: Vec2::new(200.0, 150.0),
            colors: ColorScheme::Auto.palette(),
            colormap: Colormap::Deep as i32,
            use_local_time: false,
            use_iso8601: false,
            use_24_hour_clock: false,
        }
    }
}

impl PlotStyle {
    /// Engine defaults with the given palette.
    pub fn with_scheme(scheme: ColorScheme) -> Self {
        let mut s = Self::default();
        apply_color_scheme(&mut s, scheme);
        s
    }
}

/// A style variable value tagged with its kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleValue {
    Float(f32),
    Int(i32),
    Vec2(Vec2),
}

impl StyleValue {
    pub const fn kind(&self) -> ValueKind {
        match self {
            StyleValue::Float(_) => ValueKind::Float,
            StyleValue::Int(_) => ValueKind::Int,
            StyleValue::Vec2(_) => ValueKind::Vec2,
        }
    }

    /// Bitwise equality (NaN payloads and signed zeros included).
    pub fn bits_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StyleValue::Float(a), StyleValue::Float(b)) => a.to_bits() == b.to_bits(),
            (StyleValue::Int(a), StyleValue::Int(b)) => a == b,
            (StyleValue::Vec2(a), StyleValue::Vec2(b)) => a.bits_eq(b),
            _ => false,
        }
    }
}

impl From<f32> for StyleValue {
    fn from(v: f32) -> Self { StyleValue::Float(v) }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self { StyleValue::Float(v as f32) }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self { StyleValue::Int(v) }
}

impl From<Vec2> for StyleValue {
    fn from(v: Vec2) -> Self { StyleValue::Vec2(v) }
}

impl From<Marker> for StyleValue {
    fn from(m: Marker) -> Self { StyleValue::Int(m as i32) }
}

/// Typed field accessor pair for one style variable.
#[derive(Clone, Copy)]
pub enum VarAccessor {
    Float { get: fn(&PlotStyle) -> f32, set: fn(&mut PlotStyle, f32) },
    Int { get: fn(&PlotStyle) -> i32, set: fn(&mut PlotStyle, i32) },
    Vec2 { get: fn(&PlotStyle) -> Vec2, set: fn(&mut PlotStyle, Vec2) },
}

impl VarAccessor {
    pub const fn kind(&self) -> ValueKind {
        match self {
            VarAccessor::Float { .. } => ValueKind::Float,
            VarAccessor::Int { .. } => ValueKind::Int,
            VarAccessor::Vec2 { .. } => ValueKind::Vec2,
        }
    }
}

macro_rules! var {
    (Float, $field:ident) => {
        VarAccessor::Float { get: |s| s.$field, set: |s, v| s.$field = v }
    };
    (Int, $field:ident) => {
        VarAccessor::Int { get: |s| s.$field, set: |s, v| s.$field = v }
    };
    (Vec2, $field:ident) => {
        VarAccessor::Vec2 { get: |s| s.$field, set: |s, v| s.$field = v }
    };
}

/// Accessor table, one entry per `StyleVar` in declaration order.
pub static STYLE_VARS: [VarAccessor; StyleVar::COUNT] = [
    var!(Float, line_weight),
    var!(Int, marker),
    var!(Float, marker_size),
    var!(Float, marker_weight),
    var!(Float, fill_alpha),
    var!(Float, error_bar_size),
    var!(Float, error_bar_weight),
    var!(Float, digital_bit_height),
    var!(Float, digital_bit_gap),
    var!(Float, plot_border_size),
    var!(Float, minor_alpha),
    var!(Vec2, major_tick_len),
    var!(Vec2, minor_tick_len),
    var!(Vec2, major_tick_size),
    var!(Vec2, minor_tick_size),
    var!(Vec2, major_grid_size),
    var!(Vec2, minor_grid_size),
    var!(Vec2, plot_padding),
    var!(Vec2, label_padding),
    var!(Vec2, legend_padding),
    var!(Vec2, legend_inner_padding),
    var!(Vec2, legend_spacing),
    var!(Vec2, mouse_pos_padding),
    var!(Vec2, annotation_padding),
    var!(Vec2, fit_padding),
    var!(Vec2, plot_default_size),
    var!(Vec2, plot_min_size),
];

#[inline]
pub fn accessor(var: StyleVar) -> &'static VarAccessor {
    &STYLE_VARS[var as usize]
}

#[cold]
#[track_caller]
fn kind_mismatch(var: StyleVar, requested: ValueKind) -> ! {
    fatal(&format!(
        "StyleVar/value type mismatch: {var:?} holds {:?}, requested {requested:?}",
        var.kind()
    ))
}

#[track_caller]
pub fn get_var_float(style: &PlotStyle, var: StyleVar) -> f32 {
    match accessor(var) {
        VarAccessor::Float { get, .. } => get(style),
        _ => kind_mismatch(var, ValueKind::Float),
    }
}

#[track_caller]
pub fn get_var_int(style: &PlotStyle, var: StyleVar) -> i32 {
    match accessor(var) {
        VarAccessor::Int { get, .. } => get(style),
        _ => kind_mismatch(var, ValueKind::Int),
    }
}

#[track_caller]
pub fn get_var_vec2(style: &PlotStyle, var: StyleVar) -> Vec2 {
    match accessor(var) {
        VarAccessor::Vec2 { get, .. } => get(style),
        _ => kind_mismatch(var, ValueKind::Vec2),
    }
}

#[track_caller]
pub fn set_var_float(style: &mut PlotStyle, var: StyleVar, value: f32) {
    match accessor(var) {
        VarAccessor::Float { set, .. } => set(style, value),
        _ => kind_mismatch(var, ValueKind::Float),
    }
}

#[track_caller]
pub fn set_var_int(style: &mut PlotStyle, var: StyleVar, value: i32) {
    match accessor(var) {
        VarAccessor::Int { set, .. } => set(style, value),
        _ => kind_mismatch(var, ValueKind::Int),
    }
}

#[track_caller]
pub fn set_var_vec2(style: &mut PlotStyle, var: StyleVar, value: Vec2) {
    match accessor(var) {
        VarAccessor::Vec2 { set, .. } => set(style, value),
        _ => kind_mismatch(var, ValueKind::Vec2),
    }
}

/// Read a variable in whatever kind it holds.
pub fn get_var(style: &PlotStyle, var: StyleVar) -> StyleValue {
    match accessor(var) {
        VarAccessor::Float { get, .. } => StyleValue::Float(get(style)),
        VarAccessor::Int { get, .. } => StyleValue::Int(get(style)),
        VarAccessor::Vec2 { get, .. } => StyleValue::Vec2(get(style)),
    }
}

#[track_caller]
pub fn set_var(style: &mut PlotStyle, var: StyleVar, value: StyleValue) {
    match (accessor(var), value) {
        (VarAccessor::Float { set, .. }, StyleValue::Float(v)) => set(style, v),
        (VarAccessor::Int { set, .. }, StyleValue::Int(v)) => set(style, v),
        (VarAccessor::Vec2 { set, .. }, StyleValue::Vec2(v)) => set(style, v),
        (_, v) => kind_mismatch(var, v.kind()),
    }
}

pub fn get_color(style: &PlotStyle, col: StyleCol) -> Vec4 {
    style.colors[col as usize]
}

pub fn set_color(style: &mut PlotStyle, col: StyleCol, color: Vec4) {
    style.colors[col as usize] = color;
}

pub fn apply_color_scheme(style: &mut PlotStyle, scheme: ColorScheme) {
    style.colors = scheme.palette();
}

pub fn style_color_name(col: StyleCol) -> &'static str {
    col.name()
}

pub fn marker_name(marker: Marker) -> &'static str {
    marker.name()
}

/// Saved values for scoped overrides; pops restore in LIFO order.
#[derive(Clone, Debug, Default)]
pub struct StyleStack {
    colors: Vec<(StyleCol, Vec4)>,
    vars: Vec<(StyleVar, StyleValue)>,
}

impl StyleStack {
    pub fn new() -> Self { Self::default() }

    pub fn push_color(&mut self, style: &mut PlotStyle, col: StyleCol, color: Vec4) {
        self.colors.push((col, get_color(style, col)));
        set_color(style, col, color);
    }

    #[track_caller]
    pub fn pop_color(&mut self, style: &mut PlotStyle, count: usize) {
        if count > self.colors.len() {
            fatal(&format!(
                "pop_style_color: popping {count} but only {} pushed",
                self.colors.len()
            ));
        }
        for _ in 0..count {
            if let Some((col, prev)) = self.colors.pop() {
                set_color(style, col, prev);
            }
        }
    }

    /// Override `var`; a kind mismatch is fatal and leaves the stack untouched.
    #[track_caller]
    pub fn push_var(&mut self, style: &mut PlotStyle, var: StyleVar, value: StyleValue) {
        let prev = get_var(style, var);
        set_var(style, var, value);
        self.vars.push((var, prev));
    }

    #[track_caller]
    pub fn pop_var(&mut self, style: &mut PlotStyle, count: usize) {
        if count > self.vars.len() {
            fatal(&format!(
                "pop_style_var: popping {count} but only {} pushed",
                self.vars.len()
            ));
        }
        for _ in 0..count {
            if let Some((var, prev)) = self.vars.pop() {
                set_var(style, var, prev);
            }
        }
    }
}
