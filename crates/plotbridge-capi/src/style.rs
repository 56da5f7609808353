// File: crates/plotbridge-capi/src/style.rs
// Summary: Style handle access, color schemes, scoped overrides, next-item styles and name lookups.
// Notes:
// - A style handle is the address of a context's style record; it dies with its context.
// - Handle dereferences happen under the plotter lock so they serialize with every other call.

use std::ffi::{c_char, c_int, CStr};

use plotbridge_core::style::{self, PlotStyle};
use plotbridge_core::theme::ColorScheme;
use plotbridge_core::{fatal, Marker, StyleCol, StyleVar, Vec2, Vec4};

use crate::{check, count, with_plotter};

fn style_col(call: &str, raw: c_int) -> StyleCol {
    check(call, StyleCol::try_from_raw(raw))
}

fn style_var(call: &str, raw: c_int) -> StyleVar {
    check(call, StyleVar::try_from_raw(raw))
}

/// Run `f` on the style behind `handle` while holding the plotter lock.
///
/// # Safety
/// `handle` must come from `igpGetStyle` for a context that is still alive.
unsafe fn with_style<R>(call: &str, handle: *mut PlotStyle, f: impl FnOnce(&mut PlotStyle) -> R) -> R {
    if handle.is_null() {
        fatal(&format!("{call}: null style handle"));
    }
    with_plotter(|_| f(&mut *handle))
}

/// Style record of the current context.
#[no_mangle]
pub extern "C" fn igpGetStyle() -> *mut PlotStyle {
    with_plotter(|p| check("igpGetStyle", p.style_ptr()))
}

/// # Safety
/// `style` must be a live handle from `igpGetStyle`.
#[no_mangle]
pub unsafe extern "C" fn igpStyleGetColor(style: *mut PlotStyle, id: c_int) -> Vec4 {
    let col = style_col("igpStyleGetColor", id);
    with_style("igpStyleGetColor", style, |s| style::get_color(s, col))
}

/// # Safety
/// `style` must be a live handle from `igpGetStyle`.
#[no_mangle]
pub unsafe extern "C" fn igpStyleSetColor(style: *mut PlotStyle, id: c_int, color: Vec4) {
    let col = style_col("igpStyleSetColor", id);
    with_style("igpStyleSetColor", style, |s| style::set_color(s, col, color))
}

/// # Safety
/// `style` must be a live handle from `igpGetStyle`.
#[no_mangle]
pub unsafe extern "C" fn igpStyleGetVarFloat(style: *mut PlotStyle, id: c_int) -> f32 {
    let var = style_var("igpStyleGetVarFloat", id);
    with_style("igpStyleGetVarFloat", style, |s| style::get_var_float(s, var))
}

/// # Safety
/// `style` must be a live handle from `igpGetStyle`.
#[no_mangle]
pub unsafe extern "C" fn igpStyleGetVarInt(style: *mut PlotStyle, id: c_int) -> c_int {
    let var = style_var("igpStyleGetVarInt", id);
    with_style("igpStyleGetVarInt", style, |s| style::get_var_int(s, var))
}

/// # Safety
/// `style` must be a live handle from `igpGetStyle`.
#[no_mangle]
pub unsafe extern "C" fn igpStyleGetVarVec2(style: *mut PlotStyle, id: c_int) -> Vec2 {
    let var = style_var("igpStyleGetVarVec2", id);
    with_style("igpStyleGetVarVec2", style, |s| style::get_var_vec2(s, var))
}

/// # Safety
/// `style` must be a live handle from `igpGetStyle`.
#[no_mangle]
pub unsafe extern "C" fn igpStyleSetVarFloat(style: *mut PlotStyle, id: c_int, value: f32) {
    let var = style_var("igpStyleSetVarFloat", id);
    with_style("igpStyleSetVarFloat", style, |s| style::set_var_float(s, var, value))
}

/// # Safety
/// `style` must be a live handle from `igpGetStyle`.
#[no_mangle]
pub unsafe extern "C" fn igpStyleSetVarInt(style: *mut PlotStyle, id: c_int, value: c_int) {
    let var = style_var("igpStyleSetVarInt", id);
    with_style("igpStyleSetVarInt", style, |s| style::set_var_int(s, var, value))
}

/// # Safety
/// `style` must be a live handle from `igpGetStyle`.
#[no_mangle]
pub unsafe extern "C" fn igpStyleSetVarVec2(style: *mut PlotStyle, id: c_int, value: Vec2) {
    let var = style_var("igpStyleSetVarVec2", id);
    with_style("igpStyleSetVarVec2", style, |s| style::set_var_vec2(s, var, value))
}

/// Apply `scheme` to `dest`, or to the current context's style when `dest` is null.
unsafe fn apply_scheme(call: &str, dest: *mut PlotStyle, scheme: ColorScheme) {
    if dest.is_null() {
        with_plotter(|p| check(call, p.apply_color_scheme(scheme)));
    } else {
        with_style(call, dest, |s| style::apply_color_scheme(s, scheme));
    }
}

/// # Safety
/// `dest` is null or a live handle from `igpGetStyle`.
#[no_mangle]
pub unsafe extern "C" fn igpStyleColorsAuto(dest: *mut PlotStyle) {
    apply_scheme("igpStyleColorsAuto", dest, ColorScheme::Auto)
}

/// # Safety
/// `dest` is null or a live handle from `igpGetStyle`.
#[no_mangle]
pub unsafe extern "C" fn igpStyleColorsClassic(dest: *mut PlotStyle) {
    apply_scheme("igpStyleColorsClassic", dest, ColorScheme::Classic)
}

/// # Safety
/// `dest` is null or a live handle from `igpGetStyle`.
#[no_mangle]
pub unsafe extern "C" fn igpStyleColorsDark(dest: *mut PlotStyle) {
    apply_scheme("igpStyleColorsDark", dest, ColorScheme::Dark)
}

/// # Safety
/// `dest` is null or a live handle from `igpGetStyle`.
#[no_mangle]
pub unsafe extern "C" fn igpStyleColorsLight(dest: *mut PlotStyle) {
    apply_scheme("igpStyleColorsLight", dest, ColorScheme::Light)
}

#[no_mangle]
pub extern "C" fn igpPushStyleColor(idx: c_int, color: Vec4) {
    let col = style_col("igpPushStyleColor", idx);
    with_plotter(|p| check("igpPushStyleColor", p.push_style_color(col, color)))
}

#[no_mangle]
pub extern "C" fn igpPopStyleColor(n: c_int) {
    with_plotter(|p| check("igpPopStyleColor", p.pop_style_color(count(n))))
}

#[no_mangle]
pub extern "C" fn igpPushStyleVarFloat(idx: c_int, value: f32) {
    let var = style_var("igpPushStyleVarFloat", idx);
    with_plotter(|p| check("igpPushStyleVarFloat", p.push_style_var_float(var, value)))
}

#[no_mangle]
pub extern "C" fn igpPushStyleVarInt(idx: c_int, value: c_int) {
    let var = style_var("igpPushStyleVarInt", idx);
    with_plotter(|p| check("igpPushStyleVarInt", p.push_style_var_int(var, value)))
}

#[no_mangle]
pub extern "C" fn igpPushStyleVarVec2(idx: c_int, value: Vec2) {
    let var = style_var("igpPushStyleVarVec2", idx);
    with_plotter(|p| check("igpPushStyleVarVec2", p.push_style_var_vec2(var, value)))
}

#[no_mangle]
pub extern "C" fn igpPopStyleVar(n: c_int) {
    with_plotter(|p| check("igpPopStyleVar", p.pop_style_var(count(n))))
}

#[no_mangle]
pub extern "C" fn igpSetNextLineStyle(color: Vec4, weight: f32) {
    with_plotter(|p| p.set_next_line_style(color, weight))
}

#[no_mangle]
pub extern "C" fn igpSetNextFillStyle(color: Vec4, alpha_mod: f32) {
    with_plotter(|p| p.set_next_fill_style(color, alpha_mod))
}

#[no_mangle]
pub extern "C" fn igpSetNextMarkerStyle(marker: c_int, size: f32, fill: Vec4, weight: f32, outline: Vec4) {
    let marker = check("igpSetNextMarkerStyle", Marker::try_from_raw(marker));
    with_plotter(|p| p.set_next_marker_style(marker, size, fill, weight, outline))
}

#[no_mangle]
pub extern "C" fn igpSetNextErrorBarStyle(color: Vec4, size: f32, weight: f32) {
    with_plotter(|p| p.set_next_error_bar_style(color, size, weight))
}

#[no_mangle]
pub extern "C" fn igpGetLastItemColor() -> Vec4 {
    with_plotter(|p| check("igpGetLastItemColor", p.last_item_color()))
}

const STYLE_COL_NAMES: [&CStr; StyleCol::COUNT] = [
    c"Line",
    c"Fill",
    c"MarkerOutline",
    c"MarkerFill",
    c"ErrorBar",
    c"FrameBg",
    c"PlotBg",
    c"PlotBorder",
    c"LegendBg",
    c"LegendBorder",
    c"LegendText",
    c"TitleText",
    c"InlayText",
    c"AxisText",
    c"AxisGrid",
    c"AxisTick",
    c"AxisBg",
    c"AxisBgHovered",
    c"AxisBgActive",
    c"Selection",
    c"Crosshairs",
];

const MARKER_NAMES: [&CStr; Marker::COUNT] = [
    c"None",
    c"Circle",
    c"Square",
    c"Diamond",
    c"Up",
    c"Down",
    c"Left",
    c"Right",
    c"Cross",
    c"Plus",
    c"Asterisk",
];

/// Static NUL-terminated name of a style color.
#[no_mangle]
pub extern "C" fn igpGetStyleColorName(idx: c_int) -> *const c_char {
    let col = style_col("igpGetStyleColorName", idx);
    STYLE_COL_NAMES[col as usize].as_ptr()
}

/// Static NUL-terminated name of a marker ("None" for -1).
#[no_mangle]
pub extern "C" fn igpGetMarkerName(idx: c_int) -> *const c_char {
    let marker = check("igpGetMarkerName", Marker::try_from_raw(idx));
    // Marker::ALL starts at None (-1)
    MARKER_NAMES[(marker as i32 + 1) as usize].as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_names_agree_with_core_names() {
        for &col in StyleCol::ALL {
            assert_eq!(STYLE_COL_NAMES[col as usize].to_str(), Ok(col.name()));
        }
        for (i, &m) in Marker::ALL.iter().enumerate() {
            assert_eq!(MARKER_NAMES[i].to_str(), Ok(m.name()));
        }
    }
}
