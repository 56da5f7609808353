// File: crates/plotbridge-capi/src/setup.rs
// Summary: Setup entry points valid between igpBeginPlot and the first plot call or igpSetupFinish.
// Notes:
// - Null labels mean "no label" and are forwarded as None.
// - Formatter handles come from igpRegisterAxisFormatter; an unknown handle is fatal.

use std::ffi::{c_char, c_int};

use plotbridge_core::{
    fatal, Axis, AxisFlags, Condition, FormatterToken, LegendFlags, Location, MouseTextFlags, TickSpec,
};

use crate::{check, count, opt_str, str_array, str_or_empty, with_plotter};

fn axis(call: &str, raw: c_int) -> Axis {
    check(call, Axis::try_from_raw(raw))
}

fn condition(call: &str, raw: c_int) -> Condition {
    check(call, Condition::try_from_raw(raw))
}

fn location(call: &str, raw: c_int) -> Location {
    check(call, Location::try_from_raw(raw))
}

/// # Safety
/// `label` is null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn igpSetupAxis(ax: c_int, label: *const c_char, flags: c_int) {
    let ax = axis("igpSetupAxis", ax);
    let label = opt_str(label);
    with_plotter(|p| check("igpSetupAxis", p.setup_axis(ax, label.as_deref(), AxisFlags(flags))))
}

#[no_mangle]
pub extern "C" fn igpSetupAxisLimits(ax: c_int, v_min: f64, v_max: f64, cond: c_int) {
    let ax = axis("igpSetupAxisLimits", ax);
    let cond = condition("igpSetupAxisLimits", cond);
    with_plotter(|p| check("igpSetupAxisLimits", p.setup_axis_limits(ax, v_min, v_max, cond)))
}

/// # Safety
/// `fmt` is null or a NUL-terminated printf-style format.
#[no_mangle]
pub unsafe extern "C" fn igpSetupAxisFormat(ax: c_int, fmt: *const c_char) {
    let ax = axis("igpSetupAxisFormat", ax);
    let fmt = str_or_empty(fmt);
    with_plotter(|p| check("igpSetupAxisFormat", p.setup_axis_format(ax, &fmt)))
}

/// Route tick labels of `ax` through the formatter registered under `handle`.
#[no_mangle]
pub extern "C" fn igpSetupAxisFormatCallback(ax: c_int, handle: usize) {
    let ax = axis("igpSetupAxisFormatCallback", ax);
    let Some(token) = FormatterToken::from_raw(handle) else {
        fatal("igpSetupAxisFormatCallback: formatter handle 0 is never issued")
    };
    with_plotter(|p| check("igpSetupAxisFormatCallback", p.setup_axis_format_callback(ax, token)))
}

/// # Safety
/// `labels` is null or holds `n_ticks` strings; the caller keeps them alive for the call.
unsafe fn ticks(call: &str, ax: c_int, spec: TickSpec<'_>, labels: *const *const c_char, keep_default: bool) {
    let ax = axis(call, ax);
    let owned = str_array(labels, spec.count());
    let names: Option<Vec<&str>> = owned.as_ref().map(|v| v.iter().map(|l| l.as_ref()).collect());
    with_plotter(|p| check(call, p.setup_axis_ticks(ax, spec, names.as_deref(), keep_default)))
}

/// Explicit tick positions with optional labels.
///
/// # Safety
/// `values` holds `n_ticks` doubles; `labels` is null or holds `n_ticks` strings.
#[no_mangle]
pub unsafe extern "C" fn igpSetupAxisTickValues(
    ax: c_int,
    values: *const f64,
    n_ticks: c_int,
    labels: *const *const c_char,
    keep_default: bool,
) {
    let n = count(n_ticks);
    let values: &[f64] = if values.is_null() || n == 0 { &[] } else { std::slice::from_raw_parts(values, n) };
    ticks("igpSetupAxisTickValues", ax, TickSpec::Values(values), labels, keep_default)
}

/// `n_ticks` evenly spaced ticks from `v_min` to `v_max` inclusive.
///
/// # Safety
/// `labels` is null or holds `n_ticks` strings.
#[no_mangle]
pub unsafe extern "C" fn igpSetupAxisTickRange(
    ax: c_int,
    v_min: f64,
    v_max: f64,
    n_ticks: c_int,
    labels: *const *const c_char,
    keep_default: bool,
) {
    let spec = TickSpec::Range { min: v_min, max: v_max, n: count(n_ticks) };
    ticks("igpSetupAxisTickRange", ax, spec, labels, keep_default)
}

/// # Safety
/// `x_label`/`y_label` are null or NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn igpSetupAxes(x_label: *const c_char, y_label: *const c_char, x_flags: c_int, y_flags: c_int) {
    let (x, y) = (opt_str(x_label), opt_str(y_label));
    with_plotter(|p| {
        check("igpSetupAxes", p.setup_axes(x.as_deref(), y.as_deref(), AxisFlags(x_flags), AxisFlags(y_flags)))
    })
}

#[no_mangle]
pub extern "C" fn igpSetupAxesLimits(x_min: f64, x_max: f64, y_min: f64, y_max: f64, cond: c_int) {
    let cond = condition("igpSetupAxesLimits", cond);
    with_plotter(|p| check("igpSetupAxesLimits", p.setup_axes_limits(x_min, x_max, y_min, y_max, cond)))
}

#[no_mangle]
pub extern "C" fn igpSetupLegend(loc: c_int, flags: c_int) {
    let loc = location("igpSetupLegend", loc);
    with_plotter(|p| check("igpSetupLegend", p.setup_legend(loc, LegendFlags(flags))))
}

#[no_mangle]
pub extern "C" fn igpSetupMouseText(loc: c_int, flags: c_int) {
    let loc = location("igpSetupMouseText", loc);
    with_plotter(|p| check("igpSetupMouseText", p.setup_mouse_text(loc, MouseTextFlags(flags))))
}

#[no_mangle]
pub extern "C" fn igpSetupFinish() {
    with_plotter(|p| check("igpSetupFinish", p.setup_finish()))
}
