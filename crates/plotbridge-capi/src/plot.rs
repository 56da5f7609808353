// File: crates/plotbridge-capi/src/plot.rs
// Summary: Series entry points: value layout (count, xscale, x0) and XY layout with an explicit byte stride.
// Notes:
// - Value-layout calls read tightly packed doubles.
// - XY calls share one stride for every array; 0 or negative means sizeof(double).

use std::ffi::{c_char, c_int};

use plotbridge_core::{BarGroupsFlags, PlotItem, XyData};

use crate::{check, count, doubles, str_array, str_or_empty, stride, with_plotter};

const PACKED: usize = std::mem::size_of::<f64>();

fn forward(call: &str, item: PlotItem<'_>) {
    with_plotter(|p| check(call, p.plot(item)))
}

/// # Safety
/// `values` holds `count` doubles.
unsafe fn values<'a>(values: *const f64, n: c_int, xscale: f64, x0: f64) -> XyData<'a> {
    XyData::values(doubles(values, count(n), PACKED), xscale, x0)
}

/// # Safety
/// `xs` and `ys` each hold `count` doubles spaced `stride` bytes apart.
unsafe fn xy<'a>(xs: *const f64, ys: *const f64, n: c_int, s: c_int) -> XyData<'a> {
    let (n, s) = (count(n), stride(s));
    XyData::xy_unchecked(doubles(xs, n, s), doubles(ys, n, s))
}

/// # Safety
/// `label` is a NUL-terminated string; `values` holds `count` doubles.
#[no_mangle]
pub unsafe extern "C" fn igpPlotLine(label: *const c_char, vals: *const f64, n: c_int, xscale: f64, x0: f64) {
    let label = str_or_empty(label);
    forward("igpPlotLine", PlotItem::Line { label: &label, data: values(vals, n, xscale, x0) })
}

/// # Safety
/// `label` is a NUL-terminated string; `xs`/`ys` hold `count` doubles `stride` bytes apart.
#[no_mangle]
pub unsafe extern "C" fn igpPlotLineXY(label: *const c_char, xs: *const f64, ys: *const f64, n: c_int, s: c_int) {
    let label = str_or_empty(label);
    forward("igpPlotLineXY", PlotItem::Line { label: &label, data: xy(xs, ys, n, s) })
}

/// # Safety
/// See [`igpPlotLine`].
#[no_mangle]
pub unsafe extern "C" fn igpPlotScatter(label: *const c_char, vals: *const f64, n: c_int, xscale: f64, x0: f64) {
    let label = str_or_empty(label);
    forward("igpPlotScatter", PlotItem::Scatter { label: &label, data: values(vals, n, xscale, x0) })
}

/// # Safety
/// See [`igpPlotLineXY`].
#[no_mangle]
pub unsafe extern "C" fn igpPlotScatterXY(label: *const c_char, xs: *const f64, ys: *const f64, n: c_int, s: c_int) {
    let label = str_or_empty(label);
    forward("igpPlotScatterXY", PlotItem::Scatter { label: &label, data: xy(xs, ys, n, s) })
}

/// # Safety
/// See [`igpPlotLine`].
#[no_mangle]
pub unsafe extern "C" fn igpPlotStairs(label: *const c_char, vals: *const f64, n: c_int, xscale: f64, x0: f64) {
    let label = str_or_empty(label);
    forward("igpPlotStairs", PlotItem::Stairs { label: &label, data: values(vals, n, xscale, x0) })
}

/// # Safety
/// See [`igpPlotLineXY`].
#[no_mangle]
pub unsafe extern "C" fn igpPlotStairsXY(label: *const c_char, xs: *const f64, ys: *const f64, n: c_int, s: c_int) {
    let label = str_or_empty(label);
    forward("igpPlotStairsXY", PlotItem::Stairs { label: &label, data: xy(xs, ys, n, s) })
}

/// # Safety
/// See [`igpPlotLine`].
#[no_mangle]
pub unsafe extern "C" fn igpPlotShadedRef(
    label: *const c_char,
    vals: *const f64,
    n: c_int,
    yref: f64,
    xscale: f64,
    x0: f64,
) {
    let label = str_or_empty(label);
    forward("igpPlotShadedRef", PlotItem::ShadedRef { label: &label, data: values(vals, n, xscale, x0), yref })
}

/// # Safety
/// See [`igpPlotLineXY`].
#[no_mangle]
pub unsafe extern "C" fn igpPlotShadedRefXY(
    label: *const c_char,
    xs: *const f64,
    ys: *const f64,
    yref: f64,
    n: c_int,
    s: c_int,
) {
    let label = str_or_empty(label);
    forward("igpPlotShadedRefXY", PlotItem::ShadedRef { label: &label, data: xy(xs, ys, n, s), yref })
}

/// Area between two value-layout curves sharing the synthesized X.
///
/// # Safety
/// `label` is a NUL-terminated string; `ys1`/`ys2` hold `count` doubles.
#[no_mangle]
pub unsafe extern "C" fn igpPlotShadedLines(
    label: *const c_char,
    ys1: *const f64,
    ys2: *const f64,
    n: c_int,
    xscale: f64,
    x0: f64,
) {
    let label = str_or_empty(label);
    let item = PlotItem::ShadedBetween {
        label: &label,
        data: values(ys1, n, xscale, x0),
        ys2: doubles(ys2, count(n), PACKED),
    };
    forward("igpPlotShadedLines", item)
}

/// # Safety
/// `label` is a NUL-terminated string; `xs`/`ys1`/`ys2` hold `count` doubles `stride` bytes apart.
#[no_mangle]
pub unsafe extern "C" fn igpPlotShadedLinesXY(
    label: *const c_char,
    xs: *const f64,
    ys1: *const f64,
    ys2: *const f64,
    n: c_int,
    s: c_int,
) {
    let label = str_or_empty(label);
    let item = PlotItem::ShadedBetween {
        label: &label,
        data: xy(xs, ys1, n, s),
        ys2: doubles(ys2, count(n), stride(s)),
    };
    forward("igpPlotShadedLinesXY", item)
}

/// Bars at x = x0 + i.
///
/// # Safety
/// See [`igpPlotLine`].
#[no_mangle]
pub unsafe extern "C" fn igpPlotBars(label: *const c_char, vals: *const f64, n: c_int, bar_width: f64, x0: f64) {
    let label = str_or_empty(label);
    let item = PlotItem::Bars { label: &label, data: values(vals, n, 1.0, x0), width: bar_width, horizontal: false };
    forward("igpPlotBars", item)
}

/// # Safety
/// See [`igpPlotLineXY`].
#[no_mangle]
pub unsafe extern "C" fn igpPlotBarsXY(
    label: *const c_char,
    xs: *const f64,
    ys: *const f64,
    n: c_int,
    bar_width: f64,
    s: c_int,
) {
    let label = str_or_empty(label);
    let item = PlotItem::Bars { label: &label, data: xy(xs, ys, n, s), width: bar_width, horizontal: false };
    forward("igpPlotBarsXY", item)
}

/// Horizontal bars at y = y0 + i; `values` are the bar lengths along X.
///
/// # Safety
/// See [`igpPlotLine`].
#[no_mangle]
pub unsafe extern "C" fn igpPlotBarsH(label: *const c_char, vals: *const f64, n: c_int, bar_height: f64, y0: f64) {
    let label = str_or_empty(label);
    let item = PlotItem::Bars { label: &label, data: values(vals, n, 1.0, y0), width: bar_height, horizontal: true };
    forward("igpPlotBarsH", item)
}

/// Horizontal bars; `xs` are lengths along X and `ys` positions along Y.
///
/// # Safety
/// See [`igpPlotLineXY`].
#[no_mangle]
pub unsafe extern "C" fn igpPlotBarsHXY(
    label: *const c_char,
    xs: *const f64,
    ys: *const f64,
    n: c_int,
    bar_height: f64,
    s: c_int,
) {
    let label = str_or_empty(label);
    // horizontal items carry (position, value) pairs
    let item = PlotItem::Bars { label: &label, data: xy(ys, xs, n, s), width: bar_height, horizontal: true };
    forward("igpPlotBarsHXY", item)
}

/// # Safety
/// `labels` holds `items` strings; `values` holds `items * groups` doubles, item-major.
unsafe fn bar_groups(
    call: &str,
    labels: *const *const c_char,
    vals: *const f64,
    items: c_int,
    groups: c_int,
    width: f64,
    shift: f64,
    flags: c_int,
    horizontal: bool,
) {
    let (items, groups) = (count(items), count(groups));
    let owned = str_array(labels, items).unwrap_or_else(|| vec![Default::default(); items]);
    let names: Vec<&str> = owned.iter().map(|l| l.as_ref()).collect();
    let total = items.saturating_mul(groups);
    let values: &[f64] = if vals.is_null() || total == 0 { &[] } else { std::slice::from_raw_parts(vals, total) };
    let item = PlotItem::BarGroups {
        labels: &names,
        values,
        groups,
        width,
        shift,
        flags: BarGroupsFlags(flags),
        horizontal,
    };
    forward(call, item)
}

/// # Safety
/// `labels` holds `items_per_group` strings; `values` holds `items_per_group * groups` doubles.
#[no_mangle]
pub unsafe extern "C" fn igpPlotBarGroups(
    labels: *const *const c_char,
    vals: *const f64,
    items_per_group: c_int,
    groups: c_int,
    group_width: f64,
    x0: f64,
    flags: c_int,
) {
    bar_groups("igpPlotBarGroups", labels, vals, items_per_group, groups, group_width, x0, flags, false)
}

/// # Safety
/// See [`igpPlotBarGroups`].
#[no_mangle]
pub unsafe extern "C" fn igpPlotBarGroupsH(
    labels: *const *const c_char,
    vals: *const f64,
    items_per_group: c_int,
    groups: c_int,
    group_height: f64,
    y0: f64,
    flags: c_int,
) {
    bar_groups("igpPlotBarGroupsH", labels, vals, items_per_group, groups, group_height, y0, flags, true)
}
