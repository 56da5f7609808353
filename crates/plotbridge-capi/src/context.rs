// File: crates/plotbridge-capi/src/context.rs
// Summary: Context lifecycle, plot/subplot begin-end and tick formatter registration.

use std::ffi::{c_char, c_int, c_void};

use plotbridge_core::format::c_handler;
use plotbridge_core::{fatal, FormatterToken, PlotFlags, SubplotFlags, SubplotsSpec, UiContext, Vec2};

use crate::{check, context_from_handle, context_handle, count, str_or_empty, with_plotter, AxisFormatCallback};

#[no_mangle]
pub extern "C" fn igpCreateContext() -> *mut c_void {
    with_plotter(|p| context_handle(Some(p.create_context())))
}

/// Destroy `ctx`, or the current context when `ctx` is null.
#[no_mangle]
pub extern "C" fn igpDestroyContext(ctx: *mut c_void) {
    with_plotter(|p| {
        let id = context_from_handle(ctx).or_else(|| p.current_context());
        if let Some(id) = id {
            check("igpDestroyContext", p.destroy_context(id));
        }
    })
}

/// Null when no context is current.
#[no_mangle]
pub extern "C" fn igpCurrentContext() -> *mut c_void {
    with_plotter(|p| context_handle(p.current_context()))
}

#[no_mangle]
pub extern "C" fn igpSetCurrentContext(ctx: *mut c_void) {
    with_plotter(|p| check("igpSetCurrentContext", p.set_current_context(context_from_handle(ctx))))
}

#[no_mangle]
pub extern "C" fn igpSetImGUIContext(ctx: *mut c_void) {
    with_plotter(|p| p.bind_ui_context(UiContext::from_ptr(ctx)))
}

/// # Safety
/// `title` is null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn igpBeginPlot(title: *const c_char, size: Vec2, flags: c_int) -> bool {
    let title = str_or_empty(title);
    with_plotter(|p| check("igpBeginPlot", p.begin_plot(&title, size, PlotFlags(flags))))
}

#[no_mangle]
pub extern "C" fn igpEndPlot() {
    with_plotter(|p| check("igpEndPlot", p.end_plot()))
}

/// # Safety
/// `title` is null or a NUL-terminated string; `row_ratios`/`col_ratios` are null or
/// point at `rows`/`cols` floats that the engine may write back.
#[no_mangle]
pub unsafe extern "C" fn igpBeginSubplots(
    title: *const c_char,
    rows: c_int,
    cols: c_int,
    size: Vec2,
    flags: c_int,
    row_ratios: *mut f32,
    col_ratios: *mut f32,
) -> bool {
    let title = str_or_empty(title);
    let (rows, cols) = (count(rows), count(cols));
    let ratios = |ptr: *mut f32, n: usize| (!ptr.is_null()).then(|| std::slice::from_raw_parts_mut(ptr, n));
    let spec = SubplotsSpec {
        title: &title,
        rows,
        cols,
        size,
        flags: SubplotFlags(flags),
        row_ratios: ratios(row_ratios, rows),
        col_ratios: ratios(col_ratios, cols),
    };
    with_plotter(|p| check("igpBeginSubplots", p.begin_subplots(spec)))
}

#[no_mangle]
pub extern "C" fn igpEndSubplots() {
    with_plotter(|p| check("igpEndSubplots", p.end_subplots()))
}

/// Register a C tick formatter. `user_data` is handed back to `callback` unchanged.
/// The returned handle is never 0.
#[no_mangle]
pub extern "C" fn igpRegisterAxisFormatter(callback: Option<AxisFormatCallback>, user_data: *mut c_void) -> usize {
    let Some(callback) = callback else { fatal("igpRegisterAxisFormatter: null callback") };
    with_plotter(|p| p.register_formatter(c_handler(callback, user_data)).get())
}

/// Returns false if `handle` was not registered.
#[no_mangle]
pub extern "C" fn igpUnregisterAxisFormatter(handle: usize) -> bool {
    let Some(token) = FormatterToken::from_raw(handle) else { return false };
    with_plotter(|p| p.unregister_formatter(token))
}
