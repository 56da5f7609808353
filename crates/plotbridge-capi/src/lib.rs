// File: crates/plotbridge-capi/src/lib.rs
// Summary: C surface entry point; holds the process-wide Plotter and the argument conversion helpers.
// Notes:
// - Every igp* call locks the slot for its whole duration; callers must stay single-threaded per frame anyway.
// - Tick formatter callbacks run under that lock and must not call back into igp*.
// - Contract violations panic; a panic cannot unwind out of an extern "C" fn, so the process aborts.

use std::borrow::Cow;
use std::ffi::{c_char, c_int, c_void, CStr};
use std::sync::{Mutex, PoisonError};

use plotbridge_core::{fatal, ContextId, PlotEngine, Plotter, RecordingEngine, Result, StridedView};

pub mod context;
pub mod plot;
pub mod setup;
pub mod style;

pub use plotbridge_core::format::AxisFormatCallback;
pub use plotbridge_core::{Point as igpPoint, Vec2 as igpVec2, Vec4 as igpVec4};

/// Engine type behind the C surface.
pub type DynEngine = Box<dyn PlotEngine + Send>;

static PLOTTER: Mutex<Option<Plotter<DynEngine>>> = Mutex::new(None);

/// Replace the engine behind the C surface. Existing contexts, styles and formatters are dropped,
/// so every handle issued before this call becomes invalid.
pub fn install_engine(engine: DynEngine) {
    let mut slot = PLOTTER.lock().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(Plotter::new(engine));
    tracing::debug!(target: "plotbridge", "engine installed");
}

/// Static NUL-terminated version of this library.
#[no_mangle]
pub extern "C" fn igpMain_Version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

/// Run `f` against the process-wide plotter, creating it over a `RecordingEngine` on first use.
pub fn with_plotter<R>(f: impl FnOnce(&mut Plotter<DynEngine>) -> R) -> R {
    let mut slot = PLOTTER.lock().unwrap_or_else(PoisonError::into_inner);
    let plotter = slot.get_or_insert_with(|| Plotter::new(Box::new(RecordingEngine::new())));
    f(plotter)
}

/// Unwrap a result at the C boundary; errors are contract violations.
#[track_caller]
pub(crate) fn check<T>(call: &str, result: Result<T>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => fatal(&format!("{call}: {e}")),
    }
}

pub(crate) fn context_handle(id: Option<ContextId>) -> *mut c_void {
    id.map_or(std::ptr::null_mut(), |id| id.get() as usize as *mut c_void)
}

pub(crate) fn context_from_handle(handle: *mut c_void) -> Option<ContextId> {
    ContextId::from_raw(handle as usize as u64)
}

/// Borrow a C string; null reads as `None`, invalid UTF-8 is replaced.
///
/// # Safety
/// `ptr` is null or a NUL-terminated string valid for `'a`.
pub(crate) unsafe fn opt_str<'a>(ptr: *const c_char) -> Option<Cow<'a, str>> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy())
    }
}

/// # Safety
/// Same as [`opt_str`].
pub(crate) unsafe fn str_or_empty<'a>(ptr: *const c_char) -> Cow<'a, str> {
    opt_str(ptr).unwrap_or(Cow::Borrowed(""))
}

/// Read `n` C strings; a null array reads as `None`.
///
/// # Safety
/// `labels` is null or points at `n` valid string pointers (each may be null).
pub(crate) unsafe fn str_array<'a>(labels: *const *const c_char, n: usize) -> Option<Vec<Cow<'a, str>>> {
    if labels.is_null() {
        return None;
    }
    Some((0..n).map(|i| str_or_empty(*labels.add(i))).collect())
}

pub(crate) fn count(n: c_int) -> usize {
    usize::try_from(n).unwrap_or(0)
}

/// Byte stride from the C argument; zero or negative means tightly packed doubles.
pub(crate) fn stride(stride: c_int) -> usize {
    match usize::try_from(stride) {
        Ok(s) if s > 0 => s,
        _ => std::mem::size_of::<f64>(),
    }
}

/// # Safety
/// `ptr` must be readable as `n` doubles spaced `stride` bytes apart, or `n` must be 0.
pub(crate) unsafe fn doubles<'a>(ptr: *const f64, n: usize, stride: usize) -> StridedView<'a> {
    if ptr.is_null() {
        return StridedView::from_raw_parts(std::ptr::NonNull::<f64>::dangling().as_ptr(), 0, stride);
    }
    StridedView::from_raw_parts(ptr, n, stride)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_defaults_to_packed_doubles() {
        assert_eq!(stride(0), 8);
        assert_eq!(stride(-4), 8);
        assert_eq!(stride(24), 24);
        assert_eq!(count(-1), 0);
    }

    #[test]
    fn version_is_nul_terminated() {
        let v = unsafe { CStr::from_ptr(igpMain_Version()) };
        assert_eq!(v.to_str(), Ok(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn context_handles_round_trip() {
        assert!(context_handle(None).is_null());
        assert_eq!(context_from_handle(std::ptr::null_mut()), None);
        let id = ContextId::from_raw(7);
        assert_eq!(context_from_handle(context_handle(id)), id);
    }
}
