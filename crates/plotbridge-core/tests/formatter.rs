// File: crates/plotbridge-core/tests/formatter.rs
// Purpose: Tick formatters registered by token see the exact tick value and stay within the label buffer.

use std::fmt::Write;
use std::sync::{Arc, Mutex};

use plotbridge_core::format::{c_handler, label_from_buffer, TICK_LABEL_CAPACITY};
use plotbridge_core::{
    Axis, Error, FormatterTable, FormatterToken, PlotFlags, Plotter, PlotterOptions, TickFormat, TickSpec, Vec2,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn handler_sees_exact_value_and_respects_size(v in any::<f64>(), size in 0usize..48) {
        let seen = Arc::new(Mutex::new(None));
        let seen_in = Arc::clone(&seen);
        let mut table = FormatterTable::new();
        let token = table.register(move |value, label: &mut plotbridge_core::TickLabel<'_>| {
            *seen_in.lock().unwrap() = Some(value);
            let _ = write!(label, "{value:e} and some trailing text to overflow");
        });

        // guard byte after the slice handed to the formatter
        let mut storage = vec![0xAAu8; size + 1];
        table.format_tick(token, v, &mut storage[..size]);

        prop_assert_eq!(seen.lock().unwrap().map(f64::to_bits), Some(v.to_bits()));
        prop_assert_eq!(storage[size], 0xAA);
        if size > 0 {
            prop_assert!(storage[..size].contains(&0));
        }
    }
}

#[test]
fn tokens_are_distinct_and_unregister_once() {
    let mut table = FormatterTable::new();
    let a = table.register(|_, _| {});
    let b = table.register(|_, _| {});
    assert_ne!(a, b);
    assert!(table.unregister(a));
    assert!(!table.unregister(a));
    assert!(table.contains(b));
    assert_eq!(table.len(), 1);
}

#[test]
#[should_panic(expected = "unknown tick formatter token")]
fn unknown_token_at_render_time_is_fatal() {
    let mut table = FormatterTable::new();
    let token = table.register(|_, _| {});
    table.unregister(token);
    let mut buf = [0u8; 8];
    table.format_tick(token, 1.0, &mut buf);
}

extern "C" fn c_percent(value: f64, buf: *mut std::ffi::c_char, size: std::ffi::c_int, user_data: *mut std::ffi::c_void) {
    // user_data points at the scale factor
    let scale = unsafe { *(user_data as *const f64) };
    let text = format!("{:.0}%\0", value * scale);
    let n = text.len().min(size as usize);
    unsafe { std::ptr::copy_nonoverlapping(text.as_ptr(), buf as *mut u8, n) };
}

#[test]
fn c_callback_receives_user_data_unchanged() {
    let mut scale = 100.0f64;
    let mut table = FormatterTable::new();
    let token = table.register(c_handler(c_percent, &mut scale as *mut f64 as *mut std::ffi::c_void));
    let mut buf = [0u8; TICK_LABEL_CAPACITY];
    table.format_tick(token, 0.25, &mut buf);
    assert_eq!(label_from_buffer(&buf), "25%");
}

#[test]
fn plot_runs_formatter_on_each_tick() {
    let mut p = Plotter::recording(PlotterOptions::default());
    p.create_context();
    let token = p.register_formatter(|v, label| {
        let _ = write!(label, "t={v}");
    });
    p.begin_plot("fmt", Vec2::new(-1.0, 0.0), PlotFlags::NONE).unwrap();
    p.setup_axis_ticks(Axis::X1, TickSpec::Range { min: 0.0, max: 2.0, n: 3 }, None, false).unwrap();
    p.setup_axis_format_callback(Axis::X1, token).unwrap();
    p.end_plot().unwrap();
    assert_eq!(p.engine().axis(Axis::X1).formatted, vec!["t=0", "t=1", "t=2"]);
}

#[test]
fn unregistered_token_rejected_at_setup() {
    let mut p = Plotter::recording(PlotterOptions::default());
    p.create_context();
    let token = p.register_formatter(|_, _| {});
    assert!(p.unregister_formatter(token));
    p.begin_plot("fmt", Vec2::default(), PlotFlags::NONE).unwrap();
    assert_eq!(p.setup_axis_format_callback(Axis::Y1, token), Err(Error::UnknownFormatter(token)));
    assert_eq!(FormatterToken::from_raw(token.get()), Some(token));
}
