// File: crates/plotbridge-core/tests/push_pop.rs
// Purpose: Scoped style overrides restore the exact prior values in LIFO order.

use plotbridge_core::style::{get_var, STYLE_VARS};
use plotbridge_core::{Plotter, PlotterOptions, StyleCol, StyleValue, StyleVar, ValueKind, Vec2, Vec4};

fn plotter() -> Plotter<plotbridge_core::RecordingEngine> {
    let mut p = Plotter::recording(PlotterOptions::default());
    p.create_context();
    p
}

#[test]
fn push_then_pop_restores_every_var_bit_for_bit() {
    let mut p = plotter();
    // seed odd values (negative zero, NaN) so restoration is checked at the bit level
    p.style_mut().unwrap().line_weight = -0.0;
    p.style_mut().unwrap().fill_alpha = f32::from_bits(0x7fc0_1234);
    let before = *p.style().unwrap();

    for &var in StyleVar::ALL {
        let value = match var.kind() {
            ValueKind::Float => StyleValue::Float(42.0),
            ValueKind::Int => StyleValue::Int(3),
            ValueKind::Vec2 => StyleValue::Vec2(Vec2::new(1.5, -2.5)),
        };
        p.push_style_var(var, value).unwrap();
        assert!(get_var(p.style().unwrap(), var).bits_eq(&value));
    }
    p.pop_style_var(StyleVar::COUNT).unwrap();

    let after = *p.style().unwrap();
    for &var in StyleVar::ALL {
        assert!(get_var(&after, var).bits_eq(&get_var(&before, var)), "{var:?}");
    }
    assert_eq!(STYLE_VARS.len(), StyleVar::COUNT);
}

#[test]
fn nested_pushes_of_one_var_unwind_in_order() {
    let mut p = plotter();
    p.push_style_var_float(StyleVar::MarkerSize, 6.0).unwrap();
    p.push_style_var_float(StyleVar::MarkerSize, 8.0).unwrap();
    assert_eq!(p.style().unwrap().marker_size, 8.0);
    p.pop_style_var(1).unwrap();
    assert_eq!(p.style().unwrap().marker_size, 6.0);
    p.pop_style_var(1).unwrap();
    assert_eq!(p.style().unwrap().marker_size, 4.0);
}

#[test]
fn color_push_pop_restores() {
    let mut p = plotter();
    let before = p.style().unwrap().colors;
    p.push_style_color(StyleCol::Line, Vec4::new(1.0, 0.0, 0.0, 1.0)).unwrap();
    p.push_style_color(StyleCol::PlotBg, Vec4::new(0.0, 0.0, 0.0, 1.0)).unwrap();
    assert_eq!(p.style().unwrap().colors[StyleCol::Line as usize], Vec4::new(1.0, 0.0, 0.0, 1.0));
    p.pop_style_color(2).unwrap();
    assert_eq!(p.style().unwrap().colors, before);
}

#[test]
#[should_panic(expected = "pop_style_var")]
fn popping_more_than_pushed_is_fatal() {
    let mut p = plotter();
    p.push_style_var_int(StyleVar::Marker, 1).unwrap();
    let _ = p.pop_style_var(2);
}

#[test]
#[should_panic(expected = "StyleVar/value type mismatch")]
fn push_with_wrong_kind_is_fatal() {
    let mut p = plotter();
    let _ = p.push_style_var_vec2(StyleVar::LineWeight, Vec2::new(1.0, 1.0));
}

#[test]
fn style_calls_without_context_report_no_context() {
    let mut p = Plotter::recording(PlotterOptions::default());
    assert_eq!(p.push_style_var_float(StyleVar::LineWeight, 2.0), Err(plotbridge_core::Error::NoContext));
    assert!(p.style().is_err());
}

#[test]
fn style_handle_stays_readable_across_pushes_and_pops() {
    use plotbridge_core::style::{get_color, get_var_float};

    let mut p = plotter();
    let handle = p.style_ptr().unwrap();
    let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let line_before = unsafe { get_color(&*handle, StyleCol::Line) };

    p.push_style_color(StyleCol::Line, red).unwrap();
    p.push_style_var_float(StyleVar::LineWeight, 3.5).unwrap();
    p.create_context();
    assert_eq!(unsafe { get_color(&*handle, StyleCol::Line) }, red);
    assert_eq!(unsafe { get_var_float(&*handle, StyleVar::LineWeight) }, 3.5);

    unsafe { (*handle).marker_size = 9.0 };
    assert_eq!(p.style().unwrap().marker_size, 9.0);

    p.pop_style_var(1).unwrap();
    p.pop_style_color(1).unwrap();
    assert_eq!(unsafe { get_color(&*handle, StyleCol::Line) }, line_before);
    assert_eq!(unsafe { get_var_float(&*handle, StyleVar::LineWeight) }, 1.0);
}
