// File: crates/plotbridge-core/tests/style_dispatch.rs
// Purpose: Style variable table round-trips every variable in its declared kind and rejects the others.

use plotbridge_core::style::{
    self, get_var, get_var_float, get_var_int, get_var_vec2, set_var, set_var_float, set_var_int, set_var_vec2,
    PlotStyle, StyleValue, STYLE_VARS,
};
use plotbridge_core::{StyleCol, StyleVar, ValueKind, Vec2, Vec4};
use proptest::prelude::*;

fn vars_of(kind: ValueKind) -> Vec<StyleVar> {
    StyleVar::ALL.iter().copied().filter(|v| v.kind() == kind).collect()
}

#[test]
fn table_kinds_match_declared_kinds() {
    assert_eq!(STYLE_VARS.len(), StyleVar::COUNT);
    for &var in StyleVar::ALL {
        assert_eq!(STYLE_VARS[var as usize].kind(), var.kind(), "{var:?}");
    }
}

#[test]
fn each_var_touches_only_its_own_field() {
    for &var in StyleVar::ALL {
        let base = PlotStyle::default();
        let mut s = base;
        match var.kind() {
            ValueKind::Float => set_var_float(&mut s, var, 123.5),
            ValueKind::Int => set_var_int(&mut s, var, 7),
            ValueKind::Vec2 => set_var_vec2(&mut s, var, Vec2::new(-3.0, 9.0)),
        }
        let changed: Vec<StyleVar> = StyleVar::ALL
            .iter()
            .copied()
            .filter(|&other| !get_var(&s, other).bits_eq(&get_var(&base, other)))
            .collect();
        assert_eq!(changed, vec![var]);
        assert_eq!(s.colors, base.colors);
    }
}

proptest! {
    #[test]
    fn float_vars_round_trip(idx in 0usize..10, v in any::<f32>()) {
        let vars = vars_of(ValueKind::Float);
        let var = vars[idx % vars.len()];
        let mut s = PlotStyle::default();
        set_var_float(&mut s, var, v);
        prop_assert_eq!(get_var_float(&s, var).to_bits(), v.to_bits());
    }

    #[test]
    fn int_vars_round_trip(v in any::<i32>()) {
        let mut s = PlotStyle::default();
        for var in vars_of(ValueKind::Int) {
            set_var_int(&mut s, var, v);
            prop_assert_eq!(get_var_int(&s, var), v);
        }
    }

    #[test]
    fn vec2_vars_round_trip(idx in 0usize..16, x in any::<f32>(), y in any::<f32>()) {
        let vars = vars_of(ValueKind::Vec2);
        let var = vars[idx % vars.len()];
        let mut s = PlotStyle::default();
        set_var_vec2(&mut s, var, Vec2::new(x, y));
        prop_assert!(get_var_vec2(&s, var).bits_eq(&Vec2::new(x, y)));
    }

    #[test]
    fn colors_round_trip(idx in 0usize..21, c in prop::array::uniform4(any::<f32>())) {
        let col = StyleCol::ALL[idx];
        let mut s = PlotStyle::default();
        style::set_color(&mut s, col, Vec4::from(c));
        prop_assert!(style::get_color(&s, col).bits_eq(&Vec4::from(c)));
    }
}

#[test]
#[should_panic(expected = "StyleVar/value type mismatch")]
fn float_getter_on_vec2_var_is_fatal() {
    let s = PlotStyle::default();
    let _ = get_var_float(&s, StyleVar::PlotPadding);
}

#[test]
#[should_panic(expected = "StyleVar/value type mismatch")]
fn int_setter_on_float_var_is_fatal() {
    let mut s = PlotStyle::default();
    set_var_int(&mut s, StyleVar::LineWeight, 3);
}

#[test]
#[should_panic(expected = "StyleVar/value type mismatch")]
fn generic_set_with_wrong_variant_is_fatal() {
    let mut s = PlotStyle::default();
    set_var(&mut s, StyleVar::Marker, StyleValue::Float(1.0));
}

#[test]
fn names_follow_enum_order() {
    assert_eq!(style::style_color_name(StyleCol::AxisBgHovered), "AxisBgHovered");
    assert_eq!(style::marker_name(plotbridge_core::Marker::None), "None");
    assert_eq!(style::marker_name(plotbridge_core::Marker::Asterisk), "Asterisk");
}
