// File: crates/plotbridge-core/tests/setup.rs
// Purpose: Setup commands, plot lifecycle and next-item styles as observed by the recording engine.

use plotbridge_core::record::{AxisFormatRecord, Recorded};
use plotbridge_core::theme::deep_color;
use plotbridge_core::{
    Axis, AxisFlags, Condition, Error, LegendFlags, Location, Marker, MouseTextFlags, PlotFlags, Plotter,
    PlotterOptions, Point, Range, Rect, RecordingEngine, StridedView, StyleCol, SubplotFlags, SubplotsSpec, TickSpec,
    Vec2, Vec4, XyData, AUTO, AUTO_COLOR,
};

fn plotter() -> Plotter<RecordingEngine> {
    let mut p = Plotter::recording(PlotterOptions::default());
    p.create_context();
    p
}

#[test]
fn axes_and_limits_land_on_the_right_axes() {
    let mut p = plotter();
    p.begin_plot("setup", Vec2::new(-1.0, 0.0), PlotFlags::CROSSHAIRS).unwrap();
    p.setup_axes(Some("time"), Some("price"), AxisFlags::NONE, AxisFlags::AUTO_FIT).unwrap();
    p.setup_axis(Axis::Y2, Some("volume"), AxisFlags::AUX_DEFAULT).unwrap();
    p.setup_axes_limits(0.0, 10.0, -1.0, 1.0, Condition::Once).unwrap();
    p.setup_axis_limits(Axis::Y2, 0.0, 500.0, Condition::Always).unwrap();
    p.setup_axis_format(Axis::Y1, "%.2f").unwrap();
    p.setup_legend(Location::NorthWest, LegendFlags::OUTSIDE).unwrap();
    p.setup_mouse_text(Location::SouthEast, MouseTextFlags::NO_AUX_AXES).unwrap();
    p.setup_finish().unwrap();

    let e = p.engine();
    assert_eq!(e.axis(Axis::X1).label.as_deref(), Some("time"));
    assert_eq!(e.axis(Axis::Y1).flags, AxisFlags::AUTO_FIT);
    assert!(e.axis(Axis::Y2).enabled);
    assert!(!e.axis(Axis::X3).enabled);
    assert_eq!(e.axis(Axis::Y1).limits, Some((Range::new(-1.0, 1.0), Condition::Once)));
    assert_eq!(e.axis(Axis::Y2).limits, Some((Range::new(0.0, 500.0), Condition::Always)));
    let limits = e.primary_limits().unwrap();
    assert_eq!(limits, Rect::from_aabb(0.0, 10.0, -1.0, 1.0));
    assert!(limits.contains(Point::new(5.0, 0.5)));
    assert_eq!(limits.clamp(Point::new(12.0, -3.0)), Point::new(10.0, -1.0));
    assert_eq!((limits.min(), limits.size()), (Point::new(0.0, -1.0), Point::new(10.0, 2.0)));
    assert_eq!(e.axis(Axis::Y1).format, Some(AxisFormatRecord::Printf("%.2f".into())));
    assert_eq!(e.legend(), Some((Location::NorthWest, LegendFlags::OUTSIDE)));
    assert_eq!(e.mouse_text(), Some((Location::SouthEast, MouseTextFlags::NO_AUX_AXES)));
    assert!(e.setup_finished());
    assert!(matches!(e.events()[0], Recorded::BeginPlot { flags: PlotFlags::CROSSHAIRS, .. }));
}

#[test]
fn tick_values_and_labels() {
    let mut p = plotter();
    p.begin_plot("ticks", Vec2::default(), PlotFlags::NONE).unwrap();
    let pos = [1.0, 2.0, 3.0];
    p.setup_axis_ticks(Axis::X1, TickSpec::Values(&pos), Some(&["lo", "mid", "hi"][..]), true).unwrap();
    p.setup_axis_ticks(Axis::Y1, TickSpec::Range { min: -1.0, max: 1.0, n: 5 }, None, false).unwrap();
    let bad = p.setup_axis_ticks(Axis::Y2, TickSpec::Values(&pos), Some(&["only"][..]), false);
    assert_eq!(bad, Err(Error::DataLengthMismatch { x_len: 3, y_len: 1 }));

    let e = p.engine();
    assert_eq!(e.axis(Axis::X1).tick_labels, vec!["lo", "mid", "hi"]);
    assert!(e.axis(Axis::X1).keep_default);
    assert_eq!(e.axis(Axis::Y1).ticks, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    assert!(e.axis(Axis::Y2).ticks.is_empty());
}

#[test]
fn begin_plot_starts_a_fresh_frame() {
    let mut p = plotter();
    let ys = [1.0, 2.0];
    p.begin_plot("one", Vec2::default(), PlotFlags::NONE).unwrap();
    p.plot_line("a", XyData::values(StridedView::from_slice(&ys), 1.0, 0.0)).unwrap();
    p.end_plot().unwrap();
    p.begin_plot("two", Vec2::default(), PlotFlags::NONE).unwrap();
    assert_eq!(p.engine().items().count(), 0);
    assert_eq!(p.engine().plots_begun(), 2);
}

#[test]
fn subplots_are_forwarded() {
    let mut p = plotter();
    let mut rows = [1.0f32, 2.0];
    let spec = SubplotsSpec {
        title: "grid",
        rows: 2,
        cols: 1,
        size: Vec2::new(-1.0, 400.0),
        flags: SubplotFlags::LINK_ALL_X,
        row_ratios: Some(&mut rows[..]),
        col_ratios: None,
    };
    assert!(p.begin_subplots(spec).unwrap());
    assert_eq!(p.engine().subplot_depth(), 1);
    p.end_subplots().unwrap();
    assert_eq!(p.engine().subplot_depth(), 0);
    assert!(matches!(
        &p.engine().events()[..],
        [Recorded::BeginSubplots { rows: 2, cols: 1, .. }, Recorded::EndSubplots]
    ));
}

#[test]
fn last_item_color_follows_next_style_then_style_then_colormap() {
    let mut p = plotter();
    let ys = [0.0, 1.0];
    let data = XyData::values(StridedView::from_slice(&ys), 1.0, 0.0);
    p.begin_plot("colors", Vec2::default(), PlotFlags::NONE).unwrap();

    p.plot_line("auto", data).unwrap();
    assert_eq!(p.last_item_color().unwrap(), deep_color(0));

    let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
    p.set_next_line_style(red, 2.0);
    p.set_next_marker_style(Marker::Diamond, AUTO, AUTO_COLOR, AUTO, AUTO_COLOR);
    p.plot_scatter("next", data).unwrap();
    assert_eq!(p.last_item_color().unwrap(), red);
    let last = p.engine().items().last().cloned().unwrap();
    assert_eq!(last.next_styles.len(), 2);

    let green = Vec4::new(0.0, 1.0, 0.0, 1.0);
    p.push_style_color(StyleCol::Line, green).unwrap();
    p.plot_line("styled", data).unwrap();
    p.pop_style_color(1).unwrap();
    assert_eq!(p.last_item_color().unwrap(), green);

    p.set_next_line_style(AUTO_COLOR, AUTO);
    p.plot_line("auto again", data).unwrap();
    assert_eq!(p.last_item_color().unwrap(), deep_color(3));
}

#[test]
fn plot_calls_need_a_context() {
    let mut p = Plotter::recording(PlotterOptions::default());
    assert_eq!(p.begin_plot("x", Vec2::default(), PlotFlags::NONE), Err(Error::NoContext));
    assert_eq!(p.setup_finish(), Err(Error::NoContext));
}
