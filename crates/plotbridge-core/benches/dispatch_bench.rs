use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plotbridge_core::style::{get_var, set_var_float, set_var_vec2, PlotStyle};
use plotbridge_core::{Plotter, PlotterOptions, StyleVar, ValueKind, Vec2};

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("style_dispatch");

    group.bench_function("get_all_vars", |b| {
        let style = PlotStyle::default();
        b.iter(|| {
            for &var in StyleVar::ALL {
                black_box(get_var(black_box(&style), var));
            }
        });
    });

    group.bench_function("set_all_vars", |b| {
        let mut style = PlotStyle::default();
        b.iter(|| {
            for &var in StyleVar::ALL {
                match var.kind() {
                    ValueKind::Float => set_var_float(&mut style, var, black_box(2.0)),
                    ValueKind::Vec2 => set_var_vec2(&mut style, var, black_box(Vec2::new(1.0, 2.0))),
                    ValueKind::Int => {}
                }
            }
        });
    });

    group.bench_function("push_pop_scope", |b| {
        let mut p = Plotter::recording(PlotterOptions::default());
        p.create_context();
        b.iter(|| {
            p.push_style_var_float(StyleVar::LineWeight, 2.0).unwrap();
            p.push_style_var_vec2(StyleVar::PlotPadding, Vec2::new(4.0, 4.0)).unwrap();
            p.pop_style_var(2).unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
