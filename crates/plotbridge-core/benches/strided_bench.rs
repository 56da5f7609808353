use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plotbridge_core::{StridedView, XyData};

#[repr(C)]
#[derive(Clone, Copy)]
struct Tick {
    t: f64,
    price: f64,
    volume: f32,
    side: u8,
}

fn gen_ticks(n: usize) -> Vec<Tick> {
    (0..n)
        .map(|i| Tick {
            t: i as f64,
            price: (i as f64 * 0.01).sin() * 10.0 + 100.0,
            volume: (i % 97) as f32,
            side: (i & 1) as u8,
        })
        .collect()
}

fn bench_strided(c: &mut Criterion) {
    let mut group = c.benchmark_group("strided_read");
    for &n in &[10_000usize, 100_000usize] {
        let ticks = gen_ticks(n);
        let contiguous: Vec<f64> = ticks.iter().map(|t| t.price).collect();

        group.bench_with_input(BenchmarkId::new("contiguous_f64", n), &n, |b, _| {
            let view = StridedView::from_slice(&contiguous);
            b.iter(|| black_box(view.iter().sum::<f64>()));
        });
        group.bench_with_input(BenchmarkId::new("record_field_f64", n), &n, |b, _| {
            let view = StridedView::from_field(&ticks, |t| &t.price);
            b.iter(|| black_box(view.iter().sum::<f64>()));
        });
        group.bench_with_input(BenchmarkId::new("record_field_f32", n), &n, |b, _| {
            let view = StridedView::from_field(&ticks, |t| &t.volume);
            b.iter(|| black_box(view.iter().sum::<f64>()));
        });
        group.bench_with_input(BenchmarkId::new("xy_points", n), &n, |b, _| {
            let data = XyData::xy(
                StridedView::from_field(&ticks, |t| &t.t),
                StridedView::from_field(&ticks, |t| &t.price),
            )
            .unwrap();
            b.iter(|| black_box(data.points().fold(0.0, |acc, p| acc + p.x + p.y)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strided);
criterion_main!(benches);
