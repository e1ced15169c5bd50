use biaplot::core::{
    ColorMapping, ColormapTarget, DataPoint, HistogramGrid, NormalizationMethod, Statistic,
    map_values_to_colors, statistic_grid,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn spiral_points(n: usize) -> Vec<DataPoint> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.01;
            DataPoint::new(t.cos() * t, t.sin() * t)
        })
        .collect()
}

fn bench_histogram_compute_100k(c: &mut Criterion) {
    let points = spiral_points(100_000);

    c.bench_function("histogram_compute_100k", |b| {
        b.iter(|| {
            let _ = HistogramGrid::compute(black_box(&points), 64).expect("histogram");
        })
    });
}

fn bench_median_overlay_100k(c: &mut Criterion) {
    let points = spiral_points(100_000);
    let grid = HistogramGrid::compute(&points, 64).expect("histogram");
    let assignment = grid.assign_bins(&points);
    let classes: Vec<f64> = (0..points.len()).map(|i| (i % 7) as f64).collect();

    c.bench_function("median_overlay_100k", |b| {
        b.iter(|| {
            let _ = statistic_grid(
                black_box(&assignment),
                black_box(&classes),
                Statistic::Median,
                (64, 64),
            )
            .expect("overlay");
        })
    });
}

fn bench_log_coloring_50k(c: &mut Criterion) {
    let magma = ColorMapping::builtin("magma").expect("magma");
    let values: Vec<f64> = (0..50_000).map(|i| (i % 1_000) as f64).collect();

    c.bench_function("log_coloring_50k", |b| {
        b.iter(|| {
            let _ = map_values_to_colors(
                black_box(&values),
                false,
                &magma,
                NormalizationMethod::Log,
                ColormapTarget::Overlay,
            );
        })
    });
}

criterion_group!(
    benches,
    bench_histogram_compute_100k,
    bench_median_overlay_100k,
    bench_log_coloring_50k
);
criterion_main!(benches);
