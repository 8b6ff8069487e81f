#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for area chart geometry and SVG rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_area::data::values;
use trueno_area::prelude::*;

fn area_geometry_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("area_geometry");

    for size in [100, 1_000, 10_000] {
        let xs: Vec<f64> = (0..size).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| (x * 0.01).sin() * 100.0 + 100.0).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let chart = AreaChart::new()
                    .x(XInput::Values(values(black_box(&xs))))
                    .y(YInput::Fixed(values(black_box(&ys))))
                    .build()
                    .expect("builder should produce valid result");

                chart.geometry().expect("geometry should compute")
            });
        });
    }

    group.finish();
}

fn stacked_interpolation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("stacked_interpolation");

    for (mode, name) in [
        (Interpolation::Linear, "linear"),
        (Interpolation::Basis, "basis"),
        (Interpolation::Cardinal, "cardinal"),
        (Interpolation::Monotone, "monotone"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &mode, |b, &mode| {
            b.iter(|| {
                let chart = AreaChart::new()
                    .y(YInput::Mixed(vec![
                        YElement::Function(std::sync::Arc::new(|x: f64| x.sin() + 1.0)),
                        YElement::Function(std::sync::Arc::new(|x: f64| x.cos() + 1.0)),
                        YElement::Function(std::sync::Arc::new(|x: f64| x * x)),
                    ]))
                    .domain(AxisSpec::only(Axis::X, (0.0, 10.0)))
                    .samples(1_000)
                    .interpolation(mode)
                    .stacked(true);

                chart.to_svg().expect("svg rendering should succeed")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, area_geometry_benchmark, stacked_interpolation_benchmark);
criterion_main!(benches);
