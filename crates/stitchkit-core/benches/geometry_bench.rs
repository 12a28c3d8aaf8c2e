//! Benchmarks for the path math that dominates drafting time.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stitchkit_core::geometry::{Path, Point};

fn armhole_like_path() -> Path {
    Path::builder()
        .move_to(Point::new(0.0, 0.0))
        .line(Point::new(250.0, 0.0))
        .curve(
            Point::new(280.0, 60.0),
            Point::new(290.0, 140.0),
            Point::new(260.0, 220.0),
        )
        .curve(
            Point::new(230.0, 290.0),
            Point::new(160.0, 330.0),
            Point::new(80.0, 340.0),
        )
        .line(Point::new(0.0, 340.0))
        .close()
        .build()
        .expect("static path")
}

fn bench_length(c: &mut Criterion) {
    let path = armhole_like_path();
    c.bench_function("path_length", |b| {
        b.iter(|| black_box(&path).len())
    });
}

fn bench_offset(c: &mut Criterion) {
    let path = armhole_like_path();
    c.bench_function("path_offset_10mm", |b| {
        b.iter(|| black_box(&path).offset(10.0))
    });
}

fn bench_shift_along(c: &mut Criterion) {
    let path = armhole_like_path();
    let half = path.len() / 2.0;
    c.bench_function("path_shift_along", |b| {
        b.iter(|| black_box(&path).shift_along(black_box(half)))
    });
}

criterion_group!(benches, bench_length, bench_offset, bench_shift_along);
criterion_main!(benches);
