//! Benchmarks for photopage layout performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks cover density resolution and both packers on synthetic
//! batches; no image data is decoded.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use photopage::{
    compute_crop, pack_flow, pack_grid, resolve_density, AnchorSpec, DensityPolicy,
    ImageDescriptor, PageGeometry,
};

/// Creates a batch of descriptors with varied sizes and orientations.
fn create_batch(count: usize) -> Vec<ImageDescriptor> {
    (0..count)
        .map(|i| {
            let w = 800 + ((i * 131) % 3200) as u32;
            let h = 800 + ((i * 197) % 3200) as u32;
            ImageDescriptor::new(w, h, format!("img{:05}.jpg", i))
        })
        .collect()
}

/// Benchmark density resolution.
fn bench_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_density");

    for count in [10, 100, 1000].iter() {
        let batch = create_batch(*count);
        group.bench_function(format!("{}_images", count), |b| {
            b.iter(|| resolve_density(black_box(&batch), 2.0, DensityPolicy::passport()).unwrap());
        });
    }

    group.finish();
}

/// Benchmark grid and flow packing at letter size, 300 dpi.
fn bench_packing(c: &mut Criterion) {
    let page = PageGeometry::new(2550, 3300);
    let mut group = c.benchmark_group("packing");

    for count in [10, 100, 1000].iter() {
        let batch = create_batch(*count);

        group.bench_function(format!("grid_{}_images", count), |b| {
            b.iter(|| pack_grid(black_box(&batch), 600, page).unwrap());
        });

        group.bench_function(format!("flow_{}_images", count), |b| {
            b.iter(|| pack_flow(black_box(&batch), 960, page, 20).unwrap());
        });
    }

    group.finish();
}

/// Benchmark crop window computation.
fn bench_crop(c: &mut Criterion) {
    let anchor = AnchorSpec::parse("lu").unwrap();
    c.bench_function("compute_crop", |b| {
        b.iter(|| compute_crop(black_box(4032), black_box(3024), 1.0, anchor));
    });
}

criterion_group!(benches, bench_density, bench_packing, bench_crop);
criterion_main!(benches);
