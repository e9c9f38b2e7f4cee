//! Benchmarks for device graph analyses
//!
//! Run with: cargo bench -p arvak-arch

use arvak_arch::{json, topology};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Benchmark building canonical grids
fn bench_grid_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_construction");

    for side in &[4_u32, 8, 16] {
        group.bench_with_input(BenchmarkId::new("square_grid", side), side, |b, &n| {
            b.iter(|| topology::square_grid(black_box(n), black_box(n), 1).unwrap());
        });
    }

    group.finish();
}

/// Benchmark all-pairs diameter
fn bench_diameter(c: &mut Criterion) {
    let mut group = c.benchmark_group("diameter");

    for side in &[4_u32, 8, 16] {
        let arch = topology::square_grid(*side, *side, 1).unwrap();
        group.bench_with_input(BenchmarkId::new("grid", side), &arch, |b, arch| {
            b.iter(|| black_box(arch.diameter().unwrap()));
        });
    }

    let ring = topology::ring(256).unwrap();
    group.bench_function("ring_256", |b| {
        b.iter(|| black_box(ring.diameter().unwrap()));
    });

    group.finish();
}

/// Benchmark cut vertex detection
fn bench_articulation_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("articulation_points");

    for side in &[8_u32, 16, 32] {
        let arch = topology::square_grid(*side, *side, 1).unwrap();
        group.bench_with_input(BenchmarkId::new("grid", side), &arch, |b, arch| {
            b.iter(|| black_box(arch.articulation_points()));
        });
    }

    group.finish();
}

/// Benchmark greedy pruning
fn bench_prune(c: &mut Criterion) {
    let mut group = c.benchmark_group("prune");
    group.sample_size(20);

    for side in &[4_u32, 6, 8] {
        let arch = topology::square_grid(*side, *side, 1).unwrap();
        group.bench_with_input(BenchmarkId::new("grid_quarter", side), &arch, |b, arch| {
            let num = arch.n_nodes() / 4;
            b.iter(|| {
                let mut arch = arch.clone();
                black_box(arch.remove_worst_nodes(num))
            });
        });
    }

    group.finish();
}

/// Benchmark line extraction on a grid small enough for the exhaustive search
fn bench_lines(c: &mut Criterion) {
    let arch = topology::square_grid(3, 4, 1).unwrap();
    c.bench_function("lines_grid_3x4", |b| {
        b.iter(|| black_box(arch.lines(black_box(&[6, 4])).unwrap()));
    });
}

/// Benchmark device description encoding
fn bench_json(c: &mut Criterion) {
    let arch = topology::square_grid(8, 8, 2).unwrap();
    let text = json::to_json_string(&arch, false).unwrap();

    c.bench_function("json_encode_grid_8x8x2", |b| {
        b.iter(|| json::to_json_string(black_box(&arch), false).unwrap());
    });
    c.bench_function("json_decode_grid_8x8x2", |b| {
        b.iter(|| json::from_json_str(black_box(&text)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_grid_construction,
    bench_diameter,
    bench_articulation_points,
    bench_prune,
    bench_lines,
    bench_json,
);

criterion_main!(benches);
