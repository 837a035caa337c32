//! Graded-index discretizer benchmarks: cost of converting a continuous
//! profile into ladder-valued sublayers as profile resolution and ladder
//! density scale up.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use thinfilm_engine::{discretize_profile, ProfilePoint};
use thinfilm_materials::StepLadder;

fn quintic_profile(samples: usize, n_lo: f64, n_hi: f64, thickness_nm: f64) -> Vec<ProfilePoint> {
    (0..=samples)
        .map(|i| {
            let t = i as f64 / samples as f64;
            let s = t * t * t * (t * (t * 6.0 - 15.0) + 10.0);
            ProfilePoint { depth_nm: t * thickness_nm, index: n_lo + (n_hi - n_lo) * s }
        })
        .collect()
}

fn bench_by_profile_resolution(c: &mut Criterion) {
    let ladder = StepLadder::uniform(1.38, 2.35, 0.05);
    let mut group = c.benchmark_group("discretize_by_profile_resolution");
    for &samples in &[50usize, 200, 1000, 5000] {
        let profile = quintic_profile(samples, 1.38, 2.35, 500.0);
        group.throughput(Throughput::Elements(samples as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &profile, |b, profile| {
            b.iter(|| black_box(discretize_profile(profile, &ladder, 1.0).unwrap()));
        });
    }
    group.finish();
}

fn bench_by_ladder_density(c: &mut Criterion) {
    let profile = quintic_profile(1000, 1.38, 2.35, 500.0);
    let mut group = c.benchmark_group("discretize_by_ladder_density");
    for &delta_n in &[0.20f64, 0.05, 0.01] {
        let ladder = StepLadder::uniform(1.38, 2.35, delta_n);
        let steps = ladder.steps().len();
        group.bench_with_input(BenchmarkId::new("steps", steps), &ladder, |b, ladder| {
            b.iter(|| black_box(discretize_profile(&profile, ladder, 1.0).unwrap()));
        });
    }
    group.finish();
}

fn bench_minimum_thickness_repair_pressure(c: &mut Criterion) {
    // A coarse ladder against a fast-varying profile forces many narrow
    // crossings, exercising the `dissolve` repair path heavily.
    let profile = quintic_profile(300, 1.38, 2.35, 200.0);
    let ladder = StepLadder::uniform(1.38, 2.35, 0.02);
    let mut group = c.benchmark_group("discretize_minimum_thickness_repair");
    group.bench_function("narrow_profile_dense_ladder", |b| {
        b.iter(|| black_box(discretize_profile(&profile, &ladder, 1.0).unwrap()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_by_profile_resolution,
    bench_by_ladder_density,
    bench_minimum_thickness_repair_pressure
);
criterion_main!(benches);
