//! Micro-benchmarks for the statistics engine.
//!
//! Dashboards recompute analyses on every page load, so the z-test and
//! report paths should stay in the sub-microsecond range.

use abstats::statistics::{calculate_sample_size_probit, inverse_normal_cdf};
use abstats::{
    analyze_experiment, calculate_sample_size, norm_cdf, two_proportions_z_test,
    AnalysisConfig, ExperimentReport, SampleCounts,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_normal(c: &mut Criterion) {
    let mut group = c.benchmark_group("normal");

    group.bench_function("norm_cdf", |b| b.iter(|| norm_cdf(black_box(1.96))));
    group.bench_function("inverse_normal_cdf", |b| {
        b.iter(|| inverse_normal_cdf(black_box(0.975)))
    });

    group.finish();
}

fn bench_z_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("z_test");

    // Traffic volumes from a small landing page up to a large checkout flow
    for visitors in [100i64, 10_000, 1_000_000] {
        let control = visitors * 3 / 100;
        let variant = visitors * 45 / 1000;

        group.bench_with_input(
            BenchmarkId::new("two_proportions", visitors),
            &(control, variant),
            |b, &(control, variant)| {
                b.iter(|| {
                    two_proportions_z_test(
                        black_box(control),
                        black_box(visitors),
                        black_box(variant),
                        black_box(visitors),
                    )
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("analyze_experiment", visitors),
            &(control, variant),
            |b, &(control, variant)| {
                b.iter(|| {
                    analyze_experiment(
                        black_box(visitors),
                        black_box(control),
                        black_box(visitors),
                        black_box(variant),
                        None,
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_sample_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_size");

    group.bench_function("legacy", |b| {
        b.iter(|| calculate_sample_size(black_box(0.03), black_box(0.10), None, None))
    });
    group.bench_function("probit", |b| {
        b.iter(|| calculate_sample_size_probit(black_box(0.03), black_box(0.10), None, None))
    });

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let config = AnalysisConfig::default();
    let control = SampleCounts { visitors: 10_000, conversions: 300 };
    let variant = SampleCounts { visitors: 10_000, conversions: 450 };

    c.bench_function("experiment_report", |b| {
        b.iter(|| ExperimentReport::build(black_box(control), black_box(variant), &config))
    });
}

criterion_group!(
    name = statistics_benches;
    config = Criterion::default()
        .sample_size(200)
        .measurement_time(std::time::Duration::from_secs(3));
    targets = bench_normal, bench_z_test, bench_sample_size, bench_report
);

criterion_main!(statistics_benches);
