//! Criterion benchmarks for the real-coded GA.
//!
//! Uses synthetic objectives (Sphere, Rastrigin) to measure engine
//! overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_realga::ga::{Bounds, Crossover, GaConfig, GaRunner};
use u_realga::random::create_rng;

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

fn rastrigin(x: &[f64]) -> f64 {
    let tau = std::f64::consts::TAU;
    10.0 * x.len() as f64 + x.iter().map(|v| v * v - 10.0 * (tau * v).cos()).sum::<f64>()
}

fn bench_ga_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_sphere");
    group.sample_size(10);

    for (dim, pop, gen) in [(2usize, 30usize, 50usize), (10, 50, 50), (50, 100, 30)] {
        let bounds = Bounds::uniform(-5.0, 5.0, dim).unwrap();
        let config = GaConfig::default()
            .with_population_size(pop)
            .with_max_generations(gen)
            .with_seed(42)
            .with_parallel(false);
        group.bench_with_input(
            BenchmarkId::new(format!("d{}_p{}_g{}", dim, pop, gen), dim),
            &(bounds, config),
            |b, (bounds, config)| {
                b.iter(|| {
                    let mut runner =
                        GaRunner::new(&sphere, bounds.clone(), config.clone()).unwrap();
                    black_box(runner.run().unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_ga_rastrigin_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_rastrigin");
    group.sample_size(10);

    let bounds = Bounds::uniform(-5.12, 5.12, 20).unwrap();
    for parallel in [false, true] {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_max_generations(30)
            .with_seed(42)
            .with_parallel(parallel);
        group.bench_with_input(
            BenchmarkId::from_parameter(if parallel { "parallel" } else { "sequential" }),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut runner =
                        GaRunner::new(&rastrigin, bounds.clone(), config.clone()).unwrap();
                    black_box(runner.run().unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover");
    let bounds = Bounds::uniform(-1.0, 1.0, 100).unwrap();
    let p1 = vec![0.5; 100];
    let p2 = vec![-0.5; 100];

    for op in [
        Crossover::Blend { extension: 0.0 },
        Crossover::Uniform,
        Crossover::TwoPoint,
    ] {
        let mut rng = create_rng(42);
        group.bench_function(format!("{op:?}"), |b| {
            b.iter(|| black_box(op.apply(&p1, &p2, &bounds, &mut rng)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_ga_sphere,
    bench_ga_rastrigin_parallel,
    bench_crossover
);
criterion_main!(benches);
