//! Benchmarks of full ADMM runs on standard problems
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::DMatrix;
use proxopt_operators::{soft_threshold, Regularizer, RegularizerParams};
use proxopt_optim::{OptimizerConfig, Optimizer};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rng: &mut SmallRng, rows: usize, cols: usize) -> DMatrix<f64> {
    DMatrix::from_fn(rows, cols, |_, _| rng.gen_range(-1.0..1.0))
}

fn squared_error(x_obs: &DMatrix<f64>) -> Regularizer<f64> {
    Regularizer::named(
        "squared_error",
        RegularizerParams::new().with_matrix("x_obs", x_obs.clone()),
    )
}

fn benchmark_lasso(c: &mut Criterion) {
    let mut group = c.benchmark_group("lasso");
    let mut rng = SmallRng::seed_from_u64(0);
    let config = OptimizerConfig::new().with_max_iter(100).with_tolerance(1e-6);

    for &dim in &[10, 100, 1000] {
        let x_obs = random_matrix(&mut rng, dim, 1);
        let theta_init = DMatrix::zeros(dim, 1);

        group.bench_with_input(BenchmarkId::new("by_name", dim), &dim, |b, _| {
            b.iter(|| {
                let mut optimizer = Optimizer::new(config.clone())
                    .with_objective(squared_error(&x_obs))
                    .unwrap();
                optimizer
                    .add_regularizer(Regularizer::named(
                        "sparse",
                        RegularizerParams::with_gamma(0.1),
                    ))
                    .unwrap();
                optimizer.minimize(black_box(&theta_init)).unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("by_function", dim), &dim, |b, _| {
            b.iter(|| {
                let mut optimizer = Optimizer::new(config.clone())
                    .with_objective(squared_error(&x_obs))
                    .unwrap();
                optimizer
                    .add_regularizer(Regularizer::function(|x: &DMatrix<f64>, rho: f64| {
                        soft_threshold(x, 0.1 / rho)
                    }))
                    .unwrap();
                optimizer.minimize(black_box(&theta_init)).unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_low_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("low_rank");
    let mut rng = SmallRng::seed_from_u64(1);
    let config = OptimizerConfig::new().with_max_iter(50);

    for &dim in &[10, 50] {
        let u = random_matrix(&mut rng, dim, 2);
        let x_obs = &u * u.transpose() + random_matrix(&mut rng, dim, dim) * 0.05;
        let theta_init = DMatrix::zeros(dim, dim);

        group.bench_with_input(BenchmarkId::new("nucnorm", dim), &dim, |b, _| {
            b.iter(|| {
                let mut optimizer = Optimizer::new(config.clone())
                    .with_objective(squared_error(&x_obs))
                    .unwrap();
                optimizer
                    .add_regularizer(Regularizer::named(
                        "nucnorm",
                        RegularizerParams::with_gamma(0.5),
                    ))
                    .unwrap();
                optimizer.minimize(black_box(&theta_init)).unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("tvd", dim), &dim, |b, _| {
            b.iter(|| {
                let mut optimizer = Optimizer::new(config.clone())
                    .with_objective(squared_error(&x_obs))
                    .unwrap();
                optimizer
                    .add_regularizer(Regularizer::named("tvd", RegularizerParams::with_gamma(0.5)))
                    .unwrap();
                optimizer.minimize(black_box(&theta_init)).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_lasso, benchmark_low_rank);
criterion_main!(benches);
