//! Property tests for the built-in proximal operators.
//!
//! Proximal operators of convex functions are firmly non-expansive, so in
//! particular `||prox(a) - prox(b)|| <= ||a - b||`. These tests check that
//! and a few operator-specific identities on random inputs.

use approx::assert_relative_eq;
use nalgebra::DMatrix;
use proptest::prelude::*;
use proxopt_core::operator::ProximalOperator;
use proxopt_operators::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rng: &mut SmallRng, rows: usize, cols: usize) -> DMatrix<f64> {
    DMatrix::from_fn(rows, cols, |_, _| rng.gen_range(-5.0..5.0))
}

fn vector_strategy(len: usize) -> impl Strategy<Value = DMatrix<f64>> {
    prop::collection::vec(-10.0f64..10.0, len)
        .prop_map(move |v| DMatrix::from_column_slice(len, 1, &v))
}

fn assert_non_expansive_within(
    op: &dyn ProximalOperator<f64>,
    a: &DMatrix<f64>,
    b: &DMatrix<f64>,
    rho: f64,
    slack: f64,
) {
    let pa = op.prox(a, rho).unwrap();
    let pb = op.prox(b, rho).unwrap();
    let lhs = (&pa - &pb).norm();
    let rhs = (a - b).norm();
    assert!(
        lhs <= rhs + slack,
        "{}: ||prox(a) - prox(b)|| = {lhs} > ||a - b|| = {rhs}",
        op.name()
    );
}

fn assert_non_expansive(
    op: &dyn ProximalOperator<f64>,
    a: &DMatrix<f64>,
    b: &DMatrix<f64>,
    rho: f64,
) {
    assert_non_expansive_within(op, a, b, rho, 1e-6);
}

proptest! {
    #[test]
    fn prop_sparse_non_expansive(
        a in vector_strategy(8),
        b in vector_strategy(8),
        gamma in 0.0f64..3.0,
        rho in 0.1f64..20.0,
    ) {
        assert_non_expansive(&Sparse::new(gamma).unwrap(), &a, &b, rho);
    }

    #[test]
    fn prop_soft_threshold_shrinks_magnitude(a in vector_strategy(10), t in 0.0f64..5.0) {
        let out = soft_threshold(&a, t);
        for (x, y) in a.iter().zip(out.iter()) {
            prop_assert!(y.abs() <= x.abs());
            prop_assert!(y.abs() >= x.abs() - t - 1e-12);
            prop_assert!(*y == 0.0 || y.signum() == x.signum());
        }
    }

    #[test]
    fn prop_nonneg_is_projection(a in vector_strategy(6), b in vector_strategy(6)) {
        let op = NonNegative;
        let once = op.prox(&a, 1.0).unwrap();
        let twice = op.prox(&once, 1.0).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.iter().all(|v| *v >= 0.0));
        assert_non_expansive(&op, &a, &b, 1.0);
    }

    #[test]
    fn prop_smooth_non_expansive(
        a in vector_strategy(7),
        b in vector_strategy(7),
        gamma in 0.0f64..5.0,
        rho in 0.1f64..10.0,
    ) {
        assert_non_expansive(&LaplacianSmoothing::new(gamma).unwrap(), &a, &b, rho);
    }

    #[test]
    fn prop_squared_error_optimality(
        x0 in vector_strategy(5),
        obs in vector_strategy(5),
        rho in 0.1f64..10.0,
    ) {
        // x minimizes 0.5||x - obs||^2 + rho/2 ||x - x0||^2  <=>  (x - obs) + rho (x - x0) = 0
        let op = SquaredError::new(obs.clone());
        let x = op.prox(&x0, rho).unwrap();
        let residual = (&x - &obs) + (&x - &x0) * rho;
        prop_assert!(residual.norm() < 1e-9);
    }
}

#[test]
fn test_nucnorm_non_expansive_on_random_matrices() {
    let mut rng = SmallRng::seed_from_u64(42);
    let op = NuclearNorm::new(1.5).unwrap();
    for _ in 0..20 {
        let a = random_matrix(&mut rng, 5, 4);
        let b = random_matrix(&mut rng, 5, 4);
        assert_non_expansive(&op, &a, &b, 1.0);
    }
}

#[test]
fn test_tvd_non_expansive_on_random_images() {
    let mut rng = SmallRng::seed_from_u64(7);
    let op = TotalVariation::new(0.8).unwrap().with_settings(TvSettings {
        max_iter: 2000,
        tolerance: 1e-10,
    });
    for _ in 0..5 {
        let a = random_matrix(&mut rng, 6, 6);
        let b = random_matrix(&mut rng, 6, 6);
        // the inner dual loop is iterative, so allow for its residual
        assert_non_expansive_within(&op, &a, &b, 2.0, 1e-2);
    }
}

#[test]
fn test_linsys_matches_closed_form() {
    let mut rng = SmallRng::seed_from_u64(3);
    let a = random_matrix(&mut rng, 8, 3);
    let b = random_matrix(&mut rng, 8, 1);
    let op = LinearSystem::from_system(&a, &b).unwrap();

    let x0 = random_matrix(&mut rng, 3, 1);
    let rho = 0.5;
    let x = op.prox(&x0, rho).unwrap();

    // gradient of 0.5||Ax - b||^2 + rho/2 ||x - x0||^2 vanishes
    let grad = a.tr_mul(&(&a * &x - &b)) + (&x - &x0) * rho;
    assert_relative_eq!(grad.norm(), 0.0, epsilon = 1e-8);
}

#[test]
fn test_value_is_lower_after_prox() {
    // f(prox(x0)) + rho/2 ||prox(x0) - x0||^2 <= f(x0)
    let mut rng = SmallRng::seed_from_u64(11);
    let x0 = random_matrix(&mut rng, 6, 1);
    let rho = 1.0;
    let ops: Vec<Box<dyn ProximalOperator<f64>>> = vec![
        Box::new(Sparse::new(0.7).unwrap()),
        Box::new(LaplacianSmoothing::new(0.7).unwrap()),
        Box::new(TotalVariation::new(0.7).unwrap()),
        Box::new(NuclearNorm::new(0.7).unwrap()),
    ];
    for op in &ops {
        let x = op.prox(&x0, rho).unwrap();
        let lhs = op.value(&x).unwrap() + rho / 2.0 * (&x - &x0).norm_squared();
        let rhs = op.value(&x0).unwrap();
        assert!(lhs <= rhs + 1e-6, "{}: {lhs} > {rhs}", op.name());
    }
}
