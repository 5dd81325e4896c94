//! Sparse recovery of a noisy signal with an l1 penalty.
//!
//! Run with: cargo run --example lasso -p proxopt

use proxopt::prelude::*;

fn main() -> OptimizerResult<()> {
    let signal = column(&[0.0, 0.0, 3.0, 0.0, -2.0, 0.0, 0.0, 1.5]);
    let noise = column(&[0.1, -0.2, 0.05, 0.15, -0.1, 0.2, -0.05, 0.1]);
    let x_obs = &signal + &noise;

    let config = OptimizerConfig::new()
        .with_max_iter(200)
        .with_tolerance(1e-6)
        .with_verbosity(Verbosity::Detailed);

    let mut optimizer = Optimizer::new(config).with_objective(Regularizer::named(
        "squared_error",
        RegularizerParams::new().with_matrix("x_obs", x_obs),
    ))?;
    optimizer.add_regularizer(Regularizer::named("sparse", RegularizerParams::with_gamma(0.3)))?;

    let result = optimizer.minimize(&DMatrix::zeros(8, 1))?;

    println!("termination: {:?}", result.termination_reason);
    println!("recovered:   {}", result.theta.transpose());
    println!("true signal: {}", signal.transpose());
    if let Some(last) = result.metadata.last() {
        println!(
            "final residuals: primal {:.3e}, dual {:.3e}, rho {}",
            last.primal_residual, last.dual_residual, last.rho
        );
    }
    Ok(())
}
