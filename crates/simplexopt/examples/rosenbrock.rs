//! Minimizes the Rosenbrock function with progress logging.
//!
//! Run with: RUST_LOG=info cargo run -p simplexopt --example rosenbrock

use simplexopt::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let rosenbrock = FnCost::new(|x: &[f64]| -> f64 {
        x.windows(2)
            .map(|w| (1.0 - w[0]).powi(2) + 100.0 * (w[1] - w[0] * w[0]).powi(2))
            .sum()
    });

    let mut optimizer = NelderMead::new(
        NelderMeadConfig::new()
            .with_seed(2024)
            .with_initial_spread(0.5),
    );
    let stopping_criterion = StoppingCriterion::new().with_spread_tolerance(1e-10);
    let initial_point = DVector::from_vec(vec![-1.2, 1.0, -0.5]);

    let mut progress = LogProgressCallback::new(500);
    let result = optimizer.optimize_with_callback(
        &rosenbrock,
        &initial_point,
        &stopping_criterion,
        &mut progress,
    )?;

    let counts = optimizer.move_counts();
    tracing::info!(
        "Result: {:?} (f = {:.3e}, {}, {} evaluations)",
        result.point.as_slice(),
        result.value,
        result.termination_reason.description(),
        result.function_evaluations
    );
    tracing::info!(
        "Moves: {} reflections, {} expansions, {} outside / {} inside contractions, {} shrinks",
        counts.reflections,
        counts.expansions,
        counts.outside_contractions,
        counts.inside_contractions,
        counts.shrinks
    );

    Ok(())
}
