//! Integration tests for the Nelder-Mead optimizer

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use simplexopt_core::{
    callback::{CallbackInfo, CancellationCallback, OptimizationCallback},
    cost_function::{CountingCostFunction, TryFnCost},
    error::{OptimizerError, Result},
    optimizer::{StoppingCriterion, TerminationReason},
    test_utils::{LinearSlope, RosenbrockFunction, ShiftedQuadratic, SphereFunction},
    types::DVector,
};
use simplexopt_optim::{
    Coefficients, NelderMead, NelderMeadConfig, ShrinkAnchor, Simplex, SimplexMove,
};
use std::cell::Cell;

/// Records the best value after every iteration.
#[derive(Debug, Default)]
struct BestValueRecorder {
    values: Vec<f64>,
}

impl OptimizationCallback<f64> for BestValueRecorder {
    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, f64>) -> Result<bool> {
        self.values.push(info.best_value);
        Ok(true)
    }
}

fn seeded(seed: u64) -> NelderMead<f64> {
    NelderMead::new(NelderMeadConfig::new().with_seed(seed))
}

#[test]
fn test_sphere_converges_to_origin() {
    let mut optimizer = seeded(42);
    let criterion = StoppingCriterion::new();
    let result = optimizer
        .optimize(&SphereFunction, &DVector::zeros(2), &criterion)
        .unwrap();

    assert!(result.converged);
    assert_eq!(result.termination_reason, TerminationReason::Converged);
    assert!(result.iterations < criterion.max_iterations);
    assert!(result.spread < 1e-8);
    assert_eq!(result.point.len(), 2);
    for &x in result.point.iter() {
        assert!(x.abs() < 1e-4, "coordinate {x} too far from the minimum");
    }
}

#[test]
fn test_shifted_quadratic_from_distant_start() {
    let target = DVector::from_vec(vec![2.0, -1.0, 0.5]);
    let cost_fn = ShiftedQuadratic::new(target.clone());
    let mut optimizer = seeded(3);
    let result = optimizer
        .optimize(&cost_fn, &DVector::zeros(3), &StoppingCriterion::new())
        .unwrap();

    assert!(result.converged);
    assert!((&result.point - &target).norm() < 1e-4);
    assert!(optimizer.move_counts().expansions > 0);
}

#[test]
fn test_rosenbrock() {
    let mut optimizer = seeded(17);
    let result = optimizer
        .optimize(
            &RosenbrockFunction,
            &DVector::from_vec(vec![-1.2, 1.0]),
            &StoppingCriterion::new(),
        )
        .unwrap();

    assert!(result.converged);
    assert_relative_eq!(result.point[0], 1.0, epsilon = 1e-3);
    assert_relative_eq!(result.point[1], 1.0, epsilon = 1e-3);
    assert!(result.value < 1e-6);
}

#[test]
fn test_best_value_never_increases() {
    let mut optimizer = seeded(9);
    let mut recorder = BestValueRecorder::default();
    optimizer
        .optimize_with_callback(
            &RosenbrockFunction,
            &DVector::zeros(2),
            &StoppingCriterion::new().with_max_iterations(500),
            &mut recorder,
        )
        .unwrap();

    assert!(!recorder.values.is_empty());
    for pair in recorder.values.windows(2) {
        assert!(pair[1] <= pair[0], "best value rose from {} to {}", pair[0], pair[1]);
    }
}

#[test]
fn test_shrink_when_every_candidate_is_rejected() {
    // Any point other than the three vertices lands on the plateau at 100.
    let cost_fn = TryFnCost::new(|x: &[f64]| -> Result<f64> {
        Ok(if x[0] == 0.0 && x[1] == 0.0 {
            0.0
        } else if x[0] == 1.0 && x[1] == 0.0 {
            1.0
        } else if x[0] == 0.0 && x[1] == 1.0 {
            2.0
        } else {
            100.0
        })
    });
    let original = vec![
        DVector::from_vec(vec![0.0, 1.0]),
        DVector::from_vec(vec![1.0, 0.0]),
        DVector::from_vec(vec![0.0, 0.0]),
    ];
    let mut simplex = Simplex::from_points(original, Coefficients::default(), &cost_fn).unwrap();
    let mut optimizer = NelderMead::<f64>::default();

    assert_eq!(optimizer.step(&mut simplex, &cost_fn).unwrap(), SimplexMove::Shrink);

    let points: Vec<_> = simplex.points().cloned().collect();
    assert_eq!(points[0], DVector::from_vec(vec![0.0, 0.0]));
    assert_relative_eq!(points[1], DVector::from_vec(vec![0.5, 0.0]), epsilon = 1e-12);
    assert_relative_eq!(points[2], DVector::from_vec(vec![0.0, 0.5]), epsilon = 1e-12);
}

#[test]
fn test_second_best_anchor_keeps_two_vertices() {
    let cost_fn = TryFnCost::new(|x: &[f64]| -> Result<f64> {
        Ok(if x[0] == 0.0 && x[1] == 0.0 {
            0.0
        } else if x[0] == 1.0 && x[1] == 0.0 {
            1.0
        } else if x[0] == 0.0 && x[1] == 1.0 {
            2.0
        } else {
            100.0
        })
    });
    let original = vec![
        DVector::from_vec(vec![0.0, 0.0]),
        DVector::from_vec(vec![1.0, 0.0]),
        DVector::from_vec(vec![0.0, 1.0]),
    ];
    let mut simplex = Simplex::from_points(original, Coefficients::default(), &cost_fn).unwrap();
    let mut optimizer =
        NelderMead::new(NelderMeadConfig::new().with_shrink_anchor(ShrinkAnchor::SecondBest));

    assert_eq!(optimizer.step(&mut simplex, &cost_fn).unwrap(), SimplexMove::Shrink);

    let points: Vec<_> = simplex.points().cloned().collect();
    assert_eq!(points[0], DVector::from_vec(vec![0.0, 0.0]));
    assert_eq!(points[1], DVector::from_vec(vec![1.0, 0.0]));
    assert_relative_eq!(points[2], DVector::from_vec(vec![0.5, 0.5]), epsilon = 1e-12);
}

#[test]
fn test_iteration_cap_is_soft() {
    let mut optimizer = seeded(1);
    let result = optimizer
        .optimize(
            &LinearSlope,
            &DVector::zeros(2),
            &StoppingCriterion::new().with_max_iterations(200),
        )
        .unwrap();

    assert!(!result.converged);
    assert_eq!(result.termination_reason, TerminationReason::MaxIterations);
    assert_eq!(result.iterations, 200);
    assert_eq!(result.point.len(), 2);
    assert!(result.value < 0.0);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let criterion = StoppingCriterion::new().with_max_iterations(300);
    let first = seeded(123)
        .optimize(&RosenbrockFunction, &DVector::zeros(3), &criterion)
        .unwrap();
    let second = seeded(123)
        .optimize(&RosenbrockFunction, &DVector::zeros(3), &criterion)
        .unwrap();

    assert_eq!(first.point, second.point);
    assert_eq!(first.value, second.value);
    assert_eq!(first.iterations, second.iterations);
    assert_eq!(first.function_evaluations, second.function_evaluations);
}

#[test]
fn test_cancellation_stops_the_run() {
    let mut callback = CancellationCallback::new();
    callback.cancel();

    let result = seeded(2)
        .optimize_with_callback(
            &SphereFunction,
            &DVector::zeros(2),
            &StoppingCriterion::new(),
            &mut callback,
        )
        .unwrap();

    assert_eq!(result.termination_reason, TerminationReason::UserTerminated);
    assert_eq!(result.iterations, 1);
    assert!(!result.converged);
}

#[test]
fn test_evaluation_budget() {
    let dimension = 4;
    let budget = 60;
    let counting = CountingCostFunction::new(RosenbrockFunction);
    let result = seeded(8)
        .optimize(
            &counting,
            &DVector::zeros(dimension),
            &StoppingCriterion::new().with_max_function_evaluations(budget),
        )
        .unwrap();

    assert_eq!(result.termination_reason, TerminationReason::MaxFunctionEvaluations);
    assert_eq!(result.function_evaluations, counting.count());
    assert!(result.function_evaluations >= budget);
    // One iteration costs at most reflection + contraction + d shrink evaluations.
    assert!(result.function_evaluations < budget + dimension + 2);
}

#[test]
fn test_cost_errors_propagate() {
    let calls = Cell::new(0usize);
    let cost_fn = TryFnCost::new(|x: &[f64]| -> Result<f64> {
        calls.set(calls.get() + 1);
        if calls.get() > 10 {
            Err(OptimizerError::cost_evaluation("model diverged"))
        } else {
            Ok(x.iter().map(|v| v * v).sum())
        }
    });

    let result = seeded(4).optimize(&cost_fn, &DVector::zeros(2), &StoppingCriterion::new());
    assert_eq!(
        result.unwrap_err(),
        OptimizerError::cost_evaluation("model diverged")
    );
    assert_eq!(calls.get(), 11);
}

#[test]
fn test_single_precision() {
    let mut optimizer = NelderMead::<f32>::new(NelderMeadConfig::new().with_seed(6));
    let result = optimizer
        .optimize(&SphereFunction, &DVector::zeros(2), &StoppingCriterion::new())
        .unwrap();

    assert!(result.converged);
    assert!(result.point.norm() < 1e-2);
}

#[cfg(feature = "serde")]
#[test]
fn test_config_from_json() {
    let config: NelderMeadConfig<f64> =
        serde_json::from_str(r#"{ "shrink_anchor": "SecondBest", "seed": 99 }"#).unwrap();
    assert_eq!(config.shrink_anchor, ShrinkAnchor::SecondBest);
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.coefficients, Coefficients::default());

    let criterion: StoppingCriterion<f64> =
        serde_json::from_str(r#"{ "max_iterations": 250 }"#).unwrap();
    assert_eq!(criterion.max_iterations, 250);
    assert_eq!(criterion.spread_tolerance, 1e-8);
}
