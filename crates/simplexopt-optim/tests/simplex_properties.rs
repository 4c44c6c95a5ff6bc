//! Property tests for simplex ordering and dimension handling

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use simplexopt_core::{
    optimizer::StoppingCriterion,
    test_utils::{RosenbrockFunction, ShiftedQuadratic},
    types::DVector,
};
use simplexopt_optim::{Coefficients, NelderMead, NelderMeadConfig, Simplex};

fn is_sorted(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ordering_holds_after_every_step(
        dimension in 1usize..6,
        seed in any::<u64>(),
        steps in 1usize..40,
    ) {
        let cost_fn = RosenbrockFunction;
        let mut rng = StdRng::seed_from_u64(seed);
        let center = DVector::from_element(dimension, 0.5);
        let mut simplex =
            Simplex::random(&center, 0.3, Coefficients::default(), &cost_fn, &mut rng).unwrap();
        let mut optimizer = NelderMead::<f64>::default();

        for _ in 0..steps {
            optimizer.step(&mut simplex, &cost_fn).unwrap();
            simplex.order();
            prop_assert!(is_sorted(&simplex.values()));
            prop_assert_eq!(simplex.len(), dimension + 1);
            prop_assert!(simplex.points().all(|p| p.len() == dimension));
        }
    }

    #[test]
    fn result_has_the_input_dimension(
        target in prop::collection::vec(-5.0f64..5.0, 1..8),
        seed in any::<u64>(),
    ) {
        let dimension = target.len();
        let cost_fn = ShiftedQuadratic::new(DVector::from_vec(target));
        let mut optimizer = NelderMead::new(NelderMeadConfig::new().with_seed(seed));
        let result = optimizer
            .optimize(
                &cost_fn,
                &DVector::zeros(dimension),
                &StoppingCriterion::new().with_max_iterations(200),
            )
            .unwrap();

        prop_assert_eq!(result.point.len(), dimension);
        prop_assert!(result.iterations <= 200);
    }
}
