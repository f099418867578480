//! Property tests for the acceptance model, negotiation and sweep.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use reconcile_core::{
    acceptance_probability, logistic_acceptance, run_sweep, CellParams, Negotiation,
    NegotiationRules, RoundDraws,
};

proptest! {
    #[test]
    fn acceptance_stays_within_unit_interval(
        willingness in -1.0e6_f64..1.0e6,
        conflict in -1.0e6_f64..1.0e6,
        reactivity in -10.0_f64..10.0,
        seed in any::<u64>(),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let p = acceptance_probability(willingness, conflict, reactivity, &mut rng);
        prop_assert!(p.is_finite());
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn acceptance_falls_as_conflict_rises(
        willingness in -5.0_f64..5.0,
        conflict in -5.0_f64..5.0,
        bump in 0.0_f64..5.0,
        reactivity in 0.0_f64..1.0,
        epsilon in -0.5_f64..0.5,
    ) {
        let before = logistic_acceptance(willingness, conflict, reactivity, epsilon);
        let after = logistic_acceptance(willingness, conflict + bump, reactivity, epsilon);
        prop_assert!(after <= before);
    }

    #[test]
    fn negotiation_terminates_within_round_limit(
        willingness in 0.0_f64..1.5,
        reactivity in 0.0_f64..1.0,
        round_limit in 1_u32..200,
        seed in any::<u64>(),
    ) {
        let rules = NegotiationRules { round_limit, ..NegotiationRules::default() };
        let mut rng = SmallRng::seed_from_u64(seed);
        let outcome = Negotiation::symmetric(CellParams::new(willingness, reactivity), rules)
            .run(&mut rng);

        prop_assert!(outcome.rounds >= 1);
        prop_assert!(outcome.rounds <= round_limit);
        if !outcome.reconciled {
            prop_assert_eq!(outcome.rounds, round_limit);
        }
    }

    #[test]
    fn refused_rounds_never_improve_agent_state(
        willingness in 0.0_f64..1.5,
        reactivity in 0.0_f64..1.0,
        epsilon_a in -0.3_f64..0.3,
        epsilon_b in -0.3_f64..0.3,
        rounds in 1_usize..50,
    ) {
        let mut negotiation =
            Negotiation::symmetric(CellParams::new(willingness, reactivity), NegotiationRules::default());
        // u = 1.0 can never fall below an acceptance probability
        let refusal = RoundDraws { epsilon_a, epsilon_b, u_a: 1.0, u_b: 1.0 };

        for _ in 0..rounds {
            let before = (*negotiation.agent_a(), *negotiation.agent_b());
            negotiation.step_with(refusal);
            prop_assert!(negotiation.agent_a().conflict() >= before.0.conflict());
            prop_assert!(negotiation.agent_b().conflict() >= before.1.conflict());
            prop_assert!(negotiation.agent_a().willingness() <= before.0.willingness());
            prop_assert!(negotiation.agent_b().willingness() <= before.1.willingness());
            prop_assert_eq!(negotiation.agent_a().reactivity(), reactivity);
        }
    }

    #[test]
    fn sweep_shape_matches_axes(
        rows in 1_usize..5,
        columns in 1_usize..5,
        trials in 1_u32..20,
        seed in any::<u64>(),
    ) {
        let willingness: Vec<f64> = (0..rows).map(|i| 0.3 + 0.1 * i as f64).collect();
        let reactivity: Vec<f64> = (0..columns).map(|j| 0.1 + 0.1 * j as f64).collect();
        let mut rng = SmallRng::seed_from_u64(seed);

        let rates = run_sweep(&willingness, &reactivity, trials, &mut rng).unwrap();

        prop_assert_eq!(rates.len(), rows);
        for row in &rates {
            prop_assert_eq!(row.len(), columns);
            for &rate in row {
                let k = rate * f64::from(trials);
                prop_assert!((k - k.round()).abs() < 1e-9);
                prop_assert!((0.0..=1.0).contains(&rate));
            }
        }
    }
}
