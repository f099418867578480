//! Sweep Runner
//!
//! Runs a fixed number of symmetric negotiations for every
//! (willingness, reactivity) cell of a grid and aggregates them into a
//! [`SuccessMatrix`]. Rows follow willingness, columns follow reactivity.
//!
//! All randomness comes from the generator passed in. Cells are visited in
//! row-major order from one stream, so a seeded run is reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use sweep_events::{
    generate_report_id, CellResult, ParameterAxis, SuccessMatrix, SweepParameters, SweepReport,
};

use crate::acceptance::NOISE_STD_DEV;
use crate::negotiation::{CellParams, Negotiation, NegotiationRules};

/// Trials per cell in the reference scenario
pub const DEFAULT_TRIALS_PER_CELL: u32 = 200;

/// Reasons a sweep is refused before any trial runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    #[error("trials per cell must be positive")]
    ZeroTrials,
    #[error("round limit must be positive")]
    ZeroRoundLimit,
    #[error("{axis} axis has no values")]
    EmptyAxis { axis: String },
    #[error("{axis} axis value at index {index} is not finite: {value}")]
    NonFiniteValue { axis: String, index: usize, value: f64 },
    #[error("{name} must be finite, got {value}")]
    NonFiniteConstant { name: &'static str, value: f64 },
}

/// Monte Carlo driver over a parameter grid.
#[derive(Debug, Clone, Copy)]
pub struct SweepRunner {
    rules: NegotiationRules,
    trials_per_cell: u32,
}

impl SweepRunner {
    /// Validates the constants and builds a runner.
    pub fn new(rules: NegotiationRules, trials_per_cell: u32) -> Result<Self, SweepError> {
        if trials_per_cell == 0 {
            return Err(SweepError::ZeroTrials);
        }
        if rules.round_limit == 0 {
            return Err(SweepError::ZeroRoundLimit);
        }
        let constants = [
            ("escalation_rate", rules.escalation_rate),
            ("decay_rate", rules.decay_rate),
            ("initial_conflict_a", rules.initial_conflict_a),
            ("initial_conflict_b", rules.initial_conflict_b),
        ];
        if let Some(&(name, value)) = constants.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SweepError::NonFiniteConstant { name, value });
        }

        Ok(Self {
            rules,
            trials_per_cell,
        })
    }

    pub fn rules(&self) -> &NegotiationRules {
        &self.rules
    }

    pub fn trials_per_cell(&self) -> u32 {
        self.trials_per_cell
    }

    /// Constants of this runner in report form.
    pub fn parameters(&self) -> SweepParameters {
        SweepParameters {
            escalation_rate: self.rules.escalation_rate,
            decay_rate: self.rules.decay_rate,
            round_limit: self.rules.round_limit,
            trials_per_cell: self.trials_per_cell,
            initial_conflict_a: self.rules.initial_conflict_a,
            initial_conflict_b: self.rules.initial_conflict_b,
            noise_std_dev: NOISE_STD_DEV,
        }
    }

    /// Runs every trial for a single cell.
    pub fn run_cell<R: Rng + ?Sized>(&self, cell: CellParams, rng: &mut R) -> CellResult {
        let mut successes = 0u32;
        let mut success_rounds_total = 0u64;

        for _ in 0..self.trials_per_cell {
            let outcome = Negotiation::symmetric(cell, self.rules).run(rng);
            if outcome.reconciled {
                successes += 1;
                success_rounds_total += u64::from(outcome.rounds);
            }
        }

        CellResult::from_counts(successes, self.trials_per_cell, success_rounds_total)
    }

    /// Runs the full grid, willingness as the outer loop.
    pub fn run<R: Rng + ?Sized>(
        &self,
        willingness: &ParameterAxis,
        reactivity: &ParameterAxis,
        rng: &mut R,
    ) -> Result<SuccessMatrix, SweepError> {
        validate_axis(willingness)?;
        validate_axis(reactivity)?;

        tracing::info!(
            rows = willingness.len(),
            columns = reactivity.len(),
            trials_per_cell = self.trials_per_cell,
            round_limit = self.rules.round_limit,
            "starting sweep"
        );

        let w_values = willingness.values();
        let r_values = reactivity.values();
        let matrix = SuccessMatrix::from_fn(w_values.len(), r_values.len(), |row, column| {
            let cell = CellParams::new(w_values[row], r_values[column]);
            let result = self.run_cell(cell, &mut *rng);
            tracing::debug!(
                willingness = cell.willingness,
                reactivity = cell.reactivity,
                successes = result.successes,
                rate = result.rate(),
                "cell complete"
            );
            result
        });

        tracing::info!(cells = matrix.cells().len(), "sweep complete");
        Ok(matrix)
    }

    /// Runs the grid from a fresh generator seeded with `seed` and packages
    /// the result for rendering.
    pub fn run_seeded(
        &self,
        willingness: ParameterAxis,
        reactivity: ParameterAxis,
        seed: u64,
    ) -> Result<SweepReport, SweepError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let matrix = self.run(&willingness, &reactivity, &mut rng)?;

        Ok(SweepReport {
            report_id: generate_report_id(),
            seed,
            parameters: self.parameters(),
            willingness,
            reactivity,
            matrix,
        })
    }
}

fn validate_axis(axis: &ParameterAxis) -> Result<(), SweepError> {
    if axis.is_empty() {
        return Err(SweepError::EmptyAxis {
            axis: axis.name.clone(),
        });
    }
    if let Some((index, value)) = axis.first_non_finite() {
        return Err(SweepError::NonFiniteValue {
            axis: axis.name.clone(),
            index,
            value,
        });
    }
    Ok(())
}

/// Success rates for every (willingness, reactivity) pair using the
/// reference negotiation constants.
///
/// `result[i][j]` is the rate for `willingness_values[i]` and
/// `reactivity_values[j]`.
pub fn run_sweep<R: Rng + ?Sized>(
    willingness_values: &[f64],
    reactivity_values: &[f64],
    trials_per_cell: u32,
    rng: &mut R,
) -> Result<Vec<Vec<f64>>, SweepError> {
    let runner = SweepRunner::new(NegotiationRules::default(), trials_per_cell)?;
    let willingness = ParameterAxis::new("willingness", willingness_values.to_vec());
    let reactivity = ParameterAxis::new("reactivity", reactivity_values.to_vec());
    Ok(runner.run(&willingness, &reactivity, rng)?.rates())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::negotiation::ROUND_LIMIT;

    #[test]
    fn test_rejects_zero_trials() {
        let err = SweepRunner::new(NegotiationRules::default(), 0).unwrap_err();
        assert_eq!(err, SweepError::ZeroTrials);
    }

    #[test]
    fn test_rejects_zero_round_limit() {
        let rules = NegotiationRules {
            round_limit: 0,
            ..NegotiationRules::default()
        };
        assert_eq!(SweepRunner::new(rules, 10).unwrap_err(), SweepError::ZeroRoundLimit);
    }

    #[test]
    fn test_rejects_non_finite_constant() {
        let rules = NegotiationRules {
            decay_rate: f64::INFINITY,
            ..NegotiationRules::default()
        };
        let err = SweepRunner::new(rules, 10).unwrap_err();
        assert!(matches!(err, SweepError::NonFiniteConstant { name: "decay_rate", .. }));
    }

    #[test]
    fn test_rejects_empty_axis_before_drawing() {
        let runner = SweepRunner::new(NegotiationRules::default(), 5).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut untouched = SmallRng::seed_from_u64(3);

        let err = runner
            .run(
                &ParameterAxis::linspace("willingness", 0.3, 0.9, 3),
                &ParameterAxis::new("reactivity", Vec::new()),
                &mut rng,
            )
            .unwrap_err();

        assert_eq!(
            err,
            SweepError::EmptyAxis {
                axis: "reactivity".to_string()
            }
        );
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_rejects_nan_axis_value() {
        let mut rng = SmallRng::seed_from_u64(3);
        let err = run_sweep(&[0.3, f64::NAN], &[0.1], 10, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SweepError::NonFiniteValue { ref axis, index: 1, .. } if axis == "willingness"
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(SweepError::ZeroTrials.to_string(), "trials per cell must be positive");
        let err = SweepError::EmptyAxis {
            axis: "willingness".to_string(),
        };
        assert_eq!(err.to_string(), "willingness axis has no values");
    }

    #[test]
    fn test_cell_counts_match_trials() {
        let runner = SweepRunner::new(NegotiationRules::default(), 50).unwrap();
        let mut rng = SmallRng::seed_from_u64(11);
        let cell = runner.run_cell(CellParams::new(0.6, 0.4), &mut rng);

        assert_eq!(cell.trials, 50);
        assert!(cell.successes <= 50);
        if let Some(mean) = cell.mean_rounds_to_success {
            assert!((1.0..=f64::from(ROUND_LIMIT)).contains(&mean));
        }
    }

    #[test]
    fn test_run_sweep_shape_and_denominator() {
        let mut rng = SmallRng::seed_from_u64(42);
        let rates = run_sweep(&[0.3, 0.6, 0.9], &[0.1, 0.7], 40, &mut rng).unwrap();

        assert_eq!(rates.len(), 3);
        for row in &rates {
            assert_eq!(row.len(), 2);
            for &rate in row {
                assert!((0.0..=1.0).contains(&rate));
                let k = rate * 40.0;
                assert!((k - k.round()).abs() < 1e-9, "rate {} is not k/40", rate);
            }
        }
    }

    #[test]
    fn test_parameters_reflect_rules() {
        let runner = SweepRunner::new(NegotiationRules::default(), 200).unwrap();
        let params = runner.parameters();

        assert_eq!(params.trials_per_cell, 200);
        assert_eq!(params.round_limit, 100);
        assert_eq!(params.initial_conflict_a, 0.4);
        assert_eq!(params.initial_conflict_b, 0.5);
        assert_eq!(params.noise_std_dev, 0.1);
    }
}
