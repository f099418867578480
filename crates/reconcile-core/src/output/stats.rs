//! Statistics Output
//!
//! Summaries derived from a finished sweep: marginal success rates along each
//! axis, the extreme cells, and how quickly successful trials reconciled.

use serde::Serialize;

use sweep_events::{CellCoordinate, SweepReport};

/// A cell paired with its success rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatedCell {
    pub cell: CellCoordinate,
    pub rate: f64,
}

/// Overall sweep statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepStats {
    pub total_trials: u64,
    pub total_successes: u64,
    pub overall_rate: f64,
    /// Mean rate of each willingness row
    pub willingness_means: Vec<f64>,
    /// Mean rate of each reactivity column
    pub reactivity_means: Vec<f64>,
    pub best: Option<RatedCell>,
    pub worst: Option<RatedCell>,
    /// Rounds per successful trial, pooled over all cells
    pub mean_rounds_to_success: Option<f64>,
}

impl SweepStats {
    pub fn from_report(report: &SweepReport) -> Self {
        let (rows, columns) = report.matrix.shape();
        let rates = report.matrix.rates();

        let willingness_means = rates.iter().map(|row| mean(row)).collect();
        let reactivity_means = (0..columns)
            .map(|column| {
                let column_rates: Vec<f64> = (0..rows).map(|row| rates[row][column]).collect();
                mean(&column_rates)
            })
            .collect();

        let mut total_trials = 0u64;
        let mut total_successes = 0u64;
        let mut success_rounds = 0.0f64;
        for cell in report.matrix.cells() {
            total_trials += u64::from(cell.trials);
            total_successes += u64::from(cell.successes);
            if let Some(mean_rounds) = cell.mean_rounds_to_success {
                success_rounds += mean_rounds * f64::from(cell.successes);
            }
        }

        let mean_rounds_to_success = if total_successes > 0 {
            Some(success_rounds / total_successes as f64)
        } else {
            None
        };

        let rated = |(cell, rate): (CellCoordinate, f64)| RatedCell { cell, rate };

        Self {
            total_trials,
            total_successes,
            overall_rate: report.overall_success_rate(),
            willingness_means,
            reactivity_means,
            best: report.best_cell().map(rated),
            worst: report.worst_cell().map(rated),
            mean_rounds_to_success,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweep_events::{CellResult, ParameterAxis, SuccessMatrix, SweepParameters};

    fn report_from(counts: [[u32; 2]; 2], trials: u32) -> SweepReport {
        SweepReport {
            report_id: "sweep_test".to_string(),
            seed: 1,
            parameters: SweepParameters {
                escalation_rate: 0.05,
                decay_rate: 0.05,
                round_limit: 100,
                trials_per_cell: trials,
                initial_conflict_a: 0.4,
                initial_conflict_b: 0.5,
                noise_std_dev: 0.1,
            },
            willingness: ParameterAxis::new("willingness", vec![0.3, 0.9]),
            reactivity: ParameterAxis::new("reactivity", vec![0.1, 0.7]),
            matrix: SuccessMatrix::from_fn(2, 2, |r, c| {
                CellResult::from_counts(counts[r][c], trials, u64::from(counts[r][c]) * 2)
            }),
        }
    }

    #[test]
    fn test_marginal_means() {
        let stats = SweepStats::from_report(&report_from([[2, 4], [6, 8]], 10));

        assert_eq!(stats.willingness_means.len(), 2);
        assert!((stats.willingness_means[0] - 0.3).abs() < 1e-12);
        assert!((stats.willingness_means[1] - 0.7).abs() < 1e-12);
        assert!((stats.reactivity_means[0] - 0.4).abs() < 1e-12);
        assert!((stats.reactivity_means[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_totals_and_extremes() {
        let stats = SweepStats::from_report(&report_from([[2, 4], [6, 8]], 10));

        assert_eq!(stats.total_trials, 40);
        assert_eq!(stats.total_successes, 20);
        assert_eq!(stats.overall_rate, 0.5);
        assert_eq!(stats.best.unwrap().cell.willingness, 0.9);
        assert_eq!(stats.best.unwrap().cell.reactivity, 0.7);
        assert_eq!(stats.worst.unwrap().rate, 0.2);
    }

    #[test]
    fn test_pooled_rounds_to_success() {
        let stats = SweepStats::from_report(&report_from([[2, 4], [6, 8]], 10));
        let mean_rounds = stats.mean_rounds_to_success.unwrap();
        assert!((mean_rounds - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_successes_has_no_round_mean() {
        let stats = SweepStats::from_report(&report_from([[0, 0], [0, 0]], 10));
        assert_eq!(stats.overall_rate, 0.0);
        assert!(stats.mean_rounds_to_success.is_none());
    }
}
