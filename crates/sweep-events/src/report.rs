//! Sweep Report
//!
//! Everything a rendering collaborator needs to display one finished sweep:
//! the constants it ran with, both axes, and the success matrix.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ParameterAxis, SuccessMatrix};

/// Generates a unique report ID.
pub fn generate_report_id() -> String {
    format!("sweep_{}", Uuid::new_v4().simple())
}

/// Scalar constants a sweep was run with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepParameters {
    pub escalation_rate: f64,
    pub decay_rate: f64,
    pub round_limit: u32,
    pub trials_per_cell: u32,
    pub initial_conflict_a: f64,
    pub initial_conflict_b: f64,
    pub noise_std_dev: f64,
}

/// The parameter values behind one matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellCoordinate {
    pub row: usize,
    pub column: usize,
    pub willingness: f64,
    pub reactivity: f64,
}

/// A completed sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub report_id: String,
    pub seed: u64,
    pub parameters: SweepParameters,
    pub willingness: ParameterAxis,
    pub reactivity: ParameterAxis,
    pub matrix: SuccessMatrix,
}

impl SweepReport {
    /// Resolves a matrix index to its parameter values.
    pub fn coordinate(&self, row: usize, column: usize) -> Option<CellCoordinate> {
        Some(CellCoordinate {
            row,
            column,
            willingness: self.willingness.get(row)?,
            reactivity: self.reactivity.get(column)?,
        })
    }

    /// Successes over trials across every cell.
    pub fn overall_success_rate(&self) -> f64 {
        let (successes, trials) = self
            .matrix
            .cells()
            .iter()
            .fold((0u64, 0u64), |(s, t), cell| {
                (s + u64::from(cell.successes), t + u64::from(cell.trials))
            });
        if trials == 0 {
            0.0
        } else {
            successes as f64 / trials as f64
        }
    }

    /// Cell with the highest success rate; ties go to the earliest cell.
    pub fn best_cell(&self) -> Option<(CellCoordinate, f64)> {
        self.extreme_cell(|candidate, current| candidate > current)
    }

    /// Cell with the lowest success rate; ties go to the earliest cell.
    pub fn worst_cell(&self) -> Option<(CellCoordinate, f64)> {
        self.extreme_cell(|candidate, current| candidate < current)
    }

    fn extreme_cell(&self, better: impl Fn(f64, f64) -> bool) -> Option<(CellCoordinate, f64)> {
        let (rows, columns) = self.matrix.shape();
        let mut best: Option<(usize, usize, f64)> = None;
        for row in 0..rows {
            for column in 0..columns {
                let Some(rate) = self.matrix.rate(row, column) else {
                    continue;
                };
                match best {
                    Some((_, _, current)) if !better(rate, current) => {}
                    _ => best = Some((row, column, rate)),
                }
            }
        }
        let (row, column, rate) = best?;
        Some((self.coordinate(row, column)?, rate))
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
