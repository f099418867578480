//! Success Matrix
//!
//! The 2-D result of a sweep: one aggregated cell per
//! (willingness, reactivity) coordinate, stored row-major by willingness.

use serde::{Deserialize, Serialize};

/// Aggregated trials for a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellResult {
    /// Trials that ended in reconciliation
    pub successes: u32,
    /// Trials run for this cell
    pub trials: u32,
    /// Mean rounds evaluated by the successful trials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_rounds_to_success: Option<f64>,
}

impl CellResult {
    /// Builds a cell from raw counts and the summed rounds of successful trials.
    pub fn from_counts(successes: u32, trials: u32, success_rounds_total: u64) -> Self {
        let mean_rounds_to_success = if successes > 0 {
            Some(success_rounds_total as f64 / successes as f64)
        } else {
            None
        };
        Self {
            successes,
            trials,
            mean_rounds_to_success,
        }
    }

    /// Fraction of trials that succeeded, in [0, 1].
    pub fn rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.successes as f64 / self.trials as f64
    }
}

/// Row-major matrix of cell results, rows indexed by willingness and
/// columns by reactivity.
///
/// A matrix is only built whole through [`SuccessMatrix::from_fn`] and has no
/// mutating methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessMatrix {
    rows: usize,
    columns: usize,
    cells: Vec<CellResult>,
}

impl SuccessMatrix {
    /// Fills a `rows` x `columns` matrix by calling `f(row, column)` in
    /// row-major order.
    pub fn from_fn<F>(rows: usize, columns: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> CellResult,
    {
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(f(row, column));
            }
        }
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&CellResult> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column)
    }

    /// Success rate at (row, column).
    pub fn rate(&self, row: usize, column: usize) -> Option<f64> {
        self.get(row, column).map(CellResult::rate)
    }

    /// Iterates rows of cells in willingness order.
    pub fn rows(&self) -> impl Iterator<Item = &[CellResult]> {
        // chunks(0) panics, and an empty matrix has nothing to yield anyway
        self.cells.chunks(self.columns.max(1)).take(self.rows)
    }

    /// The success rates as nested vectors, `rates()[row][column]`.
    pub fn rates(&self) -> Vec<Vec<f64>> {
        self.rows()
            .map(|row| row.iter().map(CellResult::rate).collect())
            .collect()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[CellResult] {
        &self.cells
    }
}
