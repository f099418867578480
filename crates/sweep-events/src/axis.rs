//! Parameter Axes
//!
//! An axis is one ordered, evenly spaced sequence of values swept along one
//! dimension of the grid.

use serde::{Deserialize, Serialize};

/// Ordered values swept along one grid dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterAxis {
    /// Human-readable axis label, e.g. "willingness"
    pub name: String,
    values: Vec<f64>,
}

impl ParameterAxis {
    /// Creates an axis from explicit values, keeping their order.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates `steps` evenly spaced values from `start` to `end`, both inclusive.
    ///
    /// A single step yields just `start`; zero steps yields an empty axis.
    pub fn linspace(name: impl Into<String>, start: f64, end: f64, steps: usize) -> Self {
        let values = match steps {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (steps - 1) as f64;
                let mut values: Vec<f64> = (0..steps).map(|i| start + step * i as f64).collect();
                // Pin the endpoint so accumulated rounding never drifts past `end`
                values[steps - 1] = end;
                values
            }
        };
        Self::new(name, values)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Index and value of the first non-finite entry, if any.
    pub fn first_non_finite(&self) -> Option<(usize, f64)> {
        self.values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
    }
}
