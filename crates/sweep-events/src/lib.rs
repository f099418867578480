//! Shared result types and serialization for the reconciliation sweep.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine produces them and rendering collaborators consume them.

pub mod axis;
pub mod matrix;
pub mod report;

pub use axis::ParameterAxis;
pub use matrix::{CellResult, SuccessMatrix};
pub use report::{generate_report_id, CellCoordinate, SweepParameters, SweepReport};
