//! Reconciliation sweep engine.
//!
//! Estimates how often a pair of negotiating agents reconciles within a round
//! budget, across a grid of willingness and reactivity settings.
//!
//! # Modules
//!
//! - [`acceptance`]: per-decision acceptance probability
//! - [`negotiation`]: the two-agent, bounded-round state machine
//! - [`sweep`]: Monte Carlo aggregation over the parameter grid
//! - [`config`]: TOML configuration
//! - [`output`]: heatmap rendering and summary statistics

pub mod acceptance;
pub mod config;
pub mod negotiation;
pub mod output;
pub mod sweep;

pub use acceptance::{acceptance_probability, logistic, logistic_acceptance, NOISE_STD_DEV};
pub use config::{default_config_toml, AxisSpec, ConfigError, SimulationConfig, SweepSettings};
pub use negotiation::{
    AgentState, CellParams, Negotiation, NegotiationRules, NegotiationState, RoundDraws,
    TrialOutcome,
};
pub use output::{HeatmapSink, JsonSink, SweepStats, TextHeatmap};
pub use sweep::{run_sweep, SweepError, SweepRunner};

// Re-export the shared result types so callers need only this crate
pub use sweep_events::{CellResult, ParameterAxis, SuccessMatrix, SweepReport};
