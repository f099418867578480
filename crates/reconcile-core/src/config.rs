//! Configuration System
//!
//! Loads sweep constants from a TOML file. Every section and field falls back
//! to the reference scenario when omitted.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use sweep_events::ParameterAxis;

use crate::negotiation::NegotiationRules;
use crate::sweep::{SweepError, SweepRunner, DEFAULT_TRIALS_PER_CELL};

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "reconcile.toml";

/// Complete simulation configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Per-negotiation constants
    #[serde(default)]
    pub negotiation: NegotiationRules,
    /// Grid and trial settings
    #[serde(default)]
    pub sweep: SweepSettings,
}

/// Grid and trial settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Independent negotiations per grid cell
    pub trials_per_cell: u32,
    /// Willingness axis (matrix rows)
    pub willingness: AxisSpec,
    /// Reactivity axis (matrix columns)
    pub reactivity: AxisSpec,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            trials_per_cell: DEFAULT_TRIALS_PER_CELL,
            willingness: AxisSpec::new(0.3, 0.9, 7),
            reactivity: AxisSpec::new(0.1, 0.7, 7),
        }
    }
}

/// Evenly spaced axis, both endpoints inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub start: f64,
    pub end: f64,
    pub steps: usize,
}

impl AxisSpec {
    pub fn new(start: f64, end: f64, steps: usize) -> Self {
        Self { start, end, steps }
    }

    pub fn to_axis(&self, name: &str) -> ParameterAxis {
        ParameterAxis::linspace(name, self.start, self.end, self.steps)
    }
}

impl SimulationConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from the default path, or uses defaults if it is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        if !Path::new(DEFAULT_CONFIG_PATH).exists() {
            return Self::default();
        }
        Self::from_file(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The willingness axis described by this configuration.
    pub fn willingness_axis(&self) -> ParameterAxis {
        self.sweep.willingness.to_axis("willingness")
    }

    /// The reactivity axis described by this configuration.
    pub fn reactivity_axis(&self) -> ParameterAxis {
        self.sweep.reactivity.to_axis("reactivity")
    }

    /// Builds a validated runner from these settings.
    pub fn runner(&self) -> Result<SweepRunner, SweepError> {
        SweepRunner::new(self.negotiation, self.sweep.trials_per_cell)
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Reconciliation sweep configuration

[negotiation]
escalation_rate = 0.05
decay_rate = 0.05
round_limit = 100
initial_conflict_a = 0.4
initial_conflict_b = 0.5

[sweep]
trials_per_cell = 200
willingness = { start = 0.3, end = 0.9, steps = 7 }
reactivity = { start = 0.1, end = 0.7, steps = 7 }
"#
    .to_string()
}
