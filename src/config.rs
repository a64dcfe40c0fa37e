//! Planner configuration.
//!
//! Objective weights and solver budget, loadable from TOML so they can be
//! tuned without recompiling. Every field has a default.
//!
//! ```
//! use shift_planner::config::PlannerConfig;
//! use std::time::Duration;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     [objective]
//!     preference_penalty = 8
//!
//!     [solver]
//!     time_limit_seconds = 30
//!     num_workers = 8
//! "#).unwrap();
//!
//! assert_eq!(config.objective.preference_penalty, 8);
//! assert_eq!(config.objective.switch_cost_scale, 100.0);
//! assert_eq!(config.solver.time_limit(), Some(Duration::from_secs(30)));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cp::{ObjectiveWeights, SolverConfig};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Objective weights plus solver budget.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlannerConfig {
    /// Objective term weights.
    #[serde(default)]
    pub objective: ObjectiveWeights,

    /// Budget handed to the solver.
    #[serde(default)]
    pub solver: SolverConfig,
}

impl PlannerConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file is unreadable, is not valid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges. Objective weights follow
    /// [`ObjectiveWeights::validate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.objective
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.solver.time_limit_seconds == Some(0) {
            return Err(ConfigError::Invalid(
                "solver.time_limit_seconds must be > 0".to_string(),
            ));
        }
        if self.solver.num_workers == 0 {
            return Err(ConfigError::Invalid(
                "solver.num_workers must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the objective weights.
    pub fn with_objective(mut self, objective: ObjectiveWeights) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the solver budget.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}
