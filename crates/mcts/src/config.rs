//! MCTS configuration parameters.
//!
//! These parameters control the behavior of the Monte Carlo Tree Search
//! algorithm. The configuration is an explicit value handed to the engine;
//! nothing is read from global state.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uct_core::{Result, SearchError};

/// Largest budget the per-node visit counters can record.
pub const MAX_SIMULATIONS: usize = u32::MAX as usize;

/// How the final move is picked among the root's children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMetric {
    /// Child with the most wins. Favors heavily visited children.
    #[default]
    Wins,
    /// Child with the highest wins / visits ratio.
    WinRate,
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Number of simulations per search.
    pub num_simulations: usize,

    /// UCT exploration constant C.
    /// Higher values favor under-visited moves over known-good ones.
    pub exploration_constant: f32,

    /// Metric used to pick the returned move.
    pub selection_metric: SelectionMetric,

    /// Wall-clock budget. When set, the search stops before starting a
    /// simulation once this much time has elapsed.
    pub time_limit: Option<Duration>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 100,
            exploration_constant: 2.0,
            selection_metric: SelectionMetric::Wins,
            time_limit: None,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of simulations.
    pub fn with_simulations(num_simulations: usize) -> Self {
        Self {
            num_simulations,
            ..Default::default()
        }
    }

    pub fn with_exploration_constant(mut self, exploration_constant: f32) -> Self {
        self.exploration_constant = exploration_constant;
        self
    }

    pub fn with_selection_metric(mut self, selection_metric: SelectionMetric) -> Self {
        self.selection_metric = selection_metric;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Check that the configuration can drive a search.
    ///
    /// # Errors
    /// Returns `SearchError::InvalidConfig` if the simulation budget is zero
    /// or does not fit the `u32` node counters, or if the exploration
    /// constant is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.num_simulations == 0 {
            return Err(SearchError::InvalidConfig(
                "num_simulations must be at least 1".to_string(),
            ));
        }

        if self.num_simulations > MAX_SIMULATIONS {
            return Err(SearchError::InvalidConfig(format!(
                "num_simulations {} exceeds the maximum of {}",
                self.num_simulations, MAX_SIMULATIONS
            )));
        }

        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration_constant {} must be finite and non-negative",
                self.exploration_constant
            )));
        }

        Ok(())
    }
}
