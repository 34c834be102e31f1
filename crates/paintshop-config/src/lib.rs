//! Configuration system for the paint shop scheduler.
//!
//! Load search configuration from TOML or YAML to choose the constructor,
//! the neighborhood, the search controller and its budget without code
//! changes.
//!
//! # Examples
//!
//! ```
//! use paintshop_config::{SearchConfig, SolverConfig, StrategyType};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!     construction = "earliest_deadline"
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [search]
//!     type = "tabu_search"
//!     improve_strategy = "best"
//!     diversify_strategy = "random"
//!     max_iterations = 500
//!     taboo_window = 20
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert!(matches!(
//!     config.search,
//!     SearchConfig::TabuSearch(ref tabu) if tabu.diversify_strategy == StrategyType::Random
//! ));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use paintshop_config::SolverConfig;
//!
//! let config = SolverConfig::load("paintshop.toml").unwrap_or_default();
//! assert_eq!(config.seed(), 420);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seed used when the configuration does not set one.
pub const DEFAULT_RANDOM_SEED: u64 = 420;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Procedure building the initial schedule and restarts.
    #[serde(default)]
    pub construction: ConstructionType,

    /// Move families explored by the search.
    #[serde(default)]
    pub neighborhood: NeighborhoodConfig,

    /// Search controller.
    #[serde(default)]
    pub search: SearchConfig,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, picking YAML for `.yaml`/`.yml`
    /// extensions and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or fails to parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: None,
            millis_spent_limit: Some(limit.as_millis() as u64),
        });
        self
    }

    /// Sets the search controller.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Sets the construction procedure.
    pub fn with_construction(mut self, construction: ConstructionType) -> Self {
        self.construction = construction;
        self
    }

    /// Sets the explored move families.
    pub fn with_neighborhood(mut self, neighborhood: NeighborhoodConfig) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Returns the configured seed or [`DEFAULT_RANDOM_SEED`].
    pub fn seed(&self) -> u64 {
        self.random_seed.unwrap_or(DEFAULT_RANDOM_SEED)
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no move family is enabled,
    /// an iteration-driven cooling has zero iterations, or a time-driven
    /// cooling has no time limit to cool against.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.neighborhood.is_empty() {
            return Err(ConfigError::Invalid(
                "neighborhood enables no move family".to_string(),
            ));
        }
        if let SearchConfig::SimulatedAnnealing(annealing) = &self.search {
            match annealing.cooling {
                CoolingConfig::Iterations { total_iterations: 0 } => {
                    return Err(ConfigError::Invalid(
                        "cooling needs at least one iteration".to_string(),
                    ));
                }
                CoolingConfig::Time if self.time_limit().is_none() => {
                    return Err(ConfigError::Invalid(
                        "time-driven cooling requires a termination time limit".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Construction procedures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionType {
    /// Uniform random sample of the solution space.
    #[default]
    Sampled,

    /// Orders by deadline, each to the machine finishing first.
    EarliestDeadline,

    /// Orders by deadline, each to the machine with the fewest orders.
    LeastLoaded,
}

/// Enabled move families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct NeighborhoodConfig {
    pub swap: bool,
    pub relocate: bool,
    pub swap_queues: bool,
    pub swap_batch: bool,
}

impl Default for NeighborhoodConfig {
    fn default() -> Self {
        Self {
            swap: true,
            relocate: true,
            swap_queues: true,
            swap_batch: true,
        }
    }
}

impl NeighborhoodConfig {
    /// True when every move family is disabled.
    pub fn is_empty(&self) -> bool {
        !(self.swap || self.relocate || self.swap_queues || self.swap_batch)
    }
}

/// Move selection strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// First acceptable move in enumeration order.
    #[default]
    First,

    /// Cheapest acceptable move of the whole neighborhood.
    Best,

    /// First acceptable move in shuffled order.
    Random,
}

/// Search controller configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchConfig {
    /// Strictly improving descent.
    GreedyDescent(GreedyDescentConfig),

    /// Tabu search.
    TabuSearch(TabuSearchConfig),

    /// Simulated annealing.
    SimulatedAnnealing(SimulatedAnnealingConfig),
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::GreedyDescent(GreedyDescentConfig::default())
    }
}

/// Greedy descent configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GreedyDescentConfig {
    #[serde(default)]
    pub strategy: StrategyType,
}

/// Tabu search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct TabuSearchConfig {
    /// Strategy for the improving step.
    pub improve_strategy: StrategyType,

    /// Strategy for the non-tabu fallback step.
    pub diversify_strategy: StrategyType,

    /// Maximum number of iterations.
    pub max_iterations: u64,

    /// Number of most recent schedules kept tabu; unbounded when unset.
    pub taboo_window: Option<usize>,

    /// Restart instead of stopping at a local optimum.
    pub restart: Option<RestartConfig>,
}

impl Default for TabuSearchConfig {
    fn default() -> Self {
        Self {
            improve_strategy: StrategyType::Best,
            diversify_strategy: StrategyType::Best,
            max_iterations: 100,
            taboo_window: None,
            restart: None,
        }
    }
}

/// Tabu restart configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RestartConfig {
    /// Maximum number of restarts per run.
    pub max_restarts: u32,

    /// Construction used for restarts; the solver construction when unset.
    pub construction: Option<ConstructionType>,
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SimulatedAnnealingConfig {
    /// Divides the temperature in the acceptance exponent.
    pub scale_factor: f64,

    /// Temperature schedule.
    pub cooling: CoolingConfig,
}

impl Default for SimulatedAnnealingConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            cooling: CoolingConfig::default(),
        }
    }
}

/// Temperature schedule for simulated annealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoolingConfig {
    /// Cools linearly over a fixed number of iterations.
    Iterations { total_iterations: u64 },

    /// Cools linearly over the termination time limit.
    Time,
}

impl Default for CoolingConfig {
    fn default() -> Self {
        CoolingConfig::Iterations {
            total_iterations: 1000,
        }
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving.
    pub millis_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the combined time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1000)
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;
