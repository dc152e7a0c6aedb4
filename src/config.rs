//! Solver configuration.
//!
//! Load limits for both solvers from a TOML file instead of passing every one
//! on the command line.
//!
//! # Examples
//!
//! ```
//! use colorfill_solver::config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     anchor = [0, 0]
//!
//!     [anytime]
//!     time_limit_secs = 2.5
//!     max_solutions = 3
//!
//!     [lookahead]
//!     max_depth = 6
//! "#).unwrap();
//!
//! assert_eq!(config.anytime.time_limit(), Some(Duration::from_millis(2500)));
//! assert_eq!(config.lookahead.max_depth, 6);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::anytime::AnytimeOptions;
use crate::engine::{Cell, DEFAULT_ANCHOR};
use crate::error::ConfigError;

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub anytime: AnytimeConfig,
    pub lookahead: LookaheadConfig,
    /// Cell whose region is recolored each move, as `[row, col]`.
    pub anchor: Cell,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            anytime: AnytimeConfig::default(),
            lookahead: LookaheadConfig::default(),
            anchor: DEFAULT_ANCHOR,
        }
    }
}

/// Limits for the best-first solver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnytimeConfig {
    /// Seconds of search. Leave out for an unbounded search.
    pub time_limit_secs: Option<f64>,
    pub max_solutions: usize,
    pub node_limit: Option<usize>,
}

impl Default for AnytimeConfig {
    fn default() -> Self {
        AnytimeConfig {
            time_limit_secs: Some(5.0),
            max_solutions: 5,
            node_limit: None,
        }
    }
}

impl AnytimeConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs_f64)
    }
}

/// Limits for the lookahead solver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookaheadConfig {
    pub max_depth: usize,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        LookaheadConfig { max_depth: 4 }
    }
}

impl SolverConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no solver can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookahead.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "lookahead.max_depth must be at least 1".to_string(),
            ));
        }
        if let Some(secs) = self.anytime.time_limit_secs {
            if !secs.is_finite() || secs < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "anytime.time_limit_secs must be a non-negative number, got {secs}"
                )));
            }
        }
        Ok(())
    }

    /// Options for [`crate::anytime::AnytimeSolver`].
    pub fn anytime_options(&self) -> AnytimeOptions {
        AnytimeOptions {
            time_budget: self.anytime.time_limit(),
            max_solutions: self.anytime.max_solutions,
            node_limit: self.anytime.node_limit,
            anchor: self.anchor,
        }
    }
}
