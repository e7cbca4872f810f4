//! CLI configuration management.
//!
//! Settings come from three layers, later ones winning:
//! 1. An optional TOML file (`saw.toml` by default)
//! 2. `SAW_*` environment variables
//! 3. Command-line flags

use std::path::Path;

use saw_engine::mc::MAX_TRIALS;
use saw_engine::walker::{RunPolicy, DEFAULT_STOP_PROBABILITY};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CliError, Result};

/// Effective settings for a sampling run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SawConfig {
    /// Lattice extents, e.g. `10x10` or `10x10x10`.
    pub shape: String,

    /// Number of walks per estimate.
    pub trials: usize,

    /// Run policy name or numeric id.
    pub policy: String,

    /// Stop probability used when the policy is early-stop.
    pub stop_probability: f64,

    /// Base seed; runs are reproducible when set.
    pub seed: Option<u64>,

    /// Disable the Rayon thread pool.
    pub sequential: bool,

    /// Log level for the tracing subscriber.
    pub log_level: String,
}

impl Default for SawConfig {
    fn default() -> Self {
        Self {
            shape: "10x10".to_string(),
            trials: 10_000,
            policy: "unrestricted".to_string(),
            stop_probability: DEFAULT_STOP_PROBABILITY,
            seed: None,
            sequential: false,
            log_level: "info".to_string(),
        }
    }
}

impl SawConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `path` if it exists, otherwise start from the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!(path = %path.display(), "loading configuration file");
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Unparseable numeric values are ignored, leaving the previous setting.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(shape) = std::env::var("SAW_SHAPE") {
            self.shape = shape;
        }

        if let Ok(trials) = std::env::var("SAW_TRIALS") {
            self.trials = trials.parse().unwrap_or(self.trials);
        }

        if let Ok(policy) = std::env::var("SAW_POLICY") {
            self.policy = policy;
        }

        if let Ok(p) = std::env::var("SAW_STOP_PROBABILITY") {
            self.stop_probability = p.parse().unwrap_or(self.stop_probability);
        }

        if let Ok(seed) = std::env::var("SAW_SEED") {
            self.seed = seed.parse().ok().or(self.seed);
        }

        if let Ok(log_level) = std::env::var("SAW_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.extents() {
            errors.push(e.to_string());
        }

        if self.trials == 0 || self.trials > MAX_TRIALS {
            errors.push(format!(
                "trials {} outside allowed range [1, {}]",
                self.trials, MAX_TRIALS
            ));
        }

        if let Err(e) = self.run_policy() {
            errors.push(e.to_string());
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CliError::Validation(errors))
        }
    }

    /// Parses `shape` into per-axis extents and checks them.
    pub fn extents(&self) -> Result<Vec<usize>> {
        let extents = parse_shape(&self.shape)?;
        saw_engine::LatticeShape::new(&extents)?;
        Ok(extents)
    }

    /// Resolves `policy` and `stop_probability` into a checked run policy.
    pub fn run_policy(&self) -> Result<RunPolicy> {
        let policy: RunPolicy = self.policy.parse()?;
        let policy = match policy {
            RunPolicy::EarlyStop { .. } => RunPolicy::early_stop_with(self.stop_probability)?,
            other => other,
        };
        Ok(policy)
    }
}

/// Parses `10x10`, `10x10x10` or `10,10` into extents.
pub fn parse_shape(shape: &str) -> Result<Vec<usize>> {
    shape
        .split(|c: char| c == 'x' || c == 'X' || c == ',')
        .map(|part| {
            part.trim().parse::<usize>().map_err(|_| {
                CliError::InvalidArgument(format!(
                    "Invalid shape '{}'. Expected extents such as 10x10 or 10x10x10",
                    shape
                ))
            })
        })
        .collect()
}
