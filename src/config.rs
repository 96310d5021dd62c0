//! Runtime configuration for recall sessions and the demo binary.
//!
//! The memory itself takes every parameter as a call argument; this module
//! only decides which values the caller passes.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::HopfieldError;
use crate::memory::TrainingMode;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "hopfield.yaml";

/// Caller-side defaults for grid shape, noise and recall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    /// Grid height used when rendering a state.
    pub rows: usize,
    /// Grid width used when rendering a state.
    pub cols: usize,
    /// Per-element flip probability for the "add noise" action.
    pub noise_probability: f64,
    /// Sweep cap for recall.
    pub max_iterations: usize,
    /// Reset or accumulate when a session retrains.
    pub training_mode: TrainingMode,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            noise_probability: 0.3,
            max_iterations: 100,
            training_mode: TrainingMode::Replace,
        }
    }
}

impl RecallConfig {
    /// Neuron count implied by the grid shape.
    pub fn size(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Check every field is usable.
    pub fn validate(&self) -> std::result::Result<(), HopfieldError> {
        if self.rows == 0 || self.cols == 0 || self.rows.checked_mul(self.cols).is_none() {
            return Err(HopfieldError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        crate::codec::noise::check_probability(self.noise_probability)?;
        if self.max_iterations == 0 {
            return Err(HopfieldError::InvalidIterations);
        }
        Ok(())
    }

    /// Load from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "hopfield.yaml" in CWD. A missing or
    /// unparsable file falls back to defaults. Env values that fail to parse
    /// are ignored.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let path = yaml_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let yaml: Self = read_yaml_file(path).unwrap_or_default();

        let config = Self {
            rows: env_parse("HOPFIELD_ROWS").unwrap_or(yaml.rows),
            cols: env_parse("HOPFIELD_COLS").unwrap_or(yaml.cols),
            noise_probability: env_parse("HOPFIELD_NOISE_PROBABILITY")
                .unwrap_or(yaml.noise_probability),
            max_iterations: env_parse("HOPFIELD_MAX_ITERATIONS").unwrap_or(yaml.max_iterations),
            training_mode: std::env::var("HOPFIELD_TRAINING_MODE")
                .ok()
                .and_then(|s| serde_yaml::from_str(&s).ok())
                .unwrap_or(yaml.training_mode),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Deserialize a YAML file. `None` when the file is absent, unreadable or
/// malformed; only the latter two are worth a warning.
fn read_yaml_file<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No config at {}", path.display());
            return None;
        }
        Err(e) => {
            warn!("Cannot read {}: {}", path.display(), e);
            return None;
        }
    };
    serde_yaml::from_str(&contents)
        .map(|value| {
            info!("Loaded config from {}", path.display());
            value
        })
        .map_err(|e| warn!("Ignoring malformed {}: {}", path.display(), e))
        .ok()
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}
