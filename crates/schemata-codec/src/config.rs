//! # Codec Configuration
//!
//! Knobs that select between defensible behaviors at the edges of the
//! conversion rules. Loaded from YAML; every field has a default, so an
//! empty file is a valid configuration.
//!
//! ```yaml
//! max_depth: 64            # null disables the nesting guard
//! integer_coercion: exact  # or: truncate
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default limit on list/tuple nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// How a floating value becomes an `integer` node or element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerCoercion {
    /// Accept only integral values within `i32` range.
    #[default]
    Exact,
    /// Truncate toward zero. Out-of-range values are still rejected.
    Truncate,
}

impl IntegerCoercion {
    /// Convert `x` under this policy, or `None` if it is not acceptable.
    pub fn apply(self, x: f64) -> Option<i32> {
        if !x.is_finite() {
            return None;
        }
        let candidate = match self {
            Self::Exact if x.fract() != 0.0 => return None,
            Self::Exact => x,
            Self::Truncate => x.trunc(),
        };
        if candidate < f64::from(i32::MIN) || candidate > f64::from(i32::MAX) {
            return None;
        }
        Some(candidate as i32)
    }
}

/// Configuration shared by every conversion a `Codec` performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Maximum list/tuple nesting. `None` disables the guard.
    pub max_depth: Option<usize>,
    /// Policy for floating → integer conversion in both directions.
    pub integer_coercion: IntegerCoercion,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            integer_coercion: IntegerCoercion::default(),
        }
    }
}

/// Error loading a `CodecConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file '{path}': {source}")]
    Read {
        /// Path of the config file.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// The config text is not valid YAML for `CodecConfig`.
    #[error("invalid codec config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl CodecConfig {
    /// A configuration with the nesting guard disabled.
    pub fn unlimited() -> Self {
        Self {
            max_depth: None,
            ..Self::default()
        }
    }

    /// Parse a YAML document. Missing fields take their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded codec config");
        Ok(config)
    }
}
