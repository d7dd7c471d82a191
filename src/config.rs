//! Settings read from `festokes.yaml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, Level};

use crate::builder::StructuredBuilder;
use crate::errors::ConfigError;
use crate::geometry::InflowProfile;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "festokes.yaml";

/// Top-level configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Structured mesh resolution.
    pub structured: StructuredConfig,
    /// Inflow profile on the left segment.
    pub inflow: InflowConfig,
    /// Card images.
    pub assets: AssetConfig,
    /// Log output.
    pub log: LogConfig,
}

/// Grid size of the structured meshes.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StructuredConfig {
    /// Cells along x.
    pub nx: usize,
    /// Cells along y.
    pub ny: usize,
}

impl Default for StructuredConfig {
    fn default() -> Self {
        Self { nx: 10, ny: 10 }
    }
}

/// Parabolic inflow parameters.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct InflowConfig {
    /// Velocity at mid-height.
    pub peak: f64,
    /// Height at which the profile vanishes.
    pub height: f64,
}

impl Default for InflowConfig {
    fn default() -> Self {
        let profile = InflowProfile::default();
        Self {
            peak: profile.peak,
            height: profile.height,
        }
    }
}

/// Where card images live.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory the catalog asset references are relative to.
    pub root: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
        }
    }
}

/// Log verbosity.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Maximum level: `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Read a configuration file; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file; using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed YAML or mistyped fields.
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    /// Inflow profile described by the configuration.
    #[must_use]
    pub fn inflow_profile(&self) -> InflowProfile {
        InflowProfile {
            peak: self.inflow.peak,
            height: self.inflow.height,
        }
    }

    /// Maximum tracing level named by `log.level`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogLevel`] when the name is not a tracing level.
    pub fn log_level(&self) -> Result<Level, ConfigError> {
        self.log
            .level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log.level.clone()))
    }

    /// Structured builder at the configured resolution.
    #[must_use]
    pub fn structured_builder(&self) -> StructuredBuilder {
        StructuredBuilder::new(self.structured.nx, self.structured.ny)
    }
}
