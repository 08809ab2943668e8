//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Configuration controls the names of the standard attribute labels that
//! typed record accessors (`units`, `long_name`, `description`) resolve to.
//! Everything else about a store is decided by the assignments made to it.
//!
//! # Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$VARMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/varmeta/config.toml`
//! 3. `~/.varmeta/config.toml`
//!
//! Missing config files are not an error (defaults are used).
//!
//! # Example
//!
//! ```
//! use varmeta::core::config::Config;
//!
//! let config = Config::from_toml_str(
//!     r#"
//!     [labels]
//!     description = "desc"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.labels().description.as_str(), "desc");
//! assert_eq!(config.labels().units.as_str(), "units");
//! ```

pub mod schema;

pub use schema::{ConfigFile, LabelsConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::meta::MetaLabels;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "VARMETA_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded and validated configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents
    file: ConfigFile,
    /// Resolved standard labels
    labels: MetaLabels,
    /// Path to the config file (if loaded from disk)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut config = Self::from_file(file)?;
        tracing::debug!(path = %path.display(), "loaded config");
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        Self::from_file(file)
    }

    /// Validate a parsed file and resolve its labels.
    pub fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        file.validate()?;
        let labels = match &file.labels {
            Some(labels) => labels.resolve()?,
            None => MetaLabels::default(),
        };
        Ok(Self {
            file,
            labels,
            path: None,
        })
    }

    /// Find the first existing config file in the search order.
    fn find() -> Option<PathBuf> {
        // 1. Check $VARMETA_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            tracing::warn!(
                var = CONFIG_ENV_VAR,
                path = %path.display(),
                "config path from environment does not exist"
            );
        }

        // 2. Check $XDG_CONFIG_HOME/varmeta/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("varmeta/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.varmeta/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".varmeta/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Get the canonical path for the config file.
    ///
    /// Returns `~/.varmeta/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".varmeta/config.toml"))
    }

    /// Get the parsed file contents.
    ///
    /// Read-only: the resolved labels are derived from it once, at load time.
    pub fn file(&self) -> &ConfigFile {
        &self.file
    }

    /// Get the resolved standard labels.
    pub fn labels(&self) -> &MetaLabels {
        &self.labels
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
