//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Config File
//!
//! Located at (in order of precedence):
//! 1. `$VARMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/varmeta/config.toml`
//! 3. `~/.varmeta/config.toml`
//!
//! # Validation
//!
//! Config values are validated after parsing: every configured label must be
//! a valid [`Label`] and no two standard roles may share a label.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::meta::MetaLabels;
use crate::core::types::Label;

/// Top-level configuration file.
///
/// # Example
///
/// ```toml
/// [labels]
/// units = "units"
/// long_name = "long_name"
/// description = "desc"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Names of the standard attribute labels
    pub labels: Option<LabelsConfig>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(labels) = &self.labels {
            labels.validate()?;
        }
        Ok(())
    }
}

/// Label names for the standard attribute roles.
///
/// Unset roles keep their default label.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    /// Label holding a variable's units (default: "units")
    pub units: Option<String>,

    /// Label holding a variable's long name (default: "long_name")
    pub long_name: Option<String>,

    /// Label holding a variable's description (default: "description")
    pub description: Option<String>,
}

impl LabelsConfig {
    /// Validate the label configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    /// Resolve configured names over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a name is not a valid label or
    /// two roles resolve to the same label.
    pub fn resolve(&self) -> Result<MetaLabels, ConfigError> {
        let defaults = MetaLabels::default();

        let pick = |role: &str, configured: &Option<String>, default: Label| {
            match configured {
                Some(name) => Label::new(name.as_str()).map_err(|e| {
                    ConfigError::InvalidValue(format!("invalid {role} label: {e}"))
                }),
                None => Ok(default),
            }
        };

        let labels = MetaLabels {
            units: pick("units", &self.units, defaults.units)?,
            long_name: pick("long_name", &self.long_name, defaults.long_name)?,
            description: pick("description", &self.description, defaults.description)?,
        };

        if labels.units == labels.long_name
            || labels.units == labels.description
            || labels.long_name == labels.description
        {
            return Err(ConfigError::InvalidValue(format!(
                "standard labels must be distinct, got units='{}', long_name='{}', description='{}'",
                labels.units, labels.long_name, labels.description
            )));
        }

        Ok(labels)
    }
}
