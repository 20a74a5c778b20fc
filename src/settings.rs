//! File-backed settings.
//!
//! `Settings` is the raw, serde-friendly shape read from `taxdesk.toml`.
//! Environment overrides and range checks happen later in
//! [`crate::config::PracticeConfig::resolve`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lookup: LookupSettings,
    pub validation: ValidationSettings,
    pub workload: WorkloadSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    pub address_delay_ms: u64,
    pub company_delay_ms: u64,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            address_delay_ms: 800,
            company_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub strict_trading_address: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadSettings {
    pub months: u64,
    pub high_load_threshold: u64,
}

impl Default for WorkloadSettings {
    fn default() -> Self {
        Self {
            months: 6,
            high_load_threshold: 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: "pretty".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file. Missing keys fall back to defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
