//! User-level configuration for the labeler
//!
//! Loaded from `$AWS_LABELER_CONFIG` or
//! `<config dir>/aws-energy-labeler/config.toml`. Keys mirror the long
//! flags in snake_case. Command line and environment values win over it.

use super::env::EnvSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "AWS_LABELER_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file \"{}\" does not exist", .0.display())]
    Missing(PathBuf),

    #[error("Could not read config file \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file \"{}\" is not valid: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub log_level: Option<String>,
    pub log_config: Option<PathBuf>,
    pub region: Option<String>,
    pub frameworks: Option<Vec<String>>,
    pub allowed_account_ids: Option<Vec<String>>,
    pub denied_account_ids: Option<Vec<String>>,
    pub allowed_regions: Option<Vec<String>>,
    pub denied_regions: Option<Vec<String>>,
    pub export_path: Option<String>,
    pub export_metrics_only: Option<bool>,
    pub to_json: Option<bool>,
    pub report_closed_findings_days: Option<u64>,
    pub report_suppressed_findings: Option<bool>,
    /// Program implementing the labeler protocol
    pub labeler_command: Option<String>,
    /// Seconds before the labeler program is killed (0 = never)
    pub labeler_timeout_secs: Option<u64>,
}

impl UserConfig {
    /// Load the user config. A missing default file yields the defaults;
    /// a missing explicit file is an error.
    pub fn load(env: &dyn EnvSource) -> Result<Self, ConfigError> {
        if let Some(explicit) = env.var(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            let path = PathBuf::from(explicit);
            if !path.is_file() {
                return Err(ConfigError::Missing(path));
            }
            return Self::from_file(&path);
        }

        match Self::user_config_path().filter(|p| p.is_file()) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded user config from {}", path.display());
        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("aws-energy-labeler").join("config.toml"))
    }
}
