//! Configuration for the energy labeler
//!
//! This module handles:
//! - Environment variable fallbacks (`AWS_LABELER_*`)
//! - The user config file (`config.toml`)
//! - Resolving everything into [`LabelerSettings`]

pub mod env;
pub(crate) mod settings;
mod user_config;

pub use env::{env_key, EnvSource, ProcessEnv, ENV_PREFIX};
pub use settings::{resolve, Invocation, LabelerSettings};
pub use user_config::{ConfigError, UserConfig, CONFIG_PATH_ENV};
