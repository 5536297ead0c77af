//! Environment variable lookup
//!
//! Resolution reads the environment through [`EnvSource`] so it can be
//! driven from a plain map in tests.

use std::collections::HashMap;

/// Prefix shared by every labeler environment variable
pub const ENV_PREFIX: &str = "AWS_LABELER_";

pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Name of the environment variable backing an option, e.g. `region` -> `AWS_LABELER_REGION`
pub fn env_key(option: &str) -> String {
    format!("{}{}", ENV_PREFIX, option.to_uppercase().replace('-', "_"))
}
