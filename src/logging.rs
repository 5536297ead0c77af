//! Logging setup
//!
//! Logs go to stderr so stdout only carries the report. The level comes
//! from `--log-level`; an optional JSON file tunes format and per-target
//! directives, and `RUST_LOG` adds directives on top.
//!
//! ```json
//! {"level": "debug", "format": "json", "directives": ["labeler=debug"], "ansi": false}
//! ```

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter, Layer, Registry};

/// HTTP stack crates that are too chatty below error
const QUIET_TARGETS: &[&str] = &["ureq=error", "ureq_proto=error", "rustls=error"];

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Could not read log config \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File \"{}\" is not valid json, cannot continue.", .path.display())]
    InvalidJson { path: PathBuf },

    #[error("File \"{}\" is not a valid logging config: {reason}", .path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("Failed to install the logger: {0}")]
    Init(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const CHOICES: [&'static str; 5] = ["debug", "info", "warning", "error", "critical"];

    /// tracing has no critical level; it shares ERROR
    pub fn as_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            _ => Err(format!(
                "invalid choice: '{}' (choose from {})",
                s,
                LogLevel::CHOICES
                    .iter()
                    .map(|c| format!("'{}'", c))
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
    Json,
}

/// Contents of the `--log-config` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Overrides `--log-level` when present
    #[serde(default)]
    pub level: Option<LogLevel>,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub directives: Vec<String>,
    #[serde(default)]
    pub ansi: Option<bool>,
    #[serde(default)]
    pub target: Option<bool>,
}

pub fn load_log_config(path: &Path) -> Result<LogConfig, LoggingError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoggingError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|_| LoggingError::InvalidJson {
            path: path.to_path_buf(),
        })?;
    serde_json::from_value(value).map_err(|e| LoggingError::InvalidConfig {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

pub fn build_filter(level: LogLevel, config: &LogConfig, rust_log: Option<&str>) -> EnvFilter {
    let level = config.level.unwrap_or(level);
    let mut directives: Vec<&str> = QUIET_TARGETS.to_vec();
    directives.extend(config.directives.iter().map(String::as_str));
    if let Some(extra) = rust_log.filter(|s| !s.trim().is_empty()) {
        directives.push(extra);
    }
    EnvFilter::builder()
        .with_default_directive(level.as_level_filter().into())
        .parse_lossy(directives.join(","))
}

/// Install the global subscriber. Call once per process.
pub fn setup_logging(level: LogLevel, config_file: Option<&Path>) -> Result<(), LoggingError> {
    let config = match config_file {
        Some(path) => load_log_config(path)?,
        None => LogConfig::default(),
    };
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(level, &config, rust_log.as_deref());

    let ansi = config
        .ansi
        .unwrap_or_else(console::colors_enabled_stderr);
    let target = config.target.unwrap_or(false);

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Full => tracing_fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(ansi)
            .with_target(target)
            .boxed(),
        LogFormat::Compact => tracing_fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_ansi(ansi)
            .with_target(target)
            .boxed(),
        LogFormat::Pretty => tracing_fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_ansi(ansi)
            .with_target(target)
            .boxed(),
        LogFormat::Json => tracing_fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(target)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::debug!("Logging initialized at level {}", level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing_and_mapping() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!(LogLevel::Critical.as_level_filter(), LevelFilter::ERROR);
        assert_eq!(LogLevel::Debug.as_level_filter(), LevelFilter::DEBUG);
        let err = "verbose".parse::<LogLevel>().unwrap_err();
        assert_eq!(
            err,
            "invalid choice: 'verbose' (choose from 'debug', 'info', 'warning', 'error', 'critical')"
        );
    }

    #[test]
    fn test_load_log_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.json");
        std::fs::write(
            &path,
            r#"{"level": "debug", "format": "json", "directives": ["labeler=debug"]}"#,
        )
        .unwrap();
        let config = load_log_config(&path).unwrap();
        assert_eq!(config.level, Some(LogLevel::Debug));
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.directives, vec!["labeler=debug"]);
    }

    #[test]
    fn test_invalid_log_config_messages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.json");
        std::fs::write(&path, "level = debug").unwrap();
        let err = load_log_config(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("File \"{}\" is not valid json, cannot continue.", path.display())
        );

        std::fs::write(&path, r#"{"format": "xml"}"#).unwrap();
        assert!(matches!(
            load_log_config(&path),
            Err(LoggingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_filter_quiets_http_stack() {
        let filter = build_filter(LogLevel::Debug, &LogConfig::default(), None);
        assert!(filter.to_string().contains("ureq=error"));
    }

    #[test]
    fn test_filter_takes_config_and_rust_log_directives() {
        let config = LogConfig {
            directives: vec!["labeler=debug".to_string()],
            ..Default::default()
        };
        let filter = build_filter(LogLevel::Info, &config, Some("aws_energy_labeler::export=trace"));
        let rendered = filter.to_string();
        assert!(rendered.contains("labeler=debug"));
        assert!(rendered.contains("aws_energy_labeler::export=trace"));
    }
}
