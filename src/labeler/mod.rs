//! Energy labeler seam
//!
//! Scoring accounts and zones is delegated to an external labeler. The
//! [`EnergyLabeler`] trait is the boundary; [`CommandLabeler`] is the
//! shipped implementation that talks to a labeler program over stdin and
//! stdout.
//!
//! # Protocol
//!
//! The program receives one [`LabelingRequest`] as JSON on stdin and must
//! print one [`LabelingOutcome`](crate::models::LabelingOutcome) as JSON on
//! stdout. Anything written to stderr is forwarded to the debug log.

mod command;

pub use command::{CommandLabeler, DEFAULT_LABELER_COMMAND, DEFAULT_LABELER_TIMEOUT_SECS};

use crate::config::LabelerSettings;
use crate::models::{LabelingOutcome, Target};
use crate::thresholds::{
    default_account_thresholds, default_zone_thresholds, AccountThreshold, ZoneThreshold,
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelerError {
    #[error("Labeler command is empty")]
    EmptyCommand,

    #[error("Labeler program {program} not found. Install it or point --labeler-command at it.")]
    NotFound { program: String },

    #[error("Failed to run labeler program {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Labeler program {program} timed out after {secs}s")]
    TimedOut { program: String, secs: u64 },

    #[error("Labeler program {program} failed with exit code {}: {stderr}", .code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string()))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Labeler output is not a valid labeling outcome: {0}")]
    InvalidOutput(#[source] serde_json::Error),

    #[error("Labeler outcome is incomplete: {0}")]
    IncompleteOutcome(String),

    #[error("Failed to serialize labeling request: {0}")]
    Request(#[source] serde_json::Error),

    #[error("IO error while talking to the labeler: {0}")]
    Io(#[from] std::io::Error),
}

pub type LabelerResult<T> = Result<T, LabelerError>;

/// Anything able to turn a labeling request into labels
pub trait EnergyLabeler {
    fn label(&self, request: &LabelingRequest) -> LabelerResult<LabelingOutcome>;
}

/// Resolved configuration handed to the labeler
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelingRequest {
    pub target: Target,
    pub region: String,
    pub frameworks: Vec<String>,
    pub allowed_account_ids: Option<Vec<String>>,
    pub denied_account_ids: Option<Vec<String>>,
    pub allowed_regions: Option<Vec<String>>,
    pub denied_regions: Option<Vec<String>>,
    pub export_all_data: bool,
    pub report_closed_findings_days: Option<u64>,
    pub report_suppressed_findings: bool,
    pub account_thresholds: Vec<AccountThreshold>,
    pub zone_thresholds: Vec<ZoneThreshold>,
    pub security_hub_query_filter: Option<JsonValue>,
    pub log_level: String,
}

impl From<&LabelerSettings> for LabelingRequest {
    fn from(settings: &LabelerSettings) -> Self {
        Self {
            target: settings.target.clone(),
            region: settings.region.clone(),
            frameworks: settings.frameworks.clone(),
            allowed_account_ids: settings.allowed_account_ids.clone(),
            denied_account_ids: settings.denied_account_ids.clone(),
            allowed_regions: settings.allowed_regions.clone(),
            denied_regions: settings.denied_regions.clone(),
            export_all_data: settings.export_all,
            report_closed_findings_days: settings.report_closed_findings_days,
            report_suppressed_findings: settings.report_suppressed_findings,
            account_thresholds: settings
                .account_thresholds
                .clone()
                .unwrap_or_else(default_account_thresholds),
            zone_thresholds: settings
                .zone_thresholds
                .clone()
                .unwrap_or_else(default_zone_thresholds),
            security_hub_query_filter: settings.security_hub_query_filter.clone(),
            log_level: settings.log_level.to_string(),
        }
    }
}
