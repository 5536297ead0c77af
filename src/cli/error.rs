//! Argument errors
//!
//! These are usage problems: the binary prints them with a usage hint and
//! exits with code 2.

use crate::metadata_file::MetadataError;
use thiserror::Error;

pub const LOG_CONFIG: &str = "--log-config/-l";
pub const LOG_LEVEL: &str = "--log-level/-L";
pub const REGION: &str = "--region/-r";
pub const ORGANIZATIONS_ZONE_NAME: &str = "--organizations-zone-name/-o";
pub const AUDIT_ZONE_NAME: &str = "--audit-zone-name/-z";
pub const SINGLE_ACCOUNT_ID: &str = "--single-account-id/-s";
pub const ALLOWED_ACCOUNT_IDS: &str = "--allowed-account-ids/-a";
pub const DENIED_ACCOUNT_IDS: &str = "--denied-account-ids/-d";
pub const ALLOWED_REGIONS: &str = "--allowed-regions/--ar";
pub const DENIED_REGIONS: &str = "--denied-regions/--dr";
pub const REPORT_CLOSED_FINDINGS_DAYS: &str = "--report-closed-findings-days/--rd";
pub const ACCOUNT_THRESHOLDS: &str = "--account-thresholds/--at";
pub const ZONE_THRESHOLDS: &str = "--zone-thresholds/--zt";
pub const SECURITY_HUB_QUERY_FILTER: &str = "--security-hub-query-filter/--sf";
pub const VALIDATE_METADATA_FILE: &str = "--validate-metadata-file/--vm";

#[derive(Error, Debug)]
pub enum CliError {
    #[error("argument {flag}: {message}")]
    InvalidArgument { flag: &'static str, message: String },

    /// Rejected list or location values are reported without a flag
    #[error("{0}")]
    InvalidValue(String),

    #[error("one of the arguments {} is required", .0.join(" "))]
    MissingOneOf(Vec<&'static str>),

    #[error("arguments {} are mutually exclusive", .0.join(" "))]
    MutuallyExclusive(Vec<&'static str>),

    #[error("argument {0}: not allowed with argument {1}")]
    NotAllowedWith(&'static str, &'static str),

    #[error("the following arguments are required: {0}")]
    MissingRequired(&'static str),

    #[error(transparent)]
    InvalidMetadata(#[from] MetadataError),
}

impl CliError {
    pub fn invalid(flag: &'static str, message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            flag,
            message: message.into(),
        }
    }
}
