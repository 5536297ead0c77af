//! Data export to a local directory or an S3 bucket
//!
//! Every export writes the label of the target, the labeled accounts and a
//! hashed `metadata.json`. Raw Security Hub findings are only written when
//! all data is exported.

mod local;
mod s3;

pub use s3::{S3Credentials, S3Uploader};

use crate::config::{EnvSource, LabelerSettings};
use crate::metadata_file::{MetadataError, MetadataFile, METADATA_FILENAME};
use crate::models::{LabelingOutcome, Subject};
use crate::reporting::Metadata;
use serde_json::json;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

pub const ZONE_LABEL_FILENAME: &str = "energylabel-of-zone.json";
pub const ACCOUNT_LABEL_FILENAME: &str = "energylabel-of-account.json";
pub const LABELED_ACCOUNTS_FILENAME: &str = "labeled-accounts.json";
pub const FINDINGS_FILENAME: &str = "security-hub-findings.json";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize export data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Nothing to export: {0}")]
    MissingData(String),

    #[error("Missing AWS credentials: {0} is not set")]
    MissingCredentials(&'static str),

    #[error("Invalid S3 endpoint {0}")]
    InvalidEndpoint(String),

    #[error("Upload of s3://{bucket}/{key} failed: {message}")]
    Request {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("Upload of s3://{bucket}/{key} was rejected with status {status}: {body}")]
    Upload {
        bucket: String,
        key: String,
        status: u16,
        body: String,
    },
}

/// Where exported files go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDestination {
    Local(PathBuf),
    S3 { bucket: String, prefix: String },
}

impl ExportDestination {
    /// Parse a local directory or an `s3://bucket[/prefix]` location
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().is_empty() || value.starts_with("//") {
            return None;
        }
        match Url::parse(value) {
            Ok(url) if url.scheme() == "s3" => {
                let bucket = url.host_str().filter(|h| !h.is_empty())?;
                Some(ExportDestination::S3 {
                    bucket: bucket.to_string(),
                    prefix: url.path().trim_matches('/').to_string(),
                })
            }
            // Windows drive letters parse as one letter schemes
            Ok(url) if url.scheme().len() == 1 => Some(ExportDestination::Local(PathBuf::from(value))),
            Ok(_) => None,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Some(ExportDestination::Local(PathBuf::from(value)))
            }
            Err(_) => None,
        }
    }
}

impl fmt::Display for ExportDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportDestination::Local(path) => write!(f, "{}", path.display()),
            ExportDestination::S3 { bucket, prefix } if prefix.is_empty() => {
                write!(f, "s3://{}", bucket)
            }
            ExportDestination::S3 { bucket, prefix } => write!(f, "s3://{}/{}", bucket, prefix),
        }
    }
}

/// One file of an export, already serialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: &'static str,
    pub contents: String,
}

/// Serializes a labeling run into export files and ships them
#[derive(Debug, Clone)]
pub struct DataExporter {
    files: Vec<ExportFile>,
}

impl DataExporter {
    pub fn new(
        settings: &LabelerSettings,
        outcome: &LabelingOutcome,
        metadata: &Metadata,
    ) -> Result<Self, ExportError> {
        let subject = outcome
            .subject(&settings.target)
            .map_err(ExportError::MissingData)?;

        let mut files = Vec::with_capacity(4);
        match subject {
            Subject::Zone(zone) => {
                let counts: serde_json::Map<String, serde_json::Value> = outcome
                    .label_counts()
                    .into_iter()
                    .map(|(label, count)| (label.to_string(), json!(count)))
                    .collect();
                let label = json!({
                    "zone_name": zone.name,
                    "zone_type": settings.target.kind(),
                    "energy_label": zone.energy_label,
                    "coverage": zone.coverage,
                    "accounts_per_energy_label": counts,
                });
                files.push(ExportFile {
                    filename: ZONE_LABEL_FILENAME,
                    contents: serde_json::to_string_pretty(&label)?,
                });
            }
            Subject::Account(account) => files.push(ExportFile {
                filename: ACCOUNT_LABEL_FILENAME,
                contents: serde_json::to_string_pretty(account)?,
            }),
        }

        files.push(ExportFile {
            filename: LABELED_ACCOUNTS_FILENAME,
            contents: serde_json::to_string_pretty(&outcome.labeled_accounts)?,
        });
        files.push(ExportFile {
            filename: METADATA_FILENAME,
            contents: MetadataFile::new(metadata.data())?.to_json_pretty()?,
        });
        if settings.export_all {
            files.push(ExportFile {
                filename: FINDINGS_FILENAME,
                contents: serde_json::to_string_pretty(&outcome.findings)?,
            });
        }

        Ok(Self { files })
    }

    pub fn files(&self) -> &[ExportFile] {
        &self.files
    }

    /// Write every file to `destination`. S3 credentials come from `env`.
    pub fn export(
        &self,
        destination: &ExportDestination,
        region: &str,
        env: &dyn EnvSource,
    ) -> Result<(), ExportError> {
        match destination {
            ExportDestination::Local(dir) => local::export_to_directory(dir, &self.files),
            ExportDestination::S3 { bucket, prefix } => {
                let uploader = S3Uploader::from_env(env, region)?;
                for file in &self.files {
                    let key = s3::object_key(prefix, file.filename);
                    uploader.put_object(bucket, &key, file.contents.as_bytes())?;
                }
                tracing::info!("Exported {} files to {}", self.files.len(), destination);
                Ok(())
            }
        }
    }
}
