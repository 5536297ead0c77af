//! Hashed metadata file written next to every export
//!
//! The hash is the hex SHA-256 of the compact JSON of the `metadata`
//! object. Keys are kept sorted so the hash is stable across runs.

use sha2::{Digest, Sha256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const METADATA_FILENAME: &str = "metadata.json";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Local file path \"{}\" provided, does not exist.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Could not read \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Local file \"{}\" provided is not a valid json file!", .path.display())]
    InvalidJson { path: PathBuf },

    #[error("Local file \"{}\" is not a metadata file: {reason}", .path.display())]
    InvalidLayout { path: PathBuf, reason: String },

    #[error("The hash {provided} of the file does not match the calculated one {calculated}.")]
    HashMismatch { provided: String, calculated: String },

    #[error("Failed to serialize metadata: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataFile {
    pub metadata: BTreeMap<String, String>,
    pub hash: String,
}

impl MetadataFile {
    /// Wrap metadata and stamp it with its hash
    pub fn new(metadata: BTreeMap<String, String>) -> Result<Self, MetadataError> {
        let hash = calculate_hash(&metadata)?;
        Ok(Self { metadata, hash })
    }

    pub fn to_json_pretty(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Recompute the hash and compare it with the stored one
    pub fn verify(&self) -> Result<(), MetadataError> {
        let calculated = calculate_hash(&self.metadata)?;
        if calculated != self.hash {
            return Err(MetadataError::HashMismatch {
                provided: self.hash.clone(),
                calculated,
            });
        }
        Ok(())
    }
}

pub fn calculate_hash(metadata: &BTreeMap<String, String>) -> Result<String, MetadataError> {
    let serialized = serde_json::to_vec(metadata)?;
    let digest = Sha256::digest(&serialized);
    Ok(format!("{:x}", digest))
}

/// Load a metadata file from disk and check its hash
pub fn validate_metadata_file(path: &Path) -> Result<MetadataFile, MetadataError> {
    if !path.exists() {
        return Err(MetadataError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|_| MetadataError::InvalidJson {
            path: path.to_path_buf(),
        })?;
    let file: MetadataFile =
        serde_json::from_value(value).map_err(|e| MetadataError::InvalidLayout {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    file.verify()?;
    tracing::debug!("Metadata file {} has a valid hash {}", path.display(), file.hash);
    Ok(file)
}
