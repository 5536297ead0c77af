//! aws-energy-labeler - energy labels for AWS accounts and zones
//!
//! Resolves the command line, environment and user config into labeling
//! settings, hands them to an external labeler, prints the resulting
//! report and exports the data to a directory or an S3 bucket.

pub mod cli;
pub mod config;
pub mod export;
pub mod labeler;
pub mod logging;
pub mod metadata_file;
pub mod models;
pub mod reporters;
pub mod reporting;
pub mod thresholds;
pub mod validators;
