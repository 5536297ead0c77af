//! Value validators for command line arguments and environment variables
//!
//! Each validator returns the converted value or a user facing message.
//! The settings resolver attaches the flag name where one applies.

use crate::export::ExportDestination;
use crate::thresholds::{self, AccountThreshold, ZoneThreshold};
use regex::Regex;
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Regions where Security Hub is available
pub const SECURITY_HUB_ACTIVE_REGIONS: &[&str] = &[
    "af-south-1",
    "ap-east-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ca-central-1",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "il-central-1",
    "me-central-1",
    "me-south-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
];

pub const SECURITY_HUB_FRAMEWORKS: &[&str] = &[
    "aws-foundational-security-best-practices",
    "cis",
    "pci-dss",
];

pub const DEFAULT_SECURITY_HUB_FRAMEWORKS: &[&str] = &["aws-foundational-security-best-practices"];

fn delimiter() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| Regex::new(r"[,|\s]+").expect("valid regex"))
}

/// Split on commas, pipes and whitespace, dropping empty entries
pub fn character_delimited_list(value: &str) -> Vec<String> {
    delimiter()
        .split(value)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render values the way the messages show lists: `['a', 'b']`
pub fn quoted_list<S: AsRef<str>>(values: &[S]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("'{}'", v.as_ref())).collect();
    format!("[{}]", items.join(", "))
}

/// Environment variables only count as set for a fixed set of truthy spellings
pub fn environment_variable_boolean(value: &str) -> bool {
    matches!(value, "t" | "T" | "true" | "True" | "1" | "TRUE")
}

pub fn positive_integer(value: &str) -> Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{} is an invalid positive int value", value)),
    }
}

pub fn json_string(value: &str) -> Result<JsonValue, String> {
    serde_json::from_str(value).map_err(|_| format!("{} is an invalid json string.", value))
}

pub fn aws_account_id(value: &str) -> Result<String, String> {
    if value.len() == 12 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "Account id {} provided does not seem to be valid.",
            value
        ))
    }
}

pub fn account_ids(value: &str) -> Result<Vec<String>, String> {
    let ids = character_delimited_list(value);
    if ids.iter().all(|id| aws_account_id(id).is_ok()) {
        Ok(ids)
    } else {
        Err(format!("{} contains invalid account ids.", quoted_list(&ids)))
    }
}

pub fn security_hub_region(value: &str) -> Result<String, String> {
    if SECURITY_HUB_ACTIVE_REGIONS.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "Region {} provided does not seem to be valid, valid regions are {}.",
            value,
            quoted_list(SECURITY_HUB_ACTIVE_REGIONS)
        ))
    }
}

pub fn regions(value: &str) -> Result<Vec<String>, String> {
    let regions = character_delimited_list(value);
    if regions.iter().all(|r| SECURITY_HUB_ACTIVE_REGIONS.contains(&r.as_str())) {
        Ok(regions)
    } else {
        Err(format!("{} contains invalid regions.", quoted_list(&regions)))
    }
}

/// Lowercases entries; an empty value yields an empty list
pub fn frameworks(value: &str) -> Result<Vec<String>, String> {
    let frameworks: Vec<String> = character_delimited_list(value)
        .into_iter()
        .map(|f| f.to_lowercase())
        .collect();
    if frameworks
        .iter()
        .all(|f| SECURITY_HUB_FRAMEWORKS.contains(&f.as_str()))
    {
        Ok(frameworks)
    } else {
        Err(format!(
            "{} are not valid supported security hub frameworks. Currently supported are {}",
            quoted_list(&frameworks),
            quoted_list(SECURITY_HUB_FRAMEWORKS)
        ))
    }
}

pub fn account_thresholds_config(value: &str) -> Result<Vec<AccountThreshold>, String> {
    let parsed = json_string(value)?;
    thresholds::parse_account_thresholds(&parsed).map_err(|e| {
        tracing::debug!("Account thresholds rejected: {}", e);
        format!(
            "Provided configuration {} is an invalid accounts thresholds configuration.",
            value
        )
    })
}

pub fn zone_thresholds_config(value: &str) -> Result<Vec<ZoneThreshold>, String> {
    let parsed = json_string(value)?;
    thresholds::parse_zone_thresholds(&parsed).map_err(|e| {
        tracing::debug!("Zone thresholds rejected: {}", e);
        format!(
            "Provided configuration {} is an invalid zone thresholds configuration.",
            value
        )
    })
}

pub fn export_path(value: &str) -> Result<ExportDestination, String> {
    ExportDestination::parse(value).ok_or_else(|| {
        format!(
            "{} is an invalid export location. Example --export-path /a/directory or --export-path s3://mybucket location",
            value
        )
    })
}

pub fn valid_local_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!(
            "Local file path \"{}\" provided, does not exist.",
            value
        ))
    }
}
