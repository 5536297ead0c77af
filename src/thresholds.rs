//! Energy label thresholds
//!
//! Thresholds are only validated and forwarded here; the labeler program
//! applies them. Account thresholds bound the number of open findings per
//! label, zone thresholds bound the share of well labeled accounts.

use crate::models::EnergyLabel;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("thresholds must be a non empty list")]
    Empty,

    #[error("label {0} is configured more than once")]
    DuplicateLabel(EnergyLabel),

    #[error("label F is the fallback label and cannot carry a threshold")]
    FallbackLabel,

    #[error("percentage {0} for label {1} is above 100")]
    PercentageOutOfRange(u8, EnergyLabel),

    #[error("{0}")]
    Schema(String),
}

/// Upper bounds an account must stay within to earn `label`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountThreshold {
    pub label: EnergyLabel,
    pub critical_high: u32,
    pub medium: u32,
    pub low: u32,
    pub days_open_less_than: u32,
}

/// Minimum percentage of accounts labeled at least `label` for the zone to earn it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneThreshold {
    pub label: EnergyLabel,
    pub percentage: u8,
}

pub fn default_account_thresholds() -> Vec<AccountThreshold> {
    [
        (EnergyLabel::A, 0, 10, 20, 999),
        (EnergyLabel::B, 10, 20, 40, 999),
        (EnergyLabel::C, 15, 30, 60, 999),
        (EnergyLabel::D, 20, 40, 80, 999),
        (EnergyLabel::E, 25, 50, 100, 999),
    ]
    .into_iter()
    .map(|(label, critical_high, medium, low, days_open_less_than)| AccountThreshold {
        label,
        critical_high,
        medium,
        low,
        days_open_less_than,
    })
    .collect()
}

pub fn default_zone_thresholds() -> Vec<ZoneThreshold> {
    [
        (EnergyLabel::A, 90),
        (EnergyLabel::B, 70),
        (EnergyLabel::C, 50),
        (EnergyLabel::D, 30),
        (EnergyLabel::E, 20),
    ]
    .into_iter()
    .map(|(label, percentage)| ZoneThreshold { label, percentage })
    .collect()
}

fn check_labels<'a>(labels: impl Iterator<Item = &'a EnergyLabel>) -> Result<(), ThresholdError> {
    let mut seen = HashSet::new();
    let mut count = 0;
    for label in labels {
        count += 1;
        if *label == EnergyLabel::F {
            return Err(ThresholdError::FallbackLabel);
        }
        if !seen.insert(*label) {
            return Err(ThresholdError::DuplicateLabel(*label));
        }
    }
    if count == 0 {
        return Err(ThresholdError::Empty);
    }
    Ok(())
}

/// Check a parsed JSON document against the account threshold schema
pub fn parse_account_thresholds(value: &JsonValue) -> Result<Vec<AccountThreshold>, ThresholdError> {
    let thresholds: Vec<AccountThreshold> = serde_json::from_value(value.clone())
        .map_err(|e| ThresholdError::Schema(e.to_string()))?;
    check_labels(thresholds.iter().map(|t| &t.label))?;
    Ok(thresholds)
}

/// Check a parsed JSON document against the zone threshold schema
pub fn parse_zone_thresholds(value: &JsonValue) -> Result<Vec<ZoneThreshold>, ThresholdError> {
    let thresholds: Vec<ZoneThreshold> = serde_json::from_value(value.clone())
        .map_err(|e| ThresholdError::Schema(e.to_string()))?;
    check_labels(thresholds.iter().map(|t| &t.label))?;
    if let Some(t) = thresholds.iter().find(|t| t.percentage > 100) {
        return Err(ThresholdError::PercentageOutOfRange(t.percentage, t.label));
    }
    Ok(thresholds)
}
