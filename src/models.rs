//! Core data models for the energy labeler
//!
//! Targets, energy labels and the labeling outcome exchanged with the
//! external labeler program.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Energy label, A is the best posture and F the worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnergyLabel {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl EnergyLabel {
    pub const ALL: [EnergyLabel; 6] = [
        EnergyLabel::A,
        EnergyLabel::B,
        EnergyLabel::C,
        EnergyLabel::D,
        EnergyLabel::E,
        EnergyLabel::F,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLabel::A => "A",
            EnergyLabel::B => "B",
            EnergyLabel::C => "C",
            EnergyLabel::D => "D",
            EnergyLabel::E => "E",
            EnergyLabel::F => "F",
        }
    }
}

impl fmt::Display for EnergyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What gets labeled. Exactly one target is active per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Target {
    SingleAccount { account_id: String },
    OrganizationsZone { name: String },
    AuditZone { name: String },
}

impl Target {
    /// Human readable kind, used in logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            Target::SingleAccount { .. } => "account",
            Target::OrganizationsZone { .. } => "organizations zone",
            Target::AuditZone { .. } => "audit zone",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Target::SingleAccount { account_id } => account_id,
            Target::OrganizationsZone { name } | Target::AuditZone { name } => name,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.kind(), self.name())
    }
}

/// One account as labeled by the external labeler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledAccount {
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    pub energy_label: EnergyLabel,
    #[serde(default)]
    pub critical_high_findings: u64,
    #[serde(default)]
    pub medium_findings: u64,
    #[serde(default)]
    pub low_findings: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_days_open: Option<u64>,
}

/// Label of a whole zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneLabel {
    pub name: String,
    pub energy_label: EnergyLabel,
    /// Percentage of accounts with a good label, as reported by the labeler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<String>,
}

/// Everything the external labeler hands back for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelingOutcome {
    #[serde(default)]
    pub zone: Option<ZoneLabel>,
    #[serde(default)]
    pub labeled_accounts: Vec<LabeledAccount>,
    /// Raw Security Hub findings, passed through untouched
    #[serde(default)]
    pub findings: Vec<JsonValue>,
}

/// The labeled thing a run reports on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Subject<'a> {
    Zone(&'a ZoneLabel),
    Account(&'a LabeledAccount),
}

impl LabelingOutcome {
    /// Pick the zone or account label matching `target`
    pub fn subject(&self, target: &Target) -> Result<Subject<'_>, String> {
        match target {
            Target::SingleAccount { account_id } => self
                .labeled_accounts
                .iter()
                .find(|a| &a.account_id == account_id)
                .map(Subject::Account)
                .ok_or_else(|| format!("no label returned for account {}", account_id)),
            Target::OrganizationsZone { name } | Target::AuditZone { name } => self
                .zone
                .as_ref()
                .map(Subject::Zone)
                .ok_or_else(|| format!("no zone label returned for zone {}", name)),
        }
    }

    /// Number of labeled accounts per energy label, best label first
    pub fn label_counts(&self) -> Vec<(EnergyLabel, usize)> {
        EnergyLabel::ALL
            .iter()
            .map(|label| {
                let count = self
                    .labeled_accounts
                    .iter()
                    .filter(|a| a.energy_label == *label)
                    .count();
                (*label, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}
