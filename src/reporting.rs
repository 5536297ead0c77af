//! Report metadata built from a labeling outcome
//!
//! A [`Metadata`] container holds every fact about a run. Entries flagged
//! as report entries end up in the stdout report; all of them end up in the
//! exported `metadata.json`.

use crate::config::LabelerSettings;
use crate::labeler::LabelerError;
use crate::models::{LabeledAccount, LabelingOutcome, Subject, Target, ZoneLabel};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub title: String,
    pub value: String,
    pub is_report_entry: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<MetadataEntry>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, title: &str, value: impl ToString, is_report_entry: bool) {
        self.entries.push(MetadataEntry {
            title: title.to_string(),
            value: value.to_string(),
            is_report_entry,
        });
    }

    /// Every entry as title -> value
    pub fn data(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.title.clone(), e.value.clone()))
            .collect()
    }

    /// Report entries only, in insertion order
    pub fn report_table(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .filter(|e| e.is_report_entry)
            .map(|e| (e.title.as_str(), e.value.as_str()))
            .collect()
    }
}

/// Build the metadata for whichever target the settings select
pub fn reporting_data(
    settings: &LabelerSettings,
    outcome: &LabelingOutcome,
    generated_at: DateTime<Utc>,
) -> Result<Metadata, LabelerError> {
    let subject = outcome
        .subject(&settings.target)
        .map_err(LabelerError::IncompleteOutcome)?;
    let mut metadata = match subject {
        Subject::Zone(zone) => zone_reporting_data(&settings.target, zone, outcome),
        Subject::Account(account) => account_reporting_data(account),
    };
    add_run_settings(&mut metadata, settings, generated_at);
    Ok(metadata)
}

pub fn zone_reporting_data(target: &Target, zone: &ZoneLabel, outcome: &LabelingOutcome) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.add("Zone Name:", &zone.name, true);
    metadata.add("Zone Type:", target.kind(), true);
    metadata.add("Zone Energy Label:", zone.energy_label, true);
    if let Some(coverage) = &zone.coverage {
        metadata.add("Zone Coverage:", coverage, true);
    }
    metadata.add("Labeled Accounts Measured:", outcome.labeled_accounts.len(), true);
    let counts = outcome.label_counts();
    if !counts.is_empty() {
        let summary = counts
            .iter()
            .map(|(label, count)| format!("{}: {}", label, count))
            .collect::<Vec<_>>()
            .join(", ");
        metadata.add("Accounts Per Energy Label:", summary, true);
    }
    metadata
}

pub fn account_reporting_data(account: &LabeledAccount) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.add("Account ID:", &account.account_id, true);
    if let Some(name) = &account.account_name {
        metadata.add("Account Name:", name, true);
    }
    metadata.add("Account Energy Label:", account.energy_label, true);
    metadata.add(
        "Number Of Critical & High Findings:",
        account.critical_high_findings,
        true,
    );
    metadata.add("Number Of Medium Findings:", account.medium_findings, true);
    metadata.add("Number Of Low Findings:", account.low_findings, true);
    if let Some(days) = account.max_days_open {
        metadata.add("Max Days Open:", days, true);
    }
    metadata
}

fn add_run_settings(metadata: &mut Metadata, settings: &LabelerSettings, generated_at: DateTime<Utc>) {
    metadata.add("Labeler Version:", env!("CARGO_PKG_VERSION"), false);
    metadata.add(
        "Generated At:",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        false,
    );
    metadata.add("Region:", &settings.region, false);
    metadata.add("Frameworks:", settings.frameworks.join(", "), false);

    let lists = [
        ("Allowed Account IDs:", &settings.allowed_account_ids),
        ("Denied Account IDs:", &settings.denied_account_ids),
        ("Allowed Regions:", &settings.allowed_regions),
        ("Denied Regions:", &settings.denied_regions),
    ];
    for (title, values) in lists {
        if let Some(values) = values {
            metadata.add(title, values.join(", "), false);
        }
    }

    if let Some(path) = &settings.export_path {
        metadata.add("Export Path:", path, false);
    }
    metadata.add("Export All Data:", settings.export_all, false);
    if let Some(days) = settings.report_closed_findings_days {
        metadata.add("Report Closed Findings Days:", days, false);
    }
    metadata.add(
        "Report Suppressed Findings:",
        settings.report_suppressed_findings,
        false,
    );
    if let Some(filter) = &settings.security_hub_query_filter {
        metadata.add("Security Hub Query Filter:", filter, false);
    }
    if let Some(thresholds) = &settings.account_thresholds {
        metadata.add("Account Thresholds:", json_compact(thresholds), false);
    }
    if let Some(thresholds) = &settings.zone_thresholds {
        metadata.add("Zone Thresholds:", json_compact(thresholds), false);
    }
}

fn json_compact<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
