//! JSON reporter
//!
//! Report titles become snake_case keys: `Zone Energy Label:` turns into
//! `zone_energy_label`.

use crate::reporting::Metadata;
use anyhow::Result;
use serde_json::{Map, Value};

pub(super) fn json_key(title: &str) -> String {
    title.replace(':', "").trim().replace(' ', "_").to_lowercase()
}

/// Render report entries as pretty JSON
pub fn render(metadata: &Metadata) -> Result<String> {
    let object: Map<String, Value> = metadata
        .report_table()
        .into_iter()
        .map(|(title, value)| (json_key(title), Value::String(value.to_string())))
        .collect();
    Ok(serde_json::to_string_pretty(&object)?)
}
