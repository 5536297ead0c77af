//! Output reporters for the energy label report
//!
//! Supports two output formats:
//! - `text` - ASCII table for terminals
//! - `json` - flat JSON object for scripting

mod json;
mod text;

use crate::reporting::Metadata;
use anyhow::Result;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_to_json(to_json: bool) -> Self {
        if to_json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render the report entries of `metadata`
pub fn report_with_format(metadata: &Metadata, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(metadata),
        OutputFormat::Json => json::render(metadata),
    }
}
