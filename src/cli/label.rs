//! Labeling run: label, report, export

use crate::config::{EnvSource, LabelerSettings, ProcessEnv};
use crate::export::DataExporter;
use crate::labeler::{CommandLabeler, EnergyLabeler, LabelingRequest};
use crate::logging;
use crate::reporters::{self, OutputFormat};
use crate::reporting;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::Write;
use tracing::{error, info};

pub(super) fn run(settings: &LabelerSettings) -> Result<()> {
    logging::setup_logging(settings.log_level, settings.log_config.as_deref())?;

    let labeler =
        CommandLabeler::from_command_line(&settings.labeler_command, settings.labeler_timeout_secs)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = execute(settings, &labeler, &ProcessEnv, &mut out, Utc::now());
    if let Err(err) = &result {
        error!("{:#}", err);
    }
    result
}

/// Label the target, export the data if asked to and print the report to `out`
pub fn execute(
    settings: &LabelerSettings,
    labeler: &dyn EnergyLabeler,
    env: &dyn EnvSource,
    out: &mut dyn Write,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    info!("Labeling {} in {}", settings.target, settings.region);

    let request = LabelingRequest::from(settings);
    let outcome = labeler
        .label(&request)
        .with_context(|| format!("Labeling {} failed", settings.target))?;
    let metadata = reporting::reporting_data(settings, &outcome, generated_at)?;

    if let Some(destination) = &settings.export_path {
        info!("Trying to export data to the requested path : {}", destination);
        DataExporter::new(settings, &outcome, &metadata)?
            .export(destination, &settings.region, env)
            .with_context(|| format!("Export to {} failed", destination))?;
    }

    let report =
        reporters::report_with_format(&metadata, OutputFormat::from_to_json(settings.to_json))?;
    writeln!(out, "{}", report)?;
    Ok(())
}
