//! CLI definition and dispatch

pub mod error;
mod label;
mod validate;

pub use error::CliError;
pub use label::execute;

use crate::config::{resolve, Invocation, ProcessEnv, UserConfig};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// AWS energy labeler - security posture labels for AWS accounts and zones
///
/// Every option except --version and --validate-metadata-file falls back to
/// an AWS_LABELER_<OPTION> environment variable when not given.
#[derive(Parser, Debug)]
#[command(
    name = "aws-energy-labeler",
    about = "Label AWS accounts and zones (A best .. F worst) based on Security Hub findings",
    after_help = "\
Environment:
  Every option falls back to AWS_LABELER_<OPTION> (e.g. AWS_LABELER_REGION,
  AWS_LABELER_AUDIT_ZONE_NAME). Flags accept t, T, true, True, TRUE or 1.
  --export-metrics-only reads AWS_LABELER_EXPORT_ONLY_METRICS.

Examples:
  aws-energy-labeler -r eu-west-1 -o MYORG                    Label an organizations zone
  aws-energy-labeler -r eu-west-1 -s 123456789012 -j          Label one account, JSON output
  aws-energy-labeler -r eu-west-1 -z AUDIT -p s3://bucket/x   Export to S3
  aws-energy-labeler --vm ./export/metadata.json              Check an exported metadata file"
)]
pub struct Cli {
    /// Logging config JSON file
    #[arg(long, short = 'l', value_name = "FILE")]
    pub log_config: Option<PathBuf>,

    /// Log level (debug, info, warning, error, critical) [default: info]
    #[arg(long, short = 'L')]
    pub log_level: Option<String>,

    /// Home AWS region for Security Hub (required)
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// Name of the AWS Organizations zone to label
    #[arg(long, short = 'o')]
    pub organizations_zone_name: Option<String>,

    /// Name of the Security Hub audit zone to label
    #[arg(long, short = 'z')]
    pub audit_zone_name: Option<String>,

    /// Label a single account
    #[arg(long, short = 's', value_name = "ACCOUNT_ID")]
    pub single_account_id: Option<String>,

    /// Security Hub frameworks, delimited by comma, pipe or space
    #[arg(long, short = 'f')]
    pub frameworks: Option<String>,

    /// Only label these accounts
    #[arg(long, short = 'a')]
    pub allowed_account_ids: Option<String>,

    /// Skip these accounts
    #[arg(long, short = 'd')]
    pub denied_account_ids: Option<String>,

    /// Only consider findings from these regions
    #[arg(long, visible_alias = "ar")]
    pub allowed_regions: Option<String>,

    /// Ignore findings from these regions
    #[arg(long, visible_alias = "dr")]
    pub denied_regions: Option<String>,

    /// Export directory or s3://bucket/prefix location
    #[arg(long, short = 'p', value_name = "LOCATION")]
    pub export_path: Option<String>,

    /// Export only metrics, not the Security Hub findings
    #[arg(long, short = 'e')]
    pub export_metrics_only: bool,

    /// Print the report as JSON
    #[arg(long, short = 'j')]
    pub to_json: bool,

    /// Also report findings closed within this many days
    #[arg(long, visible_alias = "rd", value_name = "DAYS")]
    pub report_closed_findings_days: Option<String>,

    /// Also report suppressed findings
    #[arg(long, visible_alias = "rs")]
    pub report_suppressed_findings: bool,

    /// Account thresholds as JSON
    #[arg(long, visible_alias = "at", value_name = "JSON")]
    pub account_thresholds: Option<String>,

    /// Zone thresholds as JSON
    #[arg(long, visible_alias = "zt", value_name = "JSON")]
    pub zone_thresholds: Option<String>,

    /// Extra Security Hub finding filter as JSON
    #[arg(long, visible_alias = "sf", value_name = "JSON")]
    pub security_hub_query_filter: Option<String>,

    /// Validate an exported metadata file and exit
    #[arg(long, visible_alias = "vm", value_name = "FILE")]
    pub validate_metadata_file: Option<PathBuf>,

    /// Labeler program to run [default: aws-energy-labeler-lib]
    #[arg(long, value_name = "COMMAND")]
    pub labeler_command: Option<String>,

    /// Print version and exit
    #[arg(long, short = 'v')]
    pub version: bool,
}

pub fn print_version() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}

/// Whether the raw arguments ask for the version, so it can win over parse errors
pub fn wants_version<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    args.into_iter()
        .skip(1)
        .map_while(|arg| {
            let arg = arg.as_ref();
            (arg != "--").then_some(arg == "-v" || arg == "--version")
        })
        .any(|found| found)
}

pub fn run(cli: Cli) -> Result<()> {
    if cli.version {
        print_version();
        return Ok(());
    }

    let env = ProcessEnv;
    // Metadata validation never reads the user config
    let user_config = if cli.validate_metadata_file.is_some() {
        UserConfig::default()
    } else {
        UserConfig::load(&env)?
    };

    match resolve(&cli, &env, &user_config)? {
        Invocation::ValidateMetadata(path) => validate::run(&path),
        Invocation::Label(settings) => label::run(&settings),
    }
}

/// Argument problems exit with 2, everything else with 1
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<CliError>().is_some() {
        2
    } else {
        1
    }
}
