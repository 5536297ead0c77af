//! Settings resolution
//!
//! Merges command line values, `AWS_LABELER_*` environment variables and
//! the user config file (in that order of precedence), validates them and
//! decides what the process should do.

use super::env::{env_key, EnvSource};
use super::user_config::UserConfig;
use crate::cli::error::{self as flags, CliError};
use crate::cli::Cli;
use crate::export::ExportDestination;
use crate::labeler::{DEFAULT_LABELER_COMMAND, DEFAULT_LABELER_TIMEOUT_SECS};
use crate::logging::LogLevel;
use crate::models::Target;
use crate::thresholds::{AccountThreshold, ZoneThreshold};
use crate::validators;
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// Fully resolved configuration of a labeling run
#[derive(Debug, Clone, PartialEq)]
pub struct LabelerSettings {
    pub target: Target,
    pub region: String,
    pub frameworks: Vec<String>,
    pub allowed_account_ids: Option<Vec<String>>,
    pub denied_account_ids: Option<Vec<String>>,
    pub allowed_regions: Option<Vec<String>>,
    pub denied_regions: Option<Vec<String>>,
    pub export_path: Option<ExportDestination>,
    /// False when only metrics are exported
    pub export_all: bool,
    pub to_json: bool,
    pub report_closed_findings_days: Option<u64>,
    pub report_suppressed_findings: bool,
    pub account_thresholds: Option<Vec<AccountThreshold>>,
    pub zone_thresholds: Option<Vec<ZoneThreshold>>,
    pub security_hub_query_filter: Option<JsonValue>,
    pub log_level: LogLevel,
    pub log_config: Option<PathBuf>,
    pub labeler_command: String,
    pub labeler_timeout_secs: u64,
}

/// What the process has been asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    ValidateMetadata(PathBuf),
    Label(Box<LabelerSettings>),
}

struct Sources<'a> {
    env: &'a dyn EnvSource,
}

impl Sources<'_> {
    /// CLI, then environment, then config file. Blank environment and file
    /// values count as unset; a blank CLI value is passed on for validation.
    fn value(&self, cli: &Option<String>, option: &str, file: Option<String>) -> Option<String> {
        cli.clone()
            .or_else(|| self.env.var(&env_key(option)).filter(|v| !v.trim().is_empty()))
            .or_else(|| file.filter(|v| !v.trim().is_empty()))
    }

    /// Set on the command line, or truthy in the environment, or true in the file
    fn flag(&self, cli: bool, env_name: &str, file: Option<bool>) -> bool {
        if cli {
            return true;
        }
        match self.env.var(&env_key(env_name)) {
            Some(value) => validators::environment_variable_boolean(&value),
            None => file.unwrap_or(false),
        }
    }
}

fn convert<T>(
    value: Option<String>,
    flag: &'static str,
    validator: impl Fn(&str) -> Result<T, String>,
) -> Result<Option<T>, CliError> {
    value
        .map(|v| validator(&v).map_err(|message| CliError::invalid(flag, message)))
        .transpose()
}

/// Like [`convert`], for values whose messages don't name the flag
fn convert_unflagged<T>(
    value: Option<String>,
    validator: impl Fn(&str) -> Result<T, String>,
) -> Result<Option<T>, CliError> {
    value
        .map(|v| validator(&v).map_err(CliError::InvalidValue))
        .transpose()
}

fn joined(list: &Option<Vec<String>>) -> Option<String> {
    list.as_ref().map(|l| l.join(","))
}

/// Resolve the raw command line into an [`Invocation`]
pub fn resolve(cli: &Cli, env: &dyn EnvSource, file: &UserConfig) -> Result<Invocation, CliError> {
    // Metadata validation skips every other requirement
    if let Some(path) = &cli.validate_metadata_file {
        let path = validators::valid_local_file(&path.to_string_lossy())
            .map_err(|message| CliError::invalid(flags::VALIDATE_METADATA_FILE, message))?;
        return Ok(Invocation::ValidateMetadata(path));
    }

    let sources = Sources { env };

    let log_config = convert(
        sources.value(
            &cli.log_config.as_ref().map(|p| p.to_string_lossy().into_owned()),
            "log-config",
            file.log_config.as_ref().map(|p| p.to_string_lossy().into_owned()),
        ),
        flags::LOG_CONFIG,
        validators::valid_local_file,
    )?;
    let log_level = convert(
        sources.value(&cli.log_level, "log-level", file.log_level.clone()),
        flags::LOG_LEVEL,
        str::parse::<LogLevel>,
    )?
    .unwrap_or_default();
    let region = convert(
        sources.value(&cli.region, "region", file.region.clone()),
        flags::REGION,
        validators::security_hub_region,
    )?;

    // An empty zone name selects nothing
    let organizations_zone_name = sources
        .value(&cli.organizations_zone_name, "organizations-zone-name", None)
        .filter(|name| !name.is_empty());
    let audit_zone_name = sources
        .value(&cli.audit_zone_name, "audit-zone-name", None)
        .filter(|name| !name.is_empty());
    let single_account_id = convert(
        sources.value(&cli.single_account_id, "single-account-id", None),
        flags::SINGLE_ACCOUNT_ID,
        validators::aws_account_id,
    )?;

    // An explicitly empty frameworks value means no frameworks at all
    let frameworks = match cli
        .frameworks
        .clone()
        .or_else(|| env.var(&env_key("frameworks")))
        .or_else(|| joined(&file.frameworks))
    {
        Some(value) => validators::frameworks(&value).map_err(CliError::InvalidValue)?,
        None => validators::DEFAULT_SECURITY_HUB_FRAMEWORKS
            .iter()
            .map(|f| f.to_string())
            .collect(),
    };

    let allowed_account_ids = convert_unflagged(
        sources.value(&cli.allowed_account_ids, "allowed-account-ids", joined(&file.allowed_account_ids)),
        validators::account_ids,
    )?;
    let denied_account_ids = convert_unflagged(
        sources.value(&cli.denied_account_ids, "denied-account-ids", joined(&file.denied_account_ids)),
        validators::account_ids,
    )?;
    let allowed_regions = convert_unflagged(
        sources.value(&cli.allowed_regions, "allowed-regions", joined(&file.allowed_regions)),
        validators::regions,
    )?;
    let denied_regions = convert_unflagged(
        sources.value(&cli.denied_regions, "denied-regions", joined(&file.denied_regions)),
        validators::regions,
    )?;
    let export_path = convert_unflagged(
        sources.value(&cli.export_path, "export-path", file.export_path.clone()),
        validators::export_path,
    )?;
    let report_closed_findings_days = convert(
        sources.value(
            &cli.report_closed_findings_days,
            "report-closed-findings-days",
            file.report_closed_findings_days.map(|d| d.to_string()),
        ),
        flags::REPORT_CLOSED_FINDINGS_DAYS,
        validators::positive_integer,
    )?;
    let account_thresholds = convert(
        sources.value(&cli.account_thresholds, "account-thresholds", None),
        flags::ACCOUNT_THRESHOLDS,
        validators::account_thresholds_config,
    )?;
    let zone_thresholds = convert(
        sources.value(&cli.zone_thresholds, "zone-thresholds", None),
        flags::ZONE_THRESHOLDS,
        validators::zone_thresholds_config,
    )?;
    let security_hub_query_filter = convert(
        sources.value(&cli.security_hub_query_filter, "security-hub-query-filter", None),
        flags::SECURITY_HUB_QUERY_FILTER,
        validators::json_string,
    )?;

    let export_all = !sources.flag(cli.export_metrics_only, "export-only-metrics", file.export_metrics_only);
    let to_json = sources.flag(cli.to_json, "to-json", file.to_json);
    let report_suppressed_findings = sources.flag(
        cli.report_suppressed_findings,
        "report-suppressed-findings",
        file.report_suppressed_findings,
    );

    let labeler_command = sources
        .value(&cli.labeler_command, "labeler-command", file.labeler_command.clone())
        .unwrap_or_else(|| DEFAULT_LABELER_COMMAND.to_string());
    let labeler_timeout_secs = file
        .labeler_timeout_secs
        .unwrap_or(DEFAULT_LABELER_TIMEOUT_SECS);

    let targets: Vec<Target> = [
        organizations_zone_name.map(|name| Target::OrganizationsZone { name }),
        audit_zone_name.map(|name| Target::AuditZone { name }),
        single_account_id
            .clone()
            .map(|account_id| Target::SingleAccount { account_id }),
    ]
    .into_iter()
    .flatten()
    .collect();
    let target_flags = vec![
        flags::ORGANIZATIONS_ZONE_NAME,
        flags::AUDIT_ZONE_NAME,
        flags::SINGLE_ACCOUNT_ID,
    ];
    if targets.len() > 1 {
        return Err(CliError::MutuallyExclusive(target_flags));
    }

    if allowed_account_ids.is_some() && denied_account_ids.is_some() {
        return Err(CliError::NotAllowedWith(
            flags::ALLOWED_ACCOUNT_IDS,
            flags::DENIED_ACCOUNT_IDS,
        ));
    }
    if single_account_id.is_some() && (allowed_account_ids.is_some() || denied_account_ids.is_some()) {
        return Err(CliError::MutuallyExclusive(vec![
            flags::ALLOWED_ACCOUNT_IDS,
            flags::DENIED_ACCOUNT_IDS,
            flags::SINGLE_ACCOUNT_ID,
        ]));
    }
    if allowed_regions.is_some() && denied_regions.is_some() {
        return Err(CliError::NotAllowedWith(
            flags::ALLOWED_REGIONS,
            flags::DENIED_REGIONS,
        ));
    }

    let region = region.ok_or(CliError::MissingRequired(flags::REGION))?;
    let target = targets
        .into_iter()
        .next()
        .ok_or(CliError::MissingOneOf(target_flags))?;

    Ok(Invocation::Label(Box::new(LabelerSettings {
        target,
        region,
        frameworks,
        allowed_account_ids,
        denied_account_ids,
        allowed_regions,
        denied_regions,
        export_path,
        export_all,
        to_json,
        report_closed_findings_days,
        report_suppressed_findings,
        account_thresholds,
        zone_thresholds,
        security_hub_query_filter,
        log_level,
        log_config,
        labeler_command,
        labeler_timeout_secs,
    })))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::thresholds::default_account_thresholds;
    use clap::Parser;
    use std::collections::HashMap;

    pub(crate) fn zone_settings() -> LabelerSettings {
        LabelerSettings {
            target: Target::OrganizationsZone {
                name: "ORGZONE".to_string(),
            },
            region: "eu-west-1".to_string(),
            frameworks: vec!["aws-foundational-security-best-practices".to_string()],
            allowed_account_ids: None,
            denied_account_ids: None,
            allowed_regions: None,
            denied_regions: None,
            export_path: None,
            export_all: true,
            to_json: false,
            report_closed_findings_days: None,
            report_suppressed_findings: false,
            account_thresholds: None,
            zone_thresholds: None,
            security_hub_query_filter: None,
            log_level: LogLevel::Info,
            log_config: None,
            labeler_command: DEFAULT_LABELER_COMMAND.to_string(),
            labeler_timeout_secs: DEFAULT_LABELER_TIMEOUT_SECS,
        }
    }

    pub(crate) fn account_settings() -> LabelerSettings {
        LabelerSettings {
            target: Target::SingleAccount {
                account_id: "111111111111".to_string(),
            },
            ..zone_settings()
        }
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn resolve_args(args: &[&str], env: &HashMap<String, String>) -> Result<Invocation, CliError> {
        resolve_with_file(args, env, &UserConfig::default())
    }

    fn resolve_with_file(
        args: &[&str],
        env: &HashMap<String, String>,
        file: &UserConfig,
    ) -> Result<Invocation, CliError> {
        let argv = std::iter::once("aws-energy-labeler").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).expect("clap accepts the arguments");
        resolve(&cli, env, file)
    }

    fn settings(args: &[&str], env: &HashMap<String, String>) -> LabelerSettings {
        match resolve_args(args, env).expect("valid arguments") {
            Invocation::Label(settings) => *settings,
            other => panic!("expected a labeling run, got {other:?}"),
        }
    }

    fn error(args: &[&str], env: &HashMap<String, String>) -> String {
        resolve_args(args, env).expect_err("invalid arguments").to_string()
    }

    const ID: &str = "123456789012";

    // ==========================================================================
    // Targeting
    // ==========================================================================

    #[test]
    fn test_single_account_with_zone_is_mutually_exclusive() {
        assert_eq!(
            error(&["-r", "eu-west-1", "-s", ID, "-o", "ORG"], &env(&[])),
            "arguments --organizations-zone-name/-o --audit-zone-name/-z --single-account-id/-s are mutually exclusive"
        );
    }

    #[test]
    fn test_zone_from_cli_and_env_is_mutually_exclusive() {
        let env = env(&[("AWS_LABELER_ORGANIZATIONS_ZONE_NAME", "ORG")]);
        assert!(error(&["-r", "eu-west-1", "-z", "AUDIT"], &env).contains("are mutually exclusive"));
    }

    #[test]
    fn test_missing_target() {
        assert_eq!(
            error(&["-r", "eu-west-1"], &env(&[])),
            "one of the arguments --organizations-zone-name/-o --audit-zone-name/-z --single-account-id/-s is required"
        );
    }

    #[test]
    fn test_missing_region_is_reported_first() {
        assert_eq!(
            error(&[], &env(&[])),
            "the following arguments are required: --region/-r"
        );
        assert_eq!(
            error(&["-o", "ORG"], &env(&[])),
            "the following arguments are required: --region/-r"
        );
    }

    #[test]
    fn test_region_and_target_from_env() {
        let env = env(&[
            ("AWS_LABELER_REGION", "eu-west-1"),
            ("AWS_LABELER_AUDIT_ZONE_NAME", "AUDIT"),
        ]);
        let settings = settings(&[], &env);
        assert_eq!(settings.region, "eu-west-1");
        assert_eq!(
            settings.target,
            Target::AuditZone {
                name: "AUDIT".to_string()
            }
        );
    }

    #[test]
    fn test_cli_wins_over_env() {
        let env = env(&[("AWS_LABELER_REGION", "us-east-1")]);
        assert_eq!(settings(&["-r", "eu-west-1", "-o", "ORG"], &env).region, "eu-west-1");
    }

    // ==========================================================================
    // Account and region filters
    // ==========================================================================

    #[test]
    fn test_allowed_and_denied_accounts() {
        assert_eq!(
            error(&["-r", "eu-west-1", "-o", "ORG", "-a", ID, "-d", ID], &env(&[])),
            "argument --allowed-account-ids/-a: not allowed with argument --denied-account-ids/-d"
        );
    }

    #[test]
    fn test_account_filter_with_single_account() {
        let expected = "arguments --allowed-account-ids/-a --denied-account-ids/-d --single-account-id/-s are mutually exclusive";
        assert_eq!(error(&["-r", "eu-west-1", "-s", ID, "-a", ID], &env(&[])), expected);
        let env = env(&[("AWS_LABELER_DENIED_ACCOUNT_IDS", ID)]);
        assert_eq!(error(&["-r", "eu-west-1", "-s", ID], &env), expected);
    }

    #[test]
    fn test_allowed_and_denied_regions() {
        assert_eq!(
            error(
                &["-r", "eu-west-1", "-o", "ORG", "--ar", "eu-west-1", "--dr", "eu-west-2"],
                &env(&[])
            ),
            "argument --allowed-regions/--ar: not allowed with argument --denied-regions/--dr"
        );
    }

    #[test]
    fn test_delimited_lists() {
        let settings = settings(
            &[
                "-r",
                "eu-west-1",
                "-o",
                "ORG",
                "-a",
                "111111111111,222222222222 333333333333",
                "--denied-regions",
                "us-east-1|us-east-2",
            ],
            &env(&[]),
        );
        assert_eq!(settings.allowed_account_ids.unwrap().len(), 3);
        assert_eq!(
            settings.denied_regions,
            Some(vec!["us-east-1".to_string(), "us-east-2".to_string()])
        );
    }

    #[test]
    fn test_invalid_values_name_their_flag() {
        assert!(error(&["-r", "bob"], &env(&[])).starts_with("argument --region/-r: Region bob"));
        assert_eq!(
            error(&["-r", "eu-west-1", "-s", "1234"], &env(&[])),
            "argument --single-account-id/-s: Account id 1234 provided does not seem to be valid."
        );
        assert!(error(&["-r", "eu-west-1", "-o", "ORG", "--rd", "0"], &env(&[]))
            .contains("0 is an invalid positive int value"));
        assert!(error(&["-r", "eu-west-1", "-o", "ORG", "-L", "loud"], &env(&[]))
            .starts_with("argument --log-level/-L: invalid choice"));
    }

    #[test]
    fn test_list_and_location_errors_are_unflagged() {
        fn with(extra: &[&str]) -> String {
            let mut args = vec!["-r", "eu-west-1", "-o", "ORG"];
            args.extend_from_slice(extra);
            error(&args, &env(&[]))
        }
        assert_eq!(
            with(&["-a", "a123456789012,2345678s90123"]),
            "['a123456789012', '2345678s90123'] contains invalid account ids."
        );
        assert_eq!(
            with(&["--denied-account-ids", "a123456789012"]),
            "['a123456789012'] contains invalid account ids."
        );
        assert_eq!(
            with(&["--ar", "eu-west-1,us-west-5"]),
            "['eu-west-1', 'us-west-5'] contains invalid regions."
        );
        assert!(with(&["-f", "cis,bob"])
            .starts_with("['cis', 'bob'] are not valid supported security hub frameworks."));
        assert_eq!(
            with(&["-p", "s4://test"]),
            "s4://test is an invalid export location. Example --export-path /a/directory or --export-path s3://mybucket location"
        );

        let regions_env = env(&[("AWS_LABELER_ALLOWED_REGIONS", "eu-west-1|bob")]);
        assert_eq!(
            error(&["-r", "eu-west-1", "-o", "ORG"], &regions_env),
            "['eu-west-1', 'bob'] contains invalid regions."
        );
    }

    #[test]
    fn test_blank_cli_value_is_validated() {
        assert!(error(&["-r", "", "-o", "ORG"], &env(&[]))
            .starts_with("argument --region/-r: Region  provided does not seem to be valid"));
        assert_eq!(
            error(&["-r", "eu-west-1", "-o", "ORG", "--rd", ""], &env(&[])),
            "argument --report-closed-findings-days/--rd:  is an invalid positive int value"
        );
    }

    #[test]
    fn test_blank_env_and_file_values_are_unset() {
        let blank_env = env(&[("AWS_LABELER_REGION", "  ")]);
        let file = UserConfig {
            region: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            resolve_with_file(&["-o", "ORG"], &blank_env, &file)
                .unwrap_err()
                .to_string(),
            "the following arguments are required: --region/-r"
        );

        let empty_env = env(&[("AWS_LABELER_REGION", "")]);
        let file = UserConfig {
            region: Some("us-west-2".to_string()),
            ..Default::default()
        };
        match resolve_with_file(&["-o", "ORG"], &empty_env, &file).unwrap() {
            Invocation::Label(settings) => assert_eq!(settings.region, "us-west-2"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_empty_zone_name_selects_nothing() {
        assert_eq!(
            error(&["-r", "eu-west-1", "-o", ""], &env(&[])),
            "one of the arguments --organizations-zone-name/-o --audit-zone-name/-z --single-account-id/-s is required"
        );
    }

    #[test]
    fn test_large_closed_findings_window() {
        let resolved = settings(&["-r", "eu-west-1", "-o", "ORG", "--rd", "5000000000"], &env(&[]));
        assert_eq!(resolved.report_closed_findings_days, Some(5_000_000_000));
    }

    // ==========================================================================
    // Frameworks, flags and JSON options
    // ==========================================================================

    #[test]
    fn test_frameworks_default_and_empty() {
        let base = ["-r", "eu-west-1", "-o", "ORG"];
        assert_eq!(
            settings(&base, &env(&[])).frameworks,
            vec!["aws-foundational-security-best-practices"]
        );
        let env_empty = env(&[("AWS_LABELER_FRAMEWORKS", "")]);
        assert!(settings(&base, &env_empty).frameworks.is_empty());
        let mut args = base.to_vec();
        args.extend(["-f", "cis,pci-dss"]);
        assert_eq!(settings(&args, &env(&[])).frameworks, vec!["cis", "pci-dss"]);
    }

    #[test]
    fn test_boolean_env_values() {
        let base = ["-r", "eu-west-1", "-o", "ORG"];
        let on = env(&[
            ("AWS_LABELER_EXPORT_ONLY_METRICS", "True"),
            ("AWS_LABELER_TO_JSON", "1"),
            ("AWS_LABELER_REPORT_SUPPRESSED_FINDINGS", "t"),
        ]);
        let resolved = settings(&base, &on);
        assert!(!resolved.export_all);
        assert!(resolved.to_json);
        assert!(resolved.report_suppressed_findings);

        let odd = env(&[("AWS_LABELER_EXPORT_ONLY_METRICS", "TrUe")]);
        assert!(settings(&base, &odd).export_all);
    }

    #[test]
    fn test_metrics_only_flag() {
        let resolved = settings(&["-r", "eu-west-1", "-o", "ORG", "-e", "-j"], &env(&[]));
        assert!(!resolved.export_all);
        assert!(resolved.to_json);
    }

    #[test]
    fn test_thresholds_and_query_filter() {
        let thresholds = serde_json::to_string(&default_account_thresholds()).unwrap();
        let resolved = settings(
            &[
                "-r",
                "eu-west-1",
                "-o",
                "ORG",
                "--at",
                &thresholds,
                "--sf",
                "{\"SeverityLabel\": [{\"Value\": \"CRITICAL\", \"Comparison\": \"EQUALS\"}]}",
            ],
            &env(&[]),
        );
        assert_eq!(resolved.account_thresholds, Some(default_account_thresholds()));
        assert!(resolved.security_hub_query_filter.unwrap()["SeverityLabel"].is_array());

        assert_eq!(
            error(&["-r", "eu-west-1", "-o", "ORG", "--zt", "\"{}\""], &env(&[])),
            "argument --zone-thresholds/--zt: Provided configuration \"{}\" is an invalid zone thresholds configuration."
        );
    }

    #[test]
    fn test_export_destination() {
        let resolved = settings(
            &["-r", "eu-west-1", "-o", "ORG", "-p", "s3://bucket/reports/zone"],
            &env(&[]),
        );
        assert_eq!(
            resolved.export_path,
            Some(ExportDestination::S3 {
                bucket: "bucket".to_string(),
                prefix: "reports/zone".to_string()
            })
        );
    }

    // ==========================================================================
    // Config file and short-circuits
    // ==========================================================================

    #[test]
    fn test_config_file_is_lowest_priority() {
        let file = UserConfig {
            region: Some("us-west-2".to_string()),
            frameworks: Some(vec!["cis".to_string()]),
            to_json: Some(true),
            labeler_command: Some("python -m labeler".to_string()),
            labeler_timeout_secs: Some(60),
            ..Default::default()
        };
        let env = env(&[("AWS_LABELER_TO_JSON", "false")]);
        let resolved = match resolve_with_file(&["-o", "ORG"], &env, &file).unwrap() {
            Invocation::Label(settings) => settings,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(resolved.region, "us-west-2");
        assert_eq!(resolved.frameworks, vec!["cis"]);
        assert!(!resolved.to_json);
        assert_eq!(resolved.labeler_command, "python -m labeler");
        assert_eq!(resolved.labeler_timeout_secs, 60);
    }

    #[test]
    fn test_validate_metadata_skips_requirements() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        std::fs::write(&path, "{}").unwrap();
        let invocation = resolve_args(&["--vm", path.to_str().unwrap()], &env(&[])).unwrap();
        assert_eq!(invocation, Invocation::ValidateMetadata(path));
    }

    #[test]
    fn test_validate_metadata_missing_file() {
        assert_eq!(
            error(&["--validate-metadata-file", "/no/such/metadata.json"], &env(&[])),
            "argument --validate-metadata-file/--vm: Local file path \"/no/such/metadata.json\" provided, does not exist."
        );
    }

    #[test]
    fn test_labeler_command_default() {
        let resolved = settings(&["-r", "eu-west-1", "-o", "ORG"], &env(&[]));
        assert_eq!(resolved.labeler_command, DEFAULT_LABELER_COMMAND);
        assert_eq!(resolved.log_level, LogLevel::Info);
    }
}
