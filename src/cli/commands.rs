//! CLI command implementations
//!
//! `run` resolves the layered configuration, hands it to the
//! [`Orchestrator`] and writes the report. `matrix` prints the fixed
//! expectation table.

use serde::Serialize;

use crate::engine::Dsn;
use crate::harness::{ConfigOverrides, HarnessConfig, Orchestrator, RunReport};
use crate::matrix::{expectation_matrix, ExpectedOutcomes, RegimePair};
use crate::observability::{log_event_with_fields, Event};

use super::args::{Command, RunArgs};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// One row of the `matrix` output
#[derive(Debug, Serialize)]
struct MatrixRow {
    #[serde(flatten)]
    pair: RegimePair,
    expected: ExpectedOutcomes,
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Run(args) => {
            let report = run(&args)?;
            write_response(&report)
        }
        Command::Matrix => matrix(),
    }
}

/// Resolve configuration: defaults, then the config file, then flags
pub fn resolve_config(args: &RunArgs) -> CliResult<HarnessConfig> {
    let base = match &args.config {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };

    let dsn = match &args.dsn {
        Some(text) => Some(
            text.parse::<Dsn>()
                .map_err(|e| CliError::config_error(e.to_string()))?,
        ),
        None => None,
    };

    let config = base.with_overrides(ConfigOverrides {
        rows: args.rows,
        columns: args.columns,
        dsn,
        relation: args.relation.clone(),
        seed: args.seed,
        max_resamples: args.max_resamples,
    });
    config.validate()?;

    let source = args
        .config
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("source", &source),
            ("dsn", &config.dsn.to_string()),
            ("max_resamples", &config.max_resamples.to_string()),
        ],
    );

    Ok(config)
}

/// Run the harness for `args`
pub fn run(args: &RunArgs) -> CliResult<RunReport> {
    let config = resolve_config(args)?;
    let report = Orchestrator::new(config).run()?;
    Ok(report)
}

/// Print the expectation table
pub fn matrix() -> CliResult<()> {
    let rows: Vec<MatrixRow> = expectation_matrix()
        .into_iter()
        .map(|(pair, expected)| MatrixRow { pair, expected })
        .collect();
    write_response(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"rows": 9, "columns": 2, "relation": "t"}}"#).unwrap();

        let args = RunArgs {
            config: Some(file.path().to_path_buf()),
            rows: Some(3),
            dsn: Some("sqlite::memory:".into()),
            ..RunArgs::default()
        };
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.rows, 3);
        assert_eq!(config.columns, 2);
        assert_eq!(config.relation, "t");
        assert_eq!(config.dsn, Dsn::SqliteMemory);
    }

    #[test]
    fn test_bad_dsn_is_config_error() {
        let args = RunArgs {
            dsn: Some("postgres://localhost".into()),
            ..RunArgs::default()
        };
        let err = resolve_config(&args).unwrap_err();
        assert_eq!(err.code_str(), "PERM_CONFIG");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_bad_relation_is_config_error() {
        let args = RunArgs {
            relation: Some("1x".into()),
            ..RunArgs::default()
        };
        assert_eq!(resolve_config(&args).unwrap_err().code_str(), "PERM_CONFIG");
    }

    #[test]
    fn test_run_reports_precondition() {
        let args = RunArgs {
            columns: Some(0),
            ..RunArgs::default()
        };
        let err = run(&args).unwrap_err();
        assert_eq!(err.code_str(), "PERM_PRECONDITION");
        assert!(err.message().contains("PERM_PRECONDITION_COLUMNS"));
    }

    #[test]
    fn test_run_memory() {
        let args = RunArgs {
            rows: Some(3),
            columns: Some(4),
            seed: Some(5),
            ..RunArgs::default()
        };
        let report = run(&args).unwrap();
        assert_eq!(report.rows, 3);
        assert_eq!(report.columns, 4);
        assert_eq!(report.seed, 5);
        assert_eq!(report.pairs.len(), 10);
    }
}
