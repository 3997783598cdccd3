//! CLI module for permcheck
//!
//! Provides command-line interface for:
//! - run: check all regime pairs against a storage engine
//! - matrix: print the expectation table
//!
//! stdout carries exactly one JSON object per invocation. Logs go to
//! stderr.

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, RunArgs};
pub use commands::{matrix, resolve_config, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};

use crate::observability::{Logger, Severity};

/// Parse arguments and run the selected command.
///
/// On failure the error envelope has already been written to stdout; the
/// caller only maps the error to an exit code.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let result = cli
        .log_level
        .parse::<Severity>()
        .map_err(CliError::config_error)
        .and_then(|severity| {
            Logger::set_min_severity(severity);
            run_command(cli.command)
        });

    if let Err(e) = &result {
        write_error(e.code_str(), e.message())?;
    }
    result
}
