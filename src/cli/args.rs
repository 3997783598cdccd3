//! CLI argument definitions using clap
//!
//! Commands:
//! - permcheck run [--rows N] [--columns N] [--dsn DSN] [--seed S] ...
//! - permcheck matrix

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// permcheck - differential check of result sets under row and column permutations
#[derive(Parser, Debug)]
#[command(name = "permcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Minimum log severity written to stderr
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check all ten regime pairs against a storage engine
    Run(RunArgs),

    /// Print the expectation table and exit
    Matrix,
}

/// Options for `run`. Anything left unset falls back to the config file,
/// then to the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of rows (default 5)
    #[arg(long, allow_negative_numbers = true)]
    pub rows: Option<i64>,

    /// Number of columns (default 5)
    #[arg(long, allow_negative_numbers = true)]
    pub columns: Option<i64>,

    /// Storage engine: memory, sqlite::memory: or sqlite:<path>
    #[arg(long)]
    pub dsn: Option<String>,

    /// Session relation name (default x)
    #[arg(long)]
    pub relation: Option<String>,

    /// Seed for column shuffles and the memory engine
    #[arg(long)]
    pub seed: Option<u64>,

    /// Redraws allowed per pair after a collision (default 32)
    #[arg(long)]
    pub max_resamples: Option<u32>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults_are_unset() {
        let cli = Cli::try_parse_from(["permcheck", "run"]).unwrap();
        assert_eq!(cli.log_level, "info");
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.rows, None);
                assert_eq!(args.columns, None);
                assert_eq!(args.dsn, None);
            }
            Command::Matrix => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_accepts_negative_dimensions() {
        let cli = Cli::try_parse_from([
            "permcheck", "run", "--rows", "-1", "--columns", "3", "--seed", "42",
        ])
        .unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.rows, Some(-1));
                assert_eq!(args.columns, Some(3));
                assert_eq!(args.seed, Some(42));
            }
            Command::Matrix => panic!("expected run"),
        }
    }

    #[test]
    fn test_global_log_level() {
        let cli = Cli::try_parse_from(["permcheck", "matrix", "--log-level", "trace"]).unwrap();
        assert_eq!(cli.log_level, "trace");
        assert!(matches!(cli.command, Command::Matrix));
    }
}
