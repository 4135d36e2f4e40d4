//! Command-line parsing for the least squares solver.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! loading/solving code. Parsed arguments are turned into a `RunConfig` by
//! `app::run_config_from_args`.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::Strategy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "estols",
    version,
    about = "Estimate regression coefficients using ordinary least squares",
    after_help = "observations.csv is an n (rows) by m (columns) matrix where n > m, and \
                  response.csv holds n rows whose first column is the response. \
                  Coefficients are written one per line to stdout unless -o is used."
)]
pub struct Cli {
    /// Design matrix: n rows of m comma-separated numbers.
    #[arg(
        short = 'x',
        long = "matrix",
        value_name = "FILE",
        required_unless_present = "speed_test"
    )]
    pub matrix: Option<PathBuf>,

    /// Response file: n rows; only the first column is used.
    #[arg(
        short = 'y',
        long = "response",
        value_name = "FILE",
        required_unless_present = "speed_test"
    )]
    pub response: Option<PathBuf>,

    /// Write coefficients to this file instead of stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Solve a random problem with M columns and N rows instead of reading files.
    #[arg(
        short = 't',
        long = "speed-test",
        num_args = 2,
        value_names = ["M", "N"],
        conflicts_with_all = ["matrix", "response"]
    )]
    pub speed_test: Option<Vec<usize>>,

    /// Factorization used for the solve.
    #[arg(long, value_enum, default_value_t = Strategy::NormalEquations)]
    pub strategy: Strategy,

    /// Shorthand for `--strategy qr`.
    #[arg(long, conflicts_with = "strategy")]
    pub qr: bool,

    /// Seed for the speed-test generator (random if omitted).
    #[arg(long, requires = "speed_test")]
    pub seed: Option<u64>,

    /// Print coefficients with this many digits after the decimal point
    /// (default: shortest exact representation).
    #[arg(long, value_name = "DIGITS")]
    pub precision: Option<usize>,
}
