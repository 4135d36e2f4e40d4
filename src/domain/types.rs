//! Shared domain types.
//!
//! These are plain values: the CLI layer builds them once, and the pipeline
//! only ever reads them.

use std::path::PathBuf;

use clap::ValueEnum;

/// How the coefficient vector is computed.
///
/// The set is closed, so callers `match` on it rather than going through a
/// trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    /// Solve `(XᵗX) β = Xᵗy` with a Cholesky factorization.
    ///
    /// Cheapest, but squares the condition number of `X`.
    #[default]
    #[value(name = "normal")]
    NormalEquations,
    /// Column-pivoted Householder QR of `X`, solved against `y` directly.
    ///
    /// Roughly 2–3× the cost; stable on ill-conditioned or collinear designs.
    #[value(name = "qr")]
    Qr,
}

impl Strategy {
    pub fn label(self) -> &'static str {
        match self {
            Strategy::NormalEquations => "normal equations",
            Strategy::Qr => "QR decomposition",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Text format for the coefficient output.
///
/// Passed explicitly to the writer; there is no process-wide float formatting
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputFormat {
    /// Fixed number of digits after the decimal point.
    ///
    /// `None` writes the shortest decimal that parses back to the exact same
    /// `f64`, i.e. full precision.
    pub precision: Option<usize>,
}

impl OutputFormat {
    pub fn full_precision() -> Self {
        Self { precision: None }
    }

    pub fn fixed(digits: usize) -> Self {
        Self {
            precision: Some(digits),
        }
    }

    /// Render a single coefficient (no line terminator).
    pub fn format_value(&self, value: f64) -> String {
        match self.precision {
            Some(digits) => format!("{value:.digits$}"),
            None => format!("{value}"),
        }
    }
}

/// Where the design matrix and response vector come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Comma-separated text files.
    Files { matrix: PathBuf, response: PathBuf },
    /// Random data of `m` columns and `n` rows, for timing the solver.
    SpeedTest { m: usize, n: usize, seed: Option<u64> },
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: InputSource,
    /// `None` means standard output.
    pub output: Option<PathBuf>,
    pub strategy: Strategy,
    pub format: OutputFormat,
}

/// Dimensions of a problem that passed shape validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// Observations (rows of `X`, length of `y`).
    pub n: usize,
    /// Predictors (columns of `X`, length of `β`).
    pub m: usize,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n={} m={}", self.n, self.m)
    }
}
