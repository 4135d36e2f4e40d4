//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - parses CLI arguments into a `RunConfig`
//! - runs the load → solve pipeline
//! - writes the coefficients

use std::time::Instant;

use clap::Parser;
use log::info;

use crate::cli::Cli;
use crate::domain::{InputSource, OutputFormat, RunConfig, Strategy};
use crate::error::{AppError, ErrorKind};

pub mod pipeline;

/// Entry point for the `estols` binary.
pub fn run() -> Result<(), AppError> {
    // Diagnostics go to stderr; stdout carries only the coefficients.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let cli = Cli::parse();
    let config = run_config_from_args(cli)?;

    info!("estOLS - Ordinary Least Squares Solver");
    let run = pipeline::run_pipeline(&config)?;

    let start = Instant::now();
    crate::io::emit_coefficients(config.output.as_deref(), &run.coefficients, &config.format)?;
    match &config.output {
        Some(path) => info!(
            "wrote {} coefficients to '{}' in {:.6}s",
            run.shape.m,
            path.display(),
            start.elapsed().as_secs_f64()
        ),
        None => info!("wrote {} coefficients in {:.6}s", run.shape.m, start.elapsed().as_secs_f64()),
    }

    Ok(())
}

/// Resolve parsed arguments into a plain run configuration.
pub fn run_config_from_args(cli: Cli) -> Result<RunConfig, AppError> {
    let input = match (cli.speed_test.as_deref(), cli.matrix, cli.response) {
        (Some(&[m, n]), _, _) => InputSource::SpeedTest {
            m,
            n,
            seed: cli.seed,
        },
        (None, Some(matrix), Some(response)) => InputSource::Files { matrix, response },
        // `Cli::parse` rejects every other combination; only a `Cli` built
        // in code can reach this arm.
        _ => {
            return Err(AppError::new(
                ErrorKind::Usage,
                "give -x <matrix.csv> and -y <response.csv>, or -t M N",
            ));
        }
    };

    let strategy = if cli.qr { Strategy::Qr } else { cli.strategy };
    let format = match cli.precision {
        Some(digits) => OutputFormat::fixed(digits),
        None => OutputFormat::full_precision(),
    };

    Ok(RunConfig {
        input,
        output: cli.output,
        strategy,
        format,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config(args: &[&str]) -> Result<RunConfig, AppError> {
        let cli = Cli::try_parse_from(args).unwrap();
        run_config_from_args(cli)
    }

    #[test]
    fn file_inputs_resolve_with_defaults() {
        let cfg = config(&["estols", "-x", "mat.csv", "-y", "obs.csv"]).unwrap();
        assert_eq!(
            cfg.input,
            InputSource::Files {
                matrix: PathBuf::from("mat.csv"),
                response: PathBuf::from("obs.csv"),
            }
        );
        assert_eq!(cfg.output, None);
        assert_eq!(cfg.strategy, Strategy::NormalEquations);
        assert_eq!(cfg.format, OutputFormat::full_precision());
    }

    #[test]
    fn qr_flag_selects_qr() {
        let cfg = config(&["estols", "-x", "a", "-y", "b", "--qr"]).unwrap();
        assert_eq!(cfg.strategy, Strategy::Qr);
    }

    #[test]
    fn incomplete_inputs_are_usage_errors() {
        let mut cli = Cli::try_parse_from(["estols", "-x", "a", "-y", "b"]).unwrap();
        cli.response = None;
        let err = run_config_from_args(cli).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);

        let mut cli = Cli::try_parse_from(["estols", "-t", "2", "10"]).unwrap();
        cli.speed_test = Some(vec![2]);
        let err = run_config_from_args(cli).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn speed_test_keeps_m_then_n() {
        let cfg = config(&["estols", "-t", "4", "1000", "--seed", "5", "--precision", "8"]).unwrap();
        assert_eq!(
            cfg.input,
            InputSource::SpeedTest {
                m: 4,
                n: 1000,
                seed: Some(5)
            }
        );
        assert_eq!(cfg.format, OutputFormat::fixed(8));
    }
}
