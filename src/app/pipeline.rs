//! The single-pass solve pipeline:
//! load (or generate) → shape validation → solve.
//!
//! Writing the result is left to the caller so the whole pipeline can be
//! exercised without touching stdout.

use log::info;
use nalgebra::{DMatrix, DVector};

use crate::domain::{InputSource, RunConfig, Shape, Strategy};
use crate::error::AppError;
use crate::math::{solve, validate_shape};

/// Everything computed by one run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub coefficients: DVector<f64>,
    pub shape: Shape,
    pub strategy: Strategy,
}

/// Execute the pipeline for `config`.
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    let (x, y) = load_inputs(&config.input)?;

    let shape = validate_shape(&x, &y)?;
    info!("solving with {} ({shape})", config.strategy);

    let coefficients = solve(&x, &y, config.strategy)?;

    Ok(RunOutput {
        coefficients,
        shape,
        strategy: config.strategy,
    })
}

/// Produce the design matrix and response for the configured input source.
pub fn load_inputs(input: &InputSource) -> Result<(DMatrix<f64>, DVector<f64>), AppError> {
    match input {
        InputSource::Files { matrix, response } => {
            let x = crate::io::load_matrix(matrix)?;
            let y = crate::io::load_response(response)?;
            Ok((x, y))
        }
        InputSource::SpeedTest { m, n, seed } => {
            let data = crate::data::generate_speed_test(*m, *n, *seed);
            Ok((data.x, data.y))
        }
    }
}
