//! Write the coefficient vector.
//!
//! One coefficient per line, each line terminated by `\n`. The text is fully
//! rendered before anything is written, so a failure never leaves a
//! half-formatted result behind.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use nalgebra::DVector;

use crate::domain::OutputFormat;
use crate::error::{AppError, ErrorKind};

/// Render coefficients as newline-terminated lines.
pub fn format_coefficients(beta: &DVector<f64>, format: &OutputFormat) -> String {
    let mut out = String::new();
    for &value in beta.iter() {
        out.push_str(&format.format_value(value));
        out.push('\n');
    }
    out
}

/// Write coefficients to any writer.
pub fn write_coefficients<W: Write>(
    mut writer: W,
    beta: &DVector<f64>,
    format: &OutputFormat,
) -> std::io::Result<()> {
    writer.write_all(format_coefficients(beta, format).as_bytes())?;
    writer.flush()
}

/// Write coefficients to `path`, or to standard output when `path` is `None`.
pub fn emit_coefficients(
    path: Option<&Path>,
    beta: &DVector<f64>,
    format: &OutputFormat,
) -> Result<(), AppError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                AppError::new(
                    ErrorKind::Output,
                    format!("Failed to create output file '{}': {e}", path.display()),
                )
            })?;
            write_coefficients(file, beta, format).map_err(|e| {
                AppError::new(
                    ErrorKind::Output,
                    format!("Failed to write output file '{}': {e}", path.display()),
                )
            })
        }
        None => write_coefficients(std::io::stdout().lock(), beta, format).map_err(|e| {
            AppError::new(ErrorKind::Output, format!("Failed to write to stdout: {e}"))
        }),
    }
}
