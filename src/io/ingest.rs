//! CSV ingest for the design matrix and the response vector.
//!
//! The input format is deliberately minimal: every line is a row of
//! comma-separated numbers, with no header and no quoting. The first row fixes
//! the column count and every later row must match it.
//!
//! Design goals:
//! - **Strict**: a ragged row, a blank line or a non-numeric field aborts the
//!   run; nothing is skipped, truncated or imputed
//! - **Specific errors**: messages name the file, line and column
//! - **No solving logic here**

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use log::{debug, info};
use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// Load a dense matrix from a comma-separated text file.
pub fn load_matrix(path: &Path) -> Result<DMatrix<f64>, AppError> {
    let start = Instant::now();
    let file = File::open(path).map_err(|e| {
        AppError::malformed(format!("Failed to open '{}': {e}", path.display()))
    })?;

    let matrix = read_matrix(file, &path.display().to_string())?;
    info!(
        "loaded '{}': {} rows x {} columns in {:.6}s",
        path.display(),
        matrix.nrows(),
        matrix.ncols(),
        start.elapsed().as_secs_f64()
    );
    Ok(matrix)
}

/// Load a response vector: the first column of a comma-separated file.
///
/// Additional columns are accepted and ignored, so multi-column observation
/// files can be passed as-is.
pub fn load_response(path: &Path) -> Result<DVector<f64>, AppError> {
    let matrix = load_matrix(path)?;
    if matrix.ncols() > 1 {
        debug!(
            "'{}' has {} columns; using the first as the response",
            path.display(),
            matrix.ncols()
        );
    }
    Ok(first_column(&matrix))
}

/// Parse a dense matrix from any reader. `source` is used in error messages.
///
/// Every line is a row: a blank line anywhere but after the final line
/// terminator is rejected, never skipped.
pub fn read_matrix<R: Read>(mut reader: R, source: &str) -> Result<DMatrix<f64>, AppError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| AppError::malformed(format!("Failed to read '{source}': {e}")))?;

    // `flexible` so that ragged rows reach our own check, which reports the
    // expected and actual counts. No quoting: fields are split on every comma.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut values = Vec::new();
    let mut ncols: Option<usize> = None;
    let mut nrows = 0usize;

    for result in reader.records() {
        let record =
            result.map_err(|e| AppError::malformed(format!("Failed to read '{source}': {e}")))?;
        let expected_line = nrows as u64 + 1;
        let line = record.position().map(|p| p.line()).unwrap_or(expected_line);

        // The csv reader skips empty lines; a gap in line numbers is one.
        if line != expected_line {
            return Err(blank_line(source, expected_line));
        }

        let expected = *ncols.get_or_insert(record.len());
        if record.len() != expected {
            return Err(AppError::malformed(format!(
                "'{source}' line {line}: expected {expected} comma-separated fields (from the first row), found {}",
                record.len()
            )));
        }

        for (col, field) in record.iter().enumerate() {
            values.push(parse_field(field, source, line, col + 1)?);
        }
        nrows += 1;
    }

    if text.lines().count() > nrows {
        return Err(blank_line(source, nrows as u64 + 1));
    }

    let Some(ncols) = ncols else {
        return Err(AppError::malformed(format!("'{source}' contains no rows")));
    };

    Ok(DMatrix::from_row_slice(nrows, ncols, &values))
}

/// The response policy: only the first column of the source is used.
pub fn first_column(matrix: &DMatrix<f64>) -> DVector<f64> {
    matrix.column(0).into_owned()
}

fn blank_line(source: &str, line: u64) -> AppError {
    AppError::malformed(format!("'{source}' line {line}: blank line (every line must be a row)"))
}

fn parse_field(field: &str, source: &str, line: u64, col: usize) -> Result<f64, AppError> {
    let value: f64 = field.parse().map_err(|_| {
        AppError::malformed(format!(
            "'{source}' line {line}, column {col}: '{field}' is not a number"
        ))
    })?;
    // `f64::from_str` accepts "NaN" and "inf"; neither can enter a least-squares fit.
    if !value.is_finite() {
        return Err(AppError::malformed(format!(
            "'{source}' line {line}, column {col}: '{field}' is not a finite number"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorKind;

    fn parse(text: &str) -> Result<DMatrix<f64>, AppError> {
        read_matrix(text.as_bytes(), "test.csv")
    }

    #[test]
    fn shape_follows_lines_and_first_row_fields() {
        let m = parse("1,2,3\n4,5,6\n7,8,9\n10,11,12\n").unwrap();
        assert_eq!(m.nrows(), 4);
        assert_eq!(m.ncols(), 3);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(m[(3, 1)], 11.0);
    }

    #[test]
    fn accepts_whitespace_exponents_and_missing_final_newline() {
        let m = parse(" 1.5 , -2e-3\n3,\t4").unwrap();
        assert_eq!((m.nrows(), m.ncols()), (2, 2));
        assert_eq!(m[(0, 1)], -2e-3);
        assert_eq!(m[(1, 1)], 4.0);
    }

    #[test]
    fn ragged_row_is_malformed() {
        let err = parse("1,2\n3,4\n5\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.message().contains("line 3"), "{err}");
        assert!(err.message().contains("expected 2"), "{err}");
    }

    #[test]
    fn longer_row_is_malformed_too() {
        let err = parse("1\n2,3\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn non_numeric_field_names_position() {
        let err = parse("1,2\n3,abc\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.message().contains("line 2, column 2"), "{err}");
        assert!(err.message().contains("abc"), "{err}");
    }

    #[test]
    fn empty_field_is_not_imputed() {
        let err = parse("1,2\n3,\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn non_finite_field_is_rejected() {
        let err = parse("1,2\nNaN,4\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn blank_line_between_rows_is_malformed() {
        let err = parse("1,2\n\n3,4\n5,6\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.message().contains("line 2"), "{err}");
        assert!(err.message().contains("test.csv"), "{err}");
    }

    #[test]
    fn leading_and_trailing_blank_lines_are_malformed() {
        let err = parse("\n1,2\n3,4\n").unwrap_err();
        assert!(err.message().contains("line 1"), "{err}");

        let err = parse("1,2\n3,4\n\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.message().contains("line 3"), "{err}");
    }

    #[test]
    fn crlf_line_endings_keep_row_count() {
        let m = parse("1,2\r\n3,4\r\n5,6\r\n").unwrap();
        assert_eq!((m.nrows(), m.ncols()), (3, 2));
    }

    #[test]
    fn quoted_fields_are_not_unquoted() {
        let err = parse("\"1\",2\n3,4\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.message().contains("line 1, column 1"), "{err}");

        // A quoted comma still splits the row, so the row is ragged.
        let err = parse("1,2,3\n\"4,5\",6\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn empty_input_is_malformed() {
        let err = parse("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.message().contains("no rows"));
    }

    #[test]
    fn missing_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_matrix(&dir.path().join("absent.csv")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.message().contains("absent.csv"));
    }

    #[test]
    fn response_uses_first_column_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1,10,100\n2,20,200\n3,30,300\n").unwrap();
        let y = load_response(file.path()).unwrap();
        assert_eq!(y.as_slice(), &[1.0, 2.0, 3.0]);
    }
}
