//! Process-level error type.
//!
//! Every failure in `estols` is terminal for the run, so a single error type is
//! enough: it carries a human-readable message plus the category that decides
//! the process exit code.

/// Failure category. Each maps to a distinct exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing command-line input.
    Usage,
    /// Input file unopenable, ragged rows, non-numeric fields or no rows.
    MalformedInput,
    /// Data parsed but the system is not over-determined (or sizes disagree).
    InvalidShape,
    /// The factorization could not produce a finite solution.
    NumericalFailure,
    /// The coefficient output could not be written.
    Output,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Usage => 2,
            ErrorKind::MalformedInput => 3,
            ErrorKind::InvalidShape => 4,
            ErrorKind::NumericalFailure => 5,
            ErrorKind::Output => 6,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ErrorKind::Usage => "usage error",
            ErrorKind::MalformedInput => "malformed input",
            ErrorKind::InvalidShape => "invalid shape",
            ErrorKind::NumericalFailure => "numerical failure",
            ErrorKind::Output => "output error",
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedInput, message)
    }

    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidShape, message)
    }

    pub fn numerical(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NumericalFailure, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code())
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
