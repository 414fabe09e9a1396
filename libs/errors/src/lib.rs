//! Unified error handling for simpcalc
//!
//! Every failure in the workspace is a [`CalcError`]. The three core kinds
//! (validation, parse, evaluation) carry only a human-readable message so they
//! can be written verbatim into history records; persistence failures are kept
//! apart in [`HistoryError`].

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// CalcError - Main error type
// ============================================================================

/// Main error type for the calculator pipeline and its collaborators
#[derive(Debug, Error)]
pub enum CalcError {
    // ======================================
    // Input shape
    // ======================================
    #[error("{0}")]
    Validation(String),

    // ======================================
    // Tokenizing & parsing
    // ======================================
    #[error("{0}")]
    Parse(String),

    // ======================================
    // Evaluation
    // ======================================
    #[error("{0}")]
    Evaluation(String),

    // ======================================
    // Persistence
    // ======================================
    #[error("History error: {0}")]
    History(#[from] HistoryError),
}

/// Result type alias using CalcError
pub type Result<T> = std::result::Result<T, CalcError>;

impl CalcError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Evaluation(_) => ErrorKind::Evaluation,
            Self::History(_) => ErrorKind::History,
        }
    }

    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

// Helper macros for creating errors
#[macro_export]
macro_rules! parse_error {
    ($msg:expr) => {
        $crate::CalcError::Parse($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::CalcError::Parse(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! evaluation_error {
    ($msg:expr) => {
        $crate::CalcError::Evaluation($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::CalcError::Evaluation(format!($fmt, $($arg)*))
    };
}

// ============================================================================
// ErrorKind - classification
// ============================================================================

/// Error kind, used for history records, exit codes and log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Parse,
    Evaluation,
    History,
}

impl ErrorKind {
    /// Name stored in the `error_type` field of a failed record
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Validation => "ValidationError",
            Self::Parse => "ParseError",
            Self::Evaluation => "EvaluationError",
            Self::History => "HistoryError",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation => 2,
            Self::Parse => 3,
            Self::Evaluation => 4,
            Self::History => 1,
        }
    }

    /// Label printed in front of the message on the error stream
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation => "Validation error",
            Self::Parse => "Parse error",
            Self::Evaluation => "Evaluation error",
            Self::History => "Unexpected error",
        }
    }

    /// Level at which a failure of this kind is logged
    pub fn log_level(&self) -> tracing::Level {
        match self {
            Self::Validation | Self::Parse | Self::Evaluation => tracing::Level::DEBUG,
            Self::History => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

// ============================================================================
// HistoryError - persistence failures
// ============================================================================

/// Errors raised by the history log
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("IO error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid history JSON in {}: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("History file content must be a JSON list: {}", .path.display())]
    NotAnArray { path: PathBuf },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl HistoryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }
}

pub type HistoryResult<T> = std::result::Result<T, HistoryError>;
