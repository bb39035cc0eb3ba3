//! Error types and exit codes for numhist
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/store error (unreadable record, bad config)

mod macros;

use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for HistoryError {
    fn from(err: rusqlite::Error) -> Self {
        HistoryError::Database(err.to_string())
    }
}

/// Errors that can occur during numhist operations
#[derive(Error, Debug)]
pub enum HistoryError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/store errors (exit code 3)
    #[error("invalid configuration in {source_name}: {reason}")]
    InvalidConfig { source_name: String, reason: String },

    #[error("corrupt record for {phone}: {reason}")]
    CorruptRecord { phone: String, reason: String },

    // Generic failures (exit code 1)
    #[error("database error: {0}")]
    Database(String),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl HistoryError {
    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        HistoryError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        HistoryError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    pub fn invalid_config(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        HistoryError::InvalidConfig {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    pub fn corrupt_record(phone: &str, reason: impl std::fmt::Display) -> Self {
        HistoryError::CorruptRecord {
            phone: phone.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            // Usage errors
            HistoryError::UnknownFormat(_)
            | HistoryError::UsageError(_)
            | HistoryError::InvalidValue { .. } => ExitCode::Usage,

            // Data/store errors
            HistoryError::InvalidConfig { .. } | HistoryError::CorruptRecord { .. } => {
                ExitCode::Data
            }

            // Generic failures
            HistoryError::Database(_)
            | HistoryError::FailedOperation { .. }
            | HistoryError::Io(_)
            | HistoryError::Json(_)
            | HistoryError::Toml(_)
            | HistoryError::Other(_) => ExitCode::Failure,
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            HistoryError::UnknownFormat(_) => "unknown_format",
            HistoryError::UsageError(_) => "usage_error",
            HistoryError::InvalidValue { .. } => "invalid_value",
            HistoryError::InvalidConfig { .. } => "invalid_config",
            HistoryError::CorruptRecord { .. } => "corrupt_record",
            HistoryError::Database(_) => "database_error",
            HistoryError::FailedOperation { .. } => "failed_operation",
            HistoryError::Io(_) => "io_error",
            HistoryError::Json(_) => "json_error",
            HistoryError::Toml(_) => "toml_error",
            HistoryError::Other(_) => "other",
        }
    }
}

/// Result type alias for numhist operations
pub type Result<T> = std::result::Result<T, HistoryError>;
