//! Error types for the scheduling calendar.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or serving calendar views.
#[derive(Error, Debug)]
pub enum Error {
    /// A reference or appointment date could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// View mode outside day/week/month
    #[error("Unknown view mode: {0}")]
    UnknownViewMode(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidDate(_) | Error::UnknownViewMode(_) | Error::Validation(_) => 400,
            _ => 500,
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Error::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::UnknownViewMode("year".into()).status_code(), 400);
        assert_eq!(Error::InvalidDate("2024-13-01".into()).status_code(), 400);
        assert_eq!(Error::Internal("boom".into()).status_code(), 500);
    }
}
