//! Error types for the Listin agent tooling.
//!
//! A single error enum covers configuration, I/O, knowledge document,
//! instruction template and serialization failures.

use thiserror::Error;

/// Unified error type for the Listin agent tooling.
///
/// Fallible functions return `Result<T, AppError>`. Knowledge document
/// loading is the one deliberate exception: it degrades instead of failing.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Knowledge document errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Instruction template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_serialization() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn test_display_includes_category() {
        let err = AppError::Prompt("unknown variable".to_string());
        assert_eq!(err.to_string(), "Prompt error: unknown variable");
    }
}
