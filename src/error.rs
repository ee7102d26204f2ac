//! Error types for comment-cleaner library.

use thiserror::Error;

/// Result type alias for comment-cleaner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for comment-cleaner library.
///
/// Per-row operations never fail; only dataset-level setup does.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested column is not part of the dataset schema.
    #[error("Column '{column}' not found in dataset (available columns: {})", .available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// Auto-detection found no column matching a known comment keyword.
    #[error("Could not auto-detect comment column (available columns: {})", .available.join(", "))]
    ColumnUndetectable { available: Vec<String> },

    /// Dataset columns or rows do not line up.
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// Configuration document could not be read.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Columns available in the dataset, for errors raised during column resolution.
    pub fn available_columns(&self) -> Option<&[String]> {
        match self {
            Error::ColumnNotFound { available, .. } | Error::ColumnUndetectable { available } => {
                Some(available)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undetectable_lists_columns() {
        let err = Error::ColumnUndetectable {
            available: vec!["user".into(), "msg".into()],
        };
        assert_eq!(
            err.to_string(),
            "Could not auto-detect comment column (available columns: user, msg)"
        );
        assert_eq!(err.available_columns().unwrap(), ["user", "msg"]);
    }

    #[test]
    fn test_config_error_has_no_columns() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.available_columns().is_none());
    }
}
