//! Error types for tabview.
//!
//! The query engine itself is total: filtering, sorting, paging and every
//! state transition succeed for any input. Errors only arise at the edges:
//!
//! - [`RegistryError`] - a column registry declared with duplicate ids
//! - [`InputError`] - record file/stdin reading failures
//! - [`AppError`] - top-level error of the reference host, wrapping the above
//!   plus configuration and terminal failures
//!
//! Malformed record lines are **non-fatal**: they are logged and skipped so
//! the browser stays usable with partial data.

use std::path::PathBuf;
use thiserror::Error;

/// Programmer error in a column declaration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two columns share the same id.
    #[error("Duplicate column id: {0}")]
    DuplicateColumnId(String),
}

/// Errors encountered when reading records from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The requested file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// No file was given and stdin is an interactive terminal.
    #[error("No input: pass a file path or pipe records on stdin")]
    NoInput,

    /// The input is a JSON document but not an array of objects.
    #[error("Expected a JSON array of objects or JSON Lines in {source_name}")]
    UnsupportedShape {
        /// File path or `<stdin>`.
        source_name: String,
    },

    /// A JSON document failed to parse as a whole.
    #[error("Invalid JSON in {source_name}: {reason}")]
    InvalidJson {
        /// File path or `<stdin>`.
        source_name: String,
        /// Parser message.
        reason: String,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error for the reference host binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read records.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Column registry could not be built.
    #[error("Invalid columns: {0}")]
    Registry(#[from] RegistryError),

    /// Configuration file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or stdout failure.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The interactive browser failed.
    #[error("{0}")]
    Tui(#[from] crate::view::TuiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_names_the_column() {
        let err = RegistryError::DuplicateColumnId("name".to_string());
        assert_eq!(err.to_string(), "Duplicate column id: name");
    }

    #[test]
    fn input_error_converts_into_app_error() {
        let err: AppError = InputError::NoInput.into();
        assert!(matches!(err, AppError::InputRead(InputError::NoInput)));
    }

    #[test]
    fn io_error_converts_into_terminal_error() {
        let err: AppError = std::io::Error::other("boom").into();
        assert!(matches!(err, AppError::Terminal(_)));
    }

    #[test]
    fn file_not_found_shows_path() {
        let err = InputError::FileNotFound {
            path: PathBuf::from("/tmp/rows.json"),
        };
        assert!(err.to_string().contains("/tmp/rows.json"));
    }
}
