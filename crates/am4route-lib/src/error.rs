use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the am4route library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the reference dataset")]
    ProjectDirsUnavailable,

    /// Raised when a SQLite dataset lacks a required table or column.
    #[error("unsupported dataset schema: {detail}")]
    UnsupportedSchema { detail: String },

    /// Raised when a reference record fails validation while loading.
    #[error("invalid {kind} record: {message}")]
    InvalidRecord { kind: &'static str, message: String },

    /// Raised when an airport or aircraft query did not match any record.
    #[error("{kind} not found - {search_type}:{search_str}{}", format_suggestions(.suggestions))]
    NotFound {
        kind: &'static str,
        search_type: String,
        search_str: String,
        suggestions: Vec<String>,
    },

    /// Raised when the economics constants file cannot be parsed.
    #[error("invalid economics configuration: {0}")]
    Economics(#[from] serde_json::Error),

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
