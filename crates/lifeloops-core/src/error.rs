//! Core error types for lifeloops-core.
//!
//! The suggestion engine itself is infallible; these errors come from the
//! goal hierarchy invariants, storage, and configuration layers.

use std::path::PathBuf;
use thiserror::Error;

use crate::goals::Timeframe;

/// Core error type for lifeloops-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Referenced goal does not exist
    #[error("Unknown goal: {0}")]
    UnknownGoal(String),

    /// Child timeframe is not finer than its parent's
    #[error("Goal {child} ({child_timeframe}) cannot be a child of {parent} ({parent_timeframe})")]
    TimeframeOrder {
        parent: String,
        parent_timeframe: Timeframe,
        child: String,
        child_timeframe: Timeframe,
    },

    /// Parent and child links disagree
    #[error("Inconsistent link between parent {parent} and child {child}: {message}")]
    InconsistentLink {
        parent: String,
        child: String,
        message: String,
    },

    /// Goal stored under the wrong timeframe list
    #[error("Goal {id} is {actual} but stored in the {listed} list")]
    MisplacedGoal {
        id: String,
        actual: Timeframe,
        listed: Timeframe,
    },

    /// Target date precedes start date
    #[error("Invalid date range: target_date ({target}) is before start_date ({start})")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        target: chrono::NaiveDate,
    },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn category(err: &CoreError) -> &'static str {
        match err {
            CoreError::Database(_) => "Database",
            CoreError::Config(_) => "Configuration",
            CoreError::Validation(_) => "Validation",
            CoreError::Io(_) => "IO",
            CoreError::Json(_) => "JSON",
        }
    }

    #[test]
    fn every_core_error_names_its_source() {
        let json_err = serde_json::from_str::<u8>("x").unwrap_err();
        let errors = [
            CoreError::from(DatabaseError::Locked),
            CoreError::from(ConfigError::ParseFailed("bad".into())),
            CoreError::from(ValidationError::UnknownGoal("g".into())),
            CoreError::from(std::io::Error::other("disk")),
            CoreError::from(json_err),
        ];
        for err in &errors {
            assert!(err.to_string().starts_with(category(err)), "{err}");
        }
    }

    #[test]
    fn locked_sqlite_maps_to_locked() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
            None,
        );
        assert!(matches!(DatabaseError::from(err), DatabaseError::Locked));
    }
}
