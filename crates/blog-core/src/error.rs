//! Domain-level error types.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid rate-limit or backup configuration detected at startup.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Requests per second must be a positive integer, got {0}")]
    InvalidRate(i64),

    #[error("Backup threshold must be a positive integer, got {0}")]
    InvalidThreshold(i64),

    #[error("Invalid backup schedule: {0}")]
    InvalidSchedule(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),
}

/// Failure of a single backup run.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Backup I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize records: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to read records: {0}")]
    Store(#[from] RepoError),
}

impl BackupError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
