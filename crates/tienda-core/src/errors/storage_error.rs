//! Storage-layer errors for SQLite operations.

use super::error_code::{self, TiendaErrorCode};

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Database busy (another operation in progress)")]
    DbBusy,

    #[error("Read pool exhausted")]
    PoolExhausted,

    #[error("Row not found")]
    NotFound,
}

impl TiendaErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DbBusy => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::PoolExhausted => error_code::POOL_EXHAUSTED,
            Self::NotFound => error_code::ROW_NOT_FOUND,
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::QueryReturnedNoRows => Self::NotFound,
            rusqlite::Error::SqliteFailure(ref inner, _)
                if inner.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                Self::DbBusy
            }
            other => Self::SqliteError {
                message: other.to_string(),
            },
        }
    }
}
