//! Errors that stop the server from starting or serving.

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// Fatal server errors, reported by the binary before exiting
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("invalid value: {0}")]
    InvalidValue(#[from] ValueObjectError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
