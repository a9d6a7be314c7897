//! Store error types
//!
//! Every failure a store can report falls into one [`ErrorKind`], so the
//! HTTP layer can map errors to status codes without parsing messages.

use thiserror::Error;

use crate::model::NoteId;

pub type StoreResult<T> = Result<T, StoreError>;

/// SQLSTATE raised when `statement_timeout` cancels a statement
const QUERY_CANCELED: &str = "57014";

/// Closed set of failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input, rejected before reaching a store
    Validation,
    /// Identifier has no live note
    NotFound,
    /// Request deadline elapsed first
    Timeout,
    /// Anything else the backend reported
    Backend,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::NotFound => "not_found",
            Self::Timeout => "timeout",
            Self::Backend => "internal_error",
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("note {id} not found")]
    NotFound { id: NoteId },

    #[error("deadline exceeded before the store completed the operation")]
    Timeout,

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("store is closed")]
    Closed,
}

impl StoreError {
    pub fn not_found(id: NoteId) -> Self {
        Self::NotFound { id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Timeout => ErrorKind::Timeout,
            Self::Database(_) | Self::Closed => ErrorKind::Backend,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolClosed => Self::Closed,
            sqlx::Error::Database(db) if db.code().as_deref() == Some(QUERY_CANCELED) => {
                Self::Timeout
            }
            other => Self::Database(other),
        }
    }
}
