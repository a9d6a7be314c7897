//! Validation error types

use std::fmt;

/// Input rejected before it reaches a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Request body could not be decoded as a note payload
    InvalidBody { reason: String },

    /// Path identifier is not a positive integer
    InvalidId { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBody { reason } => write!(f, "invalid request body: {}", reason),
            Self::InvalidId { value } => {
                write!(f, "invalid note id '{}': expected a positive integer", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
