//! Error taxonomy shared across the engine and stores.
//!
//! Defined in `essaylens-core` so stores and callers classify failures
//! through variants instead of string matching.

use thiserror::Error;
use uuid::Uuid;

/// Errors produced by the evaluation engine and submission stores.
#[derive(Debug, Error)]
pub enum EssayError {
    /// Input rejected before any work happened (short text, bad enum value).
    #[error("validation failed: {0}")]
    Validation(String),

    /// No submission exists with the given id.
    #[error("submission not found: {0}")]
    NotFound(Uuid),

    /// The store is unreachable or a read/write failed.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Unexpected engine fault.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EssayError {
    /// Returns `true` for caller mistakes that should surface verbatim.
    pub fn is_validation(&self) -> bool {
        matches!(self, EssayError::Validation(_))
    }

    /// Returns `true` when the target record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EssayError::NotFound(_))
    }
}

pub type EssayResult<T> = Result<T, EssayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_helpers() {
        assert!(EssayError::Validation("too short".into()).is_validation());
        assert!(EssayError::NotFound(Uuid::nil()).is_not_found());
        assert!(!EssayError::Persistence("disk full".into()).is_not_found());
    }

    #[test]
    fn display_messages() {
        let err = EssayError::Validation("essay text must be at least 10 characters".into());
        assert_eq!(
            err.to_string(),
            "validation failed: essay text must be at least 10 characters"
        );
    }
}
