//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a `CatRepository`.
///
/// These are infrastructure failures, never bad caller input.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite failure
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),

    /// A previous holder of the store lock panicked
    #[error("store lock poisoned")]
    Poisoned,

    /// Update requested for a record that was never persisted
    #[error("record has no id")]
    MissingId,

    /// The targeted row does not exist
    #[error("no row with id {0}")]
    NotFound(i64),

    /// A row could not be decoded into a Cat
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(StoreError::MissingId.to_string(), "record has no id");
        assert_eq!(
            StoreError::Corrupt("age = -1".to_string()).to_string(),
            "corrupt row: age = -1"
        );
    }
}
