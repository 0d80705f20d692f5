//! # Service Errors
//!
//! Client errors describe bad input and carry the exact message returned to
//! the caller. `Store` is the only server-side failure.

use thiserror::Error;

use crate::entity::FieldError;
use crate::repository::StoreError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors raised by `CatService`
#[derive(Debug, Error)]
pub enum ServiceError {
    // ==================
    // Client Errors
    // ==================
    /// A parameter value breaks a domain constraint
    #[error("Invalid value \"{value}\" for parameter \"{parameter}\"")]
    InvalidValue {
        parameter: &'static str,
        value: String,
    },

    /// Invalid value for the `id` parameter of a write: no such record
    #[error("There is no cat with id = {0}")]
    UnknownId(i64),

    /// Field name is not queryable
    #[error("No such field as '{0}'")]
    NoSuchField(String),

    /// Lookup by id found nothing
    #[error("Cat with id = '{0}' is not found")]
    CatNotFound(i64),

    /// The store holds no records at all
    #[error("There are no records in data base")]
    NoRecords,

    // ==================
    // Server Errors
    // ==================
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Invalid value for a named parameter
    pub fn invalid_value(parameter: &'static str, value: impl ToString) -> Self {
        ServiceError::InvalidValue {
            parameter,
            value: value.to_string(),
        }
    }

    /// Name of the offending parameter, if the error is about one
    pub fn parameter(&self) -> Option<&str> {
        match self {
            ServiceError::InvalidValue { parameter, .. } => Some(*parameter),
            ServiceError::UnknownId(_) | ServiceError::CatNotFound(_) => Some("id"),
            ServiceError::NoSuchField(_) => Some("fieldName"),
            ServiceError::NoRecords | ServiceError::Store(_) => None,
        }
    }

    /// Whether the caller is at fault
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ServiceError::Store(_))
    }
}

impl From<FieldError> for ServiceError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::NoSuchField(field) => ServiceError::NoSuchField(field),
        }
    }
}
