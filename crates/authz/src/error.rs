//! Authorization error model.

use thiserror::Error;

use crate::store::GrantStoreError;

/// Errors surfaced by the authorization core.
///
/// Unknown permission codes and unresolved resource ancestors are *not*
/// errors: they resolve to "no match" so boolean evaluation fails closed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// Referenced grant, role or resource does not exist.
    #[error("not found")]
    NotFound,

    /// A guard check failed. Never retried; surfaced to the end user as-is.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Malformed grant detected at construction (e.g. nil target id).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The underlying grant/catalog read model failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl AuthzError {
    pub fn denied(msg: impl Into<String>) -> Self {
        Self::AccessDenied(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

impl From<GrantStoreError> for AuthzError {
    fn from(value: GrantStoreError) -> Self {
        match value {
            GrantStoreError::NotFound => AuthzError::NotFound,
            GrantStoreError::Storage(msg) => AuthzError::Storage(msg),
        }
    }
}
