//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// The core crate only carries identifier primitives, so the only failure it
/// can produce is an identifier that does not parse. Engine-level failures
/// (denials, invariants, storage) live with the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
