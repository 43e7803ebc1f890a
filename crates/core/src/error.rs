//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Deliberately narrow: identifier parsing is the only deterministic domain
/// failure surfaced through this type. Field validation reports through
/// [`crate::validate::Violation`] lists instead.
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
