//! Storage error model.

use thiserror::Error;

/// Which unique column a conflicting write collided on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    Username,
}

/// Storage-level error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write. This is the final arbiter for
    /// duplicate registrations under concurrency.
    #[error("duplicate value for unique field")]
    Conflict(UniqueField),

    /// A referenced row does not exist (e.g. post author).
    #[error("referenced row does not exist")]
    ForeignKey,

    /// The underlying database failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),
}
