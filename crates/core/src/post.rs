//! Post entity: an authored content record owned by exactly one account.

use chrono::{DateTime, Utc};

use crate::id::{AccountId, PostId};

/// A published post.
///
/// # Invariants
/// - `author_id` must resolve to an existing account (storage enforces the
///   reference).
/// - Deletion is hard: a deleted post is removed outright, no soft delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
