//! Post repository contract.

use async_trait::async_trait;

use quill_core::{AccountId, Post, PostId};

use crate::error::StoreError;

/// Fields required to create a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: AccountId,
}

/// Partial update: only provided fields change. An empty update touches
/// nothing but still bumps `updated_at`.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// The author fields a post exposes on the wire (never the hash).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    pub id: AccountId,
    pub username: String,
}

/// A post joined with its author summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: AuthorSummary,
}

/// Post persistence. Deletes are hard deletes.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a new post. Fails with [`StoreError::ForeignKey`] when the
    /// author does not resolve to an existing account.
    async fn insert(&self, new: NewPost) -> Result<PostWithAuthor, StoreError>;

    async fn get(&self, id: PostId) -> Result<Option<PostWithAuthor>, StoreError>;

    /// All posts, newest first.
    async fn list(&self) -> Result<Vec<PostWithAuthor>, StoreError>;

    /// Apply a partial update. Returns `None` when no such post exists.
    async fn update(
        &self,
        id: PostId,
        changes: PostUpdate,
    ) -> Result<Option<PostWithAuthor>, StoreError>;

    /// Remove a post outright. Returns whether a row was deleted.
    async fn delete(&self, id: PostId) -> Result<bool, StoreError>;
}
