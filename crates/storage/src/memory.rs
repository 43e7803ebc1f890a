//! In-memory store for dev/test.
//!
//! A single shared state holds both tables so the post store can join author
//! usernames the same way the Postgres store does. Uniqueness is enforced
//! under the write lock, making the insert check-and-write atomic.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use quill_core::{Account, AccountId, Post, PostId};

use crate::account_store::{AccountStore, NewAccount};
use crate::error::{StoreError, UniqueField};
use crate::post_store::{AuthorSummary, NewPost, PostStore, PostUpdate, PostWithAuthor};

#[derive(Debug, Default)]
struct Tables {
    accounts: HashMap<AccountId, Account>,
    posts: HashMap<PostId, Post>,
}

/// Shared backing state for the in-memory stores.
#[derive(Debug, Default)]
pub struct MemoryState {
    inner: RwLock<Tables>,
}

impl MemoryState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory [`AccountStore`].
pub struct InMemoryAccountStore {
    state: Arc<MemoryState>,
}

impl InMemoryAccountStore {
    pub fn new(state: Arc<MemoryState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, new: NewAccount) -> Result<Account, StoreError> {
        let mut tables = self.state.inner.write().expect("store lock poisoned");

        if tables
            .accounts
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(&new.email))
        {
            return Err(StoreError::Conflict(UniqueField::Email));
        }
        if tables.accounts.values().any(|a| a.username == new.username) {
            return Err(StoreError::Conflict(UniqueField::Username));
        }

        let account = Account {
            id: AccountId::new(),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            is_admin: new.is_admin,
            created_at: Utc::now(),
        };
        tables.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let tables = self.state.inner.read().expect("store lock poisoned");
        Ok(tables.accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let tables = self.state.inner.read().expect("store lock poisoned");
        Ok(tables
            .accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let tables = self.state.inner.read().expect("store lock poisoned");
        Ok(tables
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let tables = self.state.inner.read().expect("store lock poisoned");
        let mut accounts: Vec<Account> = tables.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| (b.created_at, b.id.as_uuid()).cmp(&(a.created_at, a.id.as_uuid())));
        Ok(accounts)
    }

    async fn set_role(
        &self,
        id: AccountId,
        is_admin: bool,
    ) -> Result<Option<Account>, StoreError> {
        let mut tables = self.state.inner.write().expect("store lock poisoned");
        Ok(tables.accounts.get_mut(&id).map(|account| {
            account.is_admin = is_admin;
            account.clone()
        }))
    }
}

/// In-memory [`PostStore`].
pub struct InMemoryPostStore {
    state: Arc<MemoryState>,
}

impl InMemoryPostStore {
    pub fn new(state: Arc<MemoryState>) -> Self {
        Self { state }
    }
}

fn with_author(tables: &Tables, post: &Post) -> Option<PostWithAuthor> {
    let author = tables.accounts.get(&post.author_id)?;
    Some(PostWithAuthor {
        post: post.clone(),
        author: AuthorSummary {
            id: author.id,
            username: author.username.clone(),
        },
    })
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, new: NewPost) -> Result<PostWithAuthor, StoreError> {
        let mut tables = self.state.inner.write().expect("store lock poisoned");

        if !tables.accounts.contains_key(&new.author_id) {
            return Err(StoreError::ForeignKey);
        }

        let now = Utc::now();
        let post = Post {
            id: PostId::new(),
            title: new.title,
            content: new.content,
            author_id: new.author_id,
            created_at: now,
            updated_at: now,
        };
        tables.posts.insert(post.id, post.clone());

        with_author(&tables, &post).ok_or(StoreError::ForeignKey)
    }

    async fn get(&self, id: PostId) -> Result<Option<PostWithAuthor>, StoreError> {
        let tables = self.state.inner.read().expect("store lock poisoned");
        Ok(tables
            .posts
            .get(&id)
            .and_then(|post| with_author(&tables, post)))
    }

    async fn list(&self) -> Result<Vec<PostWithAuthor>, StoreError> {
        let tables = self.state.inner.read().expect("store lock poisoned");
        let mut posts: Vec<PostWithAuthor> = tables
            .posts
            .values()
            .filter_map(|post| with_author(&tables, post))
            .collect();
        posts.sort_by(|a, b| {
            (b.post.created_at, b.post.id.as_uuid()).cmp(&(a.post.created_at, a.post.id.as_uuid()))
        });
        Ok(posts)
    }

    async fn update(
        &self,
        id: PostId,
        changes: PostUpdate,
    ) -> Result<Option<PostWithAuthor>, StoreError> {
        let mut tables = self.state.inner.write().expect("store lock poisoned");

        let Some(post) = tables.posts.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        post.updated_at = Utc::now();

        let post = post.clone();
        Ok(with_author(&tables, &post))
    }

    async fn delete(&self, id: PostId) -> Result<bool, StoreError> {
        let mut tables = self.state.inner.write().expect("store lock poisoned");
        Ok(tables.posts.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stores() -> (InMemoryAccountStore, InMemoryPostStore) {
        let state = MemoryState::new();
        (
            InMemoryAccountStore::new(state.clone()),
            InMemoryPostStore::new(state),
        )
    }

    fn new_account(username: &str, email: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let (accounts, _) = stores();
        let created = accounts
            .insert(new_account("alice", "alice@example.com"))
            .await
            .unwrap();

        let found = accounts.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(
            accounts
                .find_by_email("ALICE@example.com")
                .await
                .unwrap()
                .unwrap()
                .id,
            created.id
        );
        assert_eq!(
            accounts
                .find_by_username("alice")
                .await
                .unwrap()
                .unwrap()
                .id,
            created.id
        );
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_even_with_different_username() {
        let (accounts, _) = stores();
        accounts
            .insert(new_account("alice", "alice@example.com"))
            .await
            .unwrap();

        let err = accounts
            .insert(new_account("other", "alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(UniqueField::Email)));
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let (accounts, _) = stores();
        accounts
            .insert(new_account("alice", "alice@example.com"))
            .await
            .unwrap();

        let err = accounts
            .insert(new_account("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(UniqueField::Username)));
    }

    #[tokio::test]
    async fn accounts_list_newest_first() {
        let (accounts, _) = stores();
        let a = accounts
            .insert(new_account("first", "first@example.com"))
            .await
            .unwrap();
        let b = accounts
            .insert(new_account("second", "second@example.com"))
            .await
            .unwrap();

        let listed = accounts.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, b.id);
        assert_eq!(listed[1].id, a.id);
    }

    #[tokio::test]
    async fn set_role_flips_the_flag() {
        let (accounts, _) = stores();
        let created = accounts
            .insert(new_account("alice", "alice@example.com"))
            .await
            .unwrap();

        let updated = accounts.set_role(created.id, true).await.unwrap().unwrap();
        assert!(updated.is_admin);
        assert!(accounts
            .set_role(AccountId::new(), true)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn post_insert_requires_existing_author() {
        let (_, posts) = stores();
        let err = posts
            .insert(NewPost {
                title: "t".to_string(),
                content: "c".to_string(),
                author_id: AccountId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey));
    }

    #[tokio::test]
    async fn post_lifecycle_join_update_delete() {
        let (accounts, posts) = stores();
        let author = accounts
            .insert(new_account("alice", "alice@example.com"))
            .await
            .unwrap();

        let created = posts
            .insert(NewPost {
                title: "Hello".to_string(),
                content: "World".to_string(),
                author_id: author.id,
            })
            .await
            .unwrap();
        assert_eq!(created.author.username, "alice");

        let updated = posts
            .update(
                created.post.id,
                PostUpdate {
                    title: Some("Hello again".to_string()),
                    content: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.post.title, "Hello again");
        assert_eq!(updated.post.content, "World");
        assert!(updated.post.updated_at >= created.post.updated_at);

        assert!(posts.delete(created.post.id).await.unwrap());
        assert!(posts.get(created.post.id).await.unwrap().is_none());
        assert!(!posts.delete(created.post.id).await.unwrap());
    }

    #[tokio::test]
    async fn posts_list_newest_first() {
        let (accounts, posts) = stores();
        let author = accounts
            .insert(new_account("alice", "alice@example.com"))
            .await
            .unwrap();

        let first = posts
            .insert(NewPost {
                title: "first".to_string(),
                content: "c".to_string(),
                author_id: author.id,
            })
            .await
            .unwrap();
        let second = posts
            .insert(NewPost {
                title: "second".to_string(),
                content: "c".to_string(),
                author_id: author.id,
            })
            .await
            .unwrap();

        let listed = posts.list().await.unwrap();
        assert_eq!(listed[0].post.id, second.post.id);
        assert_eq!(listed[1].post.id, first.post.id);
    }
}
