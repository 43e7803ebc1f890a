//! Account repository contract.

use async_trait::async_trait;

use quill_core::{Account, AccountId};

use crate::error::StoreError;

/// Fields required to create an account. The id and creation timestamp are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Account persistence. Accounts are never deleted in-product.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account. Fails with [`StoreError::Conflict`] when the
    /// email or username is already taken, even under concurrent inserts.
    async fn insert(&self, new: NewAccount) -> Result<Account, StoreError>;

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// All accounts, newest first.
    async fn list(&self) -> Result<Vec<Account>, StoreError>;

    /// Flip the administrator flag. Returns the updated account, or `None`
    /// when no such account exists.
    async fn set_role(
        &self,
        id: AccountId,
        is_admin: bool,
    ) -> Result<Option<Account>, StoreError>;
}
