//! Account entity: a registered identity with a role flag.

use chrono::{DateTime, Utc};

use crate::id::AccountId;

/// A registered account.
///
/// # Invariants
/// - `username` and `email` are each globally unique (enforced by storage).
/// - `password_hash` must never appear in any serialized response. This type
///   deliberately does not implement `Serialize`; wire representations are
///   built through explicit summary mappings that have no hash field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    /// Argon2 hash of the account secret. Never exposed.
    pub password_hash: String,
    /// Administrator flag. Admins may mutate posts and manage roles.
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
