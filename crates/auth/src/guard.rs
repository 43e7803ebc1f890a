//! Role-gated access decisions.
//!
//! These are pure decision functions: the caller performs the store lookup
//! and hands the result in, keeping this crate free of I/O.

use thiserror::Error;

use quill_core::{Account, AccountId};

/// Why an admin-gated request was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The token outlived the account (e.g. deleted between issuance and use).
    #[error("account no longer exists")]
    AccountGone,

    /// The account exists but lacks the administrator flag.
    #[error("admin access required")]
    Forbidden,
}

/// Gate an already-authenticated identity on the administrator flag.
///
/// `account` is the store lookup result for the authenticated account id.
pub fn authorize_admin(account: Option<Account>) -> Result<Account, AccessError> {
    let account = account.ok_or(AccessError::AccountGone)?;
    if !account.is_admin {
        return Err(AccessError::Forbidden);
    }
    Ok(account)
}

/// A role mutation targeted the caller's own identity.
///
/// Rejected regardless of the caller's admin status: an administrator may not
/// change their own role, which would otherwise allow the last admin to lock
/// everyone out by demoting themselves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot change your own role")]
pub struct SelfRoleChange;

/// The self-demotion guard. Must pass before any role mutation is attempted.
pub fn ensure_role_change_allowed(
    actor: AccountId,
    target: AccountId,
) -> Result<(), SelfRoleChange> {
    if actor == target {
        return Err(SelfRoleChange);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(is_admin: bool) -> Account {
        Account {
            id: AccountId::new(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            is_admin,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn missing_account_is_gone_not_forbidden() {
        assert_eq!(authorize_admin(None).unwrap_err(), AccessError::AccountGone);
    }

    #[test]
    fn non_admin_is_forbidden() {
        assert_eq!(
            authorize_admin(Some(account(false))).unwrap_err(),
            AccessError::Forbidden
        );
    }

    #[test]
    fn admin_is_allowed() {
        let a = account(true);
        let allowed = authorize_admin(Some(a.clone())).unwrap();
        assert_eq!(allowed.id, a.id);
    }

    #[test]
    fn self_targeted_role_change_is_rejected() {
        let id = AccountId::new();
        assert_eq!(
            ensure_role_change_allowed(id, id).unwrap_err(),
            SelfRoleChange
        );
    }

    #[test]
    fn role_change_on_another_account_is_allowed() {
        assert!(ensure_role_change_allowed(AccountId::new(), AccountId::new()).is_ok());
    }
}
