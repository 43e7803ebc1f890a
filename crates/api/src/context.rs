use quill_core::AccountId;

/// Authenticated identity for a request, derived from the bearer token by
/// the auth middleware. Carries no role: roles are checked against the store
/// at the point of use, never trusted from the token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Principal {
    account_id: AccountId,
}

impl Principal {
    pub fn new(account_id: AccountId) -> Self {
        Self { account_id }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }
}
