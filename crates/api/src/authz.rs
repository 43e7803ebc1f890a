//! API-side admin gate.
//!
//! Re-derives the caller's role from the store on every request (the token
//! proves identity only) and maps the pure decision in `quill-auth` onto the
//! HTTP error taxonomy.

use quill_core::Account;
use quill_storage::AccountStore;

use crate::app::errors::ApiError;
use crate::context::Principal;

/// Load the caller's account and require the administrator flag.
///
/// 404 when the token outlived the account, 403 when the account exists but
/// is not an administrator.
pub async fn require_admin(
    accounts: &dyn AccountStore,
    principal: Principal,
) -> Result<Account, ApiError> {
    let account = accounts.find_by_id(principal.account_id()).await?;
    Ok(quill_auth::authorize_admin(account)?)
}
