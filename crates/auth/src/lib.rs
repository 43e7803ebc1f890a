//! `quill-auth` — the credential & access boundary.
//!
//! Decides, for every request, who is making it and whether that identity
//! may proceed. Token issuance/verification is pure computation; the admin
//! gate operates on an account row loaded by the caller. This crate is
//! intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod guard;
pub mod password;

pub use claims::{AccessClaims, Hs256TokenCodec, TokenError, TOKEN_TTL_HOURS};
pub use guard::{authorize_admin, ensure_role_change_allowed, AccessError, SelfRoleChange};
pub use password::{hash_password, verify_password, PasswordHashError};
