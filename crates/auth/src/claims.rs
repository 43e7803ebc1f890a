//! Access-token claims and the HS256 codec.
//!
//! Tokens are bearer credentials: possession implies authorization as the
//! embedded account until expiry. They are not persisted and cannot be
//! revoked server-side; invalidation is purely time-based.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use quill_core::AccountId;

/// Token lifetime: 24 hours from issuance.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the account this token authenticates as.
    pub sub: AccountId,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

/// Why a token was rejected. The variants exist for logging; callers must
/// collapse them into a single externally visible outcome so that "expired",
/// "forged" and "malformed" are indistinguishable on the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is malformed")]
    Malformed,

    #[error("token could not be issued")]
    Issuance,
}

/// HS256 issue/verify pair over a process-wide secret.
///
/// The same key verifies what it signs; both directions are derived from the
/// secret once at construction.
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: no clock leeway.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Produce a signed credential bound to `account_id`, valid for
    /// [`TOKEN_TTL_HOURS`] from `now`. Pure computation, no side effects.
    pub fn issue(&self, account_id: AccountId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = AccessClaims {
            sub: account_id,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Issuance)
    }

    /// Validate signature and expiry; on success yield the embedded account
    /// identifier. Does not touch storage.
    pub fn verify(&self, token: &str) -> Result<AccountId, TokenError> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> Hs256TokenCodec {
        Hs256TokenCodec::new(b"test-secret")
    }

    #[test]
    fn issued_token_verifies_to_the_same_account() {
        let codec = codec();
        let account_id = AccountId::new();

        let token = codec.issue(account_id, Utc::now()).unwrap();
        assert_eq!(codec.verify(&token).unwrap(), account_id);
    }

    #[test]
    fn token_never_verifies_as_another_account() {
        let codec = codec();
        let a = AccountId::new();
        let b = AccountId::new();

        let token = codec.issue(a, Utc::now()).unwrap();
        assert_ne!(codec.verify(&token).unwrap(), b);
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        let issued = Utc::now() - Duration::hours(TOKEN_TTL_HOURS) - Duration::minutes(5);

        let token = codec.issue(AccountId::new(), issued).unwrap();
        assert_eq!(codec.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn token_signed_with_a_different_secret_is_rejected() {
        let token = Hs256TokenCodec::new(b"other-secret")
            .issue(AccountId::new(), Utc::now())
            .unwrap();

        assert_eq!(
            codec().verify(&token).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn garbage_is_rejected_as_malformed() {
        assert_eq!(
            codec().verify("not.a.token").unwrap_err(),
            TokenError::Malformed
        );
        assert_eq!(codec().verify("").unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn expiry_is_ttl_from_issuance() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.issue(AccountId::new(), now).unwrap();

        // Decode without expiry enforcement to inspect the window.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let data = jsonwebtoken::decode::<AccessClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims.exp - data.claims.iat, TOKEN_TTL_HOURS * 3600);
    }
}
