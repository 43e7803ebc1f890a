//! Consistent JSON error responses.
//!
//! Taxonomy: 401 unauthenticated, 403 forbidden, 404 not found, 400 for
//! malformed input and policy violations (duplicate identity, self-demotion),
//! 500 for unexpected store/runtime failures (logged; the caller sees a
//! generic message). All bodies are `{ "message": ... }`, with validation
//! failures additionally carrying `"errors"`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use quill_auth::{AccessError, PasswordHashError, SelfRoleChange, TokenError};
use quill_core::Violation;
use quill_storage::{StoreError, UniqueField};

#[derive(Debug)]
pub enum ApiError {
    /// 401. The message is deliberately uniform per call site so failure
    /// causes are indistinguishable to the caller.
    Unauthenticated(&'static str),
    /// 403.
    Forbidden(String),
    /// 404.
    NotFound(String),
    /// 400, single policy/shape message.
    BadRequest(String),
    /// 400 with a structured violation list.
    Validation(Vec<Violation>),
    /// 500. The cause is logged, never sent.
    Internal(anyhow::Error),
}

impl ApiError {
    /// The one 401 used for every token failure (missing, malformed, forged,
    /// expired).
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated("Invalid or expired token")
    }

    /// The one 401 used for every login failure (unknown email, wrong
    /// password).
    pub fn invalid_credentials() -> Self {
        Self::Unauthenticated("Invalid credentials")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthenticated(message) => {
                json_error(StatusCode::UNAUTHORIZED, message.to_string())
            }
            ApiError::Forbidden(message) => json_error(StatusCode::FORBIDDEN, message),
            ApiError::NotFound(message) => json_error(StatusCode::NOT_FOUND, message),
            ApiError::BadRequest(message) => json_error(StatusCode::BAD_REQUEST, message),
            ApiError::Validation(violations) => {
                let message = violations
                    .first()
                    .map(|v| v.message.clone())
                    .unwrap_or_else(|| "Invalid input".to_string());
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": message, "errors": violations })),
                )
                    .into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        }
    }
}

fn json_error(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(UniqueField::Email) => {
                ApiError::bad_request("User with this email already exists")
            }
            StoreError::Conflict(UniqueField::Username) => {
                ApiError::bad_request("Username is already taken")
            }
            StoreError::ForeignKey => {
                ApiError::Internal(anyhow::anyhow!("dangling row reference"))
            }
            StoreError::Database(e) => ApiError::Internal(e.into()),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::AccountGone => ApiError::not_found("User not found"),
            AccessError::Forbidden => ApiError::Forbidden("Admin access required".to_string()),
        }
    }
}

impl From<SelfRoleChange> for ApiError {
    fn from(_: SelfRoleChange) -> Self {
        ApiError::bad_request("Cannot change your own role")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Body-level failures (syntax errors, wrong content type) would
        // otherwise leave as plain text; fold them into the standard shape.
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        // Issuance failures on the register/login path are server faults;
        // verification failures never take this path (the middleware maps
        // them to 401 directly).
        ApiError::Internal(anyhow::anyhow!(err))
    }
}

impl From<PasswordHashError> for ApiError {
    fn from(err: PasswordHashError) -> Self {
        ApiError::Internal(anyhow::anyhow!(err))
    }
}
