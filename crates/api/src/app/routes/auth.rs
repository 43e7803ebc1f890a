//! Registration, login, and the current-identity endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use quill_auth::{hash_password, verify_password, Hs256TokenCodec};
use quill_core::validate;
use quill_storage::NewAccount;

use crate::app::dto::{self, LoginRequest, RegisterRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::Principal;

/// Routes that issue credentials; everything else requires them.
pub fn public_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(codec): Extension<Arc<Hs256TokenCodec>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;

    let username = body.username.as_deref().unwrap_or("").trim().to_string();
    let email = body
        .email
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let password = body.password.as_deref().unwrap_or("");

    let violations: Vec<_> = [
        validate::username(&username),
        validate::email(&email),
        validate::password(password, 6),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !violations.is_empty() {
        return Err(ApiError::Validation(violations));
    }

    // Pre-checks for a friendly message; the store's unique constraints
    // remain the final arbiter under concurrent registrations.
    if services.accounts.find_by_email(&email).await?.is_some() {
        return Err(ApiError::bad_request("User with this email already exists"));
    }
    if services
        .accounts
        .find_by_username(&username)
        .await?
        .is_some()
    {
        return Err(ApiError::bad_request("Username is already taken"));
    }

    let password_hash = hash_password(password)?;
    let account = services
        .accounts
        .insert(NewAccount {
            username,
            email,
            password_hash,
            is_admin: false,
        })
        .await?;

    let token = codec.issue(account.id, Utc::now())?;

    tracing::info!(account_id = %account.id, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "token": token, "user": dto::account_summary(&account) })),
    )
        .into_response())
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(codec): Extension<Arc<Hs256TokenCodec>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;

    let email = body
        .email
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let password = body.password.as_deref().unwrap_or("");

    let violations: Vec<_> = [validate::email(&email), validate::password_present(password)]
        .into_iter()
        .flatten()
        .collect();
    if !violations.is_empty() {
        return Err(ApiError::Validation(violations));
    }

    // Unknown email and wrong password must be indistinguishable.
    let Some(account) = services.accounts.find_by_email(&email).await? else {
        return Err(ApiError::invalid_credentials());
    };
    if !verify_password(password, &account.password_hash) {
        return Err(ApiError::invalid_credentials());
    }

    let token = codec.issue(account.id, Utc::now())?;

    Ok((
        StatusCode::OK,
        Json(json!({ "token": token, "user": dto::account_summary(&account) })),
    )
        .into_response())
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> Result<Response, ApiError> {
    let account = services
        .accounts
        .find_by_id(principal.account_id())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(dto::account_summary(&account)).into_response())
}
