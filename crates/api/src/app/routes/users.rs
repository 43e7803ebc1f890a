//! User administration: listing accounts and flipping role flags.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};

use quill_auth::ensure_role_change_allowed;
use quill_core::AccountId;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::Principal;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/:id/role", patch(update_role))
}

async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> Result<Response, ApiError> {
    authz::require_admin(services.accounts.as_ref(), principal).await?;

    let accounts = services.accounts.list().await?;
    let body: Vec<_> = accounts.iter().map(dto::account_listing).collect();
    Ok(Json(body).into_response())
}

async fn update_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let caller = authz::require_admin(services.accounts.as_ref(), principal).await?;
    let Json(body) = body?;

    let target: AccountId = id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid user id"))?;

    let Some(is_admin) = body.get("isAdmin").and_then(|v| v.as_bool()) else {
        return Err(ApiError::bad_request("isAdmin must be a boolean"));
    };

    // The self-demotion guard runs before any mutation, regardless of the
    // caller's admin status.
    ensure_role_change_allowed(caller.id, target)?;

    let updated = services
        .accounts
        .set_role(target, is_admin)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    tracing::info!(
        actor = %caller.id,
        target = %updated.id,
        is_admin,
        "account role updated"
    );

    Ok(Json(dto::account_summary(&updated)).into_response())
}
