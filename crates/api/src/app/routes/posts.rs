//! Post CRUD. Reads require authentication; mutations require the
//! administrator flag (re-checked against the store per request).

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use quill_core::{validate, PostId};
use quill_storage::{NewPost, PostUpdate};

use crate::app::dto::{self, CreatePostRequest, UpdatePostRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::Principal;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
}

fn parse_post_id(raw: &str) -> Result<PostId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid post id"))
}

async fn list_posts(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Response, ApiError> {
    let posts = services.posts.list().await?;
    let body: Vec<_> = posts.iter().map(dto::post_to_json).collect();
    Ok(Json(body).into_response())
}

async fn get_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_post_id(&id)?;
    let post = services
        .posts
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    Ok(Json(dto::post_to_json(&post)).into_response())
}

async fn create_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let author = authz::require_admin(services.accounts.as_ref(), principal).await?;
    let Json(body) = body?;

    let title = body.title.as_deref().unwrap_or("").trim().to_string();
    let content = body.content.as_deref().unwrap_or("").trim().to_string();

    let violations: Vec<_> = [validate::post_title(&title), validate::post_content(&content)]
        .into_iter()
        .flatten()
        .collect();
    if !violations.is_empty() {
        return Err(ApiError::Validation(violations));
    }

    let post = services
        .posts
        .insert(NewPost {
            title,
            content,
            author_id: author.id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(dto::post_to_json(&post))).into_response())
}

async fn update_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    body: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    authz::require_admin(services.accounts.as_ref(), principal).await?;
    let id = parse_post_id(&id)?;
    let Json(body) = body?;

    // Partial update: only provided fields are validated and changed.
    let title = body.title.as_deref().map(|t| t.trim().to_string());
    let content = body.content.as_deref().map(|c| c.trim().to_string());

    let violations: Vec<_> = [
        title.as_deref().and_then(validate::post_title),
        content.as_deref().and_then(validate::post_content),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !violations.is_empty() {
        return Err(ApiError::Validation(violations));
    }

    let post = services
        .posts
        .update(id, PostUpdate { title, content })
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    Ok(Json(dto::post_to_json(&post)).into_response())
}

async fn delete_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authz::require_admin(services.accounts.as_ref(), principal).await?;
    let id = parse_post_id(&id)?;

    if !services.posts.delete(id).await? {
        return Err(ApiError::not_found("Post not found"));
    }

    Ok(Json(serde_json::json!({ "message": "Post deleted successfully" })).into_response())
}
