//! Request DTOs and JSON mapping helpers.
//!
//! Request fields are optional strings: presence and shape are checked by
//! the pure validators, not by serde, so a missing field produces the same
//! 400 as an empty one. Account JSON is only ever produced here, and no
//! mapping includes the password hash.

use serde::Deserialize;
use serde_json::{json, Value};

use quill_core::Account;
use quill_storage::PostWithAuthor;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// The account summary returned from register/login/me and role updates.
pub fn account_summary(account: &Account) -> Value {
    json!({
        "id": account.id,
        "username": account.username,
        "email": account.email,
        "isAdmin": account.is_admin,
    })
}

/// The account shape returned from the admin user listing.
pub fn account_listing(account: &Account) -> Value {
    json!({
        "id": account.id,
        "username": account.username,
        "email": account.email,
        "isAdmin": account.is_admin,
        "createdAt": account.created_at.to_rfc3339(),
    })
}

pub fn post_to_json(record: &PostWithAuthor) -> Value {
    json!({
        "id": record.post.id,
        "title": record.post.title,
        "content": record.post.content,
        "authorId": record.post.author_id,
        "createdAt": record.post.created_at.to_rfc3339(),
        "updatedAt": record.post.updated_at.to_rfc3339(),
        "author": {
            "id": record.author.id,
            "username": record.author.username,
        },
    })
}
