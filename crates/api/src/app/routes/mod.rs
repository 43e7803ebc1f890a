use axum::{routing::get, Router};

pub mod auth;
pub mod posts;
pub mod system;
pub mod users;

/// Router for all endpoints behind the auth middleware.
pub fn protected_router() -> Router {
    Router::new()
        .route("/auth/me", get(auth::me))
        .nest("/posts", posts::router())
        .nest("/users", users::router())
}
