use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use quill_auth::Hs256TokenCodec;

use crate::app::errors::ApiError;
use crate::context::Principal;

#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<Hs256TokenCodec>,
}

/// Authenticate the request from its bearer token.
///
/// Missing, malformed, forged and expired tokens all collapse to the same
/// 401 body; the distinction is logged, never surfaced.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers()).ok_or_else(ApiError::unauthenticated)?;

    let account_id = state.codec.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
        ApiError::unauthenticated()
    })?;

    req.extensions_mut().insert(Principal::new(account_id));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }
    Some(token)
}
