// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.

use crate::error::AppError;
use crate::services::session::SESSION_COOKIE;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Session id from the cookie, or from an `Authorization: Bearer` header.
pub fn session_id(jar: &CookieJar, headers: &axum::http::HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

/// Middleware that requires a live session.
///
/// Inserts the [`SessionContext`](crate::services::SessionContext) into the
/// request extensions.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let id = session_id(&jar, request.headers()).ok_or(AppError::Unauthorized)?;

    let Some(context) = state.sessions.get(&id) else {
        tracing::debug!("Unknown or expired session");
        return Err(AppError::Unauthorized);
    };

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}
