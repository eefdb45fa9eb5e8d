// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, registration and logout routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::session_id;
use crate::models::{Credentials, Registration, UserSession};
use crate::routes::json_body;
use crate::services::password::{self, PasswordStrength};
use crate::services::session::{expired_session_cookie, session_cookie};
use crate::AppState;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/auth/password-strength", post(password_strength))
}

/// Successful login response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserSession,
    /// Same value as the session cookie, for clients that use a bearer header
    pub session_token: String,
}

/// Log in against the backend and start a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    payload: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let credentials = json_body(payload)?.normalized();
    if credentials.is_blank() {
        return Err(AppError::Validation("Please fill in all fields".to_string()));
    }
    credentials.validate()?;

    let outcome = state.backend.login(&credentials).await?;

    // Logging in again replaces the session presented with this request
    if let Some(previous) = session_id(&jar, &headers) {
        state.sessions.remove(&previous);
    }
    let session_token = state.sessions.create(outcome.user.clone(), outcome.token)?;
    let cookie = session_cookie(session_token.clone(), state.config.secure_cookies);

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            user: outcome.user,
            session_token,
        }),
    ))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MessageResponse {
    pub message: String,
}

/// Create a backend account. Does not log in.
async fn register(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Registration>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let registration = json_body(payload)?.normalized();
    registration.validate()?;

    state.backend.register(&registration).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Registration successful".to_string(),
        }),
    ))
}

/// End the session, if any, and clear the cookie.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> (StatusCode, CookieJar) {
    if let Some(id) = session_id(&jar, &headers) {
        state.sessions.remove(&id);
    }
    (StatusCode::NO_CONTENT, jar.remove(expired_session_cookie()))
}

#[derive(Deserialize)]
pub struct PasswordStrengthRequest {
    #[serde(default)]
    password: String,
}

async fn password_strength(
    payload: std::result::Result<Json<PasswordStrengthRequest>, JsonRejection>,
) -> Result<Json<PasswordStrength>> {
    let request = json_body(payload)?;
    Ok(Json(password::score(&request.password)))
}
