// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness backend API client.
//!
//! The backend authenticates with a `token` cookie set on login. The client
//! never stores it; callers pass the token held in their session.

use crate::config::Config;
use crate::error::AppError;
use crate::models::{
    Activity, BackendUser, Credentials, NewActivity, Recommendation, Registration, UserSession,
};
use axum_extra::extract::cookie::Cookie;
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Name of the backend's authentication cookie.
pub const BACKEND_TOKEN_COOKIE: &str = "token";

/// Result of a successful backend login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserSession,
    /// Backend auth token, if the backend set one
    pub token: Option<String>,
}

/// Backend API client.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Option<String>,
    timeout: Duration,
    recommendation_timeout: Duration,
}

impl BackendClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.backend_url.clone(),
            timeout: config.backend_timeout,
            recommendation_timeout: config.recommendation_timeout,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn url(&self, path: &str) -> Result<String, AppError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or(AppError::BackendNotConfigured)?;
        Ok(format!("{}{}", base, path))
    }

    // ─── Users ───────────────────────────────────────────────────

    /// Log in and capture the backend's token cookie.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, AppError> {
        let url = self.url("/api/users/login")?;

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(credentials)
            .send()
            .await?;

        let response = check_response(response).await?;
        let token = extract_token(response.headers());
        if token.is_none() {
            tracing::warn!("Backend login response did not set a token cookie");
        }

        let user: BackendUser = response
            .json()
            .await
            .map_err(|e| AppError::InvalidBackendResponse(e.to_string()))?;
        let user = user
            .into_session(&credentials.email)
            .ok_or_else(|| AppError::InvalidBackendResponse("login reply has no user id".into()))?;

        tracing::info!(user_id = %user.id, "Backend login succeeded");
        Ok(LoginOutcome { user, token })
    }

    pub async fn register(&self, registration: &Registration) -> Result<(), AppError> {
        let url = self.url("/api/users/register")?;

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(registration)
            .send()
            .await?;

        check_response(response).await?;
        tracing::info!("Backend registration succeeded");
        Ok(())
    }

    // ─── Activities ──────────────────────────────────────────────

    /// Fetch the full activity collection of the token's user.
    pub async fn list_activities(&self, token: Option<&str>) -> Result<Vec<Activity>, AppError> {
        let url = self.url("/api/activities")?;
        let request = self.http.get(&url).timeout(self.timeout);

        let activities: Option<Vec<Activity>> = self.send_json(request, token).await?;
        Ok(activities.unwrap_or_default())
    }

    pub async fn get_activity(&self, token: Option<&str>, id: &str) -> Result<Activity, AppError> {
        let url = self.url(&format!("/api/activities/{}", urlencoding::encode(id)))?;
        let request = self.http.get(&url).timeout(self.timeout);

        self.send_json(request, token).await
    }

    /// Create an activity. Returns the stored record when the backend echoes it.
    pub async fn create_activity(
        &self,
        token: Option<&str>,
        activity: &NewActivity,
    ) -> Result<Option<Activity>, AppError> {
        let url = self.url("/api/activities")?;
        let request = self.http.post(&url).timeout(self.timeout).json(activity);

        let response = with_token(request, token).send().await?;
        let response = check_response(response).await?;
        let body = response.bytes().await?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        match serde_json::from_slice::<Activity>(&body) {
            Ok(created) => Ok(Some(created)),
            Err(e) => {
                tracing::warn!(error = %e, "Create reply is not an activity record");
                Ok(None)
            }
        }
    }

    // ─── Recommendations ─────────────────────────────────────────

    /// Recommendation for one activity. `None` when the backend has none yet.
    pub async fn activity_recommendation(
        &self,
        token: Option<&str>,
        activity_id: &str,
    ) -> Result<Option<Recommendation>, AppError> {
        let url = self.url(&format!(
            "/api/recommendations/activity/{}",
            urlencoding::encode(activity_id)
        ))?;
        let request = self.http.get(&url).timeout(self.recommendation_timeout);

        let Some(value) = self.send_optional(request, token).await? else {
            return Ok(None);
        };
        let mut recommendations = decode_recommendations(value)?;
        Ok(if recommendations.is_empty() {
            None
        } else {
            Some(recommendations.swap_remove(0))
        })
    }

    /// All recommendations for a user.
    pub async fn user_recommendations(
        &self,
        token: Option<&str>,
        user_id: &str,
    ) -> Result<Vec<Recommendation>, AppError> {
        let url = self.url(&format!(
            "/api/recommendations/user/{}",
            urlencoding::encode(user_id)
        ))?;
        let request = self.http.get(&url).timeout(self.recommendation_timeout);

        match self.send_optional(request, token).await? {
            Some(value) => decode_recommendations(value),
            None => Ok(Vec::new()),
        }
    }

    // ─── Helpers ─────────────────────────────────────────────────

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
    ) -> Result<T, AppError> {
        let response = with_token(request, token).send().await?;
        let response = check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| AppError::InvalidBackendResponse(format!("JSON parse error: {}", e)))
    }

    /// GET where 404 or an empty/null body means "nothing yet".
    async fn send_optional(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
    ) -> Result<Option<Value>, AppError> {
        let response = with_token(request, token).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = check_response(response).await?;
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| AppError::InvalidBackendResponse(format!("JSON parse error: {}", e)))?;
        Ok(if value.is_null() { None } else { Some(value) })
    }
}

fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.header(COOKIE, format!("{}={}", BACKEND_TOKEN_COOKIE, token)),
        None => request,
    }
}

/// Find the backend's `token` cookie among the `Set-Cookie` headers.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse(value).ok())
        .find(|cookie| cookie.name() == BACKEND_TOKEN_COOKIE && !cookie.value().is_empty())
        .map(|cookie| cookie.value().to_string())
}

/// A recommendation reply may be a single object or an array.
fn decode_recommendations(value: Value) -> Result<Vec<Recommendation>, AppError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    };

    items
        .into_iter()
        .filter(|item| !item.is_null())
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| AppError::InvalidBackendResponse(format!("recommendation: {}", e)))
        })
        .collect()
}

/// Check response status, turning failures into [`AppError::Backend`].
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    tracing::warn!(status = status.as_u16(), message = %message, "Backend request failed");

    Err(AppError::Backend {
        status: status.as_u16(),
        message,
    })
}

/// The user-facing message of a failed backend reply.
///
/// Prefers a JSON `message` (or `error`) field, then a bare JSON string, then
/// non-JSON text, and finally a generic status line.
fn error_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => {
            for field in ["message", "error"] {
                if let Some(Value::String(msg)) = map.get(field) {
                    if !msg.trim().is_empty() {
                        return msg.clone();
                    }
                }
            }
        }
        Ok(Value::String(msg)) if !msg.trim().is_empty() => return msg,
        Ok(_) => {}
        Err(_) if !trimmed.is_empty() => return trimmed.to_string(),
        Err(_) => {}
    }

    format!("Request failed with status {}", status.as_u16())
}
