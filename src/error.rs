// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::services::activity_form::FormError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("Backend URL is not configured")]
    BackendNotConfigured,

    /// Non-success reply from the backend; `message` is shown to the user verbatim.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Could not reach backend: {0}")]
    Network(String),

    #[error("Invalid response from server")]
    InvalidBackendResponse(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the client may usefully offer "try again".
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Network(_) => true,
            AppError::Backend { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::InvalidBackendResponse(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    retryable: bool,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let retryable = self.is_retryable();
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                Some(msg.clone()),
            ),
            AppError::BackendNotConfigured => {
                tracing::error!("BACKEND_URL is not set");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration_error",
                    Some(self.to_string()),
                )
            }
            AppError::Backend { status, message } => {
                let mapped = match StatusCode::from_u16(*status) {
                    Ok(s) if s.is_client_error() => s,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (mapped, "backend_error", Some(message.clone()))
            }
            AppError::Network(msg) => {
                tracing::warn!(error = %msg, "Backend unreachable");
                (
                    StatusCode::BAD_GATEWAY,
                    "backend_unreachable",
                    Some("Network error. Please try again.".to_string()),
                )
            }
            AppError::InvalidBackendResponse(msg) => {
                tracing::error!(error = %msg, "Invalid backend response");
                (
                    StatusCode::BAD_GATEWAY,
                    "invalid_backend_response",
                    Some(self.to_string()),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            retryable,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_backend_message_is_verbatim() {
        let (status, body) = render(AppError::Backend {
            status: 500,
            message: "Database unavailable".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "backend_error");
        assert_eq!(body["details"], "Database unavailable");
        assert_eq!(body["retryable"], true);
    }

    #[tokio::test]
    async fn test_backend_client_errors_pass_through() {
        let (status, body) = render(AppError::Backend {
            status: 404,
            message: "Activity not found".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["retryable"], false);
    }

    #[tokio::test]
    async fn test_configuration_error() {
        let (status, body) = render(AppError::BackendNotConfigured).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "configuration_error");
        assert_eq!(body["retryable"], false);
    }

    #[tokio::test]
    async fn test_network_error_is_retryable() {
        let (status, body) = render(AppError::Network("connection refused".into())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "backend_unreachable");
        assert_eq!(body["retryable"], true);
    }

    #[tokio::test]
    async fn test_validation_error() {
        let (status, body) = render(FormError::InvalidDuration.into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"], "Duration must be greater than 0");
    }
}
