// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Behaviour with no backend URL configured.
//!
//! The server still starts; each network action fails with a configuration
//! error, and local validation still runs first.

use axum::http::StatusCode;
use fitness_tracker::models::UserSession;
use serde_json::json;

mod common;

use common::{get_request, json_request, send};

#[tokio::test]
async fn test_health_reports_missing_backend() {
    let (app, _) = common::create_unconfigured_app();

    let (status, body) = send(&app, get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend_configured"], false);
}

#[tokio::test]
async fn test_login_is_configuration_error() {
    let (app, state) = common::create_unconfigured_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "email": "ada@example.com", "password": "secret" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "configuration_error");
    assert_eq!(body["retryable"], false);
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_validation_runs_before_configuration_check() {
    let (app, _) = common::create_unconfigured_app();

    let (status, body) = send(
        &app,
        json_request("POST", "/auth/login", None, json!({ "email": "", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"], "Please fill in all fields");
}

#[tokio::test]
async fn test_session_routes_report_configuration_error() {
    let (app, state) = common::create_unconfigured_app();
    let session_id = state
        .sessions
        .create(
            UserSession {
                id: "user-1".to_string(),
                email: "ada@example.com".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            },
            None,
        )
        .unwrap();
    let cookie = format!("fitness_session={}", session_id);

    for uri in ["/api/activities", "/api/activities/r1", "/api/recommendations"] {
        let (status, body) = send(&app, get_request(uri, Some(&cookie))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body["error"], "configuration_error");
    }

    // The draft is local and works without a backend
    let (status, form) = send(&app, get_request("/api/activities/form", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["type"], "WALKING");
}

#[tokio::test]
async fn test_activity_types_are_public() {
    let (app, _) = common::create_unconfigured_app();

    let (status, body) = send(&app, get_request("/api/activity-types", None)).await;
    assert_eq!(status, StatusCode::OK);

    let types = body.as_array().unwrap();
    assert_eq!(types.len(), 10);
    assert_eq!(types[4]["code"], "WEIGHT_TRAINING");
    assert_eq!(types[4]["displayName"], "Weight Training");
    assert_eq!(types[4]["metrics"].as_array().unwrap().len(), 4);
}
