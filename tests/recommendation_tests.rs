// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation retrieval tests.
//!
//! The detail view treats its recommendation as best-effort; the
//! recommendations page surfaces backend failures.

use axum::http::StatusCode;
use std::sync::atomic::Ordering;

mod common;

use common::{get_request, login, send};

#[tokio::test]
async fn test_detail_includes_recommendation() {
    let (app, _, _) = common::create_test_app().await;
    let session = login(&app).await;

    let (status, body) = send(&app, get_request("/api/activities/r1", Some(&session))).await;
    assert_eq!(status, StatusCode::OK);

    let rec = &body["recommendation"];
    assert_eq!(rec["recommendation"], "Solid aerobic effort with steady pacing.");
    assert_eq!(rec["typeDisplayName"], "Running");
    assert_eq!(rec["improvements"][0], "Negative split the last 2 km");
    assert_eq!(rec["safety"].as_array().unwrap().len(), 0);
    assert_eq!(rec["createdAt"], "1/5/2025, 10:20:00 AM");
    assert!(body.get("recommendationMessage").is_none());
}

#[tokio::test]
async fn test_detail_accepts_array_reply() {
    let (app, _, _) = common::create_test_app().await;
    let session = login(&app).await;

    let (status, body) = send(&app, get_request("/api/activities/c1", Some(&session))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation"]["activityId"], "c1");
}

#[tokio::test]
async fn test_detail_without_recommendation_shows_message() {
    let (app, _, _) = common::create_test_app().await;
    let session = login(&app).await;

    let (status, body) = send(&app, get_request("/api/activities/y1", Some(&session))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["recommendation"].is_null());
    assert_eq!(
        body["recommendationMessage"],
        "No AI recommendations available for this activity."
    );
}

#[tokio::test]
async fn test_recommendation_failure_does_not_block_detail() {
    let (app, _, fake) = common::create_test_app().await;
    let session = login(&app).await;
    fake.fail_recommendations.store(true, Ordering::SeqCst);

    let (status, body) = send(&app, get_request("/api/activities/r1", Some(&session))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activity"]["id"], "r1");
    assert!(body["recommendation"].is_null());
}

#[tokio::test]
async fn test_user_recommendations() {
    let (app, _, _) = common::create_test_app().await;
    let session = login(&app).await;

    let (status, body) = send(&app, get_request("/api/recommendations", Some(&session))).await;
    assert_eq!(status, StatusCode::OK);
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[1]["typeDisplayName"], "Cycling");
    assert!(body.get("emptyMessage").is_none());
}

#[tokio::test]
async fn test_user_recommendations_failure_is_retryable() {
    let (app, _, fake) = common::create_test_app().await;
    let session = login(&app).await;
    fake.fail_recommendations.store(true, Ordering::SeqCst);

    let (status, body) = send(&app, get_request("/api/recommendations", Some(&session))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "backend_error");
    assert_eq!(body["details"], "AI service down");
    assert_eq!(body["retryable"], true);
}
