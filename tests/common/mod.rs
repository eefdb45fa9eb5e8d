// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: an in-process fake backend and router builders.

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use fitness_tracker::config::Config;
use fitness_tracker::routes::create_router;
use fitness_tracker::AppState;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const FAKE_TOKEN: &str = "fake-jwt";
pub const PASSWORD: &str = "secret";

/// State of the fake fitness backend.
#[derive(Default)]
pub struct FakeBackend {
    hits: AtomicUsize,
    pub fail_recommendations: AtomicBool,
    pub activities: Mutex<Vec<Value>>,
    /// Create bodies received, in order
    pub created: Mutex<Vec<Value>>,
}

impl FakeBackend {
    fn seeded() -> Self {
        let fake = Self::default();
        *fake.activities.lock().unwrap() = vec![
            json!({
                "id": "r1", "userId": "user-1", "type": "RUNNING",
                "duration": 40, "caloriesBurned": 480,
                "startTime": "2025-01-05T09:30:00",
                "additionalMetrics": { "distance": 8.4, "maxHeartRate": 171 },
                "createdAt": "2025-01-05T10:15:00"
            }),
            json!({
                "id": "y1", "userId": "user-1", "type": "YOGA",
                "duration": 60, "caloriesBurned": 210,
                "startTime": "2025-01-06T18:00:00",
                "additionalMetrics": { "calmnessScore": 8 }
            }),
            json!({
                "id": "w1", "userId": "user-1", "type": "WEIGHT_TRAINING",
                "duration": 45, "caloriesBurned": 293,
                "additionalMetrics": { "sets": 4, "reps": 10 },
                "createdAt": "2025-01-02T10:00:00"
            }),
            json!({
                "id": "c1", "userId": "user-1", "type": "CYCLING",
                "duration": 90, "caloriesBurned": 855,
                "startTime": "2025-01-04T07:00:00",
                "additionalMetrics": { "distance": 32.5, "elevationGain": 410 }
            }),
        ];
        fake
    }

    /// Requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn count_hits(State(fake): State<Arc<FakeBackend>>, request: Request, next: Next) -> Response {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

fn has_token(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split(';').any(|c| c.trim() == format!("token={}", FAKE_TOKEN)))
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text, "status": status.as_u16() }))).into_response()
}

async fn fake_login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    match body["password"].as_str() {
        Some(PASSWORD) => (
            [(
                header::SET_COOKIE,
                format!("token={}; Path=/; HttpOnly; Max-Age=86400", FAKE_TOKEN),
            )],
            Json(json!({
                "id": "user-1",
                "email": email,
                "firstName": "Ada",
                "lastName": "Lovelace"
            })),
        )
            .into_response(),
        Some("no-id") => Json(json!({ "email": email })).into_response(),
        _ => message(StatusCode::UNAUTHORIZED, "Invalid email or password"),
    }
}

async fn fake_register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return message(StatusCode::CONFLICT, "Email already registered");
    }
    Json(json!({ "id": "user-2", "email": body["email"] })).into_response()
}

async fn fake_list(State(fake): State<Arc<FakeBackend>>, headers: HeaderMap) -> Response {
    if !has_token(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let activities = fake.activities.lock().unwrap().clone();
    Json(Value::Array(activities)).into_response()
}

async fn fake_create(
    State(fake): State<Arc<FakeBackend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !has_token(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    if body["duration"].as_u64().unwrap_or(0) > 600 {
        return message(StatusCode::BAD_REQUEST, "Duration exceeds limit");
    }

    fake.created.lock().unwrap().push(body.clone());
    let mut activities = fake.activities.lock().unwrap();
    let mut stored = body;
    stored["id"] = json!(format!("new-{}", activities.len() + 1));
    stored["userId"] = json!("user-1");
    stored["createdAt"] = json!("2025-02-01T12:00:00");
    activities.push(stored.clone());
    (StatusCode::CREATED, Json(stored)).into_response()
}

async fn fake_get(
    State(fake): State<Arc<FakeBackend>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !has_token(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let activities = fake.activities.lock().unwrap();
    match activities.iter().find(|a| a["id"] == id.as_str()) {
        Some(activity) => Json(activity.clone()).into_response(),
        None => message(StatusCode::NOT_FOUND, "Activity not found"),
    }
}

fn recommendation(activity_id: &str, activity_type: &str) -> Value {
    json!({
        "id": format!("rec-{}", activity_id),
        "activityId": activity_id,
        "userId": "user-1",
        "activityType": activity_type,
        "recommendation": "Solid aerobic effort with steady pacing.",
        "improvements": ["Negative split the last 2 km"],
        "suggestions": ["Add one tempo run per week"],
        "safety": null,
        "createdAt": "2025-01-05T10:20:00"
    })
}

async fn fake_activity_recommendation(
    State(fake): State<Arc<FakeBackend>>,
    Path(id): Path<String>,
) -> Response {
    if fake.fail_recommendations.load(Ordering::SeqCst) {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "AI service down");
    }
    match id.as_str() {
        "r1" => Json(recommendation("r1", "RUNNING")).into_response(),
        "c1" => Json(json!([recommendation("c1", "CYCLING")])).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn fake_user_recommendations(
    State(fake): State<Arc<FakeBackend>>,
    Path(user_id): Path<String>,
) -> Response {
    if fake.fail_recommendations.load(Ordering::SeqCst) {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "AI service down");
    }
    if user_id != "user-1" {
        return Json(json!([])).into_response();
    }
    Json(json!([
        recommendation("r1", "RUNNING"),
        recommendation("c1", "CYCLING")
    ]))
    .into_response()
}

/// Start the fake backend on an ephemeral port.
pub async fn spawn_backend() -> (String, Arc<FakeBackend>) {
    let fake = Arc::new(FakeBackend::seeded());

    let app = Router::new()
        .route("/api/users/login", post(fake_login))
        .route("/api/users/register", post(fake_register))
        .route("/api/activities", get(fake_list).post(fake_create))
        .route("/api/activities/{id}", get(fake_get))
        .route(
            "/api/recommendations/activity/{id}",
            get(fake_activity_recommendation),
        )
        .route(
            "/api/recommendations/user/{id}",
            get(fake_user_recommendations),
        )
        .layer(middleware::from_fn_with_state(fake.clone(), count_hits))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), fake)
}

/// Create a test app wired to a fresh fake backend.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>, Arc<FakeBackend>) {
    let (url, fake) = spawn_backend().await;
    let state = Arc::new(AppState::new(Config::test_default().with_backend_url(url)));
    (create_router(state.clone()), state, fake)
}

/// Create a test app with no backend configured.
#[allow(dead_code)]
pub fn create_unconfigured_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_default()));
    (create_router(state.clone()), state)
}

/// Send a request and decode the JSON body (`Null` when empty).
#[allow(dead_code)]
pub async fn send(app: &Router, request: axum::http::Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[allow(dead_code)]
pub fn get_request(uri: &str, session: Option<&str>) -> axum::http::Request<Body> {
    let mut builder = axum::http::Request::builder().uri(uri);
    if let Some(cookie) = session {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    session: Option<&str>,
    body: Value,
) -> axum::http::Request<Body> {
    let mut builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = session {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Log in as the fake user and return the `Cookie` header value for the session.
#[allow(dead_code)]
pub async fn login(app: &Router) -> String {
    login_with_cookie(app, None).await
}

/// Log in while presenting `existing` as the request's `Cookie` header.
#[allow(dead_code)]
pub async fn login_with_cookie(app: &Router, existing: Option<&str>) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            existing,
            json!({ "email": "ada@example.com", "password": PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("fitness_session="))
        .and_then(|v| v.split(';').next())
        .expect("login should set the session cookie")
        .to_string()
}
