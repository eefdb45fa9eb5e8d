// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for logged-in users.

use crate::error::Result;
use crate::routes::json_body;
use crate::services::activity_form::{ActivityForm, FormUpdate};
use crate::services::detail::{ActivityDetailView, RecommendationsView};
use crate::services::listing::{ActivityRow, ListingOptions, ListingQuery, ListingView};
use crate::services::SessionContext;
use crate::time_utils::{current_hour, greeting, motivational_message};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require a session).
/// The session middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/activities", get(list_activities).post(create_activity))
        .route("/api/activities/{id}", get(get_activity))
        .route("/api/recommendations", get(get_recommendations))
}

// ─── Header ──────────────────────────────────────────────────

/// Current user and header text.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub greeting: String,
    pub motivational_message: String,
}

async fn get_me(Extension(session): Extension<SessionContext>) -> Json<MeResponse> {
    let hour = current_hour();
    let user = session.user;

    Json(MeResponse {
        display_name: user.display_name(),
        id: user.id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        greeting: greeting(hour).to_string(),
        motivational_message: motivational_message(hour).to_string(),
    })
}

// ─── Activities ──────────────────────────────────────────────

/// List activities with optional `search`, `type` and `sort`.
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingView>> {
    let options = ListingOptions::try_from(query)?;
    let activities = state
        .backend
        .list_activities(session.backend_token())
        .await?;

    tracing::debug!(
        user_id = %session.user.id,
        fetched = activities.len(),
        "Activities fetched"
    );

    Ok(Json(ListingView::build(&activities, &options)))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreatedResponse {
    pub message: String,
    /// The stored record, when the backend returns it
    pub activity: Option<ActivityRow>,
}

/// Create an activity from a complete form body.
///
/// Calories are estimated from type and duration unless given.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    payload: std::result::Result<Json<FormUpdate>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let mut form = ActivityForm::blank();
    form.apply(json_body(payload)?)?;
    let new_activity = form.validate()?;

    let created = state
        .backend
        .create_activity(session.backend_token(), &new_activity)
        .await?;

    tracing::info!(
        user_id = %session.user.id,
        activity_type = %new_activity.activity_type(),
        duration = new_activity.duration(),
        "Activity created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Activity created".to_string(),
            activity: created.as_ref().map(ActivityRow::from),
        }),
    ))
}

/// Activity detail with its recommendation.
///
/// The recommendation is best-effort: a failed fetch is logged and the
/// activity still renders.
async fn get_activity(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<ActivityDetailView>> {
    let token = session.backend_token();
    let activity = state.backend.get_activity(token, &id).await?;

    let recommendation = match state.backend.activity_recommendation(token, &id).await {
        Ok(rec) => rec,
        Err(e) => {
            tracing::warn!(activity_id = %id, error = %e, "Recommendation fetch failed");
            None
        }
    };

    Ok(Json(ActivityDetailView::new(&activity, recommendation)))
}

// ─── Recommendations ─────────────────────────────────────────

async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<RecommendationsView>> {
    let recommendations = state
        .backend
        .user_recommendations(session.backend_token(), &session.user.id)
        .await?;

    Ok(Json(RecommendationsView::new(recommendations)))
}
