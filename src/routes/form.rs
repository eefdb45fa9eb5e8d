// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-session activity form draft.

use crate::error::{AppError, Result};
use crate::routes::json_body;
use crate::services::activity_form::{FormUpdate, FormView};
use crate::services::listing::ActivityRow;
use crate::services::SessionContext;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities/form", get(get_form).patch(update_form))
        .route("/api/activities/form/submit", post(submit_form))
}

/// Current draft.
async fn get_form(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<FormView>> {
    let view = state
        .sessions
        .with_draft(&session.session_id, |form| form.view())
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(view))
}

/// Edit the draft. Changing type or duration re-estimates calories.
async fn update_form(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    payload: std::result::Result<Json<FormUpdate>, JsonRejection>,
) -> Result<Json<FormView>> {
    let update = json_body(payload)?;
    let view = state
        .sessions
        .with_draft(&session.session_id, |form| {
            form.apply(update).map(|()| form.view())
        })
        .ok_or(AppError::Unauthorized)??;
    Ok(Json(view))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubmitResponse {
    pub message: String,
    pub activity: Option<ActivityRow>,
    /// Draft after reset, ready for the next entry
    pub form: FormView,
}

/// Validate and submit the draft.
///
/// Nothing is sent when validation fails. On success the draft keeps its type
/// and metrics; duration and start time are reset, unless the draft was edited
/// while the create was in flight.
async fn submit_form(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Result<(StatusCode, Json<SubmitResponse>)> {
    let (new_activity, submitted) = state
        .sessions
        .with_draft(&session.session_id, |form| {
            form.validate().map(|activity| (activity, form.clone()))
        })
        .ok_or(AppError::Unauthorized)??;

    let created = state
        .backend
        .create_activity(session.backend_token(), &new_activity)
        .await?;

    tracing::info!(
        user_id = %session.user.id,
        activity_type = %new_activity.activity_type(),
        duration = new_activity.duration(),
        "Activity submitted from draft"
    );

    let form = state
        .sessions
        .reset_draft_after_submit(&session.session_id, &submitted)
        .ok_or(AppError::Unauthorized)?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: "Activity created".to_string(),
            activity: created.as_ref().map(ActivityRow::from),
            form,
        }),
    ))
}
