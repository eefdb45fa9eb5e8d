// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory session store.
//!
//! A session is created on login and removed on logout; nothing survives a
//! restart. Each session holds the user identity, the backend token and the
//! user's activity form draft.

use crate::error::AppError;
use crate::models::UserSession;
use crate::services::activity_form::{ActivityForm, FormView};
use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "fitness_session";

const SESSION_ID_BYTES: usize = 32;
const SESSION_MAX_AGE_DAYS: i64 = 7;

/// Per-request view of a session, inserted into request extensions by the
/// session middleware.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub user: UserSession,
    backend_token: Option<String>,
}

impl SessionContext {
    /// Backend token to forward as the `token` cookie.
    pub fn backend_token(&self) -> Option<&str> {
        self.backend_token.as_deref()
    }
}

#[derive(Debug)]
struct SessionEntry {
    user: UserSession,
    backend_token: Option<String>,
    draft: ActivityForm,
    created_at: DateTime<Utc>,
}

impl SessionEntry {
    /// Matches the cookie max-age.
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::days(SESSION_MAX_AGE_DAYS)
    }
}

/// Shared session map.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session and return its id. Expired sessions are swept first.
    pub fn create(&self, user: UserSession, backend_token: Option<String>) -> Result<String, AppError> {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| !entry.is_expired(now));
        let swept = before.saturating_sub(self.sessions.len());
        if swept > 0 {
            tracing::debug!(swept, "Expired sessions removed");
        }

        let mut bytes = [0u8; SESSION_ID_BYTES];
        SystemRandom::new()
            .fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to generate session id")))?;
        let session_id = URL_SAFE_NO_PAD.encode(bytes);

        tracing::info!(user_id = %user.id, "Session created");
        self.sessions.insert(
            session_id.clone(),
            SessionEntry {
                user,
                backend_token,
                draft: ActivityForm::new(),
                created_at: now,
            },
        );
        Ok(session_id)
    }

    /// Live session by id. An expired session is removed and reported as absent.
    pub fn get(&self, session_id: &str) -> Option<SessionContext> {
        let now = Utc::now();
        if let Some((_, entry)) = self
            .sessions
            .remove_if(session_id, |_, entry| entry.is_expired(now))
        {
            tracing::debug!(user_id = %entry.user.id, "Session expired");
            return None;
        }

        self.sessions.get(session_id).map(|entry| SessionContext {
            session_id: session_id.to_string(),
            user: entry.user.clone(),
            backend_token: entry.backend_token.clone(),
        })
    }

    /// End a session. Returns false if it did not exist.
    pub fn remove(&self, session_id: &str) -> bool {
        match self.sessions.remove(session_id) {
            Some((_, entry)) => {
                let age = Utc::now() - entry.created_at;
                tracing::info!(
                    user_id = %entry.user.id,
                    age_secs = age.num_seconds(),
                    "Session ended"
                );
                true
            }
            None => false,
        }
    }

    /// Run `f` on the session's form draft.
    ///
    /// The map shard stays locked while `f` runs, so `f` must not block.
    pub fn with_draft<R>(&self, session_id: &str, f: impl FnOnce(&mut ActivityForm) -> R) -> Option<R> {
        self.sessions
            .get_mut(session_id)
            .map(|mut entry| f(&mut entry.draft))
    }

    /// Reset the draft after a submit of `submitted`.
    ///
    /// A draft edited while the submit was in flight is left as is.
    pub fn reset_draft_after_submit(
        &self,
        session_id: &str,
        submitted: &ActivityForm,
    ) -> Option<FormView> {
        self.with_draft(session_id, |form| {
            if *form == *submitted {
                form.reset_after_submit();
            } else {
                tracing::debug!("Draft edited during submit, not reset");
            }
            form.view()
        })
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// HttpOnly cookie carrying the session id.
pub fn session_cookie(session_id: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(SESSION_MAX_AGE_DAYS))
        .build()
}

/// Cookie that matches [`session_cookie`] for removal.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
