// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness Tracker: log workouts and read AI coaching feedback.
//!
//! This crate is the web-facing service in front of the fitness backend. It
//! owns the user session, the activity form and the listing views, and talks
//! to the backend's REST API for authentication, storage and recommendations.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{BackendClient, SessionStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub backend: BackendClient,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            backend: BackendClient::new(&config),
            sessions: SessionStore::new(),
            config,
        }
    }
}
