// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity_form;
pub mod backend;
pub mod detail;
pub mod listing;
pub mod password;
pub mod session;

pub use activity_form::{estimate_calories, ActivityForm, FormError, FormUpdate, FormView};
pub use backend::{BackendClient, LoginOutcome};
pub use detail::{ActivityDetailView, RecommendationsView};
pub use listing::{ListingOptions, ListingQuery, ListingView};
pub use session::{SessionContext, SessionStore};
