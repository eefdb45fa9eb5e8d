// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod metrics;
pub mod recommendation;
pub mod user;

pub use activity::{Activity, ActivityRecord, ActivityType, NewActivity};
pub use metrics::{ActivityMetrics, MetricKey, MetricKind, MetricValue};
pub use recommendation::Recommendation;
pub use user::{BackendUser, Credentials, Registration, UserSession};
