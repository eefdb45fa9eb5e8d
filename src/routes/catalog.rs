// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public activity type catalog, used to render the dynamic form.

use crate::models::{ActivityType, MetricKey};
use crate::AppState;
use axum::{http::header, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/activity-types", get(activity_types))
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MetricFieldInfo {
    pub key: String,
    pub label: String,
    pub unit: String,
    pub input_type: String,
}

impl From<MetricKey> for MetricFieldInfo {
    fn from(key: MetricKey) -> Self {
        Self {
            key: key.as_str().to_string(),
            label: key.form_label().to_string(),
            unit: key.unit().to_string(),
            input_type: key.kind().input_type().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTypeInfo {
    pub code: String,
    pub display_name: String,
    pub icon: String,
    pub calories_per_minute: f64,
    pub metrics: Vec<MetricFieldInfo>,
}

pub fn catalog() -> Vec<ActivityTypeInfo> {
    ActivityType::ALL
        .into_iter()
        .map(|t| ActivityTypeInfo {
            code: t.as_str().to_string(),
            display_name: t.display_name().to_string(),
            icon: t.icon().to_string(),
            calories_per_minute: t.calories_per_minute(),
            metrics: t.metric_keys().iter().copied().map(MetricFieldInfo::from).collect(),
        })
        .collect()
}

/// The static type table. Never changes at runtime, so it may be cached.
async fn activity_types() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "public, max-age=3600")],
        Json(catalog()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_type() {
        let types = catalog();
        assert_eq!(types.len(), 10);

        let running = &types[0];
        assert_eq!(running.code, "RUNNING");
        assert_eq!(running.calories_per_minute, 12.0);
        let keys: Vec<&str> = running.metrics.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["distance", "averageSpeed", "maxHeartRate"]);

        let other = types.iter().find(|t| t.code == "OTHER").unwrap();
        assert!(other.metrics.is_empty());
    }

    #[test]
    fn test_metric_field_info() {
        let info = MetricFieldInfo::from(MetricKey::CalmnessScore);
        assert_eq!(info.label, "Calmness (1–10)");
        assert_eq!(info.unit, "/10");
        assert_eq!(info.input_type, "number");
    }
}
