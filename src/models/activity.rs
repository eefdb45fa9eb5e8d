// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for the backend API and the views built on it.

use crate::models::metrics::{schema, ActivityMetrics, MetricKey};
use crate::time_utils::{format_backend_timestamp, parse_timestamp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

/// Activity category (wire form is SCREAMING_SNAKE_CASE, e.g. `WEIGHT_TRAINING`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Running,
    Walking,
    Cycling,
    Swimming,
    WeightTraining,
    Yoga,
    Hiit,
    Cardio,
    Stretching,
    Other,
}

impl ActivityType {
    pub const ALL: [ActivityType; 10] = [
        ActivityType::Running,
        ActivityType::Walking,
        ActivityType::Cycling,
        ActivityType::Swimming,
        ActivityType::WeightTraining,
        ActivityType::Yoga,
        ActivityType::Hiit,
        ActivityType::Cardio,
        ActivityType::Stretching,
        ActivityType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Running => "RUNNING",
            ActivityType::Walking => "WALKING",
            ActivityType::Cycling => "CYCLING",
            ActivityType::Swimming => "SWIMMING",
            ActivityType::WeightTraining => "WEIGHT_TRAINING",
            ActivityType::Yoga => "YOGA",
            ActivityType::Hiit => "HIIT",
            ActivityType::Cardio => "CARDIO",
            ActivityType::Stretching => "STRETCHING",
            ActivityType::Other => "OTHER",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ActivityType::Running => "Running",
            ActivityType::Walking => "Walking",
            ActivityType::Cycling => "Cycling",
            ActivityType::Swimming => "Swimming",
            ActivityType::WeightTraining => "Weight Training",
            ActivityType::Yoga => "Yoga",
            ActivityType::Hiit => "HIIT",
            ActivityType::Cardio => "Cardio",
            ActivityType::Stretching => "Stretching",
            ActivityType::Other => "Other",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ActivityType::Running => "🏃",
            ActivityType::Walking => "🚶",
            ActivityType::Cycling => "🚴",
            ActivityType::Swimming => "🏊",
            ActivityType::WeightTraining => "🏋️",
            ActivityType::Yoga => "🧘",
            ActivityType::Hiit => "💪",
            ActivityType::Cardio => "❤️",
            ActivityType::Stretching => "🤸",
            ActivityType::Other => "⚡",
        }
    }

    /// Estimated energy expenditure in kcal per minute.
    pub fn calories_per_minute(self) -> f64 {
        match self {
            ActivityType::Running => 12.0,
            ActivityType::Walking => 4.5,
            ActivityType::Cycling => 9.5,
            ActivityType::Swimming => 10.0,
            ActivityType::WeightTraining => 6.5,
            ActivityType::Yoga => 3.5,
            ActivityType::Hiit => 13.5,
            ActivityType::Cardio => 8.0,
            ActivityType::Stretching => 2.5,
            ActivityType::Other => 5.0,
        }
    }

    /// Metric keys that apply to this type.
    pub fn metric_keys(self) -> &'static [MetricKey] {
        schema(self)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown activity type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown activity type '{0}'")]
pub struct UnknownActivityType(pub String);

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| UnknownActivityType(s.to_string()))
    }
}

/// Activity record as exchanged with the backend.
///
/// Every field is optional so a partial or older record still decodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "type", default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub duration: Option<Number>,
    #[serde(default)]
    pub calories_burned: Option<Number>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub additional_metrics: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A persisted activity.
///
/// The activity type is carried by the [`ActivityMetrics`] variant, so the
/// metrics can never disagree with the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ActivityRecord", into = "ActivityRecord")]
pub struct Activity {
    pub id: Option<String>,
    pub user_id: Option<String>,
    /// Minutes
    pub duration: u32,
    pub calories_burned: u32,
    pub start_time: Option<NaiveDateTime>,
    pub metrics: ActivityMetrics,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Activity {
    pub fn activity_type(&self) -> ActivityType {
        self.metrics.activity_type()
    }

    /// Timestamp used for chronological ordering.
    pub fn sort_date(&self) -> Option<NaiveDateTime> {
        self.start_time.or(self.created_at)
    }
}

fn positive_whole(value: Option<Number>) -> u32 {
    value
        .and_then(|n| n.as_f64())
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v.round().min(f64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

/// Record ids arrive as strings or numbers.
pub(crate) fn id_text(id: Value) -> Option<String> {
    match id {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl From<ActivityRecord> for Activity {
    fn from(record: ActivityRecord) -> Self {
        let activity_type = record
            .activity_type
            .as_deref()
            .and_then(|t| t.parse().ok())
            .unwrap_or(ActivityType::Other);
        let metrics = match &record.additional_metrics {
            Some(raw) => ActivityMetrics::from_json_lossy(activity_type, raw),
            None => ActivityMetrics::empty(activity_type),
        };

        Self {
            id: record.id.and_then(id_text),
            user_id: record.user_id,
            duration: positive_whole(record.duration),
            calories_burned: positive_whole(record.calories_burned),
            start_time: record.start_time.as_deref().and_then(parse_timestamp),
            metrics,
            created_at: record.created_at.as_deref().and_then(parse_timestamp),
            updated_at: record.updated_at.as_deref().and_then(parse_timestamp),
        }
    }
}

impl From<Activity> for ActivityRecord {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id.map(Value::String),
            user_id: activity.user_id,
            activity_type: Some(activity.metrics.activity_type().as_str().to_string()),
            duration: Some(Number::from(activity.duration)),
            calories_burned: Some(Number::from(activity.calories_burned)),
            start_time: activity.start_time.map(format_backend_timestamp),
            additional_metrics: Some(activity.metrics.to_json_map()),
            created_at: activity.created_at.map(format_backend_timestamp),
            updated_at: activity.updated_at.map(format_backend_timestamp),
        }
    }
}

/// Create-activity payload sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    #[serde(rename = "type")]
    activity_type: ActivityType,
    duration: u32,
    calories_burned: u32,
    #[serde(serialize_with = "crate::time_utils::serialize_backend_timestamp")]
    start_time: NaiveDateTime,
    additional_metrics: ActivityMetrics,
}

impl NewActivity {
    pub fn new(
        metrics: ActivityMetrics,
        duration: u32,
        calories_burned: u32,
        start_time: NaiveDateTime,
    ) -> Self {
        Self {
            activity_type: metrics.activity_type(),
            duration,
            calories_burned,
            start_time,
            additional_metrics: metrics,
        }
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn calories_burned(&self) -> u32 {
        self.calories_burned
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn metrics(&self) -> &ActivityMetrics {
        &self.additional_metrics
    }
}
