// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity creation form: interactive state, calorie estimate and validation.
//!
//! The form keeps raw user input. Nothing is typed or checked until
//! [`ActivityForm::validate`], which either yields a backend payload or a
//! [`FormError`] before any network call is made.

use crate::models::activity::UnknownActivityType;
use crate::models::metrics::MetricError;
use crate::models::{ActivityMetrics, ActivityType, MetricKey, NewActivity};
use crate::time_utils::{default_start_time, parse_timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const DEFAULT_DURATION_MINUTES: i64 = 30;

/// Estimated calories for `duration` minutes of `activity_type`.
pub fn estimate_calories(activity_type: ActivityType, duration: i64) -> i64 {
    (activity_type.calories_per_minute() * duration.max(0) as f64).round() as i64
}

/// Form validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Duration must be greater than 0")]
    InvalidDuration,

    #[error("Calories burned must be greater than 0")]
    InvalidCalories,

    #[error("{0} is too large")]
    TooLarge(&'static str),

    #[error("Start time is required")]
    MissingStartTime,

    #[error("Invalid start time '{0}'")]
    InvalidStartTime(String),

    #[error(transparent)]
    UnknownType(#[from] UnknownActivityType),

    #[error(transparent)]
    Metric(#[from] MetricError),
}

/// Partial form edit. Absent fields are left unchanged.
///
/// Also used as the complete body of a one-shot create.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormUpdate {
    #[serde(rename = "type", default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub calories_burned: Option<i64>,
    /// Raw metric inputs by name; numbers and strings are accepted, `null` clears
    #[serde(default)]
    pub additional_metrics: Option<BTreeMap<String, Value>>,
}

/// State of one activity form.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityForm {
    activity_type: ActivityType,
    start_time: String,
    duration: i64,
    calories_burned: i64,
    metric_inputs: BTreeMap<MetricKey, String>,
}

impl Default for ActivityForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityForm {
    /// Fresh form: walking, 30 minutes, starting now.
    pub fn new() -> Self {
        let activity_type = ActivityType::Walking;
        Self {
            activity_type,
            start_time: default_start_time(),
            duration: DEFAULT_DURATION_MINUTES,
            calories_burned: estimate_calories(activity_type, DEFAULT_DURATION_MINUTES),
            metric_inputs: BTreeMap::new(),
        }
    }

    /// Empty form for a one-shot create; every required field must be supplied.
    pub fn blank() -> Self {
        Self {
            activity_type: ActivityType::Walking,
            start_time: String::new(),
            duration: 0,
            calories_burned: 0,
            metric_inputs: BTreeMap::new(),
        }
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn calories_burned(&self) -> i64 {
        self.calories_burned
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn metric_input(&self, key: MetricKey) -> Option<&str> {
        self.metric_inputs.get(&key).map(String::as_str)
    }

    /// Change the type and re-estimate calories.
    pub fn set_type(&mut self, activity_type: ActivityType) {
        self.activity_type = activity_type;
        self.recalculate();
    }

    /// Change the duration and re-estimate calories.
    pub fn set_duration(&mut self, minutes: i64) {
        self.duration = minutes;
        self.recalculate();
    }

    pub fn set_calories(&mut self, calories: i64) {
        self.calories_burned = calories;
    }

    pub fn set_start_time(&mut self, value: impl Into<String>) {
        self.start_time = value.into();
    }

    /// Store a raw metric input; blank clears it.
    pub fn set_metric(&mut self, key: MetricKey, raw: impl Into<String>) {
        let raw = raw.into();
        if raw.trim().is_empty() {
            self.metric_inputs.remove(&key);
        } else {
            self.metric_inputs.insert(key, raw);
        }
    }

    fn recalculate(&mut self) {
        self.calories_burned = estimate_calories(self.activity_type, self.duration);
    }

    /// Apply a partial edit.
    ///
    /// Type and duration are applied first so an explicit calorie value in the
    /// same edit overrides the estimate.
    pub fn apply(&mut self, update: FormUpdate) -> Result<(), FormError> {
        if let Some(raw) = update.activity_type {
            self.set_type(raw.parse()?);
        }
        if let Some(minutes) = update.duration {
            self.set_duration(minutes);
        }
        if let Some(calories) = update.calories_burned {
            self.set_calories(calories);
        }
        if let Some(start) = update.start_time {
            self.set_start_time(start);
        }
        for (name, value) in update.additional_metrics.unwrap_or_default() {
            let Ok(key) = name.parse::<MetricKey>() else {
                tracing::debug!(metric = %name, "Ignoring unknown metric input");
                continue;
            };
            let raw = match value {
                Value::Null => String::new(),
                Value::String(s) => s,
                other => other.to_string(),
            };
            self.set_metric(key, raw);
        }
        Ok(())
    }

    /// Check the form and build the backend payload.
    ///
    /// Only metrics in the current type's schema are included; blank inputs
    /// are omitted.
    pub fn validate(&self) -> Result<NewActivity, FormError> {
        if self.duration <= 0 {
            return Err(FormError::InvalidDuration);
        }
        if self.calories_burned <= 0 {
            return Err(FormError::InvalidCalories);
        }
        let duration = u32::try_from(self.duration).map_err(|_| FormError::TooLarge("Duration"))?;
        let calories =
            u32::try_from(self.calories_burned).map_err(|_| FormError::TooLarge("Calories burned"))?;

        if self.start_time.trim().is_empty() {
            return Err(FormError::MissingStartTime);
        }
        let start_time = parse_timestamp(&self.start_time)
            .ok_or_else(|| FormError::InvalidStartTime(self.start_time.clone()))?;

        let metrics = ActivityMetrics::from_inputs(self.activity_type, &self.metric_inputs)?;

        Ok(NewActivity::new(metrics, duration, calories, start_time))
    }

    /// Prepare for the next entry after a successful submit.
    ///
    /// The type and metric inputs are kept.
    pub fn reset_after_submit(&mut self) {
        self.duration = DEFAULT_DURATION_MINUTES;
        self.start_time = default_start_time();
        self.recalculate();
    }

    pub fn view(&self) -> FormView {
        FormView {
            activity_type: self.activity_type.as_str().to_string(),
            type_display_name: self.activity_type.display_name().to_string(),
            start_time: self.start_time.clone(),
            duration: self.duration,
            calories_burned: self.calories_burned,
            estimated_calories: estimate_calories(self.activity_type, self.duration),
            metric_fields: self
                .activity_type
                .metric_keys()
                .iter()
                .map(|&key| MetricField {
                    key: key.as_str().to_string(),
                    label: key.form_label().to_string(),
                    input_type: key.kind().input_type().to_string(),
                    value: self.metric_input(key).unwrap_or_default().to_string(),
                })
                .collect(),
        }
    }
}

/// One dynamic metric input of the form.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MetricField {
    pub key: String,
    pub label: String,
    pub input_type: String,
    pub value: String,
}

/// Form state as rendered by the client.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub type_display_name: String,
    pub start_time: String,
    pub duration: i64,
    pub calories_burned: i64,
    pub estimated_calories: i64,
    pub metric_fields: Vec<MetricField>,
}
