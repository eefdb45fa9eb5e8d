// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity detail and recommendation view models.

use crate::models::{Activity, ActivityType, Recommendation};
use crate::services::listing::{metric_displays, MetricDisplay};
use crate::time_utils::{format_clock_time, format_date_time, format_long_date, parse_timestamp};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const NO_ACTIVITY_RECOMMENDATION: &str = "No AI recommendations available for this activity.";
pub const NO_RECOMMENDATIONS: &str = "No recommendations found.";

/// A single activity, formatted for the detail page.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetail {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub type_display_name: String,
    pub icon: String,
    /// `Running Session`
    pub title: String,
    pub duration: u32,
    pub calories_burned: u32,
    /// `Sunday, January 5, 2025`
    pub date: Option<String>,
    pub time: Option<String>,
    pub metrics: Vec<MetricDisplay>,
}

impl From<&Activity> for ActivityDetail {
    fn from(activity: &Activity) -> Self {
        let t = activity.activity_type();
        let when = activity.sort_date();
        Self {
            id: activity.id.clone(),
            activity_type: t.as_str().to_string(),
            type_display_name: t.display_name().to_string(),
            icon: t.icon().to_string(),
            title: format!("{} Session", t.display_name()),
            duration: activity.duration,
            calories_burned: activity.calories_burned,
            date: when.map(format_long_date),
            time: when.map(format_clock_time),
            metrics: metric_displays(activity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    pub id: Option<String>,
    pub activity_id: Option<String>,
    pub activity_type: Option<String>,
    pub type_display_name: Option<String>,
    pub recommendation: String,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
    pub safety: Vec<String>,
    /// `1/5/2025, 9:30:00 AM`; unparseable timestamps pass through unchanged
    pub created_at: Option<String>,
}

impl From<Recommendation> for RecommendationView {
    fn from(rec: Recommendation) -> Self {
        let type_display_name = rec
            .activity_type
            .as_deref()
            .and_then(|t| t.parse::<ActivityType>().ok())
            .map(|t| t.display_name().to_string());
        let created_at = rec.created_at.map(|raw| match parse_timestamp(&raw) {
            Some(time) => format_date_time(time),
            None => raw,
        });

        Self {
            id: rec.id,
            activity_id: rec.activity_id,
            activity_type: rec.activity_type,
            type_display_name,
            recommendation: rec.recommendation.unwrap_or_default(),
            improvements: rec.improvements,
            suggestions: rec.suggestions,
            safety: rec.safety,
            created_at,
        }
    }
}

/// Detail page: the activity plus its best-effort recommendation.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetailView {
    pub activity: ActivityDetail,
    pub recommendation: Option<RecommendationView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_message: Option<String>,
}

impl ActivityDetailView {
    pub fn new(activity: &Activity, recommendation: Option<Recommendation>) -> Self {
        let recommendation = recommendation
            .filter(|r| !r.is_blank())
            .map(RecommendationView::from);
        let recommendation_message = recommendation
            .is_none()
            .then(|| NO_ACTIVITY_RECOMMENDATION.to_string());

        Self {
            activity: ActivityDetail::from(activity),
            recommendation,
            recommendation_message,
        }
    }
}

/// All recommendations of the session user.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsView {
    pub recommendations: Vec<RecommendationView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl RecommendationsView {
    pub fn new(recommendations: Vec<Recommendation>) -> Self {
        let recommendations: Vec<RecommendationView> = recommendations
            .into_iter()
            .filter(|r| !r.is_blank())
            .map(RecommendationView::from)
            .collect();
        let empty_message = recommendations
            .is_empty()
            .then(|| NO_RECOMMENDATIONS.to_string());

        Self {
            recommendations,
            empty_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn running() -> Activity {
        serde_json::from_value(json!({
            "id": "r1",
            "type": "RUNNING",
            "duration": 40,
            "caloriesBurned": 480,
            "startTime": "2025-01-05T09:30:00",
            "additionalMetrics": { "distance": 1234.5, "maxHeartRate": 171 }
        }))
        .unwrap()
    }

    #[test]
    fn test_activity_detail_formatting() {
        let detail = ActivityDetail::from(&running());
        assert_eq!(detail.title, "Running Session");
        assert_eq!(detail.date.as_deref(), Some("Sunday, January 5, 2025"));
        assert_eq!(detail.time.as_deref(), Some("09:30 AM"));
        assert_eq!(detail.metrics[0].label, "Distance");
        assert_eq!(detail.metrics[0].value, "1,234.5 km");
        assert_eq!(detail.metrics[1].value, "171 bpm");
    }

    #[test]
    fn test_recommendation_view() {
        let rec: Recommendation = serde_json::from_value(json!({
            "activityType": "WEIGHT_TRAINING",
            "recommendation": "Good volume.",
            "safety": ["Warm up first"],
            "createdAt": "2025-01-05T09:30:00"
        }))
        .unwrap();

        let view = RecommendationView::from(rec);
        assert_eq!(view.type_display_name.as_deref(), Some("Weight Training"));
        assert_eq!(view.created_at.as_deref(), Some("1/5/2025, 9:30:00 AM"));
        assert!(view.improvements.is_empty());
    }

    #[test]
    fn test_detail_without_recommendation() {
        let view = ActivityDetailView::new(&running(), None);
        assert!(view.recommendation.is_none());
        assert_eq!(
            view.recommendation_message.as_deref(),
            Some(NO_ACTIVITY_RECOMMENDATION)
        );
    }

    #[test]
    fn test_empty_recommendations() {
        let view = RecommendationsView::new(Vec::new());
        assert_eq!(view.empty_message.as_deref(), Some(NO_RECOMMENDATIONS));
    }
}
