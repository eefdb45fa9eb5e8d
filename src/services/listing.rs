// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory search, filter and sort over a fetched activity collection.

use crate::error::AppError;
use crate::models::{Activity, ActivityType};
use crate::time_utils::{format_clock_time, format_short_date};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Type filter; `ALL` (or absent) keeps everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(ActivityType),
}

impl TypeFilter {
    pub fn matches(self, activity: &Activity) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => activity.activity_type() == t,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse::<ActivityType>()
            .map(TypeFilter::Only)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest first
    #[default]
    Date,
    /// Highest first
    Calories,
    /// Longest first
    Duration,
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "date" => Ok(SortKey::Date),
            "calories" => Ok(SortKey::Calories),
            "duration" => Ok(SortKey::Duration),
            other => Err(AppError::BadRequest(format!("Unknown sort '{}'", other))),
        }
    }
}

/// Raw listing query string: `?search=&type=&sort=`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(rename = "type", default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// Parsed listing options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingOptions {
    /// Lowercased search term, `None` when blank
    pub search: Option<String>,
    pub filter: TypeFilter,
    pub sort: SortKey,
}

impl TryFrom<ListingQuery> for ListingOptions {
    type Error = AppError;

    fn try_from(query: ListingQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            search: query
                .search
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
            filter: query.activity_type.as_deref().unwrap_or("").parse()?,
            sort: query.sort.as_deref().unwrap_or("").parse()?,
        })
    }
}

impl ListingOptions {
    /// A search or type filter is in effect.
    pub fn is_narrowed(&self) -> bool {
        self.search.is_some() || self.filter != TypeFilter::All
    }

    fn matches_search(&self, activity: &Activity) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        let t = activity.activity_type();
        t.as_str().to_lowercase().contains(term) || t.display_name().to_lowercase().contains(term)
    }
}

/// Filter then sort. Ties keep the backend's order.
pub fn apply<'a>(activities: &'a [Activity], options: &ListingOptions) -> Vec<&'a Activity> {
    let mut selected: Vec<&Activity> = activities
        .iter()
        .filter(|a| options.filter.matches(a) && options.matches_search(a))
        .collect();

    match options.sort {
        SortKey::Date => selected.sort_by(|a, b| newest_first(a, b)),
        SortKey::Calories => selected.sort_by(|a, b| b.calories_burned.cmp(&a.calories_burned)),
        SortKey::Duration => selected.sort_by(|a, b| b.duration.cmp(&a.duration)),
    }
    selected
}

fn newest_first(a: &Activity, b: &Activity) -> Ordering {
    match (a.sort_date(), b.sort_date()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Totals over the unfiltered collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats {
    pub total_activities: u32,
    pub total_calories: u64,
    /// Minutes
    pub total_duration: u64,
    pub average_calories: u64,
}

impl ActivityStats {
    pub fn compute(activities: &[Activity]) -> Self {
        let total_activities = activities.len() as u32;
        let total_calories: u64 = activities.iter().map(|a| u64::from(a.calories_burned)).sum();
        let total_duration: u64 = activities.iter().map(|a| u64::from(a.duration)).sum();
        let average_calories = if total_activities == 0 {
            0
        } else {
            (total_calories as f64 / f64::from(total_activities)).round() as u64
        };

        Self {
            total_activities,
            total_calories,
            total_duration,
            average_calories,
        }
    }
}

/// Message shown when a listing has no rows.
pub fn empty_message(options: &ListingOptions) -> &'static str {
    if options.is_narrowed() {
        "No matching activities"
    } else {
        "No activities yet"
    }
}

/// A formatted metric value, e.g. `Distance` / `8.4 km`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MetricDisplay {
    pub key: String,
    pub label: String,
    pub value: String,
}

pub fn metric_displays(activity: &Activity) -> Vec<MetricDisplay> {
    activity
        .metrics
        .entries()
        .into_iter()
        .map(|(key, value)| MetricDisplay {
            key: key.as_str().to_string(),
            label: key.display_label().to_string(),
            value: value.display(key),
        })
        .collect()
}

/// One row of the activity list.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRow {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub type_display_name: String,
    pub icon: String,
    pub duration: u32,
    pub calories_burned: u32,
    /// `Jan 5, 2025`
    pub date: Option<String>,
    /// `09:30 AM`
    pub time: Option<String>,
    pub metrics: Vec<MetricDisplay>,
}

impl From<&Activity> for ActivityRow {
    fn from(activity: &Activity) -> Self {
        let t = activity.activity_type();
        let when = activity.sort_date();
        Self {
            id: activity.id.clone(),
            activity_type: t.as_str().to_string(),
            type_display_name: t.display_name().to_string(),
            icon: t.icon().to_string(),
            duration: activity.duration,
            calories_burned: activity.calories_burned,
            date: when.map(format_short_date),
            time: when.map(format_clock_time),
            metrics: metric_displays(activity),
        }
    }
}

/// Listing response.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub activities: Vec<ActivityRow>,
    pub stats: ActivityStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl ListingView {
    pub fn build(activities: &[Activity], options: &ListingOptions) -> Self {
        let rows: Vec<ActivityRow> = apply(activities, options)
            .into_iter()
            .map(ActivityRow::from)
            .collect();
        let empty_message = rows
            .is_empty()
            .then(|| empty_message(options).to_string());

        Self {
            activities: rows,
            stats: ActivityStats::compute(activities),
            empty_message,
        }
    }
}
