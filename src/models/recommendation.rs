// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AI-generated recommendations (read-only, produced by the backend).

use crate::models::activity::id_text;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub activity_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub activity_type: Option<String>,
    /// Overall analysis text
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub improvements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub suggestions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub safety: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(id_text))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Recommendation {
    /// True when the backend sent a record with no usable content.
    pub fn is_blank(&self) -> bool {
        self.recommendation
            .as_deref()
            .map_or(true, |text| text.trim().is_empty())
            && self.improvements.is_empty()
            && self.suggestions.is_empty()
            && self.safety.is_empty()
    }
}
