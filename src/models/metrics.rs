// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-type metric schema and the typed metric sets carried by activities.
//!
//! Every activity type owns a fixed, ordered list of optional metrics. The
//! schema table in [`schema`] is the single source of truth: form fields,
//! submitted payloads and decoded backend records are all restricted to it.

use crate::models::activity::ActivityType;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Name of a single optional metric (wire form is camelCase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    Distance,
    AverageSpeed,
    MaxHeartRate,
    ElevationGain,
    Laps,
    StrokeRate,
    Sets,
    Reps,
    WeightPerRep,
    DurationFocus,
    CalmnessScore,
    Rounds,
    WorkIntervalSec,
    RestIntervalSec,
    FlexibilityScore,
    TargetAreas,
}

/// How a metric's raw input is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Finite, non-negative number.
    Decimal,
    /// Non-negative whole number.
    Integer,
    /// Whole number from 1 to 10.
    Score,
    /// Free text.
    Text,
}

impl MetricKind {
    /// HTML input type a form should render for this kind.
    pub fn input_type(self) -> &'static str {
        match self {
            MetricKind::Text => "text",
            _ => "number",
        }
    }
}

impl MetricKey {
    pub const ALL: [MetricKey; 16] = [
        MetricKey::Distance,
        MetricKey::AverageSpeed,
        MetricKey::MaxHeartRate,
        MetricKey::ElevationGain,
        MetricKey::Laps,
        MetricKey::StrokeRate,
        MetricKey::Sets,
        MetricKey::Reps,
        MetricKey::WeightPerRep,
        MetricKey::DurationFocus,
        MetricKey::CalmnessScore,
        MetricKey::Rounds,
        MetricKey::WorkIntervalSec,
        MetricKey::RestIntervalSec,
        MetricKey::FlexibilityScore,
        MetricKey::TargetAreas,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::Distance => "distance",
            MetricKey::AverageSpeed => "averageSpeed",
            MetricKey::MaxHeartRate => "maxHeartRate",
            MetricKey::ElevationGain => "elevationGain",
            MetricKey::Laps => "laps",
            MetricKey::StrokeRate => "strokeRate",
            MetricKey::Sets => "sets",
            MetricKey::Reps => "reps",
            MetricKey::WeightPerRep => "weightPerRep",
            MetricKey::DurationFocus => "durationFocus",
            MetricKey::CalmnessScore => "calmnessScore",
            MetricKey::Rounds => "rounds",
            MetricKey::WorkIntervalSec => "workIntervalSec",
            MetricKey::RestIntervalSec => "restIntervalSec",
            MetricKey::FlexibilityScore => "flexibilityScore",
            MetricKey::TargetAreas => "targetAreas",
        }
    }

    pub fn kind(self) -> MetricKind {
        match self {
            MetricKey::Distance
            | MetricKey::AverageSpeed
            | MetricKey::ElevationGain
            | MetricKey::WeightPerRep
            | MetricKey::DurationFocus => MetricKind::Decimal,
            MetricKey::MaxHeartRate
            | MetricKey::Laps
            | MetricKey::StrokeRate
            | MetricKey::Sets
            | MetricKey::Reps
            | MetricKey::Rounds
            | MetricKey::WorkIntervalSec
            | MetricKey::RestIntervalSec => MetricKind::Integer,
            MetricKey::CalmnessScore | MetricKey::FlexibilityScore => MetricKind::Score,
            MetricKey::TargetAreas => MetricKind::Text,
        }
    }

    /// Label shown next to the form input.
    pub fn form_label(self) -> &'static str {
        match self {
            MetricKey::Distance => "Distance (km)",
            MetricKey::AverageSpeed => "Avg Speed (km/h)",
            MetricKey::MaxHeartRate => "Max HR (bpm)",
            MetricKey::ElevationGain => "Elevation Gain (m)",
            MetricKey::Laps => "Laps",
            MetricKey::StrokeRate => "Stroke Rate (strokes/min)",
            MetricKey::Sets => "Sets",
            MetricKey::Reps => "Reps",
            MetricKey::WeightPerRep => "Weight/Rep (kg)",
            MetricKey::DurationFocus => "Focus (min)",
            MetricKey::CalmnessScore => "Calmness (1–10)",
            MetricKey::Rounds => "Rounds",
            MetricKey::WorkIntervalSec => "Work Interval (sec)",
            MetricKey::RestIntervalSec => "Rest Interval (sec)",
            MetricKey::FlexibilityScore => "Flexibility (1–10)",
            MetricKey::TargetAreas => "Target Areas",
        }
    }

    /// Label shown on the activity detail view.
    pub fn display_label(self) -> &'static str {
        match self {
            MetricKey::Distance => "Distance",
            MetricKey::AverageSpeed => "Avg Speed",
            MetricKey::MaxHeartRate => "Max Heart Rate",
            MetricKey::ElevationGain => "Elevation Gain",
            MetricKey::Laps => "Laps",
            MetricKey::StrokeRate => "Stroke Rate",
            MetricKey::Sets => "Sets",
            MetricKey::Reps => "Reps",
            MetricKey::WeightPerRep => "Weight per Rep",
            MetricKey::DurationFocus => "Focus Duration",
            MetricKey::CalmnessScore => "Calmness Score",
            MetricKey::Rounds => "Rounds",
            MetricKey::WorkIntervalSec => "Work Interval",
            MetricKey::RestIntervalSec => "Rest Interval",
            MetricKey::FlexibilityScore => "Flexibility Score",
            MetricKey::TargetAreas => "Target Areas",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MetricKey::Distance => "km",
            MetricKey::AverageSpeed => "km/h",
            MetricKey::MaxHeartRate => "bpm",
            MetricKey::ElevationGain => "m",
            MetricKey::StrokeRate => "strokes/min",
            MetricKey::WeightPerRep => "kg",
            MetricKey::DurationFocus => "min",
            MetricKey::CalmnessScore | MetricKey::FlexibilityScore => "/10",
            MetricKey::WorkIntervalSec | MetricKey::RestIntervalSec => "sec",
            MetricKey::Laps
            | MetricKey::Sets
            | MetricKey::Reps
            | MetricKey::Rounds
            | MetricKey::TargetAreas => "",
        }
    }

    /// Parse a raw input for this metric. Blank input means "not provided".
    ///
    /// Numeric metrics reject non-numeric text instead of passing it through.
    pub fn parse_input(self, raw: &str) -> Result<Option<MetricValue>, MetricError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let value = match self.kind() {
            MetricKind::Text => MetricValue::Text(raw.to_string()),
            MetricKind::Decimal => MetricValue::Decimal(parse_number(self, raw)?),
            MetricKind::Integer => MetricValue::Integer(parse_whole(self, raw)?),
            MetricKind::Score => {
                let score = parse_whole(self, raw)?;
                if !(1..=10).contains(&score) {
                    return Err(MetricError::OutOfRange(self));
                }
                MetricValue::Score(score as u8)
            }
        };

        Ok(Some(value))
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MetricKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| MetricError::UnknownKey(s.to_string()))
    }
}

fn parse_number(key: MetricKey, raw: &str) -> Result<f64, MetricError> {
    let number: f64 = raw.parse().map_err(|_| MetricError::NotANumber(key))?;
    if !number.is_finite() {
        return Err(MetricError::NotANumber(key));
    }
    if number < 0.0 {
        return Err(MetricError::Negative(key));
    }
    Ok(number)
}

fn parse_whole(key: MetricKey, raw: &str) -> Result<u32, MetricError> {
    let number = parse_number(key, raw)?;
    if number.fract() != 0.0 || number > f64::from(u32::MAX) {
        return Err(MetricError::NotAWholeNumber(key));
    }
    Ok(number as u32)
}

/// Metric parse failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    #[error("Unknown metric '{0}'")]
    UnknownKey(String),

    #[error("{} must be a number", .0.form_label())]
    NotANumber(MetricKey),

    #[error("{} must be a whole number", .0.form_label())]
    NotAWholeNumber(MetricKey),

    #[error("{} must not be negative", .0.form_label())]
    Negative(MetricKey),

    #[error("{} must be between 1 and 10", .0.form_label())]
    OutOfRange(MetricKey),
}

/// The ordered metric keys that apply to an activity type.
pub fn schema(activity_type: ActivityType) -> &'static [MetricKey] {
    use MetricKey::*;

    match activity_type {
        ActivityType::Running | ActivityType::Walking | ActivityType::Cardio => {
            &[Distance, AverageSpeed, MaxHeartRate]
        }
        ActivityType::Cycling => &[Distance, AverageSpeed, ElevationGain, MaxHeartRate],
        ActivityType::Swimming => &[Laps, Distance, StrokeRate, MaxHeartRate],
        ActivityType::WeightTraining => &[Sets, Reps, WeightPerRep, MaxHeartRate],
        ActivityType::Yoga => &[DurationFocus, CalmnessScore],
        ActivityType::Hiit => &[Rounds, WorkIntervalSec, RestIntervalSec, MaxHeartRate],
        ActivityType::Stretching => &[FlexibilityScore, TargetAreas],
        ActivityType::Other => &[],
    }
}

/// A parsed metric value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Decimal(f64),
    Integer(u32),
    Score(u8),
    Text(String),
}

impl MetricValue {
    /// Human-readable value with the metric's unit, e.g. `1,234.5 km`.
    pub fn display(&self, key: MetricKey) -> String {
        let value = match self {
            MetricValue::Decimal(v) => format_grouped(*v),
            MetricValue::Integer(v) => format_grouped(f64::from(*v)),
            MetricValue::Score(v) => v.to_string(),
            MetricValue::Text(v) => v.clone(),
        };
        format!("{} {}", value, key.unit()).trim().to_string()
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Decimal(v) => serializer.serialize_f64(*v),
            MetricValue::Integer(v) => serializer.serialize_u32(*v),
            MetricValue::Score(v) => serializer.serialize_u8(*v),
            MetricValue::Text(v) => serializer.serialize_str(v),
        }
    }
}

/// Group thousands and keep at most three fraction digits (`1234.5678` → `1,234.568`).
fn format_grouped(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let text = format!("{}", rounded);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

// ─── Typed metric sets ───────────────────────────────────────

/// Parsed values waiting to be moved into a typed metric set.
#[derive(Default)]
struct ParsedValues(BTreeMap<MetricKey, MetricValue>);

impl ParsedValues {
    fn decimal(&mut self, key: MetricKey) -> Option<f64> {
        match self.0.remove(&key) {
            Some(MetricValue::Decimal(v)) => Some(v),
            _ => None,
        }
    }

    fn integer(&mut self, key: MetricKey) -> Option<u32> {
        match self.0.remove(&key) {
            Some(MetricValue::Integer(v)) => Some(v),
            _ => None,
        }
    }

    fn score(&mut self, key: MetricKey) -> Option<u8> {
        match self.0.remove(&key) {
            Some(MetricValue::Score(v)) => Some(v),
            _ => None,
        }
    }

    fn text(&mut self, key: MetricKey) -> Option<String> {
        match self.0.remove(&key) {
            Some(MetricValue::Text(v)) => Some(v),
            _ => None,
        }
    }
}

fn entries(
    values: impl IntoIterator<Item = (MetricKey, Option<MetricValue>)>,
) -> Vec<(MetricKey, MetricValue)> {
    values
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
}

/// Distance-based sessions: running, walking and cardio machines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceMetrics {
    pub distance: Option<f64>,
    pub average_speed: Option<f64>,
    pub max_heart_rate: Option<u32>,
}

impl DistanceMetrics {
    fn take(values: &mut ParsedValues) -> Self {
        Self {
            distance: values.decimal(MetricKey::Distance),
            average_speed: values.decimal(MetricKey::AverageSpeed),
            max_heart_rate: values.integer(MetricKey::MaxHeartRate),
        }
    }

    fn entries(&self) -> Vec<(MetricKey, MetricValue)> {
        entries([
            (MetricKey::Distance, self.distance.map(MetricValue::Decimal)),
            (MetricKey::AverageSpeed, self.average_speed.map(MetricValue::Decimal)),
            (MetricKey::MaxHeartRate, self.max_heart_rate.map(MetricValue::Integer)),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CyclingMetrics {
    pub distance: Option<f64>,
    pub average_speed: Option<f64>,
    pub elevation_gain: Option<f64>,
    pub max_heart_rate: Option<u32>,
}

impl CyclingMetrics {
    fn take(values: &mut ParsedValues) -> Self {
        Self {
            distance: values.decimal(MetricKey::Distance),
            average_speed: values.decimal(MetricKey::AverageSpeed),
            elevation_gain: values.decimal(MetricKey::ElevationGain),
            max_heart_rate: values.integer(MetricKey::MaxHeartRate),
        }
    }

    fn entries(&self) -> Vec<(MetricKey, MetricValue)> {
        entries([
            (MetricKey::Distance, self.distance.map(MetricValue::Decimal)),
            (MetricKey::AverageSpeed, self.average_speed.map(MetricValue::Decimal)),
            (MetricKey::ElevationGain, self.elevation_gain.map(MetricValue::Decimal)),
            (MetricKey::MaxHeartRate, self.max_heart_rate.map(MetricValue::Integer)),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwimmingMetrics {
    pub laps: Option<u32>,
    pub distance: Option<f64>,
    pub stroke_rate: Option<u32>,
    pub max_heart_rate: Option<u32>,
}

impl SwimmingMetrics {
    fn take(values: &mut ParsedValues) -> Self {
        Self {
            laps: values.integer(MetricKey::Laps),
            distance: values.decimal(MetricKey::Distance),
            stroke_rate: values.integer(MetricKey::StrokeRate),
            max_heart_rate: values.integer(MetricKey::MaxHeartRate),
        }
    }

    fn entries(&self) -> Vec<(MetricKey, MetricValue)> {
        entries([
            (MetricKey::Laps, self.laps.map(MetricValue::Integer)),
            (MetricKey::Distance, self.distance.map(MetricValue::Decimal)),
            (MetricKey::StrokeRate, self.stroke_rate.map(MetricValue::Integer)),
            (MetricKey::MaxHeartRate, self.max_heart_rate.map(MetricValue::Integer)),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrengthMetrics {
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub weight_per_rep: Option<f64>,
    pub max_heart_rate: Option<u32>,
}

impl StrengthMetrics {
    fn take(values: &mut ParsedValues) -> Self {
        Self {
            sets: values.integer(MetricKey::Sets),
            reps: values.integer(MetricKey::Reps),
            weight_per_rep: values.decimal(MetricKey::WeightPerRep),
            max_heart_rate: values.integer(MetricKey::MaxHeartRate),
        }
    }

    fn entries(&self) -> Vec<(MetricKey, MetricValue)> {
        entries([
            (MetricKey::Sets, self.sets.map(MetricValue::Integer)),
            (MetricKey::Reps, self.reps.map(MetricValue::Integer)),
            (MetricKey::WeightPerRep, self.weight_per_rep.map(MetricValue::Decimal)),
            (MetricKey::MaxHeartRate, self.max_heart_rate.map(MetricValue::Integer)),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct YogaMetrics {
    pub duration_focus: Option<f64>,
    pub calmness_score: Option<u8>,
}

impl YogaMetrics {
    fn take(values: &mut ParsedValues) -> Self {
        Self {
            duration_focus: values.decimal(MetricKey::DurationFocus),
            calmness_score: values.score(MetricKey::CalmnessScore),
        }
    }

    fn entries(&self) -> Vec<(MetricKey, MetricValue)> {
        entries([
            (MetricKey::DurationFocus, self.duration_focus.map(MetricValue::Decimal)),
            (MetricKey::CalmnessScore, self.calmness_score.map(MetricValue::Score)),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalMetrics {
    pub rounds: Option<u32>,
    pub work_interval_sec: Option<u32>,
    pub rest_interval_sec: Option<u32>,
    pub max_heart_rate: Option<u32>,
}

impl IntervalMetrics {
    fn take(values: &mut ParsedValues) -> Self {
        Self {
            rounds: values.integer(MetricKey::Rounds),
            work_interval_sec: values.integer(MetricKey::WorkIntervalSec),
            rest_interval_sec: values.integer(MetricKey::RestIntervalSec),
            max_heart_rate: values.integer(MetricKey::MaxHeartRate),
        }
    }

    fn entries(&self) -> Vec<(MetricKey, MetricValue)> {
        entries([
            (MetricKey::Rounds, self.rounds.map(MetricValue::Integer)),
            (MetricKey::WorkIntervalSec, self.work_interval_sec.map(MetricValue::Integer)),
            (MetricKey::RestIntervalSec, self.rest_interval_sec.map(MetricValue::Integer)),
            (MetricKey::MaxHeartRate, self.max_heart_rate.map(MetricValue::Integer)),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StretchingMetrics {
    pub flexibility_score: Option<u8>,
    pub target_areas: Option<String>,
}

impl StretchingMetrics {
    fn take(values: &mut ParsedValues) -> Self {
        Self {
            flexibility_score: values.score(MetricKey::FlexibilityScore),
            target_areas: values.text(MetricKey::TargetAreas),
        }
    }

    fn entries(&self) -> Vec<(MetricKey, MetricValue)> {
        entries([
            (
                MetricKey::FlexibilityScore,
                self.flexibility_score.map(MetricValue::Score),
            ),
            (MetricKey::TargetAreas, self.target_areas.clone().map(MetricValue::Text)),
        ])
    }
}

/// Additional metrics of an activity, one variant per activity type.
///
/// Serializes as a flat `additionalMetrics` object containing only the
/// populated keys of the variant's schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityMetrics {
    Running(DistanceMetrics),
    Walking(DistanceMetrics),
    Cycling(CyclingMetrics),
    Swimming(SwimmingMetrics),
    WeightTraining(StrengthMetrics),
    Yoga(YogaMetrics),
    Hiit(IntervalMetrics),
    Cardio(DistanceMetrics),
    Stretching(StretchingMetrics),
    Other,
}

impl ActivityMetrics {
    /// An empty metric set for the given type.
    pub fn empty(activity_type: ActivityType) -> Self {
        Self::take(activity_type, &mut ParsedValues::default())
    }

    /// Strictly parse raw form inputs. Inputs outside the type's schema are ignored.
    pub fn from_inputs(
        activity_type: ActivityType,
        inputs: &BTreeMap<MetricKey, String>,
    ) -> Result<Self, MetricError> {
        let mut values = ParsedValues::default();
        for &key in schema(activity_type) {
            if let Some(raw) = inputs.get(&key) {
                if let Some(value) = key.parse_input(raw)? {
                    values.0.insert(key, value);
                }
            }
        }
        Ok(Self::take(activity_type, &mut values))
    }

    /// Decode metrics returned by the backend, dropping anything that does not
    /// fit the type's schema.
    pub fn from_json_lossy(activity_type: ActivityType, raw: &Map<String, Value>) -> Self {
        let allowed = schema(activity_type);
        for key in raw.keys() {
            if !allowed.iter().any(|k| k.as_str() == key) {
                tracing::debug!(
                    metric = %key,
                    activity_type = %activity_type,
                    "Dropping metric outside schema"
                );
            }
        }

        let mut values = ParsedValues::default();
        for &key in allowed {
            let text = match raw.get(key.as_str()) {
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => continue,
                Some(other) => {
                    tracing::warn!(metric = %key, value = %other, "Dropping non-scalar metric");
                    continue;
                }
            };
            match key.parse_input(&text) {
                Ok(Some(value)) => {
                    values.0.insert(key, value);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(metric = %key, error = %e, "Dropping malformed metric");
                }
            }
        }
        Self::take(activity_type, &mut values)
    }

    fn take(activity_type: ActivityType, values: &mut ParsedValues) -> Self {
        match activity_type {
            ActivityType::Running => Self::Running(DistanceMetrics::take(values)),
            ActivityType::Walking => Self::Walking(DistanceMetrics::take(values)),
            ActivityType::Cycling => Self::Cycling(CyclingMetrics::take(values)),
            ActivityType::Swimming => Self::Swimming(SwimmingMetrics::take(values)),
            ActivityType::WeightTraining => Self::WeightTraining(StrengthMetrics::take(values)),
            ActivityType::Yoga => Self::Yoga(YogaMetrics::take(values)),
            ActivityType::Hiit => Self::Hiit(IntervalMetrics::take(values)),
            ActivityType::Cardio => Self::Cardio(DistanceMetrics::take(values)),
            ActivityType::Stretching => Self::Stretching(StretchingMetrics::take(values)),
            ActivityType::Other => Self::Other,
        }
    }

    pub fn activity_type(&self) -> ActivityType {
        match self {
            Self::Running(_) => ActivityType::Running,
            Self::Walking(_) => ActivityType::Walking,
            Self::Cycling(_) => ActivityType::Cycling,
            Self::Swimming(_) => ActivityType::Swimming,
            Self::WeightTraining(_) => ActivityType::WeightTraining,
            Self::Yoga(_) => ActivityType::Yoga,
            Self::Hiit(_) => ActivityType::Hiit,
            Self::Cardio(_) => ActivityType::Cardio,
            Self::Stretching(_) => ActivityType::Stretching,
            Self::Other => ActivityType::Other,
        }
    }

    /// Populated metrics in schema order.
    pub fn entries(&self) -> Vec<(MetricKey, MetricValue)> {
        match self {
            Self::Running(m) | Self::Walking(m) | Self::Cardio(m) => m.entries(),
            Self::Cycling(m) => m.entries(),
            Self::Swimming(m) => m.entries(),
            Self::WeightTraining(m) => m.entries(),
            Self::Yoga(m) => m.entries(),
            Self::Hiit(m) => m.entries(),
            Self::Stretching(m) => m.entries(),
            Self::Other => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Flat JSON object form used on the wire.
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.entries()
            .into_iter()
            .map(|(key, value)| {
                let json = serde_json::to_value(&value).unwrap_or(Value::Null);
                (key.as_str().to_string(), json)
            })
            .collect()
    }
}

impl Serialize for ActivityMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.entries()
                .into_iter()
                .map(|(key, value)| (key.as_str(), value)),
        )
    }
}
