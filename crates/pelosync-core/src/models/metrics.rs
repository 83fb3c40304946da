// ABOUTME: Per-workout performance graph: summary totals and named metric series
// ABOUTME: Unknown summary or category slugs are logged and skipped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::json::{f64_list, object, opt_f64, opt_i64, opt_string, required_id};
use super::{Entity, EntityKind};
use crate::errors::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

const KIND: &str = "metrics";

/// Summary totals reported for a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    /// Total output (kJ); the service calls it `total_output`
    Output,
    /// Distance covered
    Distance,
    /// Calories burned
    Calories,
    /// Elevation gained
    Elevation,
}

impl SummaryKind {
    /// Map a service slug to a known summary
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "total_output" => Some(Self::Output),
            "distance" => Some(Self::Distance),
            "calories" => Some(Self::Calories),
            "elevation" => Some(Self::Elevation),
            _ => None,
        }
    }

    /// Key used when rendering
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Output => "output_summary",
            Self::Distance => "distance_summary",
            Self::Calories => "calories_summary",
            Self::Elevation => "elevation_summary",
        }
    }
}

/// Named time series reported for a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    /// Power output
    Output,
    /// Cadence
    Cadence,
    /// Resistance
    Resistance,
    /// Speed
    Speed,
    /// Heart rate
    HeartRate,
    /// Pace
    Pace,
    /// Treadmill incline
    Incline,
    /// Altitude
    Altitude,
}

impl MetricCategory {
    /// Map a service slug to a known category
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "output" => Some(Self::Output),
            "cadence" => Some(Self::Cadence),
            "resistance" => Some(Self::Resistance),
            "speed" => Some(Self::Speed),
            "heart_rate" => Some(Self::HeartRate),
            "pace" => Some(Self::Pace),
            "incline" => Some(Self::Incline),
            "altitude" => Some(Self::Altitude),
            _ => None,
        }
    }

    /// Service slug
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Output => "output",
            Self::Cadence => "cadence",
            Self::Resistance => "resistance",
            Self::Speed => "speed",
            Self::HeartRate => "heart_rate",
            Self::Pace => "pace",
            Self::Incline => "incline",
            Self::Altitude => "altitude",
        }
    }
}

/// One summary total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Display name
    pub name: Option<String>,
    /// Total value
    pub value: Option<f64>,
    /// Display unit
    pub unit: Option<String>,
    /// Service slug
    pub slug: String,
}

/// One metric series with its aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Display name
    pub name: Option<String>,
    /// Display unit
    pub unit: Option<String>,
    /// Service slug
    pub slug: String,
    /// Average over the workout
    pub average: Option<f64>,
    /// Maximum over the workout
    pub max: Option<f64>,
    /// Sampled values
    pub values: Vec<f64>,
}

/// All metrics of one workout
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutMetrics {
    /// Id of the workout these metrics belong to
    pub workout_id: String,
    /// Workout length in seconds
    pub duration: Option<i64>,
    /// Metrics type of the first segment, empty when there are no segments
    pub fitness_discipline: String,
    summaries: BTreeMap<SummaryKind, MetricSummary>,
    categories: BTreeMap<MetricCategory, Metric>,
}

impl WorkoutMetrics {
    /// Decode a performance graph response
    ///
    /// The response must already be stamped with the workout `id`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if the record is not an object or has no `id`
    pub fn from_json(value: &Value) -> Result<Self, ModelError> {
        let record = object(value, KIND)?;
        let workout_id = required_id(record, KIND, "id")?;

        let fitness_discipline = record
            .get("segment_list")
            .and_then(Value::as_array)
            .and_then(|segments| segments.first())
            .and_then(|segment| segment.get("metrics_type"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let mut summaries = BTreeMap::new();
        for entry in array_of_objects(record, "summaries") {
            let slug = opt_string(entry, "slug").unwrap_or_default();
            let Some(kind) = SummaryKind::from_slug(&slug) else {
                warn!("Unknown metric summary {slug} found for workout {workout_id}");
                continue;
            };
            summaries.insert(
                kind,
                MetricSummary {
                    name: opt_string(entry, "display_name"),
                    value: opt_f64(entry, "value"),
                    unit: opt_string(entry, "display_unit"),
                    slug,
                },
            );
        }

        let mut categories = BTreeMap::new();
        for entry in array_of_objects(record, "metrics") {
            let slug = opt_string(entry, "slug").unwrap_or_default();
            let Some(category) = MetricCategory::from_slug(&slug) else {
                warn!("Unknown metric category {slug} found for workout {workout_id}");
                continue;
            };
            categories.insert(
                category,
                Metric {
                    name: opt_string(entry, "display_name"),
                    unit: opt_string(entry, "display_unit"),
                    average: opt_f64(entry, "average_value"),
                    max: opt_f64(entry, "max_value"),
                    values: f64_list(entry, "values"),
                    slug,
                },
            );
        }

        Ok(Self {
            workout_id,
            duration: opt_i64(record, "duration"),
            fitness_discipline,
            summaries,
            categories,
        })
    }

    /// Summary total of `kind`, if reported
    #[must_use]
    pub fn summary(&self, kind: SummaryKind) -> Option<&MetricSummary> {
        self.summaries.get(&kind)
    }

    /// Series for `category`, if reported
    #[must_use]
    pub fn category(&self, category: MetricCategory) -> Option<&Metric> {
        self.categories.get(&category)
    }

    /// Iterate all reported series
    pub fn categories(&self) -> impl Iterator<Item = (&MetricCategory, &Metric)> {
        self.categories.iter()
    }
}

fn array_of_objects<'a>(
    record: &'a Map<String, Value>,
    field: &str,
) -> impl Iterator<Item = &'a Map<String, Value>> {
    record
        .get(field)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

impl Entity for WorkoutMetrics {
    fn kind(&self) -> EntityKind {
        EntityKind::Metrics
    }

    fn identity(&self) -> &str {
        &self.workout_id
    }

    fn to_map(&self, depth: usize, _include_unloaded: bool) -> Option<Map<String, Value>> {
        if depth == 0 {
            return None;
        }
        let mut map = Map::new();
        map.insert("workout_id".into(), Value::String(self.workout_id.clone()));
        map.insert("duration".into(), self.duration.map_or(Value::Null, Value::from));
        map.insert(
            "fitness_discipline".into(),
            Value::String(self.fitness_discipline.clone()),
        );
        for (kind, summary) in &self.summaries {
            if let Ok(rendered) = serde_json::to_value(summary) {
                map.insert(kind.key().into(), rendered);
            }
        }
        for (category, metric) in &self.categories {
            if let Ok(rendered) = serde_json::to_value(metric) {
                map.insert(category.slug().into(), rendered);
            }
        }
        Some(map)
    }
}
