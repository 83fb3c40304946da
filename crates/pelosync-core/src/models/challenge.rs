// ABOUTME: Joined challenge with the service's authoritative progress value
// ABOUTME: Identity comes from `challenge_summary.id`, progress from `progress.metric_value`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::json::{object, opt_f64, opt_string, required_id};
use super::{Entity, EntityKind};
use crate::errors::ModelError;
use serde_json::{Map, Value};

const KIND: &str = "challenge";

/// A tracked challenge (e.g. the annual minutes goal)
#[derive(Debug, Clone, PartialEq)]
pub struct Challenge {
    /// Challenge id
    pub id: String,
    /// Challenge title
    pub title: Option<String>,
    /// Accumulated progress as reported by the service
    pub progress_metric: f64,
    /// Unit of the progress value
    pub progress_unit: Option<String>,
}

impl Challenge {
    /// Decode a challenge entry
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if `challenge_summary.id` is missing
    pub fn from_json(value: &Value) -> Result<Self, ModelError> {
        let record = object(value, KIND)?;
        let summary = record
            .get("challenge_summary")
            .and_then(Value::as_object)
            .ok_or(ModelError::missing(KIND, "challenge_summary"))?;
        let progress = record.get("progress").and_then(Value::as_object);

        Ok(Self {
            id: required_id(summary, KIND, "id")?,
            title: opt_string(summary, "title"),
            progress_metric: progress
                .and_then(|progress| opt_f64(progress, "metric_value"))
                .unwrap_or_default(),
            progress_unit: progress.and_then(|progress| opt_string(progress, "metric_display_unit")),
        })
    }
}

impl Entity for Challenge {
    fn kind(&self) -> EntityKind {
        EntityKind::Challenge
    }

    fn identity(&self) -> &str {
        &self.id
    }

    fn to_map(&self, depth: usize, _include_unloaded: bool) -> Option<Map<String, Value>> {
        if depth == 0 {
            return None;
        }
        let mut map = Map::new();
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert("title".into(), self.title.clone().map_or(Value::Null, Value::String));
        map.insert("progress_metric".into(), Value::from(self.progress_metric));
        map.insert(
            "progress_unit".into(),
            self.progress_unit.clone().map_or(Value::Null, Value::String),
        );
        Some(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_summary_and_progress() {
        let challenge = Challenge::from_json(&json!({
            "challenge_summary": {"id": "c1", "title": "Annual 2026"},
            "progress": {"metric_value": 1234.0, "metric_display_unit": "min"}
        }))
        .unwrap();
        assert_eq!(challenge.id, "c1");
        assert!((challenge.progress_metric - 1234.0).abs() < f64::EPSILON);
        assert_eq!(challenge.progress_unit.as_deref(), Some("min"));
    }

    #[test]
    fn test_missing_summary_is_rejected() {
        let err = Challenge::from_json(&json!({"progress": {}})).unwrap_err();
        assert_eq!(err, ModelError::missing("challenge", "challenge_summary"));
    }
}
