// ABOUTME: Builds entities from remote JSON and persists each record as a side effect
// ABOUTME: Embedded rides and instructors are cached separately and replaced by their ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::client::PelotonClient;
use pelosync_core::models::{Challenge, User, Workout, WorkoutMetrics};
use pelosync_core::{EntityKind, ProviderResult};
use serde_json::Value;
use std::mem;

/// Pull an embedded object out of `record[field]`, leaving its id in place
///
/// Returns the embedded object when one was found and it carried an id.
fn detach_embedded(record: &mut Value, field: &str) -> Option<(String, Value)> {
    let slot = record.get_mut(field)?;
    let id = match slot.get("id")? {
        Value::String(id) => id.clone(),
        Value::Number(id) => id.to_string(),
        _ => return None,
    };
    let embedded = mem::replace(slot, Value::String(id.clone()));
    Some((id, embedded))
}

impl PelotonClient {
    /// Decode a workout record and cache it, ride and instructor included
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Model` for malformed records or
    /// `ProviderError::Cache` if a write fails
    pub fn build_workout(&self, record: &Value) -> ProviderResult<Workout> {
        let workout = Workout::from_json(record)?;

        let mut normalized = record.clone();
        if let Some((ride_id, ride)) = detach_embedded(&mut normalized, "ride") {
            self.cache_ride(&ride_id, ride)?;
        }
        self.cache().put(EntityKind::Workout, &workout.id, &normalized)?;
        Ok(workout)
    }

    fn cache_ride(&self, ride_id: &str, mut ride: Value) -> ProviderResult<()> {
        if let Some((instructor_id, instructor)) = detach_embedded(&mut ride, "instructor") {
            self.cache()
                .put(EntityKind::Instructor, &instructor_id, &instructor)?;
        }
        self.cache().put(EntityKind::Ride, ride_id, &ride)?;
        Ok(())
    }

    /// Stamp a performance graph with its workout id, cache it, and decode it
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Model` for malformed records or
    /// `ProviderError::Cache` if the write fails
    pub fn build_metrics(&self, workout_id: &str, mut record: Value) -> ProviderResult<WorkoutMetrics> {
        if let Some(fields) = record.as_object_mut() {
            fields.insert("id".into(), Value::String(workout_id.to_owned()));
        }
        let metrics = WorkoutMetrics::from_json(&record)?;
        self.cache().put(EntityKind::Metrics, workout_id, &record)?;
        Ok(metrics)
    }

    /// Decode a challenge entry and cache it under its challenge id
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Model` for malformed records or
    /// `ProviderError::Cache` if the write fails
    pub fn build_challenge(&self, record: &Value) -> ProviderResult<Challenge> {
        let challenge = Challenge::from_json(record)?;
        self.cache().put(EntityKind::Challenge, &challenge.id, record)?;
        Ok(challenge)
    }

    /// Decode the merged user profile and cache it under the user id
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Model` for malformed records or
    /// `ProviderError::Cache` if the write fails
    pub fn build_user(&self, record: &Value) -> ProviderResult<User> {
        let user = User::from_json(record)?;
        self.cache().put(EntityKind::User, &user.id, record)?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detach_embedded_leaves_id() {
        let mut record = json!({"id": "w1", "ride": {"id": "r1", "title": "Climb"}});
        let (id, ride) = detach_embedded(&mut record, "ride").unwrap();
        assert_eq!(id, "r1");
        assert_eq!(ride["title"], "Climb");
        assert_eq!(record["ride"], "r1");
    }

    #[test]
    fn test_detach_embedded_ignores_plain_ids() {
        let mut record = json!({"id": "w1", "ride": "r1"});
        assert!(detach_embedded(&mut record, "ride").is_none());
        assert!(detach_embedded(&mut record, "missing").is_none());
    }
}
