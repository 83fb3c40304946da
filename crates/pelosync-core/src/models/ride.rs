// ABOUTME: Ride (class) template that a workout was taken from
// ABOUTME: Carries title, duration, difficulty attributes, air time, and an optional instructor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::json::{object, opt_f64, opt_i64, opt_string, opt_time, opt_u64, required_id};
use super::{nested, Entity, EntityKind, Instructor, WorkoutTimezone};
use crate::errors::ModelError;
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use std::fmt;

const KIND: &str = "ride";

/// A class template
#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    /// Ride id
    pub id: String,
    /// Class title
    pub title: Option<String>,
    /// Class description
    pub description: Option<String>,
    /// Scheduled length in seconds
    pub duration: Option<i64>,
    /// Average member difficulty rating
    pub difficulty_rating_avg: Option<f64>,
    /// Number of difficulty ratings
    pub difficulty_rating_count: Option<u64>,
    /// Service difficulty estimate
    pub difficulty_estimate: Option<f64>,
    /// Difficulty bucket label
    pub difficulty_level: Option<String>,
    /// Discipline (cycling, running, ...)
    pub fitness_discipline: Option<String>,
    /// When the class first aired, in the owning workout's timezone
    pub original_air_time: Option<DateTime<FixedOffset>>,
    /// Instructor id, present whether or not the instructor is embedded
    pub instructor_id: Option<String>,
    /// Embedded instructor, if the response joined it
    pub instructor: Option<Instructor>,
}

impl Ride {
    /// Decode a ride record, rendering times in the owning workout's `timezone`
    ///
    /// `instructor` may be an embedded object or just the instructor id (the
    /// normalized form written to the cache).
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if the record or its embedded instructor is malformed
    pub fn from_json(value: &Value, timezone: WorkoutTimezone) -> Result<Self, ModelError> {
        let record = object(value, KIND)?;

        let (instructor, instructor_id) = match record.get("instructor") {
            Some(embedded @ Value::Object(_)) => {
                let instructor = Instructor::from_json(embedded)?;
                let id = instructor.id.clone();
                (Some(instructor), Some(id))
            }
            Some(Value::String(id)) => (None, Some(id.clone())),
            _ => (None, opt_string(record, "instructor_id")),
        };

        Ok(Self {
            id: required_id(record, KIND, "id")?,
            title: opt_string(record, "title"),
            description: opt_string(record, "description"),
            duration: opt_i64(record, "duration"),
            difficulty_rating_avg: opt_f64(record, "difficulty_rating_avg"),
            difficulty_rating_count: opt_u64(record, "difficulty_rating_count"),
            difficulty_estimate: opt_f64(record, "difficulty_estimate"),
            difficulty_level: opt_string(record, "difficulty_level"),
            fitness_discipline: opt_string(record, "fitness_discipline"),
            original_air_time: opt_i64(record, "original_air_time")
                .and_then(|secs| timezone.at(secs)),
            instructor_id,
            instructor,
        })
    }

    /// Title to show for this ride
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

impl fmt::Display for Ride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_title())
    }
}

impl Entity for Ride {
    fn kind(&self) -> EntityKind {
        EntityKind::Ride
    }

    fn identity(&self) -> &str {
        &self.id
    }

    fn to_map(&self, depth: usize, include_unloaded: bool) -> Option<Map<String, Value>> {
        if depth == 0 {
            return None;
        }
        let mut map = Map::new();
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert("title".into(), self.title.clone().map_or(Value::Null, Value::String));
        map.insert(
            "description".into(),
            self.description.clone().map_or(Value::Null, Value::String),
        );
        map.insert("duration".into(), self.duration.map_or(Value::Null, Value::from));
        map.insert(
            "difficulty_rating_avg".into(),
            self.difficulty_rating_avg.map_or(Value::Null, Value::from),
        );
        map.insert(
            "difficulty_rating_count".into(),
            self.difficulty_rating_count.map_or(Value::Null, Value::from),
        );
        map.insert(
            "difficulty_estimate".into(),
            self.difficulty_estimate.map_or(Value::Null, Value::from),
        );
        map.insert(
            "difficulty_level".into(),
            self.difficulty_level.clone().map_or(Value::Null, Value::String),
        );
        map.insert(
            "fitness_discipline".into(),
            self.fitness_discipline.clone().map_or(Value::Null, Value::String),
        );
        map.insert("original_air_time".into(), opt_time(self.original_air_time));
        if let Some(instructor) = self
            .instructor
            .as_ref()
            .and_then(|instructor| nested(instructor, depth, include_unloaded))
        {
            map.insert("instructor".into(), instructor);
        }
        Some(map)
    }
}
