// ABOUTME: Account profile with FTP, heart-rate settings, and the service's streak counters
// ABOUTME: Built from the user record merged over the `me` record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::json::{f64_list, object, opt_f64, opt_string, opt_u64, required_id};
use super::{Entity, EntityKind};
use crate::errors::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

const KIND: &str = "user";

/// Streak counters maintained by the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStreaks {
    /// Consecutive weeks with a workout, as reported
    pub current_weekly: Option<u64>,
    /// Consecutive days with a workout, as reported
    pub current_daily: Option<u64>,
    /// Longest weekly streak
    pub best_weekly: Option<u64>,
}

/// The authenticated account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// User id
    pub id: String,
    /// Login name
    pub username: Option<String>,
    /// Max heart rate set by the user
    pub customized_max_heart_rate: Option<f64>,
    /// FTP estimated by the service
    pub estimated_cycling_ftp: Option<f64>,
    /// Current cycling FTP
    pub cycling_ftp: Option<f64>,
    /// FTP from the last FTP test
    pub cycling_workout_ftp: Option<f64>,
    /// Heart-rate zone bounds set by the user
    pub customized_heart_rate_zones: Vec<f64>,
    /// Default heart-rate zone bounds
    pub default_heart_rate_zones: Vec<f64>,
    /// Streak counters
    pub streaks: UserStreaks,
}

impl User {
    /// Decode a (merged) user record
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if the record is not an object or has no `id`
    pub fn from_json(value: &Value) -> Result<Self, ModelError> {
        let record = object(value, KIND)?;
        let streaks = record
            .get("streaks")
            .and_then(Value::as_object)
            .map(|streaks| UserStreaks {
                current_weekly: opt_u64(streaks, "current_weekly"),
                current_daily: opt_u64(streaks, "current_daily"),
                best_weekly: opt_u64(streaks, "best_weekly"),
            })
            .unwrap_or_default();

        Ok(Self {
            id: required_id(record, KIND, "id")?,
            username: opt_string(record, "username"),
            customized_max_heart_rate: opt_f64(record, "customized_max_heart_rate"),
            estimated_cycling_ftp: opt_f64(record, "estimated_cycling_ftp"),
            cycling_ftp: opt_f64(record, "cycling_ftp"),
            cycling_workout_ftp: opt_f64(record, "cycling_workout_ftp"),
            customized_heart_rate_zones: f64_list(record, "customized_heart_rate_zones"),
            default_heart_rate_zones: f64_list(record, "default_heart_rate_zones"),
            streaks,
        })
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.username.as_deref().unwrap_or(&self.id))
    }
}

impl Entity for User {
    fn kind(&self) -> EntityKind {
        EntityKind::User
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
        map.insert(
            "username".into(),
            self.username.clone().map_or(Value::Null, Value::String),
        );
        for (key, value) in [
            ("customized_max_heart_rate", self.customized_max_heart_rate),
            ("estimated_cycling_ftp", self.estimated_cycling_ftp),
            ("cycling_ftp", self.cycling_ftp),
            ("cycling_workout_ftp", self.cycling_workout_ftp),
        ] {
            map.insert(key.into(), value.map_or(Value::Null, Value::from));
        }
        map.insert(
            "customized_heart_rate_zones".into(),
            Value::from(self.customized_heart_rate_zones.clone()),
        );
        map.insert(
            "default_heart_rate_zones".into(),
            Value::from(self.default_heart_rate_zones.clone()),
        );
        if let Ok(streaks) = serde_json::to_value(self.streaks) {
            map.insert("streaks".into(), streaks);
        }
        Some(map)
    }
}
