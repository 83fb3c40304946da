// ABOUTME: Achievement templates awarded during a workout
// ABOUTME: Decoded from the `achievement_templates` array of a workout detail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::json::{object, opt_string};
use crate::errors::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single achievement earned during a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Template id
    pub id: Option<String>,
    /// Machine-readable slug
    pub slug: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Long description
    pub description: Option<String>,
    /// Badge image
    pub image_url: Option<String>,
}

impl Achievement {
    /// Decode one entry of `achievement_templates`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NotAnObject` if the entry is not a JSON object
    pub fn from_json(value: &Value) -> Result<Self, ModelError> {
        let record = object(value, "achievement")?;
        Ok(Self {
            id: opt_string(record, "id"),
            slug: opt_string(record, "slug"),
            name: opt_string(record, "name"),
            description: opt_string(record, "description"),
            image_url: opt_string(record, "image_url"),
        })
    }

    /// Decode a whole `achievement_templates` array
    ///
    /// # Errors
    ///
    /// Returns the first entry that fails to decode
    pub fn list_from_json(value: &Value) -> Result<Vec<Self>, ModelError> {
        value
            .as_array()
            .map(|entries| entries.iter().map(Self::from_json).collect())
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
