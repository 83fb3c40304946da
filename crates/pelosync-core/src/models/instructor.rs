// ABOUTME: Instructor profile embedded in ride listings
// ABOUTME: Cached under the `instructor` kind, keyed by instructor id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::json::{object, opt_string, required_id};
use super::{Entity, EntityKind};
use crate::errors::ModelError;
use serde_json::{Map, Value};
use std::fmt;

const KIND: &str = "instructor";

/// An instructor who teaches rides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructor {
    /// Instructor id
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Full biography
    pub bio: Option<String>,
    /// Short biography
    pub short_bio: Option<String>,
    /// Signature quote
    pub quote: Option<String>,
    /// Music preferences
    pub music_bio: Option<String>,
    /// Linked playlist
    pub spotify_playlist_uri: Option<String>,
    /// Athletic background
    pub background: Option<String>,
}

impl Instructor {
    /// Decode an instructor record
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if the record is not an object or has no `id`
    pub fn from_json(value: &Value) -> Result<Self, ModelError> {
        let record = object(value, KIND)?;
        Ok(Self {
            id: required_id(record, KIND, "id")?,
            name: opt_string(record, "name"),
            first_name: opt_string(record, "first_name"),
            last_name: opt_string(record, "last_name"),
            bio: opt_string(record, "bio"),
            short_bio: opt_string(record, "short_bio"),
            quote: opt_string(record, "quote"),
            music_bio: opt_string(record, "music_bio"),
            spotify_playlist_uri: opt_string(record, "spotify_playlist_uri"),
            background: opt_string(record, "background"),
        })
    }

    /// Name to show for this instructor
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl fmt::Display for Instructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Entity for Instructor {
    fn kind(&self) -> EntityKind {
        EntityKind::Instructor
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
        for (key, value) in [
            ("name", &self.name),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("bio", &self.bio),
            ("short_bio", &self.short_bio),
            ("quote", &self.quote),
            ("music_bio", &self.music_bio),
            ("spotify_playlist_uri", &self.spotify_playlist_uri),
            ("background", &self.background),
        ] {
            map.insert(key.into(), value.clone().map_or(Value::Null, Value::String));
        }
        Some(map)
    }
}
