// ABOUTME: Flat-file object cache laid out as <root>/<kind>/<id>.json
// ABOUTME: Writes fully overwrite, keys are sorted, and a missing root disables persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Object Cache
//!
//! One pretty-printed JSON file per entity. There is no locking and writes are
//! not atomic: a concurrent reader may observe a partially written file.

use crate::constants::cache::FILE_EXTENSION;
use crate::errors::CacheError;
use crate::models::EntityKind;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-entity JSON file store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectCache {
    root: Option<PathBuf>,
}

impl ObjectCache {
    /// Cache rooted at `root`; directories are created on first write
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Cache that stores nothing and reads back nothing
    #[must_use]
    pub const fn disabled() -> Self {
        Self { root: None }
    }

    /// Enabled when a root is configured, disabled otherwise
    #[must_use]
    pub fn from_option(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Whether writes are persisted
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.root.is_some()
    }

    /// Configured root directory
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn kind_dir(&self, kind: EntityKind) -> Option<PathBuf> {
        self.root.as_ref().map(|root| root.join(kind.as_str()))
    }

    fn file_path(&self, kind: EntityKind, id: &str) -> Result<Option<PathBuf>, CacheError> {
        let Some(dir) = self.kind_dir(kind) else {
            return Ok(None);
        };
        if !is_safe_id(id) {
            return Err(CacheError::InvalidId {
                kind: kind.as_str(),
                id: id.to_owned(),
            });
        }
        Ok(Some(dir.join(format!("{id}.{FILE_EXTENSION}"))))
    }

    /// Store `value` as the record for (`kind`, `id`), replacing any prior file
    ///
    /// A disabled cache accepts the write and does nothing.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::InvalidId` if `id` could escape the kind directory,
    /// or another `CacheError` if the directory or file cannot be written
    pub fn put(&self, kind: EntityKind, id: &str, value: &Value) -> Result<(), CacheError> {
        let (Some(dir), Some(path)) = (self.kind_dir(kind), self.file_path(kind, id)?) else {
            return Ok(());
        };
        fs::create_dir_all(&dir).map_err(|e| CacheError::io(&dir, e))?;

        let mut rendered = serde_json::to_string_pretty(&sorted(value))
            .map_err(|e| CacheError::serialization(&path, e))?;
        rendered.push('\n');
        fs::write(&path, rendered).map_err(|e| CacheError::io(&path, e))?;

        debug!(kind = %kind, id, "cached entity");
        Ok(())
    }

    /// Read back the record for (`kind`, `id`)
    ///
    /// # Errors
    ///
    /// Returns `CacheError::InvalidId` for ids that could escape the kind
    /// directory, or another `CacheError` if the file exists but cannot be
    /// read or parsed
    pub fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Value>, CacheError> {
        let Some(path) = self.file_path(kind, id)? else {
            return Ok(None);
        };
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map(Some)
                .map_err(|e| CacheError::serialization(&path, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::io(&path, e)),
        }
    }

    /// Read every record of `kind`, keyed by id
    ///
    /// Files without the cache extension are ignored. A missing directory
    /// yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the directory or any record cannot be read
    pub fn get_all(&self, kind: EntityKind) -> Result<BTreeMap<String, Value>, CacheError> {
        let mut records = BTreeMap::new();
        let Some(dir) = self.kind_dir(kind) else {
            return Ok(records);
        };
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(CacheError::io(&dir, e)),
        };

        for entry in entries {
            let path = entry.map_err(|e| CacheError::io(&dir, e))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let contents = fs::read_to_string(&path).map_err(|e| CacheError::io(&path, e))?;
            let value = serde_json::from_str(&contents)
                .map_err(|e| CacheError::serialization(&path, e))?;
            records.insert(id.to_owned(), value);
        }
        Ok(records)
    }
}

/// Ids become bare file names: no separators, no parent references
fn is_safe_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\', '\0']) && !id.contains("..")
}

/// Deep copy of `value` with every object's keys in sorted order
fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered: BTreeMap<&String, Value> =
                map.iter().map(|(key, value)| (key, sorted(value))).collect();
            Value::Object(
                ordered
                    .into_iter()
                    .map(|(key, value)| (key.clone(), value))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_put_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let cache = ObjectCache::new(dir.path());
        let record = json!({"id": "w1", "created": 5, "ride": {"id": "r1", "title": "Climb"}});

        cache.put(EntityKind::Workout, "w1", &record).unwrap();
        assert_eq!(cache.get(EntityKind::Workout, "w1").unwrap(), Some(record));
        assert!(dir.path().join("workout").join("w1.json").exists());
    }

    #[test]
    fn test_put_overwrites_without_merging() {
        let dir = TempDir::new().unwrap();
        let cache = ObjectCache::new(dir.path());

        cache.put(EntityKind::Ride, "r1", &json!({"id": "r1", "title": "Old"})).unwrap();
        cache.put(EntityKind::Ride, "r1", &json!({"id": "r1"})).unwrap();

        assert_eq!(
            cache.get(EntityKind::Ride, "r1").unwrap(),
            Some(json!({"id": "r1"}))
        );
    }

    #[test]
    fn test_files_are_pretty_with_sorted_keys() {
        let dir = TempDir::new().unwrap();
        let cache = ObjectCache::new(dir.path());
        cache.put(EntityKind::User, "u1", &json!({"b": 1, "a": {"d": 2, "c": 3}})).unwrap();

        let text = fs::read_to_string(dir.path().join("user").join("u1.json")).unwrap();
        assert!(text.find("\"a\"").unwrap() < text.find("\"b\"").unwrap());
        assert!(text.find("\"c\"").unwrap() < text.find("\"d\"").unwrap());
        assert!(text.contains("\n  \"a\""));
    }

    #[test]
    fn test_get_all_keys_by_file_stem() {
        let dir = TempDir::new().unwrap();
        let cache = ObjectCache::new(dir.path());
        cache.put(EntityKind::Workout, "w1", &json!({"id": "w1"})).unwrap();
        cache.put(EntityKind::Workout, "w2", &json!({"id": "w2"})).unwrap();
        fs::write(dir.path().join("workout").join("notes.txt"), "ignored").unwrap();

        let all = cache.get_all(EntityKind::Workout).unwrap();
        assert_eq!(all.keys().collect::<Vec<_>>(), vec!["w1", "w2"]);
        assert!(cache.get_all(EntityKind::Challenge).unwrap().is_empty());
    }

    #[test]
    fn test_ids_that_escape_the_kind_directory_are_rejected() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("cache");
        let cache = ObjectCache::new(&root);

        for id in ["../escape", "a/b", "a\\b", "..", ""] {
            let err = cache.put(EntityKind::Workout, id, &json!({"id": id})).unwrap_err();
            assert!(matches!(err, CacheError::InvalidId { kind: "workout", .. }), "{id}: {err}");
        }
        assert!(matches!(
            cache.get(EntityKind::Workout, "../escape"),
            Err(CacheError::InvalidId { .. })
        ));
        assert!(!dir.path().join("escape.json").exists());
        assert!(!root.join("escape.json").exists());
    }

    #[test]
    fn test_disabled_cache_ignores_any_id() {
        let cache = ObjectCache::disabled();
        cache.put(EntityKind::Workout, "../escape", &json!({})).unwrap();
        assert_eq!(cache.get(EntityKind::Workout, "../escape").unwrap(), None);
    }

    #[test]
    fn test_disabled_cache_is_silent() {
        let cache = ObjectCache::disabled();
        assert!(!cache.is_enabled());
        cache.put(EntityKind::Workout, "w1", &json!({"id": "w1"})).unwrap();
        assert_eq!(cache.get(EntityKind::Workout, "w1").unwrap(), None);
        assert!(cache.get_all(EntityKind::Workout).unwrap().is_empty());
    }
}
