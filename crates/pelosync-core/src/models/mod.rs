// ABOUTME: Domain entities synchronized from the remote service and read back from cache
// ABOUTME: Defines the entity capability trait and the cache-addressable entity kinds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Entity Models
//!
//! Every entity is decoded from the JSON the service returns (or the JSON a
//! previous sync wrote to the cache). Entities are transient: they are rebuilt
//! per response or per cache read and carry no identity beyond their `id`.

mod json;

/// Achievements earned during a workout
pub mod achievement;
/// Tracked annual challenge
pub mod challenge;
/// Instructor profile
pub mod instructor;
/// Lazy field state
pub mod lazy;
/// Per-workout performance metrics
pub mod metrics;
/// Class (ride) a workout was taken from
pub mod ride;
/// Workout timezones
pub mod timezone;
/// Account profile
pub mod user;
/// Workout sessions and their lazily-loaded fields
pub mod workout;

pub use achievement::Achievement;
pub use challenge::Challenge;
pub use instructor::Instructor;
pub use lazy::Lazy;
pub use metrics::{Metric, MetricCategory, MetricSummary, SummaryKind, WorkoutMetrics};
pub use ride::Ride;
pub use timezone::WorkoutTimezone;
pub use user::{User, UserStreaks};
pub use workout::{Workout, WorkoutDetailSource};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Entity kinds that own a cache directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Workout session
    Workout,
    /// Class template
    Ride,
    /// Instructor
    Instructor,
    /// Performance graph of a workout
    Metrics,
    /// Account profile
    User,
    /// Annual challenge
    Challenge,
}

impl EntityKind {
    /// Every cacheable kind
    pub const ALL: [Self; 6] = [
        Self::Workout,
        Self::Ride,
        Self::Instructor,
        Self::Metrics,
        Self::User,
        Self::Challenge,
    ];

    /// Directory name under the cache root
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Ride => "ride",
            Self::Instructor => "instructor",
            Self::Metrics => "metrics",
            Self::User => "user",
            Self::Challenge => "challenge",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability shared by every entity kind
pub trait Entity {
    /// Cache directory this entity lives in
    fn kind(&self) -> EntityKind;

    /// Stable identifier, also the cache key
    fn identity(&self) -> &str;

    /// Render the entity as a JSON map
    ///
    /// `depth` bounds nesting: depth 0 yields `None`, nested entities are only
    /// included while `depth > 1`. Lazy fields that are not loaded are omitted
    /// unless `include_unloaded` is set, in which case they render as `null`.
    /// Rendering never fetches anything.
    fn to_map(&self, depth: usize, include_unloaded: bool) -> Option<Map<String, Value>>;
}

/// Render a nested entity one level down, if depth allows
pub(crate) fn nested<E: Entity>(
    entity: &E,
    depth: usize,
    include_unloaded: bool,
) -> Option<Value> {
    if depth > 1 {
        entity
            .to_map(depth - 1, include_unloaded)
            .map(Value::Object)
    } else {
        None
    }
}

/// Insert a lazy field, honouring `include_unloaded`
pub(crate) fn insert_lazy<T>(
    map: &mut Map<String, Value>,
    key: &str,
    field: &Lazy<T>,
    include_unloaded: bool,
    render: impl FnOnce(&T) -> Option<Value>,
) {
    match field {
        Lazy::Loaded(value) => {
            if let Some(rendered) = render(value) {
                map.insert(key.to_owned(), rendered);
            }
        }
        Lazy::NotLoaded if include_unloaded => {
            map.insert(key.to_owned(), Value::Null);
        }
        Lazy::NotLoaded => {}
    }
}
