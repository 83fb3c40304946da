// ABOUTME: Incremental refresh of the workout cache from the remote service
// ABOUTME: Lists workouts newer than the newest cached one, hydrates each, then refreshes account data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Sync Engine
//!
//! A refresh is naturally incremental: the newest cached workout bounds the
//! listing, so re-running after a failure only fetches what is still missing.
//! Any remote error aborts the run; there is no retry.

use chrono::{DateTime, FixedOffset};
use pelosync_core::models::WorkoutDetailSource;
use pelosync_core::{CacheError, EntityKind, ObjectCache, ProviderResult};
use pelosync_providers::PelotonClient;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// One newly synced workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutSummary {
    /// Start of the workout in its own offset
    pub start_time: Option<DateTime<FixedOffset>>,
    /// Ride title
    pub title: String,
    /// Instructor name, `"None"` when the ride has none
    pub instructor: String,
}

/// Id of the cached workout with the greatest `created` time
///
/// Returns `None` for an empty or disabled cache. Records without a positive
/// `created` value are skipped.
///
/// # Errors
///
/// Returns `CacheError` if the workout directory cannot be read
pub fn find_last_synced_id(cache: &ObjectCache) -> Result<Option<String>, CacheError> {
    let workouts = cache.get_all(EntityKind::Workout)?;
    let mut newest: Option<(i64, String)> = None;
    for (file_id, record) in &workouts {
        let Some(created) = record.get("created").and_then(Value::as_i64) else {
            continue;
        };
        if created <= newest.as_ref().map_or(0, |(max, _)| *max) {
            continue;
        }
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .map_or_else(|| file_id.clone(), str::to_owned);
        newest = Some((created, id));
    }
    Ok(newest.map(|(_, id)| id))
}

/// Orchestrates incremental refreshes through one client
#[derive(Debug)]
pub struct SyncEngine {
    client: PelotonClient,
}

impl SyncEngine {
    /// Engine refreshing through `client` into the client's cache
    #[must_use]
    pub const fn new(client: PelotonClient) -> Self {
        Self { client }
    }

    /// Underlying client
    #[must_use]
    pub const fn client(&self) -> &PelotonClient {
        &self.client
    }

    /// Sync every workout newer than the newest cached one
    ///
    /// Each new workout gets a detail fetch and a metrics fetch. Challenges
    /// and the user profile are refreshed on every run.
    ///
    /// # Errors
    ///
    /// Returns the first remote or cache error; work done before it stays
    /// cached
    pub async fn refresh(&self) -> ProviderResult<Vec<WorkoutSummary>> {
        let cutoff = find_last_synced_id(self.client.cache())?;
        let workouts = self.client.list_workouts(cutoff.as_deref()).await?;
        info!(
            count = workouts.len(),
            cutoff = cutoff.as_deref().unwrap_or("none"),
            "found workouts since the last cached one"
        );

        let mut summaries = Vec::with_capacity(workouts.len());
        for workout in &workouts {
            let summary = WorkoutSummary {
                start_time: workout.start_time,
                title: workout.title(),
                instructor: workout.instructor_name(),
            };
            info!(
                start = ?summary.start_time,
                title = %summary.title,
                instructor = %summary.instructor,
                "synced workout"
            );
            summaries.push(summary);

            self.client.get_workout(&workout.id).await?;
            self.client.fetch_workout_metrics(&workout.id).await?;
        }

        let challenges = self.client.current_challenges().await?;
        let user = self.client.me().await?;
        info!(challenges = challenges.len(), user = %user, "refreshed account data");

        Ok(summaries)
    }
}
