// ABOUTME: Analysis engine rebuilding workout statistics from the object cache on every run
// ABOUTME: Accumulated minutes come from the tracked challenge, weekly streak from the user profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analysis Engine
//!
//! Nothing is kept between runs: each call rescans the cache directories.
//! Accumulated minutes are read from the service's own challenge progress
//! rather than summed locally, since local sums drift from the service total.

use crate::error::{AnalysisError, AnalysisResult};
use crate::projection::{eoy_estimate_on, projection_series, ProjectionPoint};
use crate::streaks::StreakCalculator;
use chrono::{Datelike, Local, NaiveDate};
use pelosync_core::constants::analysis::DEFAULT_ANNUAL_CHALLENGE_ID;
use pelosync_core::models::{Challenge, Instructor, Ride, User, Workout};
use pelosync_core::{EntityKind, ObjectCache};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Statistics derived from the cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Day the statistics were computed for
    pub as_of: NaiveDate,
    /// Minutes accumulated this year, as reported by the tracked challenge
    pub accumulated_minutes: f64,
    /// Minutes projected for the whole year
    pub eoy_estimate: f64,
    /// Consecutive workout days ending at the newest workout
    pub current_daily_streak: u32,
    /// Weekly streak as reported by the service
    pub current_weekly_streak: u64,
    /// Cumulative minutes per workout day of the current year
    pub projection: Vec<ProjectionPoint>,
}

/// Computes [`Analysis`] from a cache directory
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    cache: ObjectCache,
    annual_challenge_id: String,
}

impl AnalysisEngine {
    /// Engine reading `cache` and tracking the default annual challenge
    #[must_use]
    pub fn new(cache: ObjectCache) -> Self {
        Self {
            cache,
            annual_challenge_id: DEFAULT_ANNUAL_CHALLENGE_ID.to_owned(),
        }
    }

    /// Track a different challenge for accumulated minutes
    #[must_use]
    pub fn with_annual_challenge(mut self, challenge_id: impl Into<String>) -> Self {
        self.annual_challenge_id = challenge_id.into();
        self
    }

    /// Analyze as of the local calendar date
    ///
    /// # Errors
    ///
    /// See [`Self::analyze_on`]
    pub fn analyze(&self) -> AnalysisResult<Analysis> {
        self.analyze_on(Local::now().date_naive())
    }

    /// Analyze as of `today`
    ///
    /// # Errors
    ///
    /// Returns `CacheDisabled` without a cache directory, `MissingChallenge`
    /// or `MissingUser` when those records were never synced, and cache or
    /// decoding errors for unreadable records
    pub fn analyze_on(&self, today: NaiveDate) -> AnalysisResult<Analysis> {
        if !self.cache.is_enabled() {
            return Err(AnalysisError::CacheDisabled);
        }

        let workouts = self.cached_workouts()?;
        let accumulated_minutes = self.annual_challenge()?.progress_metric;
        let current_weekly_streak = self.user()?.streaks.current_weekly.unwrap_or_default();

        let dates: Vec<NaiveDate> = workouts.iter().filter_map(Workout::device_date).collect();
        let sessions: Vec<(NaiveDate, f64)> = workouts
            .iter()
            .filter_map(|workout| Some((workout.device_date()?, workout.duration_minutes())))
            .collect();

        let analysis = Analysis {
            as_of: today,
            accumulated_minutes,
            eoy_estimate: eoy_estimate_on(accumulated_minutes, today),
            current_daily_streak: StreakCalculator::current_daily_streak(&dates),
            current_weekly_streak,
            projection: projection_series(&sessions, today.year()),
        };
        debug!(
            workouts = workouts.len(),
            accumulated_minutes,
            daily_streak = analysis.current_daily_streak,
            "analysis complete"
        );
        Ok(analysis)
    }

    /// Every cached workout, rides and instructors attached when cached
    ///
    /// # Errors
    ///
    /// Returns cache or decoding errors
    pub fn cached_workouts(&self) -> AnalysisResult<Vec<Workout>> {
        let rides = self.cache.get_all(EntityKind::Ride)?;
        let instructors = self.cache.get_all(EntityKind::Instructor)?;

        let mut workouts = Vec::new();
        for record in self.cache.get_all(EntityKind::Workout)?.values() {
            let mut workout = Workout::from_json(record)?;
            let cached_ride = workout
                .ride_id
                .as_ref()
                .and_then(|id| rides.get(id))
                .filter(|_| !workout.ride().is_loaded());
            if let Some(record) = cached_ride {
                let mut ride = Ride::from_json(record, workout.timezone())?;
                if ride.instructor.is_none() {
                    ride.instructor = ride
                        .instructor_id
                        .as_ref()
                        .and_then(|id| instructors.get(id))
                        .map(Instructor::from_json)
                        .transpose()?;
                }
                workout.attach_ride(ride);
            }
            workouts.push(workout);
        }
        Ok(workouts)
    }

    fn annual_challenge(&self) -> AnalysisResult<Challenge> {
        let record = self
            .cache
            .get(EntityKind::Challenge, &self.annual_challenge_id)?
            .ok_or_else(|| AnalysisError::MissingChallenge {
                id: self.annual_challenge_id.clone(),
            })?;
        Ok(Challenge::from_json(&record)?)
    }

    fn user(&self) -> AnalysisResult<User> {
        let users = self.cache.get_all(EntityKind::User)?;
        let record = users.values().next().ok_or(AnalysisError::MissingUser)?;
        Ok(User::from_json(record)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    const DAY: i64 = 86_400;
    const BASE: i64 = 1_767_268_800; // 2026-01-01T12:00:00Z

    fn seeded_cache(dir: &TempDir) -> ObjectCache {
        let cache = ObjectCache::new(dir.path());
        for (id, day) in [("w1", 0), ("w2", 1), ("w3", 2), ("w4", 4)] {
            let created = BASE + day * DAY;
            cache
                .put(
                    EntityKind::Workout,
                    id,
                    &json!({
                        "id": id,
                        "created": created,
                        "device_time_created_at": created,
                        "start_time": created,
                        "end_time": created + 1800,
                        "ride": "r1"
                    }),
                )
                .unwrap();
        }
        cache
            .put(EntityKind::Ride, "r1", &json!({"id": "r1", "title": "Climb", "instructor": "i1"}))
            .unwrap();
        cache
            .put(EntityKind::Instructor, "i1", &json!({"id": "i1", "name": "Coach"}))
            .unwrap();
        cache
            .put(
                EntityKind::Challenge,
                DEFAULT_ANNUAL_CHALLENGE_ID,
                &json!({
                    "challenge_summary": {"id": DEFAULT_ANNUAL_CHALLENGE_ID},
                    "progress": {"metric_value": 1000.0}
                }),
            )
            .unwrap();
        cache
            .put(EntityKind::User, "u1", &json!({"id": "u1", "streaks": {"current_weekly": 7}}))
            .unwrap();
        cache
    }

    #[test]
    fn test_analysis_from_cache() {
        let dir = TempDir::new().unwrap();
        let engine = AnalysisEngine::new(seeded_cache(&dir));
        let today = NaiveDate::from_ymd_opt(2026, 4, 10).unwrap();

        let analysis = engine.analyze_on(today).unwrap();
        assert!((analysis.accumulated_minutes - 1000.0).abs() < 1e-9);
        assert!((analysis.eoy_estimate - 1000.0 / 100.0 * 365.0).abs() < 1e-9);
        assert_eq!(analysis.current_daily_streak, 1);
        assert_eq!(analysis.current_weekly_streak, 7);
        assert_eq!(analysis.projection.len(), 4);
        assert!((analysis.projection[3].cumulative_minutes - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_cached_rides_are_attached() {
        let dir = TempDir::new().unwrap();
        let engine = AnalysisEngine::new(seeded_cache(&dir));
        let workouts = engine.cached_workouts().unwrap();
        assert_eq!(workouts.len(), 4);
        assert!(workouts.iter().all(|w| w.instructor_name() == "Coach"));
    }

    #[test]
    fn test_missing_challenge_is_reported() {
        let dir = TempDir::new().unwrap();
        let engine = AnalysisEngine::new(seeded_cache(&dir)).with_annual_challenge("other");
        let err = engine.analyze().unwrap_err();
        assert!(matches!(err, AnalysisError::MissingChallenge { id } if id == "other"));
    }

    #[test]
    fn test_disabled_cache_is_rejected() {
        let engine = AnalysisEngine::new(ObjectCache::disabled());
        assert!(matches!(engine.analyze(), Err(AnalysisError::CacheDisabled)));
    }
}
