// ABOUTME: Workout session entity with lazily-materialized leaderboard, achievement, and metrics fields
// ABOUTME: Lazy fields are filled through a WorkoutDetailSource, one remote fetch per field group
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workouts
//!
//! A workout built from the listing endpoint usually lacks the leaderboard
//! group (`leaderboard_rank`, `total_leaderboard_users`,
//! `is_total_work_personal_record`, `achievement_templates`) and never carries
//! its performance graph. Those fields start as [`Lazy::NotLoaded`]. The first
//! access to any member of the leaderboard group issues one detail fetch that
//! fills every member still missing; metrics always take their own fetch.

use super::json::{object, opt_bool, opt_i64, opt_string, opt_time, opt_u64, required_id};
use super::{insert_lazy, nested, Achievement, Entity, EntityKind, Lazy, Ride, WorkoutMetrics, WorkoutTimezone};
use crate::errors::{ModelError, ProviderError, ProviderResult};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::{Map, Value};
use std::fmt;

const KIND: &str = "workout";

/// Remote operations a workout needs to fill its lazy fields
///
/// Implemented by the remote client. Implementations persist what they fetch
/// before returning it.
#[async_trait]
pub trait WorkoutDetailSource: Send + Sync {
    /// Fetch the full workout detail record
    async fn fetch_workout_detail(&self, workout_id: &str) -> ProviderResult<Value>;

    /// Fetch the workout's performance graph
    async fn fetch_workout_metrics(&self, workout_id: &str) -> ProviderResult<WorkoutMetrics>;
}

/// A single exercise session
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    /// Workout id
    pub id: String,
    /// Creation time as unix seconds (true epoch)
    pub created: i64,
    /// Creation time as the device's wall clock encoded as unix seconds
    pub device_time_created_at: Option<i64>,
    /// Start of the session in the workout's own timezone
    pub start_time: Option<DateTime<FixedOffset>>,
    /// End of the session in the workout's own timezone
    pub end_time: Option<DateTime<FixedOffset>>,
    /// Workout status (COMPLETE, IN_PROGRESS, ...)
    pub status: Option<String>,
    /// Discipline (cycling, running, strength, ...)
    pub fitness_discipline: Option<String>,
    /// Workout name as reported by the service
    pub name: Option<String>,
    /// Total work in joules
    pub total_work: Option<f64>,
    /// Id of the ride this workout was taken from
    pub ride_id: Option<String>,
    timezone: WorkoutTimezone,
    ride: Lazy<Ride>,
    leaderboard_rank: Lazy<Option<u64>>,
    leaderboard_user_count: Lazy<Option<u64>>,
    personal_record: Lazy<Option<bool>>,
    achievements: Lazy<Vec<Achievement>>,
    metrics: Lazy<WorkoutMetrics>,
}

impl Workout {
    /// Decode a workout record from a listing, a detail response, or the cache
    ///
    /// `ride` may be an embedded object (joined listing or detail) or the ride
    /// id (normalized cache form). Leaderboard fields are loaded when their key
    /// is present, even if its value is `null`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if the record or its embedded ride is malformed
    pub fn from_json(value: &Value) -> Result<Self, ModelError> {
        let record = object(value, KIND)?;
        let id = required_id(record, KIND, "id")?;
        let created = opt_i64(record, "created").unwrap_or_default();
        let device_time_created_at = opt_i64(record, "device_time_created_at");
        let timezone = WorkoutTimezone::resolve(
            record.get("timezone").and_then(Value::as_str),
            created,
            device_time_created_at,
        );
        let at = |field: &str| opt_i64(record, field).and_then(|secs| timezone.at(secs));

        let (ride, ride_id) = match record.get("ride") {
            Some(embedded @ Value::Object(_)) => {
                let ride = Ride::from_json(embedded, timezone)?;
                let ride_id = ride.id.clone();
                (Lazy::Loaded(ride), Some(ride_id))
            }
            Some(Value::String(ride_id)) => (Lazy::NotLoaded, Some(ride_id.clone())),
            _ => (Lazy::NotLoaded, opt_string(record, "ride_id")),
        };

        let mut workout = Self {
            start_time: at("start_time"),
            end_time: at("end_time").filter(|end| end.timestamp() > 0),
            status: opt_string(record, "status"),
            fitness_discipline: opt_string(record, "fitness_discipline"),
            name: opt_string(record, "name"),
            total_work: record.get("total_work").and_then(Value::as_f64),
            ride_id,
            timezone,
            ride,
            leaderboard_rank: Lazy::NotLoaded,
            leaderboard_user_count: Lazy::NotLoaded,
            personal_record: Lazy::NotLoaded,
            achievements: Lazy::NotLoaded,
            metrics: Lazy::NotLoaded,
            id,
            created,
            device_time_created_at,
        };
        workout.apply_detail(record, false)?;
        Ok(workout)
    }

    /// Fill leaderboard-group fields from a record
    ///
    /// With `complete` set, a missing key counts as an empty value; otherwise
    /// only keys present in the record are loaded. Fields already loaded keep
    /// their value.
    fn apply_detail(&mut self, record: &Map<String, Value>, complete: bool) -> Result<(), ModelError> {
        if complete || record.contains_key("leaderboard_rank") {
            self.leaderboard_rank.load(opt_u64(record, "leaderboard_rank"));
        }
        if complete || record.contains_key("total_leaderboard_users") {
            self.leaderboard_user_count
                .load(opt_u64(record, "total_leaderboard_users"));
        }
        if complete || record.contains_key("is_total_work_personal_record") {
            self.personal_record
                .load(opt_bool(record, "is_total_work_personal_record"));
        }
        if !self.achievements.is_loaded() {
            match record.get("achievement_templates") {
                Some(templates) => {
                    self.achievements.load(Achievement::list_from_json(templates)?);
                }
                None if complete => {
                    self.achievements.load(Vec::new());
                }
                None => {}
            }
        }
        Ok(())
    }

    fn leaderboard_group_loaded(&self) -> bool {
        self.leaderboard_rank.is_loaded()
            && self.leaderboard_user_count.is_loaded()
            && self.personal_record.is_loaded()
            && self.achievements.is_loaded()
    }

    async fn ensure_leaderboard_group(&mut self, source: &dyn WorkoutDetailSource) -> ProviderResult<()> {
        if self.leaderboard_group_loaded() {
            return Ok(());
        }
        let detail = source.fetch_workout_detail(&self.id).await?;
        let record = object(&detail, KIND)?;
        self.apply_detail(record, true)?;
        Ok(())
    }

    /// Rank on the class leaderboard
    ///
    /// # Errors
    ///
    /// Returns the detail fetch error if the leaderboard group was not loaded
    pub async fn leaderboard_rank(&mut self, source: &dyn WorkoutDetailSource) -> ProviderResult<Option<u64>> {
        self.ensure_leaderboard_group(source).await?;
        Ok(self.leaderboard_rank.get().copied().flatten())
    }

    /// Number of users on the class leaderboard
    ///
    /// # Errors
    ///
    /// Returns the detail fetch error if the leaderboard group was not loaded
    pub async fn leaderboard_user_count(
        &mut self,
        source: &dyn WorkoutDetailSource,
    ) -> ProviderResult<Option<u64>> {
        self.ensure_leaderboard_group(source).await?;
        Ok(self.leaderboard_user_count.get().copied().flatten())
    }

    /// Whether total work was a personal record for this class length
    ///
    /// # Errors
    ///
    /// Returns the detail fetch error if the leaderboard group was not loaded
    pub async fn personal_record(&mut self, source: &dyn WorkoutDetailSource) -> ProviderResult<Option<bool>> {
        self.ensure_leaderboard_group(source).await?;
        Ok(self.personal_record.get().copied().flatten())
    }

    /// Achievements earned during this workout
    ///
    /// # Errors
    ///
    /// Returns the detail fetch error if the leaderboard group was not loaded
    pub async fn achievements(&mut self, source: &dyn WorkoutDetailSource) -> ProviderResult<&[Achievement]> {
        self.ensure_leaderboard_group(source).await?;
        self.achievements
            .get()
            .map(Vec::as_slice)
            .ok_or_else(|| ProviderError::invalid_response(&self.id, "achievements were not loaded"))
    }

    /// Performance graph of this workout
    ///
    /// # Errors
    ///
    /// Returns the metrics fetch error on first access
    pub async fn metrics(&mut self, source: &dyn WorkoutDetailSource) -> ProviderResult<&WorkoutMetrics> {
        if !self.metrics.is_loaded() {
            let fetched = source.fetch_workout_metrics(&self.id).await?;
            self.metrics.load(fetched);
        }
        self.metrics
            .get()
            .ok_or_else(|| ProviderError::invalid_response(&self.id, "metrics were not loaded"))
    }

    /// Ride this workout was taken from, if materialized
    #[must_use]
    pub const fn ride(&self) -> &Lazy<Ride> {
        &self.ride
    }

    /// Materialize the ride from another source (e.g. the ride cache)
    ///
    /// Returns false if a ride was already attached.
    pub fn attach_ride(&mut self, ride: Ride) -> bool {
        self.ride.load(ride)
    }

    /// Instructor name of the attached ride, `"None"` when there is none
    #[must_use]
    pub fn instructor_name(&self) -> String {
        self.ride
            .get()
            .and_then(|ride| ride.instructor.as_ref())
            .map_or_else(|| "None".to_owned(), |instructor| instructor.display_name().to_owned())
    }

    /// Title of the attached ride, falling back to the workout name
    #[must_use]
    pub fn title(&self) -> String {
        self.ride
            .get()
            .map(|ride| ride.display_title().to_owned())
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| self.id.clone())
    }

    /// Timezone the workout's timestamps are rendered in
    #[must_use]
    pub const fn timezone(&self) -> WorkoutTimezone {
        self.timezone
    }

    /// Offset in effect when the workout was created
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.timezone.offset_at(self.created)
    }

    /// Calendar date of the workout on the recording device
    #[must_use]
    pub fn device_date(&self) -> Option<NaiveDate> {
        let secs = self.device_time_created_at.unwrap_or(self.created);
        DateTime::from_timestamp(secs, 0).map(|time| time.date_naive())
    }

    /// Elapsed minutes between start and end, zero while in progress
    #[must_use]
    pub fn duration_minutes(&self) -> f64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if end > start => (end - start).num_seconds() as f64 / 60.0,
            _ => 0.0,
        }
    }

    /// Current state of the leaderboard rank without fetching
    #[must_use]
    pub const fn leaderboard_rank_state(&self) -> &Lazy<Option<u64>> {
        &self.leaderboard_rank
    }

    /// Current state of the achievements without fetching
    #[must_use]
    pub const fn achievements_state(&self) -> &Lazy<Vec<Achievement>> {
        &self.achievements
    }

    /// Current state of the metrics without fetching
    #[must_use]
    pub const fn metrics_state(&self) -> &Lazy<WorkoutMetrics> {
        &self.metrics
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fitness_discipline.as_deref().unwrap_or(&self.id))
    }
}

impl Entity for Workout {
    fn kind(&self) -> EntityKind {
        EntityKind::Workout
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
        map.insert("created".into(), Value::from(self.created));
        map.insert("start_time".into(), opt_time(self.start_time));
        map.insert("end_time".into(), opt_time(self.end_time));
        map.insert(
            "timezone".into(),
            self.timezone.name().map_or(Value::Null, |name| Value::String(name.to_owned())),
        );
        map.insert("status".into(), self.status.clone().map_or(Value::Null, Value::String));
        map.insert(
            "fitness_discipline".into(),
            self.fitness_discipline.clone().map_or(Value::Null, Value::String),
        );
        map.insert("name".into(), self.name.clone().map_or(Value::Null, Value::String));
        map.insert("total_work".into(), self.total_work.map_or(Value::Null, Value::from));

        insert_lazy(&mut map, "ride", &self.ride, include_unloaded, |ride| {
            nested(ride, depth, include_unloaded)
        });
        insert_lazy(&mut map, "leaderboard_rank", &self.leaderboard_rank, include_unloaded, |rank| {
            Some(rank.map_or(Value::Null, Value::from))
        });
        insert_lazy(
            &mut map,
            "leaderboard_user_count",
            &self.leaderboard_user_count,
            include_unloaded,
            |count| Some(count.map_or(Value::Null, Value::from)),
        );
        insert_lazy(&mut map, "personal_record", &self.personal_record, include_unloaded, |record| {
            Some(record.map_or(Value::Null, Value::Bool))
        });
        insert_lazy(&mut map, "achievements", &self.achievements, include_unloaded, |achievements| {
            serde_json::to_value(achievements).ok()
        });
        insert_lazy(&mut map, "metrics", &self.metrics, include_unloaded, |metrics| {
            nested(metrics, depth, include_unloaded)
        });
        Some(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        detail_calls: AtomicUsize,
        metrics_calls: AtomicUsize,
    }

    #[async_trait]
    impl WorkoutDetailSource for CountingSource {
        async fn fetch_workout_detail(&self, workout_id: &str) -> ProviderResult<Value> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({
                "id": workout_id,
                "leaderboard_rank": 12,
                "total_leaderboard_users": 3400,
                "is_total_work_personal_record": true,
                "achievement_templates": [{"id": "a1", "slug": "best_output", "name": "Best Output"}]
            }))
        }

        async fn fetch_workout_metrics(&self, workout_id: &str) -> ProviderResult<WorkoutMetrics> {
            self.metrics_calls.fetch_add(1, Ordering::SeqCst);
            Ok(WorkoutMetrics::from_json(&json!({"id": workout_id, "segment_list": []}))?)
        }
    }

    fn listed_workout() -> Workout {
        Workout::from_json(&json!({
            "id": "w1",
            "created": 1_700_000_000,
            "device_time_created_at": 1_699_982_000,
            "start_time": 1_700_000_000,
            "end_time": 1_700_001_800,
            "status": "COMPLETE",
            "fitness_discipline": "cycling",
            "ride": {"id": "r1", "title": "30 min Climb", "instructor": {"id": "i1", "name": "Coach"}}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_leaderboard_group_loads_with_one_fetch() {
        let source = CountingSource::default();
        let mut workout = listed_workout();

        assert_eq!(workout.achievements(&source).await.unwrap().len(), 1);
        assert_eq!(workout.leaderboard_rank(&source).await.unwrap(), Some(12));
        assert_eq!(workout.leaderboard_user_count(&source).await.unwrap(), Some(3400));
        assert_eq!(workout.personal_record(&source).await.unwrap(), Some(true));
        assert_eq!(source.detail_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.metrics_calls.load(Ordering::SeqCst), 0);

        workout.metrics(&source).await.unwrap();
        workout.metrics(&source).await.unwrap();
        assert_eq!(source.detail_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.metrics_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fields_present_in_listing_are_not_refetched() {
        let source = CountingSource::default();
        let mut workout = Workout::from_json(&json!({
            "id": "w2",
            "created": 1_700_000_000,
            "leaderboard_rank": null,
            "total_leaderboard_users": 10,
            "is_total_work_personal_record": false,
            "achievement_templates": []
        }))
        .unwrap();

        assert_eq!(workout.leaderboard_rank(&source).await.unwrap(), None);
        assert_eq!(source.detail_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_offset_comes_from_device_clock() {
        let workout = listed_workout();
        assert_eq!(workout.offset().local_minus_utc(), -18_000);
        assert_eq!(
            workout.device_date(),
            NaiveDate::from_ymd_opt(2023, 11, 14)
        );
        assert!((workout.duration_minutes() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_named_timezone_renders_times() {
        let workout = Workout::from_json(&json!({
            "id": "w1",
            "created": 1_700_000_000,
            "start_time": 1_700_000_000,
            "timezone": "America/New_York",
            "ride": {"id": "r1", "original_air_time": 1_689_336_000}
        }))
        .unwrap();

        let start = workout.start_time.unwrap();
        assert_eq!(start.offset().local_minus_utc(), -18_000);
        assert_eq!(start.timestamp(), 1_700_000_000);
        assert_eq!(workout.offset().local_minus_utc(), -18_000);
        assert_eq!(workout.timezone().name(), Some("America/New_York"));

        let aired = workout.ride().get().unwrap().original_air_time.unwrap();
        assert_eq!(aired.offset().local_minus_utc(), -14_400);

        let map = workout.to_map(1, false).unwrap();
        assert_eq!(map["timezone"], "America/New_York");
    }

    #[test]
    fn test_instructor_defaults_to_none_string() {
        let workout = Workout::from_json(&json!({"id": "w3", "created": 0, "ride": "r9"})).unwrap();
        assert_eq!(workout.instructor_name(), "None");
        assert_eq!(workout.ride_id.as_deref(), Some("r9"));
        assert!(!workout.ride().is_loaded());
    }

    #[test]
    fn test_to_map_omits_unloaded_unless_requested() {
        let workout = listed_workout();
        let compact = workout.to_map(1, false).unwrap();
        assert!(!compact.contains_key("metrics"));
        assert!(!compact.contains_key("ride"));

        let full = workout.to_map(2, true).unwrap();
        assert_eq!(full.get("metrics"), Some(&Value::Null));
        assert_eq!(full["ride"]["title"], "30 min Climb");
    }
}
