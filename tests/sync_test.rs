// ABOUTME: Integration tests for incremental refresh against a scripted remote service
// ABOUTME: Covers idempotence, cache normalization, last-synced detection, and abort on error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::{client, workout_id, FakeService, BASE, DAY, DEVICE_OFFSET, USER_ID};
use pelosync::sync::{find_last_synced_id, SyncEngine};
use pelosync_core::constants::{analysis, api};
use pelosync_core::{EntityKind, ObjectCache, ProviderError};
use serde_json::json;
use tempfile::TempDir;

fn engine(service: &FakeService, dir: &TempDir, page_size: usize) -> SyncEngine {
    SyncEngine::new(client(service, ObjectCache::new(dir.path())).with_page_size(page_size))
}

#[tokio::test]
async fn test_first_refresh_syncs_whole_history_newest_first() {
    let dir = TempDir::new().unwrap();
    let service = FakeService::with_days(&[0, 1, 2, 3, 4]);
    let engine = engine(&service, &dir, 2);

    let summaries = engine.refresh().await.unwrap();

    let titles: Vec<&str> = summaries.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["20 min Ride 4", "20 min Ride 3", "20 min Ride 2", "20 min Ride 1", "20 min Ride 0"]
    );
    assert!(summaries.iter().all(|s| s.instructor == "Coach Alex"));

    let start = summaries[0].start_time.unwrap();
    assert_eq!(start.timestamp(), BASE + 4 * DAY);
    assert_eq!(i64::from(start.offset().local_minus_utc()), DEVICE_OFFSET);

    assert_eq!(service.count("POST"), 1);
    assert_eq!(service.count(&format!("GET {}?page=", api::user_workouts(USER_ID))), 3);
    assert_eq!(service.count("GET /api/workout/"), 10);
    assert_eq!(service.count(&format!("GET {}", api::ME_PATH)), 1);
}

#[tokio::test]
async fn test_second_refresh_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let service = FakeService::with_days(&[0, 1, 2, 3, 4]);
    let engine = engine(&service, &dir, 2);
    engine.refresh().await.unwrap();
    service.clear_calls();

    let summaries = engine.refresh().await.unwrap();

    assert!(summaries.is_empty());
    assert_eq!(service.count(&format!("GET {}?page=", api::user_workouts(USER_ID))), 1);
    assert_eq!(service.count("GET /api/workout/"), 0);
    assert_eq!(service.count("POST"), 0);
}

#[tokio::test]
async fn test_refresh_fetches_only_new_workouts() {
    let dir = TempDir::new().unwrap();
    let service = FakeService::with_days(&[0, 1, 2, 3, 4]);
    engine(&service, &dir, 2).refresh().await.unwrap();

    service.add_days(&[5, 6, 7]);
    service.clear_calls();
    let summaries = engine(&service, &dir, 2).refresh().await.unwrap();

    let titles: Vec<&str> = summaries.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["20 min Ride 7", "20 min Ride 6", "20 min Ride 5"]);
    assert_eq!(service.count(&format!("GET {}?page=", api::user_workouts(USER_ID))), 2);
    assert_eq!(service.count("GET /api/workout/"), 6);
    assert_eq!(
        find_last_synced_id(&ObjectCache::new(dir.path())).unwrap(),
        Some(workout_id(7))
    );
}

#[tokio::test]
async fn test_refresh_normalizes_cached_records() {
    let dir = TempDir::new().unwrap();
    let service = FakeService::with_days(&[0, 1]);
    engine(&service, &dir, 10).refresh().await.unwrap();
    let cache = ObjectCache::new(dir.path());

    let workout = cache.get(EntityKind::Workout, &workout_id(0)).unwrap().unwrap();
    assert_eq!(workout["ride"], json!("r0"));
    assert_eq!(workout["leaderboard_rank"], json!(42));

    let ride = cache.get(EntityKind::Ride, "r0").unwrap().unwrap();
    assert_eq!(ride["instructor"], json!("i1"));
    let instructor = cache.get(EntityKind::Instructor, "i1").unwrap().unwrap();
    assert_eq!(instructor["name"], json!("Coach Alex"));

    let metrics = cache.get(EntityKind::Metrics, &workout_id(1)).unwrap().unwrap();
    assert_eq!(metrics["id"], json!(workout_id(1)));

    let challenges = cache.get_all(EntityKind::Challenge).unwrap();
    assert_eq!(challenges.len(), 2);
    assert!(challenges.contains_key(analysis::DEFAULT_ANNUAL_CHALLENGE_ID));

    let user = cache.get(EntityKind::User, USER_ID).unwrap().unwrap();
    assert_eq!(user["username"], json!("rider"));
    assert_eq!(user["customized_max_heart_rate"], json!(185));

    assert!(dir.path().join("workout").join("w000.json").is_file());
}

#[tokio::test]
async fn test_remote_error_aborts_refresh() {
    let dir = TempDir::new().unwrap();
    let service = FakeService::with_days(&[0, 1, 2, 3, 4]);
    service.respond(&api::workout(&workout_id(2)), 503, "maintenance");

    let err = engine(&service, &dir, 10).refresh().await.unwrap_err();

    assert!(matches!(err, ProviderError::Server { status: 503, .. }));
    assert_eq!(service.count(&format!("GET {}", api::workout_metrics(&workout_id(3)))), 1);
    assert_eq!(service.count(&format!("GET {}", api::workout(&workout_id(1)))), 0);
    assert_eq!(service.count(&format!("GET {}", api::current_challenges(USER_ID))), 0);
}

#[test]
fn test_last_synced_id_of_empty_cache() {
    let dir = TempDir::new().unwrap();
    assert_eq!(find_last_synced_id(&ObjectCache::new(dir.path())).unwrap(), None);
    assert_eq!(find_last_synced_id(&ObjectCache::disabled()).unwrap(), None);
}

#[test]
fn test_last_synced_id_uses_greatest_created() {
    let dir = TempDir::new().unwrap();
    let cache = ObjectCache::new(dir.path());
    for (id, created) in [("a", BASE), ("b", BASE + 3 * DAY), ("c", BASE + DAY), ("d", 0)] {
        cache
            .put(EntityKind::Workout, id, &json!({"id": id, "created": created}))
            .unwrap();
    }
    cache
        .put(EntityKind::Workout, "e", &json!({"id": "e"}))
        .unwrap();

    assert_eq!(find_last_synced_id(&cache).unwrap().as_deref(), Some("b"));
}

#[test]
fn test_last_synced_id_ignores_records_without_created() {
    let dir = TempDir::new().unwrap();
    let cache = ObjectCache::new(dir.path());
    cache
        .put(EntityKind::Workout, "x", &json!({"id": "x", "created": 0}))
        .unwrap();

    assert_eq!(find_last_synced_id(&cache).unwrap(), None);
}
