// ABOUTME: Shared test helpers for integration tests
// ABOUTME: In-memory fake of the remote service plus fixture builders for workouts and account data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

use async_trait::async_trait;
use pelosync::config::SyncConfig;
use pelosync_core::constants::{analysis, api};
use pelosync_core::{ObjectCache, ProviderResult};
use pelosync_providers::{Credentials, PelotonClient, RawResponse, Transport};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Id the fake service hands out on login
pub const USER_ID: &str = "u1";

/// 2026-01-01T12:00:00Z
pub const BASE: i64 = 1_767_268_800;
pub const DAY: i64 = 86_400;

/// Device clock five hours behind UTC
pub const DEVICE_OFFSET: i64 = -18_000;

/// Minutes per fixture workout
pub const WORKOUT_MINUTES: i64 = 20;

/// Annual challenge progress reported by the fake service
pub const CHALLENGE_MINUTES: f64 = 1500.0;

#[derive(Default)]
struct State {
    history: Vec<Value>,
    overrides: HashMap<String, RawResponse>,
    login_status: Option<u16>,
    calls: Vec<String>,
}

/// Scripted stand-in for the remote service
///
/// The listing is paged from `history` (newest first) using the requested
/// `page` and `limit`. Detail, metrics, and account endpoints are derived
/// from the history; `respond` overrides any path.
#[derive(Clone, Default)]
pub struct FakeService {
    state: Arc<Mutex<State>>,
}

impl FakeService {
    /// Service whose history holds workouts on the given day offsets from [`BASE`]
    pub fn with_days(days: &[i64]) -> Self {
        let service = Self::default();
        service.add_days(days);
        service
    }

    /// Add workouts on the given days, keeping the history newest first
    pub fn add_days(&self, days: &[i64]) {
        let mut state = self.state.lock().unwrap();
        state.history.extend(days.iter().map(|day| workout_record(*day)));
        state
            .history
            .sort_by_key(|record| -record["created"].as_i64().unwrap());
    }

    /// Always answer `path` with `status` and `body`
    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .overrides
            .insert(path.to_owned(), RawResponse::new(status, body));
    }

    /// Make login fail with `status`
    pub fn reject_login(&self, status: u16) {
        self.state.lock().unwrap().login_status = Some(status);
    }

    /// Every request so far, as `METHOD path[?page=N]`
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of requests whose description starts with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|call| call.starts_with(prefix)).count()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn listing(state: &State, query: &[(&str, String)]) -> RawResponse {
        let param = |name: &str| {
            query
                .iter()
                .find(|(key, _)| *key == name)
                .and_then(|(_, value)| value.parse::<usize>().ok())
        };
        let page = param("page").unwrap_or(0);
        let limit = param("limit").unwrap_or(10).max(1);
        let page_count = state.history.len().div_ceil(limit);
        let data: Vec<Value> = state
            .history
            .iter()
            .skip(page * limit)
            .take(limit)
            .cloned()
            .collect();
        ok(&json!({"data": data, "page": page, "page_count": page_count, "limit": limit}))
    }

    fn detail(state: &State, workout_id: &str) -> RawResponse {
        let Some(record) = state.history.iter().find(|record| record["id"] == workout_id) else {
            return RawResponse::new(404, r#"{"message":"Workout not found"}"#);
        };
        let mut detail = record.clone();
        let object = detail.as_object_mut().unwrap();
        object.insert("leaderboard_rank".into(), json!(42));
        object.insert("total_leaderboard_users".into(), json!(5000));
        object.insert("is_total_work_personal_record".into(), json!(false));
        object.insert(
            "achievement_templates".into(),
            json!([{"id": "a1", "slug": "streak_3", "name": "Three Day Streak"}]),
        );
        ok(&detail)
    }
}

#[async_trait]
impl Transport for FakeService {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> ProviderResult<RawResponse> {
        let mut state = self.state.lock().unwrap();
        let call = query
            .iter()
            .find(|(key, _)| *key == "page")
            .map_or_else(|| format!("GET {path}"), |(_, page)| format!("GET {path}?page={page}"));
        state.calls.push(call);

        if let Some(response) = state.overrides.get(path) {
            return Ok(response.clone());
        }

        let response = if path == api::user_workouts(USER_ID) {
            Self::listing(&state, query)
        } else if path == api::current_challenges(USER_ID) {
            ok(&challenges_body())
        } else if path == api::user(USER_ID) {
            ok(&user_body())
        } else if path == api::ME_PATH {
            ok(&me_body())
        } else if let Some(rest) = path.strip_prefix("/api/workout/") {
            match rest.strip_suffix("/performance_graph") {
                Some(_) => ok(&performance_graph()),
                None => Self::detail(&state, rest),
            }
        } else {
            RawResponse::new(404, r#"{"message":"Not found"}"#)
        };
        Ok(response)
    }

    async fn post_json(&self, path: &str, _body: &Value) -> ProviderResult<RawResponse> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("POST {path}"));
        Ok(match state.login_status {
            Some(status) => RawResponse::new(status, r#"{"message":"Login failed"}"#),
            None => ok(&json!({"user_id": USER_ID, "session_id": "s1"})),
        })
    }
}

fn ok(body: &Value) -> RawResponse {
    RawResponse::new(200, body.to_string())
}

pub fn workout_id(day: i64) -> String {
    format!("w{day:03}")
}

/// Listing entry with the ride and instructor embedded, as the joins return it
pub fn workout_record(day: i64) -> Value {
    let created = BASE + day * DAY;
    json!({
        "id": workout_id(day),
        "created": created,
        "device_time_created_at": created + DEVICE_OFFSET,
        "start_time": created,
        "end_time": created + WORKOUT_MINUTES * 60,
        "timezone": "America/New_York",
        "status": "COMPLETE",
        "fitness_discipline": "cycling",
        "name": "Cycling Workout",
        "total_work": 180_000.0,
        "ride": {
            "id": format!("r{day}"),
            "title": format!("20 min Ride {day}"),
            "duration": WORKOUT_MINUTES * 60,
            "instructor": {"id": "i1", "name": "Coach Alex"}
        }
    })
}

pub fn performance_graph() -> Value {
    json!({
        "duration": WORKOUT_MINUTES * 60,
        "segment_list": [{"metrics_type": "cycling"}],
        "summaries": [
            {"slug": "total_output", "display_name": "Total Output", "value": 180.0, "display_unit": "kj"},
            {"slug": "distance", "display_name": "Distance", "value": 6.1, "display_unit": "mi"}
        ],
        "metrics": [
            {"slug": "output", "display_name": "Output", "display_unit": "watts",
             "average_value": 150.0, "max_value": 260.0, "values": [120, 150, 180]},
            {"slug": "cadence", "display_name": "Cadence", "display_unit": "rpm",
             "average_value": 85.0, "max_value": 101.0, "values": [80, 85, 90]}
        ]
    })
}

pub fn challenges_body() -> Value {
    json!({
        "challenges": [
            {
                "challenge_summary": {"id": analysis::DEFAULT_ANNUAL_CHALLENGE_ID, "title": "Annual Minutes"},
                "progress": {"metric_value": CHALLENGE_MINUTES, "metric_display_unit": "min"}
            },
            {
                "challenge_summary": {"id": "c2", "title": "Monthly Ride"},
                "progress": {"metric_value": 3.0, "metric_display_unit": "rides"}
            }
        ]
    })
}

pub fn user_body() -> Value {
    json!({
        "id": USER_ID,
        "username": "rider",
        "cycling_ftp": 210,
        "streaks": {"current_weekly": 7, "current_daily": 2, "best_weekly": 30}
    })
}

pub fn me_body() -> Value {
    json!({
        "id": USER_ID,
        "username": "stale-name",
        "customized_max_heart_rate": 185,
        "default_heart_rate_zones": [0, 120, 140, 160, 175]
    })
}

pub fn credentials() -> Credentials {
    Credentials::new("rider@example.com", "secret")
}

/// Client over `service` writing into `cache`
pub fn client(service: &FakeService, cache: ObjectCache) -> PelotonClient {
    PelotonClient::new(service.clone(), credentials(), cache)
}

/// Configuration pointing the cache at `root`
pub fn config_for(root: &Path) -> SyncConfig {
    SyncConfig {
        data_cache_dir: Some(root.to_path_buf()),
        ..SyncConfig::default()
    }
}
