// ABOUTME: Workout detail and performance graph endpoints
// ABOUTME: Backs the lazy workout fields through the WorkoutDetailSource trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::client::PelotonClient;
use async_trait::async_trait;
use pelosync_core::constants::api;
use pelosync_core::models::{Workout, WorkoutDetailSource, WorkoutMetrics};
use pelosync_core::ProviderResult;
use serde_json::Value;

impl PelotonClient {
    /// Fetch and cache the full detail of one workout
    ///
    /// # Errors
    ///
    /// Returns the request, decoding, or cache error
    pub async fn get_workout(&self, workout_id: &str) -> ProviderResult<Workout> {
        let detail = self.fetch_workout_detail(workout_id).await?;
        Workout::from_json(&detail).map_err(Into::into)
    }
}

#[async_trait]
impl WorkoutDetailSource for PelotonClient {
    async fn fetch_workout_detail(&self, workout_id: &str) -> ProviderResult<Value> {
        let detail = self.request(&api::workout(workout_id), &[]).await?;
        self.build_workout(&detail)?;
        Ok(detail)
    }

    async fn fetch_workout_metrics(&self, workout_id: &str) -> ProviderResult<WorkoutMetrics> {
        let params = [("every_n", api::METRICS_EVERY_N.to_string())];
        let graph = self
            .request(&api::workout_metrics(workout_id), &params)
            .await?;
        self.build_metrics(workout_id, graph)
    }
}
