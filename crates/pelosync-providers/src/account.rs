// ABOUTME: User profile and challenge endpoints for the logged-in account
// ABOUTME: The profile merges the user record over the `me` record before caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::client::PelotonClient;
use pelosync_core::constants::api;
use pelosync_core::models::{Challenge, User};
use pelosync_core::{ProviderError, ProviderResult};
use serde_json::Value;

/// Overlay `overlay`'s top-level fields onto `base`
fn merge_records(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            base.extend(overlay);
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}

impl PelotonClient {
    /// Fetch, merge, and cache the logged-in user's profile
    ///
    /// Fields of the user record win over the `me` record.
    ///
    /// # Errors
    ///
    /// Returns the first request, decoding, or cache error
    pub async fn me(&self) -> ProviderResult<User> {
        let user_id = self.user_id().await?.to_owned();
        let user = self.request(&api::user(&user_id), &[]).await?;
        let me = self.request(api::ME_PATH, &[]).await?;
        self.build_user(&merge_records(me, user))
    }

    /// Fetch and cache every challenge the user has joined
    ///
    /// # Errors
    ///
    /// Returns the request error, `InvalidResponse` if the body has no
    /// `challenges` array, or a decoding/cache error
    pub async fn current_challenges(&self) -> ProviderResult<Vec<Challenge>> {
        let endpoint = api::current_challenges(self.user_id().await?);
        let response = self
            .request(&endpoint, &[("has_joined", "true".to_owned())])
            .await?;
        let entries = response
            .get("challenges")
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::invalid_response(&endpoint, "missing `challenges` array"))?;
        entries.iter().map(|entry| self.build_challenge(entry)).collect()
    }

    /// Fetch and cache one challenge by id
    ///
    /// # Errors
    ///
    /// Returns the request, decoding, or cache error
    pub async fn get_challenge(&self, challenge_id: &str) -> ProviderResult<Challenge> {
        let endpoint = api::challenge(self.user_id().await?, challenge_id);
        let response = self.request(&endpoint, &[]).await?;
        self.build_challenge(&response)
    }
}
