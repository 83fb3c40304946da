// ABOUTME: Remote workout service client with lazy session handling and per-entity caching
// ABOUTME: HTTP client setup, transport seam, entity factories, and paged workout streaming
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Remote access layer for pelosync.
//!
//! [`PelotonClient`] owns credentials, the session, and the object cache. The
//! endpoint methods are spread over the `workouts`, `listing`, and `account`
//! modules; every entity they build is written to the cache before it is
//! returned.

/// User profile and challenge endpoints
pub mod account;
/// Authenticated client and session
pub mod client;
/// Entity construction with cache side effects
pub mod factory;
/// HTTP client construction
pub mod http_client;
/// Paged workout listing with cutoff
pub mod listing;
/// Request transport seam
pub mod transport;
/// Workout detail and metrics endpoints
pub mod workouts;

pub use client::{Credentials, PelotonClient, Session};
pub use http_client::{build_client, HttpClientConfig};
pub use listing::{truncate_at_cutoff, WorkoutStream};
pub use pelosync_core::{ProviderError, ProviderResult};
pub use transport::{HttpTransport, RawResponse, Transport};
