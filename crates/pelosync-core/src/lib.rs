// ABOUTME: Core types and constants for the pelosync workout synchronizer
// ABOUTME: Foundation crate with error taxonomy, entity models, lazy fields, and the object cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pelosync Core
//!
//! Foundation crate shared by the provider, intelligence, and sync layers.
//!
//! ## Modules
//!
//! - **errors**: `ProviderError` taxonomy (redirect/client/server), cache and model errors
//! - **constants**: Remote endpoints, cache layout, and default values
//! - **models**: Workout, Ride, Instructor, Metrics, User, Challenge plus the `Lazy` field state
//! - **cache**: Flat-file `ObjectCache` keyed by entity kind and id

/// Error types for remote access, cache I/O, and record decoding
pub mod errors;

/// Endpoint paths, cache layout, and defaults
pub mod constants;

/// Domain entities built from remote JSON or cached records
pub mod models;

/// Flat per-entity JSON cache
pub mod cache;

pub use cache::ObjectCache;
pub use errors::{classify_status, CacheError, ModelError, ProviderError, ProviderResult};
pub use models::{Entity, EntityKind, Lazy};
