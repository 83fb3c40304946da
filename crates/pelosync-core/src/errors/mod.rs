// ABOUTME: Error taxonomy for remote access, cache I/O, and record decoding
// ABOUTME: Re-exports provider, cache, and model error types with their result aliases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Types
//!
//! - `ProviderError` - remote failures classified by HTTP status range, plus
//!   missing credentials, transport failures, and malformed responses
//! - `CacheError` - flat-file cache read/write failures
//! - `ModelError` - a JSON record could not be turned into an entity
//!
//! Every error is returned as a value. Nothing here retries; callers decide
//! whether to re-invoke the failed operation.

/// Flat-file cache errors
pub mod cache;
/// Entity decoding errors
pub mod model;
/// Remote provider errors
pub mod provider;

pub use cache::CacheError;
pub use model::ModelError;
pub use provider::{classify_status, ProviderError, ProviderResult};
