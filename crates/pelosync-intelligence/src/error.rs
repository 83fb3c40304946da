// ABOUTME: Error types for cache-backed workout analysis
// ABOUTME: Distinguishes unreadable cache data from records the analysis requires but cannot find
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analysis error types.

use pelosync_core::{CacheError, ModelError};
use thiserror::Error;

/// Result alias for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Analysis failures
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The cache could not be read
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A cached record could not be decoded
    #[error("invalid cached record: {0}")]
    InvalidRecord(#[from] ModelError),

    /// No user profile has been synced yet
    #[error("no cached user profile; run a refresh first")]
    MissingUser,

    /// The tracked challenge has not been synced
    #[error("challenge {id} is not cached; run a refresh first")]
    MissingChallenge {
        /// Challenge id that was looked up
        id: String,
    },

    /// Analysis needs a cache directory
    #[error("no data cache directory is configured")]
    CacheDisabled,
}
