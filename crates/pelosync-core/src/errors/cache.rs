// ABOUTME: Error type for the flat-file object cache
// ABOUTME: Wraps filesystem and JSON failures together with the offending path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing cached entity files
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem operation failed
    #[error("cache I/O failed for {}: {source}", path.display())]
    Io {
        /// File or directory being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A cache file could not be encoded or decoded as JSON
    #[error("cache file {} is not valid JSON: {source}", path.display())]
    Serialization {
        /// File being encoded or decoded
        path: PathBuf,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// An entity id cannot be used as a file name inside its kind directory
    #[error("entity id `{id}` cannot be used as a {kind} cache key")]
    InvalidId {
        /// Entity kind
        kind: &'static str,
        /// Rejected id
        id: String,
    },
}

impl CacheError {
    /// Build an I/O error for `path`
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a serialization error for `path`
    pub fn serialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Serialization {
            path: path.into(),
            source,
        }
    }
}
