// ABOUTME: Configuration module for sync and analysis settings
// ABOUTME: Environment-driven options plus the error type for malformed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for pelosync
//!
//! - **Environment**: `SyncConfig` loaded from `PELOTON_*` environment variables
//! - **Error**: `ConfigError` for values that are present but malformed

/// Environment-based configuration
pub mod environment;
/// Configuration errors
pub mod error;

pub use environment::SyncConfig;
pub use error::ConfigError;
