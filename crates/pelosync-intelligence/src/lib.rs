// ABOUTME: Workout analytics computed from the local object cache
// ABOUTME: Daily streaks, run-rate year-end projection, and the cumulative minutes series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analytics over synced workouts.
//!
//! Everything here reads the cache only; no remote calls are made.

/// Cache-backed analysis engine
pub mod analysis;
/// Analysis errors
pub mod error;
/// Run-rate projection
pub mod projection;
/// Streak computation
pub mod streaks;

pub use analysis::{Analysis, AnalysisEngine};
pub use error::{AnalysisError, AnalysisResult};
pub use projection::{days_in_year, eoy_estimate, projection_series, ProjectionPoint};
pub use streaks::StreakCalculator;
