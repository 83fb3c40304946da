// ABOUTME: Main library entry point for the pelosync workout synchronizer
// ABOUTME: Configuration, logging, and the incremental sync engine over the workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pelosync
//!
//! Incrementally copies workout history from the remote fitness service into
//! a flat-file cache (`<root>/<kind>/<id>.json`) and derives streak and
//! year-end statistics from that cache.
//!
//! ## Crates
//!
//! - **pelosync-core**: errors, entity models with lazy fields, `ObjectCache`
//! - **pelosync-providers**: `PelotonClient`, entity factories, paged listing
//! - **pelosync-intelligence**: `AnalysisEngine`
//!
//! ## Example
//!
//! ```rust,no_run
//! use pelosync::config::SyncConfig;
//! use pelosync::sync::SyncEngine;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = SyncConfig::from_env()?;
//! let engine = SyncEngine::new(config.connect()?);
//! for summary in engine.refresh().await? {
//!     println!("{} with {}", summary.title, summary.instructor);
//! }
//! let stats = config.analysis_engine().analyze()?;
//! println!("{:.0} minutes so far", stats.accumulated_minutes);
//! # Ok(())
//! # }
//! ```

/// Environment configuration
pub mod config;
/// Tracing subscriber setup
pub mod logging;
/// Incremental refresh
pub mod sync;
