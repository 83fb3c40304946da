// ABOUTME: Configuration error types for environment parsing
// ABOUTME: Raised only for values that are set but cannot be parsed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A boolean option had an unrecognised value
    #[error("{var} must be one of 1/0, true/false, yes/no, on/off (got `{value}`)")]
    InvalidBool {
        /// Environment variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// A numeric option could not be parsed
    #[error("{var} must be a positive integer (got `{value}`)")]
    InvalidNumber {
        /// Environment variable name
        var: &'static str,
        /// Raw value
        value: String,
    },
}
