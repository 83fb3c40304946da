// ABOUTME: Error type raised when remote or cached JSON cannot become an entity
// ABOUTME: Names the entity kind and the field that was missing or malformed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Entity decoding failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The record was not a JSON object
    #[error("{kind} record is not a JSON object")]
    NotAnObject {
        /// Entity kind being decoded
        kind: &'static str,
    },

    /// A required field was absent or null
    #[error("{kind} record is missing required field `{field}`")]
    MissingField {
        /// Entity kind being decoded
        kind: &'static str,
        /// Name of the missing field
        field: &'static str,
    },

    /// A field had an unexpected type or value
    #[error("{kind} record has invalid field `{field}`: {reason}")]
    InvalidField {
        /// Entity kind being decoded
        kind: &'static str,
        /// Name of the invalid field
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

impl ModelError {
    /// Shorthand for a missing required field
    #[must_use]
    pub const fn missing(kind: &'static str, field: &'static str) -> Self {
        Self::MissingField { kind, field }
    }

    /// Shorthand for an invalid field
    pub fn invalid(kind: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            kind,
            field,
            reason: reason.into(),
        }
    }
}
