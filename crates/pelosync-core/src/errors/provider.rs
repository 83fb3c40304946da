// ABOUTME: Structured error types for remote fitness-service operations
// ABOUTME: Classifies HTTP status ranges into redirect, client, and server failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheError, ModelError};
use thiserror::Error;

/// Result alias used by every remote-facing operation
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Pass 2xx responses through, turn everything else into the matching error
///
/// # Errors
///
/// Returns `Redirect`, `Client`, `Server`, or `UnexpectedStatus` by status range
pub fn classify_status(endpoint: &str, status: u16, body: &str) -> ProviderResult<()> {
    ProviderError::from_status(endpoint, status, body).map_or(Ok(()), Err)
}

/// Failures talking to the remote service
///
/// The three status-driven variants mirror the remote contract: an unexpected
/// 3xx, a 4xx (bad credentials, bad request), or a 5xx. All of them are fatal to
/// the operation in progress.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The service answered with an unexpected 3xx
    #[error("unexpected redirect ({status}) from {endpoint}")]
    Redirect {
        /// Path that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The service rejected the request (4xx)
    #[error("client error {status} from {endpoint}: {message}")]
    Client {
        /// Path that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The service failed to process the request (5xx)
    #[error("server error {status} from {endpoint}: {message}")]
    Server {
        /// Path that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Status code outside every recognised range (1xx or >= 600)
    #[error("unexpected status {status} from {endpoint}")]
    UnexpectedStatus {
        /// Path that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
    },

    /// Username or password unavailable when a session had to be created
    #[error("a username and password must be configured before contacting the service")]
    MissingCredentials,

    /// Client construction or option problem (bad certificate path, etc.)
    #[error("configuration error: {reason}")]
    Configuration {
        /// What was misconfigured
        reason: String,
    },

    /// The request never produced an HTTP response
    #[error("transport failure on {endpoint}: {message}")]
    Transport {
        /// Path that was requested
        endpoint: String,
        /// Underlying transport message
        message: String,
    },

    /// The response body was not what the endpoint promises
    #[error("invalid response from {endpoint}: {reason}")]
    InvalidResponse {
        /// Path that was requested
        endpoint: String,
        /// Decoding problem
        reason: String,
    },

    /// Persisting a fetched entity failed
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A fetched record could not be turned into an entity
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ProviderError {
    /// Classify a non-success status into the matching variant
    ///
    /// Returns `None` for 2xx statuses.
    #[must_use]
    pub fn from_status(endpoint: &str, status: u16, body: &str) -> Option<Self> {
        let endpoint = endpoint.to_owned();
        let message = body.to_owned();
        match status {
            200..=299 => None,
            300..=399 => Some(Self::Redirect {
                endpoint,
                status,
                message,
            }),
            400..=499 => Some(Self::Client {
                endpoint,
                status,
                message,
            }),
            500..=599 => Some(Self::Server {
                endpoint,
                status,
                message,
            }),
            _ => Some(Self::UnexpectedStatus { endpoint, status }),
        }
    }

    /// Build an invalid-response error
    pub fn invalid_response(endpoint: &str, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            endpoint: endpoint.to_owned(),
            reason: reason.into(),
        }
    }

    /// Build a configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// HTTP status carried by this error, if it came from a response
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Redirect { status, .. }
            | Self::Client { status, .. }
            | Self::Server { status, .. }
            | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for the 3xx variant
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    /// True for the 4xx variant
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Client { .. })
    }

    /// True for the 5xx variant
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Server { .. })
    }
}
