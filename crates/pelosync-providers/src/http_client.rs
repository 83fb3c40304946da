// ABOUTME: HTTP client construction for the remote workout service
// ABOUTME: Cookie-backed session store, identifying User-Agent, and TLS verification options
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pelosync_core::constants::service::user_agent;
use pelosync_core::{ProviderError, ProviderResult};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Certificate, Client, ClientBuilder};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// TLS options applied to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Validate server certificates
    pub ssl_verify: bool,
    /// Extra PEM root certificate to trust
    pub ssl_cert: Option<PathBuf>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            ssl_verify: true,
            ssl_cert: None,
        }
    }
}

/// Build the client used for every request of one session
///
/// The cookie store carries the session established at login. Redirects are
/// not followed so a 3xx reaches status classification. No timeouts are
/// configured beyond the transport defaults.
///
/// # Errors
///
/// Returns `ProviderError::Configuration` if the certificate cannot be loaded
/// or the TLS backend rejects the settings
pub fn build_client(config: &HttpClientConfig) -> ProviderResult<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let mut builder = ClientBuilder::new()
        .cookie_store(true)
        .user_agent(user_agent())
        .redirect(Policy::none())
        .default_headers(headers);

    if !config.ssl_verify {
        warn!("TLS certificate verification is disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    if let Some(path) = &config.ssl_cert {
        let pem = fs::read(path).map_err(|e| {
            ProviderError::configuration(format!("cannot read certificate {}: {e}", path.display()))
        })?;
        let certificate = Certificate::from_pem(&pem).map_err(|e| {
            ProviderError::configuration(format!("invalid certificate {}: {e}", path.display()))
        })?;
        builder = builder.add_root_certificate(certificate);
    }

    builder
        .build()
        .map_err(|e| ProviderError::configuration(format!("failed to build HTTP client: {e}")))
}
