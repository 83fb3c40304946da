// ABOUTME: Environment configuration for credentials, cache location, TLS, and analysis options
// ABOUTME: Reads PELOTON_* variables; absent values fall back to defaults, malformed ones are errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Missing credentials are not a load error. They only surface as
//! `ProviderError::MissingCredentials` once a session is actually needed, so
//! cache-only commands work without them.

use super::ConfigError;
use pelosync_core::constants::{analysis, api, paging};
use pelosync_core::{ObjectCache, ProviderResult};
use pelosync_intelligence::AnalysisEngine;
use pelosync_providers::{Credentials, HttpClientConfig, HttpTransport, PelotonClient};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Environment variable names
pub mod vars {
    /// Login name or email
    pub const USERNAME: &str = "PELOTON_USERNAME";
    /// Login password
    pub const PASSWORD: &str = "PELOTON_PASSWORD";
    /// Cache root; caching is disabled when unset
    pub const DATA_CACHE_DIR: &str = "PELOTON_DATA_CACHE_DIR";
    /// Verify server certificates
    pub const SSL_VERIFY: &str = "PELOTON_SSL_VERIFY";
    /// Extra PEM root certificate
    pub const SSL_CERT: &str = "PELOTON_SSL_CERT";
    /// Only log errors
    pub const IGNORE_WARNINGS: &str = "PELOTON_IGNORE_WARNINGS";
    /// Challenge tracked for accumulated minutes
    pub const ANNUAL_CHALLENGE_ID: &str = "PELOTON_ANNUAL_CHALLENGE_ID";
    /// Service base URL
    pub const API_BASE_URL: &str = "PELOTON_API_BASE_URL";
    /// Listing page size
    pub const PAGE_SIZE: &str = "PELOTON_PAGE_SIZE";
}

/// Settings shared by sync and analysis
#[derive(Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Login name or email
    pub username: Option<String>,
    /// Login password
    pub password: Option<String>,
    /// Cache root
    pub data_cache_dir: Option<PathBuf>,
    /// Verify server certificates
    pub ssl_verify: bool,
    /// Extra PEM root certificate
    pub ssl_cert: Option<PathBuf>,
    /// Only log errors
    pub ignore_warnings: bool,
    /// Challenge tracked for accumulated minutes
    pub annual_challenge_id: String,
    /// Service base URL
    pub api_base_url: String,
    /// Listing page size
    pub page_size: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            data_cache_dir: None,
            ssl_verify: true,
            ssl_cert: None,
            ignore_warnings: false,
            annual_challenge_id: analysis::DEFAULT_ANNUAL_CHALLENGE_ID.to_owned(),
            api_base_url: api::DEFAULT_BASE_URL.to_owned(),
            page_size: paging::DEFAULT_PAGE_SIZE,
        }
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("data_cache_dir", &self.data_cache_dir)
            .field("ssl_verify", &self.ssl_verify)
            .field("ssl_cert", &self.ssl_cert)
            .field("ignore_warnings", &self.ignore_warnings)
            .field("annual_challenge_id", &self.annual_challenge_id)
            .field("api_base_url", &self.api_base_url)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl SyncConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a boolean or numeric option is malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`; empty values count as unset
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a boolean or numeric option is malformed
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|value| value.trim().to_owned()).filter(|value| !value.is_empty());
        let defaults = Self::default();

        Ok(Self {
            username: get(vars::USERNAME),
            password: get(vars::PASSWORD),
            data_cache_dir: get(vars::DATA_CACHE_DIR).map(PathBuf::from),
            ssl_verify: get(vars::SSL_VERIFY)
                .map(|value| parse_bool(vars::SSL_VERIFY, &value))
                .transpose()?
                .unwrap_or(defaults.ssl_verify),
            ssl_cert: get(vars::SSL_CERT).map(PathBuf::from),
            ignore_warnings: get(vars::IGNORE_WARNINGS)
                .map(|value| parse_bool(vars::IGNORE_WARNINGS, &value))
                .transpose()?
                .unwrap_or(defaults.ignore_warnings),
            annual_challenge_id: get(vars::ANNUAL_CHALLENGE_ID).unwrap_or(defaults.annual_challenge_id),
            api_base_url: get(vars::API_BASE_URL).unwrap_or(defaults.api_base_url),
            page_size: get(vars::PAGE_SIZE)
                .map(|value| parse_page_size(&value))
                .transpose()?
                .unwrap_or(defaults.page_size),
        })
    }

    /// Login credentials
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Object cache at the configured root, disabled when none is set
    #[must_use]
    pub fn cache(&self) -> ObjectCache {
        ObjectCache::from_option(self.data_cache_dir.clone())
    }

    /// TLS options for the HTTP client
    #[must_use]
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            ssl_verify: self.ssl_verify,
            ssl_cert: self.ssl_cert.clone(),
        }
    }

    /// Remote client over the network; no request is sent yet
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` if the HTTP client cannot be built
    pub fn connect(&self) -> ProviderResult<PelotonClient> {
        let transport = HttpTransport::new(&self.api_base_url, &self.http_client_config())?;
        Ok(PelotonClient::new(transport, self.credentials(), self.cache()).with_page_size(self.page_size))
    }

    /// Analysis engine over the configured cache
    #[must_use]
    pub fn analysis_engine(&self) -> AnalysisEngine {
        AnalysisEngine::new(self.cache()).with_annual_challenge(self.annual_challenge_id.clone())
    }
}

/// Parse a boolean option
///
/// # Errors
///
/// Returns `ConfigError::InvalidBool` for anything outside the accepted spellings
pub fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_owned(),
        }),
    }
}

fn parse_page_size(value: &str) -> Result<usize, ConfigError> {
    value
        .parse::<usize>()
        .ok()
        .filter(|size| *size >= paging::MIN_PAGE_SIZE)
        .ok_or_else(|| ConfigError::InvalidNumber {
            var: vars::PAGE_SIZE,
            value: value.to_owned(),
        })
}
