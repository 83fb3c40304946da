// ABOUTME: Authenticated remote client holding credentials, session, user id, and the object cache
// ABOUTME: Classifies response statuses into typed errors and logs in lazily on first use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Remote Client
//!
//! `PelotonClient` replaces process-wide session state with one explicit
//! object. The session (and with it the user id) is created on the first call
//! that needs it and kept for the client's lifetime. Calls are issued one at a
//! time; share a client only between callers that await each request in turn.

use crate::transport::{RawResponse, Transport};
use pelosync_core::constants::{api, paging};
use pelosync_core::{classify_status, ObjectCache, ProviderError, ProviderResult};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Login credentials
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Username or email
    pub username: Option<String>,
    /// Password
    pub password: Option<String>,
}

impl Credentials {
    /// Credentials with both parts set
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Id of the logged-in user
    pub user_id: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    user_id: String,
}

/// Client for the remote workout service
pub struct PelotonClient {
    transport: Box<dyn Transport>,
    credentials: Credentials,
    session: OnceCell<Session>,
    cache: ObjectCache,
    page_size: usize,
}

impl fmt::Debug for PelotonClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PelotonClient")
            .field("credentials", &self.credentials)
            .field("session", &self.session.get())
            .field("cache", &self.cache)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl PelotonClient {
    /// Create a client; nothing is sent until the first request
    pub fn new(transport: impl Transport + 'static, credentials: Credentials, cache: ObjectCache) -> Self {
        Self {
            transport: Box::new(transport),
            credentials,
            session: OnceCell::new(),
            cache,
            page_size: paging::DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the listing page size (clamped to the accepted range)
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(paging::MIN_PAGE_SIZE, paging::MAX_PAGE_SIZE);
        self
    }

    /// Cache that fetched entities are written to
    #[must_use]
    pub const fn cache(&self) -> &ObjectCache {
        &self.cache
    }

    /// Listing page size
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether a session has been established
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.initialized()
    }

    /// Log in with the configured credentials, once per client
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::MissingCredentials` if username or password is
    /// unset, or the login request's error
    pub async fn authenticate(&self) -> ProviderResult<&Session> {
        self.session.get_or_try_init(|| self.login()).await
    }

    /// Id of the logged-in user, logging in first if needed
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::authenticate`]
    pub async fn user_id(&self) -> ProviderResult<&str> {
        Ok(self.authenticate().await?.user_id.as_str())
    }

    async fn login(&self) -> ProviderResult<Session> {
        let (Some(username), Some(password)) = (&self.credentials.username, &self.credentials.password)
        else {
            return Err(ProviderError::MissingCredentials);
        };

        let body = json!({
            "username_or_email": username,
            "password": password,
        });
        debug!(endpoint = api::LOGIN_PATH, "POST");
        let response = self.transport.post_json(api::LOGIN_PATH, &body).await?;
        classify_status(api::LOGIN_PATH, response.status, &response.body)?;

        let login: LoginResponse = serde_json::from_str(&response.body)
            .map_err(|e| ProviderError::invalid_response(api::LOGIN_PATH, e.to_string()))?;
        info!(user_id = %login.user_id, "authenticated with remote service");
        Ok(Session {
            user_id: login.user_id,
        })
    }

    /// GET `path` as JSON, logging in first if no session exists
    ///
    /// # Errors
    ///
    /// Returns `Redirect`, `Client`, or `Server` for 3xx/4xx/5xx responses,
    /// `InvalidResponse` if the body is not JSON, or any login error
    pub async fn request(&self, path: &str, params: &[(&str, String)]) -> ProviderResult<Value> {
        self.authenticate().await?;
        debug!(endpoint = path, ?params, "GET");
        let RawResponse { status, body } = self.transport.get(path, params).await?;
        debug!(endpoint = path, status, "response");
        classify_status(path, status, &body)?;
        serde_json::from_str(&body).map_err(|e| ProviderError::invalid_response(path, e.to_string()))
    }
}
