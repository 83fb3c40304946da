// ABOUTME: Request transport abstraction between the client and the network
// ABOUTME: reqwest-backed implementation resolving paths against the configured base URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::http_client::{build_client, HttpClientConfig};
use async_trait::async_trait;
use pelosync_core::{ProviderError, ProviderResult};
use reqwest::Client;
use serde_json::Value;

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Build a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends requests for a path relative to the service root
///
/// Status codes are returned as-is; classification happens in the client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path` with query parameters
    async fn get(&self, path: &str, query: &[(&str, String)]) -> ProviderResult<RawResponse>;

    /// POST a JSON body to `path`
    async fn post_json(&self, path: &str, body: &Value) -> ProviderResult<RawResponse>;
}

/// Network transport over a cookie-carrying reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url`
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Configuration` if the client cannot be built
    pub fn new(base_url: impl Into<String>, config: &HttpClientConfig) -> ProviderResult<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn finish(path: &str, response: reqwest::Response) -> ProviderResult<RawResponse> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ProviderError::Transport {
            endpoint: path.to_owned(),
            message: e.to_string(),
        })?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> ProviderResult<RawResponse> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::Transport {
                endpoint: path.to_owned(),
                message: e.to_string(),
            })?;
        Self::finish(path, response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> ProviderResult<RawResponse> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport {
                endpoint: path.to_owned(),
                message: e.to_string(),
            })?;
        Self::finish(path, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one connection with a canned HTTP response
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0_u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = socket.read(&mut buf).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..read]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_redirect_is_returned_not_followed() {
        let base = serve_once(
            "HTTP/1.1 302 Found\r\nLocation: /final\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let transport = HttpTransport::new(base, &HttpClientConfig::default()).unwrap();

        let response = transport.get("/moved", &[]).await.unwrap();

        assert_eq!(response.status, 302);
        let err = pelosync_core::classify_status("/moved", response.status, &response.body).unwrap_err();
        assert!(err.is_redirect());
    }

    #[tokio::test]
    async fn test_body_and_status_pass_through() {
        let base = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
        )
        .await;
        let transport = HttpTransport::new(format!("{base}/"), &HttpClientConfig::default()).unwrap();

        let response = transport.get("/api/me", &[]).await.unwrap();

        assert_eq!(response, RawResponse::new(404, "not found"));
    }
}
