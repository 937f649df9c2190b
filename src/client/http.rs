// Copyright (c) 2025 SDS Datasource Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! HTTP client implementation for the SDS REST API.
//!
//! This module provides a low-level HTTP client with:
//! - Connection pooling
//! - Bearer token authentication
//! - Configurable timeouts
//!
//! Requests are never retried; the caller owns retry policy.

use crate::error::{Error, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Read timeout duration.
    pub read_timeout: Duration,
    /// Maximum number of idle connections per host.
    pub max_connections_per_host: usize,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(60),
            max_connections_per_host: 100,
            user_agent: format!("sds-datasource/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Build a pooled reqwest client from this configuration.
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.read_timeout)
            .pool_max_idle_per_host(self.max_connections_per_host)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))
    }
}

/// HTTP client for SDS requests.
///
/// Issues authorized GETs against absolute URLs and classifies any non-2xx
/// answer as [`Error::HttpStatus`].
#[derive(Debug, Clone)]
pub struct SdsHttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl SdsHttpClient {
    /// Creates a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Returns the underlying reqwest client for building requests.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// GET `url` and return the raw body of a 2xx response.
    ///
    /// `token` is the full `Authorization` value (`Bearer …`); an empty token
    /// sends no `Authorization` header. `headers` are added verbatim.
    pub async fn request(
        &self,
        token: &str,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<String> {
        debug!("Executing GET {}", url);

        let mut request = self.client.get(url);
        if !token.is_empty() {
            request = request.header("Authorization", token);
        }
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            Error::transport(format!("Request to {} failed: {}", url, e))
        })?;

        read_success_body(response).await
    }
}

/// Read a response body, turning non-2xx statuses into [`Error::HttpStatus`].
pub(crate) async fn read_success_body(response: Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::transport(format!("Failed to read response: {}", e)))?;

    if !status.is_success() {
        let status_line = match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };
        warn!("Request failed with {}: {}", status_line, body);
        return Err(Error::HttpStatus {
            status: status_line,
            body,
        });
    }

    Ok(body)
}
