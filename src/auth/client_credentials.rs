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

//! Client-credentials authentication with token caching.

use crate::auth::AuthProvider;
use crate::client::http::{read_success_body, HttpClientConfig};
use crate::error::{Error, Result};
use crate::types::{OpenIdConfiguration, TokenResponse};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// A cached token is reused only while it has more than this many seconds left.
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Discovery document location, relative to the resource URL.
pub const OPENID_CONFIGURATION_PATH: &str = "/identity/.well-known/openid-configuration";

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now > Duration::seconds(TOKEN_REFRESH_MARGIN_SECS)
    }
}

/// Exchanges a client id and secret for bearer tokens.
///
/// The token endpoint is discovered from the resource's OpenID
/// configuration. Tokens are cached until they are within
/// [`TOKEN_REFRESH_MARGIN_SECS`] of expiry and then refreshed lazily on the
/// next call. The cache lock is held across the refresh, so concurrent
/// callers share one round trip. A failed refresh leaves the cache as it was.
pub struct ClientCredentials {
    client: Client,
    resource: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("resource", &self.resource)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl ClientCredentials {
    /// Create a provider with its own HTTP client.
    pub fn new(
        resource: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        config: &HttpClientConfig,
    ) -> Result<Self> {
        Ok(Self::with_client(
            config.build_client()?,
            resource,
            client_id,
            client_secret,
        ))
    }

    /// Create a provider that shares an existing HTTP client.
    pub fn with_client(
        client: Client,
        resource: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            resource: resource.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cached: Mutex::new(None),
        }
    }

    /// Return `Bearer <token>`, refreshing the cached token if needed.
    pub async fn token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(format!("Bearer {}", token.access_token));
            }
        }

        debug!("Refreshing access token for client {}", self.client_id);
        let endpoint = self.discover_token_endpoint().await?;
        let token = self.exchange(&endpoint).await?;
        let header = format!("Bearer {}", token.access_token);
        *cached = Some(token);
        Ok(header)
    }

    /// Expiry of the cached token, if one has been obtained.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.cached.lock().await.as_ref().map(|t| t.expires_at)
    }

    async fn discover_token_endpoint(&self) -> Result<String> {
        let url = format!("{}{}", self.resource, OPENID_CONFIGURATION_PATH);
        debug!("Fetching OpenID configuration from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Error requesting well known endpoints: {}", e);
            Error::transport(format!("Failed to fetch {}: {}", url, e))
        })?;
        let body = read_success_body(response).await?;

        let config: OpenIdConfiguration = serde_json::from_str(&body).map_err(|e| {
            warn!("Error parsing OpenID configuration: {} - body: {}", e, body);
            Error::decode(format!("Failed to parse OpenID configuration: {}", e))
        })?;

        config
            .token_endpoint
            .filter(|endpoint| !endpoint.is_empty())
            .ok_or_else(|| Error::auth("OpenID configuration has no token_endpoint"))
    }

    async fn exchange(&self, token_endpoint: &str) -> Result<CachedToken> {
        debug!("Requesting client credentials token from {}", token_endpoint);

        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];
        let response = self
            .client
            .post(token_endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                warn!("Error requesting token: {}", e);
                Error::transport(format!("Failed to request token: {}", e))
            })?;
        let body = read_success_body(response).await?;

        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Error parsing token response: {}", e);
            Error::decode(format!("Failed to parse token response: {}", e))
        })?;

        let access_token = parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::auth("token response has no access_token"))?;
        let expires_in = parsed
            .expires_in
            .ok_or_else(|| Error::auth("token response has no expires_in"))?;
        let expires_at = token_expiry(Utc::now(), expires_in)
            .ok_or_else(|| Error::auth("token response has an out-of-range expires_in"))?;

        Ok(CachedToken {
            access_token,
            expires_at,
        })
    }
}

/// `now + expires_in` seconds, or `None` if the lifetime is negative, not
/// finite, or past the representable range.
fn token_expiry(now: DateTime<Utc>, expires_in: f64) -> Option<DateTime<Utc>> {
    if !expires_in.is_finite() || expires_in < 0.0 || expires_in > i64::MAX as f64 {
        return None;
    }
    now.checked_add_signed(Duration::try_seconds(expires_in as i64)?)
}

#[async_trait]
impl AuthProvider for ClientCredentials {
    async fn auth_header(&self) -> Result<String> {
        self.token().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_identity(server: &MockServer, expires_in: u64, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path(OPENID_CONFIGURATION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "issuer": server.uri(),
                "token_endpoint": format!("{}/identity/connect/token", server.uri()),
            })))
            .expect(expected_calls)
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/identity/connect/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=my-client"))
            .and(body_string_contains("client_secret=my-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-1",
                "expires_in": expires_in,
                "token_type": "Bearer",
            })))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    fn provider(server: &MockServer) -> ClientCredentials {
        ClientCredentials::new(
            server.uri(),
            "my-client",
            "my-secret",
            &HttpClientConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_cached_token_freshness() {
        let now = Utc::now();
        let fresh = CachedToken {
            access_token: "a".into(),
            expires_at: now + Duration::seconds(3600),
        };
        let stale = CachedToken {
            access_token: "a".into(),
            expires_at: now + Duration::seconds(TOKEN_REFRESH_MARGIN_SECS),
        };
        assert!(fresh.is_fresh(now));
        assert!(!stale.is_fresh(now));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let auth = ClientCredentials::with_client(Client::new(), "https://x", "id", "hunter2");
        let printed = format!("{:?}", auth);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_token_is_cached() {
        let server = MockServer::start().await;
        mount_identity(&server, 3600, 1).await;

        let auth = provider(&server);
        assert_eq!(auth.token().await.unwrap(), "Bearer tok-1");
        assert_eq!(auth.token().await.unwrap(), "Bearer tok-1");
        assert!(auth.expires_at().await.unwrap() > Utc::now());
        // MockServer verifies expect(1) on drop.
    }

    #[tokio::test]
    async fn test_short_lived_token_refreshes_each_call() {
        let server = MockServer::start().await;
        // Inside the refresh margin from the start, so never reused.
        mount_identity(&server, 60, 2).await;

        let auth = provider(&server);
        auth.token().await.unwrap();
        auth.token().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_refresh() {
        let server = MockServer::start().await;
        mount_identity(&server, 3600, 1).await;

        let auth = Arc::new(provider(&server));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let auth = Arc::clone(&auth);
                tokio::spawn(async move { auth.auth_header().await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "Bearer tok-1");
        }
    }

    #[tokio::test]
    async fn test_failed_exchange_commits_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(OPENID_CONFIGURATION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_endpoint": format!("{}/identity/connect/token", server.uri()),
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/identity/connect/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let auth = provider(&server);
        let err = auth.token().await.unwrap_err();
        assert_eq!(err.status(), Some("400 Bad Request"));
        assert!(auth.expires_at().await.is_none());
    }

    #[tokio::test]
    async fn test_discovery_without_token_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(OPENID_CONFIGURATION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "issuer": "x"
            })))
            .mount(&server)
            .await;

        let err = provider(&server).token().await.unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }

    #[tokio::test]
    async fn test_token_response_without_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(OPENID_CONFIGURATION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_endpoint": format!("{}/token", server.uri()),
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"expires_in\": 3600}"))
            .mount(&server)
            .await;

        let auth = provider(&server);
        assert!(matches!(auth.token().await.unwrap_err(), Error::Auth(_)));
        assert!(auth.expires_at().await.is_none());
    }

    #[test]
    fn test_token_expiry_bounds() {
        let now = Utc::now();
        assert_eq!(token_expiry(now, 60.0), Some(now + Duration::seconds(60)));
        assert_eq!(token_expiry(now, -1.0), None);
        assert_eq!(token_expiry(now, f64::NAN), None);
        assert_eq!(token_expiry(now, 1e13), None);
        assert_eq!(token_expiry(now, 1e300), None);
    }

    #[tokio::test]
    async fn test_huge_expires_in_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(OPENID_CONFIGURATION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_endpoint": format!("{}/token", server.uri()),
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{\"access_token\": \"abc\", \"expires_in\": 1e13}"),
            )
            .mount(&server)
            .await;

        let auth = provider(&server);
        assert!(matches!(auth.token().await.unwrap_err(), Error::Auth(_)));
        assert!(auth.expires_at().await.is_none());
    }
}
