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

//! Data source entry point for a hosting application.
//!
//! A [`DataSource`] is built from the host's JSON settings plus the client
//! secret, and answers [`SdsQuery`] requests with [`Table`]s. It supports
//! AVEVA Data Hub (token-authenticated, namespace or community scope) and a
//! local Edge Data Store (unauthenticated, namespace scope only).
//!
//! ## Example
//!
//! ```ignore
//! use sds_datasource::{DataSource, DataSourceSecrets, DataSourceSettings, SdsQuery, TimeRange};
//!
//! let settings = DataSourceSettings::from_json(r#"{
//!     "resource": "https://uswe.datahub.connect.aveva.com",
//!     "tenantId": "...", "clientId": "...", "namespaceId": "production"
//! }"#)?;
//! let source = DataSource::new(settings, DataSourceSecrets::new("secret"))?;
//! let table = source.query(&SdsQuery::streams("pump*"), &range, None).await?;
//! ```

use crate::auth::{AuthProvider, ClientCredentials, NoAuth, PassThroughToken};
use crate::client::{CommunityScope, HttpClientConfig, NamespaceScope, SdsClient, SdsHttpClient};
use crate::error::{Error, Result};
use crate::logging::{init_logging, LogConfig};
use crate::query::SdsQueryService;
use crate::table::Table;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default Edge Data Store port.
pub const DEFAULT_EDS_PORT: u16 = 5590;

/// Default SDS API version.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Edge Data Store always runs a single tenant with this id.
pub const EDS_TENANT_ID: &str = "default";

/// The only query collection currently served.
pub const STREAMS_COLLECTION: &str = "streams";

/// Which SDS deployment the data source talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum DataSourceKind {
    /// AVEVA Data Hub.
    #[default]
    #[serde(rename = "ADH")]
    Adh,
    /// A local Edge Data Store.
    #[serde(rename = "EDS")]
    Eds,
}

/// Data source settings as stored by the host.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceSettings {
    #[serde(rename = "type", default)]
    pub kind: DataSourceKind,
    #[serde(default = "default_eds_port", deserialize_with = "port_from_string_or_number")]
    pub eds_port: u16,
    #[serde(default)]
    pub resource: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub use_community: bool,
    #[serde(default)]
    pub community_id: String,
    #[serde(default)]
    pub oauth_pass_thru: bool,
    #[serde(default)]
    pub namespace_id: String,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            kind: DataSourceKind::Adh,
            eds_port: DEFAULT_EDS_PORT,
            resource: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            tenant_id: String::new(),
            client_id: String::new(),
            use_community: false,
            community_id: String::new(),
            oauth_pass_thru: false,
            namespace_id: String::new(),
            log_level: None,
            log_file: None,
        }
    }
}

fn default_eds_port() -> u16 {
    DEFAULT_EDS_PORT
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

/// Ports are stored as text by some hosts; accept either form.
fn port_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Option::<Port>::deserialize(deserializer)? {
        None => Ok(DEFAULT_EDS_PORT),
        Some(Port::Number(port)) => Ok(port),
        Some(Port::Text(text)) if text.trim().is_empty() => Ok(DEFAULT_EDS_PORT),
        Some(Port::Text(text)) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid edsPort: {}", text))),
    }
}

impl DataSourceSettings {
    /// Parse settings from the host's JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid data source settings: {}", e)))
    }

    /// Reject combinations that cannot produce a working data source.
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            DataSourceKind::Eds => {
                if self.namespace_id.is_empty() {
                    return Err(Error::config("namespaceId is required"));
                }
            }
            DataSourceKind::Adh => {
                if self.resource.is_empty() {
                    return Err(Error::config("resource is required"));
                }
                if self.tenant_id.is_empty() {
                    return Err(Error::config("tenantId is required"));
                }
                if self.use_community && self.community_id.is_empty() {
                    return Err(Error::config("communityId is required in community mode"));
                }
                if !self.use_community && self.namespace_id.is_empty() {
                    return Err(Error::config("namespaceId is required"));
                }
                if !self.oauth_pass_thru && self.client_id.is_empty() {
                    return Err(Error::config("clientId is required"));
                }
            }
        }
        Ok(())
    }

    /// Service base URL.
    pub fn base_url(&self) -> String {
        match self.kind {
            DataSourceKind::Eds => format!("http://localhost:{}", self.eds_port),
            DataSourceKind::Adh => self.resource.trim_end_matches('/').to_string(),
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            file: self.log_file.clone(),
        }
    }

    fn is_community(&self) -> bool {
        self.kind == DataSourceKind::Adh && self.use_community
    }

    fn is_pass_through(&self) -> bool {
        self.kind == DataSourceKind::Adh && self.oauth_pass_thru
    }
}

/// Secure settings, kept apart from the plain JSON settings.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceSecrets {
    #[serde(default)]
    pub client_secret: String,
}

impl DataSourceSecrets {
    pub fn new(client_secret: impl Into<String>) -> Self {
        Self {
            client_secret: client_secret.into(),
        }
    }
}

impl std::fmt::Debug for DataSourceSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSourceSecrets")
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// One query from the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdsQuery {
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Free-text stream search, used when `id` is empty.
    #[serde(default)]
    pub query_text: String,
    /// Stream id, or the stream's `Self` URL in community mode.
    #[serde(default)]
    pub id: String,
    /// Display name chosen in the host UI; informational only.
    #[serde(default)]
    pub name: String,
}

fn default_collection() -> String {
    STREAMS_COLLECTION.to_string()
}

impl SdsQuery {
    /// A stream listing query.
    pub fn streams(query_text: impl Into<String>) -> Self {
        Self {
            collection: default_collection(),
            query_text: query_text.into(),
            ..Default::default()
        }
    }

    /// A stream data query.
    pub fn stream_data(id: impl Into<String>) -> Self {
        Self {
            collection: default_collection(),
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Inclusive query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub message: String,
}

impl HealthCheckResult {
    fn ok() -> Self {
        Self {
            status: HealthStatus::Ok,
            message: "Data source is working".to_string(),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            status: HealthStatus::Error,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
enum Scope {
    Namespace(NamespaceScope),
    Community(CommunityScope),
}

/// A configured SDS data source.
#[derive(Debug)]
pub struct DataSource {
    settings: DataSourceSettings,
    service: SdsQueryService,
    scope: Scope,
    /// Token source when the host does not forward its own.
    auth: Arc<dyn AuthProvider>,
}

impl DataSource {
    /// Validate settings and build the data source with default HTTP options.
    pub fn new(settings: DataSourceSettings, secrets: DataSourceSecrets) -> Result<Self> {
        Self::with_http_config(settings, secrets, HttpClientConfig::default())
    }

    pub fn with_http_config(
        settings: DataSourceSettings,
        secrets: DataSourceSecrets,
        http_config: HttpClientConfig,
    ) -> Result<Self> {
        init_logging(&settings.log_config());
        settings.validate()?;

        let http = SdsHttpClient::new(http_config)?;
        let base_url = settings.base_url();

        let (api_version, tenant_id) = match settings.kind {
            DataSourceKind::Eds => (DEFAULT_API_VERSION.to_string(), EDS_TENANT_ID.to_string()),
            DataSourceKind::Adh => (settings.api_version.clone(), settings.tenant_id.clone()),
        };

        let scope = if settings.is_community() {
            Scope::Community(CommunityScope::new(settings.community_id.clone()))
        } else {
            Scope::Namespace(NamespaceScope::new(
                tenant_id,
                settings.namespace_id.clone(),
            ))
        };

        let auth: Arc<dyn AuthProvider> = match settings.kind {
            DataSourceKind::Eds => Arc::new(NoAuth),
            DataSourceKind::Adh => Arc::new(ClientCredentials::with_client(
                http.inner().clone(),
                base_url.clone(),
                settings.client_id.clone(),
                secrets.client_secret,
            )),
        };

        info!(
            "Created {:?} data source for {} ({})",
            settings.kind,
            base_url,
            match &scope {
                Scope::Namespace(_) => "namespace",
                Scope::Community(_) => "community",
            }
        );

        let service = SdsQueryService::new(SdsClient::new(http, base_url, api_version));
        Ok(Self {
            settings,
            service,
            scope,
            auth,
        })
    }

    pub fn settings(&self) -> &DataSourceSettings {
        &self.settings
    }

    pub fn service(&self) -> &SdsQueryService {
        &self.service
    }

    /// Authorization for a request, from the host in pass-through mode or
    /// from the configured provider otherwise.
    async fn token(&self, forwarded_authorization: Option<&str>) -> Result<String> {
        if self.settings.is_pass_through() {
            return PassThroughToken::new(forwarded_authorization.unwrap_or_default())
                .auth_header()
                .await;
        }
        self.auth.auth_header().await.map_err(|e| {
            warn!("Unable to retrieve token: {}", e);
            e
        })
    }

    /// Run one query.
    pub async fn query(
        &self,
        query: &SdsQuery,
        range: &TimeRange,
        forwarded_authorization: Option<&str>,
    ) -> Result<Table> {
        let token = self.token(forwarded_authorization).await?;
        self.run(&token, query, range).await
    }

    /// Run a batch of queries keyed by reference id, in order, sharing one
    /// token. The first failure fails the batch.
    pub async fn query_all(
        &self,
        queries: &[(String, SdsQuery)],
        range: &TimeRange,
        forwarded_authorization: Option<&str>,
    ) -> Result<BTreeMap<String, Table>> {
        let token = self.token(forwarded_authorization).await?;

        let mut tables = BTreeMap::new();
        for (ref_id, query) in queries {
            debug!("Running query {}", ref_id);
            let table = self.run(&token, query, range).await?;
            tables.insert(ref_id.clone(), table);
        }
        Ok(tables)
    }

    async fn run(&self, token: &str, query: &SdsQuery, range: &TimeRange) -> Result<Table> {
        if query.collection != STREAMS_COLLECTION {
            return Err(Error::config(format!(
                "Unsupported collection: {}",
                query.collection
            )));
        }

        match (&self.scope, query.id.is_empty()) {
            (Scope::Namespace(scope), true) => {
                self.service
                    .list_streams(token, scope, &query.query_text)
                    .await
            }
            (Scope::Community(community), true) => {
                self.service
                    .list_community_streams(token, community, &query.query_text)
                    .await
            }
            (Scope::Namespace(scope), false) => {
                self.service
                    .fetch_stream_data(token, scope, &query.id, &range.from, &range.to)
                    .await
            }
            (Scope::Community(community), false) => {
                self.service
                    .fetch_community_stream_data(
                        token,
                        community,
                        &query.id,
                        &range.from,
                        &range.to,
                    )
                    .await
            }
        }
    }

    /// Check that a token can be obtained and streams can be listed.
    pub async fn check_health(&self, forwarded_authorization: Option<&str>) -> HealthCheckResult {
        if self.settings.is_pass_through() {
            return HealthCheckResult::ok();
        }

        let token = match self.token(forwarded_authorization).await {
            Ok(token) => token,
            Err(_) => return HealthCheckResult::error("Unable to retrieve token"),
        };

        let now = Utc::now();
        let listing = self
            .run(&token, &SdsQuery::streams(""), &TimeRange::new(now, now))
            .await;
        match listing {
            Ok(_) => HealthCheckResult::ok(),
            Err(e) => {
                warn!("Health check request failed: {}", e);
                HealthCheckResult::error("Invalid configuration")
            }
        }
    }
}
