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

//! Sequential Data Store client for Rust
//!
//! This crate reads streams from the AVEVA Sequential Data Store (SDS), on
//! AVEVA Data Hub or a local Edge Data Store, and converts them into typed
//! Arrow tables.
//!
//! ## Overview
//!
//! - [`DataSource`] - Settings, query dispatch and health check for a host
//! - [`SdsQueryService`] - The four query shapes (list, community list, data, community data)
//! - [`SchemaResolver`] - Stream type lookup, direct or through a community
//! - [`TableBuilder`] - Row-to-column assembly of stream data
//! - [`AuthProvider`] - Token sources (client credentials, pass-through, none)
//!
//! ## Features
//!
//! - **Typed columns**: every SDS type code maps to one Arrow type; unknown codes degrade to strings
//! - **Token caching**: client-credentials tokens are reused until five minutes before expiry
//! - **Community streams**: federated streams addressed by `Self` URL with a `Community-Id` header
//!
//! ## Example
//!
//! ```ignore
//! use sds_datasource::{DataSource, DataSourceSecrets, DataSourceSettings, SdsQuery, TimeRange};
//!
//! let settings = DataSourceSettings::from_json(settings_json)?;
//! let source = DataSource::new(settings, DataSourceSecrets::new(client_secret))?;
//!
//! let streams = source.query(&SdsQuery::streams("pump*"), &range, None).await?;
//! let data = source.query(&SdsQuery::stream_data("PUMP-01"), &range, None).await?;
//! println!("{} rows from {}", data.num_rows(), data.name());
//! ```
//!
//! ## Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `type` | `ADH` | `ADH` (Data Hub) or `EDS` (Edge Data Store) |
//! | `edsPort` | 5590 | Edge Data Store port |
//! | `resource` | | Data Hub base URL |
//! | `apiVersion` | `v1` | SDS API version |
//! | `tenantId` | | Data Hub tenant |
//! | `clientId` | | Client-credentials client id (secret is passed separately) |
//! | `namespaceId` | | Namespace to query |
//! | `useCommunity` | false | Query a community instead of a namespace |
//! | `communityId` | | Community to query |
//! | `oauthPassThru` | false | Use the host's `Authorization` header |
//! | `logLevel` | | Log level override |
//! | `logFile` | | Log file path |

pub mod auth;
pub mod client;
pub mod datasource;
pub mod error;
pub mod logging;
pub mod query;
pub mod schema;
pub mod table;
pub mod types;

// Re-export main types
pub use datasource::{
    DataSource, DataSourceKind, DataSourceSecrets, DataSourceSettings, HealthCheckResult,
    HealthStatus, SdsQuery, TimeRange,
};
pub use error::{Error, Result};
pub use query::SdsQueryService;
pub use table::{Table, TableBuilder};

// Re-export building blocks for advanced users
pub use auth::{AuthProvider, ClientCredentials, NoAuth, PassThroughToken};
pub use client::{CommunityScope, HttpClientConfig, NamespaceScope, SdsClient, SdsHttpClient};
pub use schema::{PropertyDescriptor, SchemaResolver, TypeDescriptor};
pub use types::SdsTypeCode;
