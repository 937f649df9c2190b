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

//! Clients for the Sequential Data Store REST API.
//!
//! This module provides:
//! - `SdsHttpClient`: low-level authorized GET with status classification
//! - `SdsClient`: endpoint construction and typed fetches
//! - `NamespaceScope` / `CommunityScope`: where a stream is addressed

pub mod http;
pub mod sds;

pub use http::{HttpClientConfig, SdsHttpClient};
pub use sds::SdsClient;

/// Streams addressed by id within one tenant namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceScope {
    pub tenant_id: String,
    pub namespace_id: String,
}

impl NamespaceScope {
    pub fn new(tenant_id: impl Into<String>, namespace_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            namespace_id: namespace_id.into(),
        }
    }
}

/// Streams shared through a community and addressed by absolute `Self` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityScope {
    pub community_id: String,
}

impl CommunityScope {
    pub fn new(community_id: impl Into<String>) -> Self {
        Self {
            community_id: community_id.into(),
        }
    }
}
