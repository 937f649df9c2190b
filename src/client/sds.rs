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

//! SDS endpoint client.
//!
//! Builds the REST URLs for streams, types and data, issues them through
//! [`SdsHttpClient`] and parses the JSON answers. Every path segment and
//! query value is percent-encoded. Community requests are addressed by the
//! stream's absolute `Self` URL and carry a `Community-Id` header.

use crate::client::http::SdsHttpClient;
use crate::client::{CommunityScope, NamespaceScope};
use crate::error::{Error, Result};
use crate::types::{SdsRecord, SdsResolvedStream, SdsStream, SdsType, StreamSearchResult};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use urlencoding::encode;

/// Header naming the community a federated request is made through.
pub const COMMUNITY_ID_HEADER: &str = "Community-Id";

/// Typed access to the SDS REST API of one service.
#[derive(Debug, Clone)]
pub struct SdsClient {
    http: SdsHttpClient,
    resource: String,
    api_version: String,
}

impl SdsClient {
    /// `resource` is the service base URL, e.g. `https://uswe.datahub.connect.aveva.com`.
    pub fn new(
        http: SdsHttpClient,
        resource: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            http,
            resource: resource.into().trim_end_matches('/').to_string(),
            api_version: api_version.into(),
        }
    }

    pub fn http(&self) -> &SdsHttpClient {
        &self.http
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Build the base URL for API requests.
    fn api_base(&self) -> String {
        format!("{}/api/{}", self.resource, encode(&self.api_version))
    }

    fn namespace_base(&self, scope: &NamespaceScope) -> String {
        format!(
            "{}/tenants/{}/namespaces/{}",
            self.api_base(),
            encode(&scope.tenant_id),
            encode(&scope.namespace_id)
        )
    }

    pub(crate) fn streams_url(&self, scope: &NamespaceScope, query: &str) -> String {
        format!(
            "{}/streams?query={}",
            self.namespace_base(scope),
            encode(query)
        )
    }

    pub(crate) fn stream_url(&self, scope: &NamespaceScope, stream_id: &str) -> String {
        format!("{}/streams/{}", self.namespace_base(scope), encode(stream_id))
    }

    pub(crate) fn type_url(&self, scope: &NamespaceScope, type_id: &str) -> String {
        format!("{}/types/{}", self.namespace_base(scope), encode(type_id))
    }

    pub(crate) fn stream_data_url(
        &self,
        scope: &NamespaceScope,
        stream_id: &str,
        start_index: &str,
        end_index: &str,
    ) -> String {
        data_url(&self.stream_url(scope, stream_id), start_index, end_index)
    }

    pub(crate) fn community_search_url(&self, community: &CommunityScope, query: &str) -> String {
        format!(
            "{}/search/communities/{}/streams?query={}",
            self.api_base(),
            encode(&community.community_id),
            encode(query)
        )
    }

    /// `GET .../streams?query=` within a namespace.
    pub async fn get_streams(
        &self,
        token: &str,
        scope: &NamespaceScope,
        query: &str,
    ) -> Result<Vec<SdsStream>> {
        self.get_json(token, &self.streams_url(scope, query), &[])
            .await
    }

    /// `GET .../streams/{id}`.
    pub async fn get_stream(
        &self,
        token: &str,
        scope: &NamespaceScope,
        stream_id: &str,
    ) -> Result<SdsStream> {
        self.get_json(token, &self.stream_url(scope, stream_id), &[])
            .await
    }

    /// `GET .../types/{typeId}`.
    pub async fn get_type(
        &self,
        token: &str,
        scope: &NamespaceScope,
        type_id: &str,
    ) -> Result<SdsType> {
        self.get_json(token, &self.type_url(scope, type_id), &[])
            .await
    }

    /// `GET .../streams/{id}/Data?startIndex=&endIndex=`.
    ///
    /// The whole index range is returned in one response.
    pub async fn get_stream_data(
        &self,
        token: &str,
        scope: &NamespaceScope,
        stream_id: &str,
        start_index: &str,
        end_index: &str,
    ) -> Result<Vec<SdsRecord>> {
        let url = self.stream_data_url(scope, stream_id, start_index, end_index);
        self.get_json(token, &url, &[]).await
    }

    /// `GET .../search/communities/{communityId}/streams?query=`.
    pub async fn search_community_streams(
        &self,
        token: &str,
        community: &CommunityScope,
        query: &str,
    ) -> Result<Vec<StreamSearchResult>> {
        self.get_json(token, &self.community_search_url(community, query), &[])
            .await
    }

    /// `GET {self}` through a community.
    pub async fn get_stream_by_ref(
        &self,
        token: &str,
        community: &CommunityScope,
        self_link: &str,
    ) -> Result<SdsStream> {
        let header = community_header(community);
        self.get_json(token, self_link, &[(COMMUNITY_ID_HEADER, header.as_str())])
            .await
    }

    /// `GET {self}/resolved` through a community.
    pub async fn get_resolved_stream(
        &self,
        token: &str,
        community: &CommunityScope,
        self_link: &str,
    ) -> Result<SdsResolvedStream> {
        let header = community_header(community);
        let url = format!("{}/resolved", self_link);
        self.get_json(token, &url, &[(COMMUNITY_ID_HEADER, header.as_str())])
            .await
    }

    /// `GET {self}/Data?startIndex=&endIndex=` through a community.
    pub async fn get_stream_data_by_ref(
        &self,
        token: &str,
        community: &CommunityScope,
        self_link: &str,
        start_index: &str,
        end_index: &str,
    ) -> Result<Vec<SdsRecord>> {
        let header = community_header(community);
        let url = data_url(self_link, start_index, end_index);
        self.get_json(token, &url, &[(COMMUNITY_ID_HEADER, header.as_str())])
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<T> {
        let body = self.http.request(token, url, headers).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Error parsing json from {}: {} - body: {}", url, e, body);
            Error::decode(format!("Failed to parse response from {}: {}", url, e))
        })
    }
}

fn data_url(stream_url: &str, start_index: &str, end_index: &str) -> String {
    let url = format!(
        "{}/Data?startIndex={}&endIndex={}",
        stream_url,
        encode(start_index),
        encode(end_index)
    );
    debug!("Stream data url: {}", url);
    url
}

fn community_header(community: &CommunityScope) -> String {
    encode(&community.community_id).into_owned()
}
