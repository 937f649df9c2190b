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

//! The four SDS query shapes.
//!
//! Each operation is a fixed, sequential chain of requests ending in a
//! [`Table`]. Nothing is retried and nothing is returned on failure.

use crate::client::{CommunityScope, NamespaceScope, SdsClient};
use crate::error::Result;
use crate::schema::SchemaResolver;
use crate::table::{build_table, streams_table, Table};
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Format an instant the way SDS expects index values.
pub fn format_index(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Answers stream listing and stream data queries.
#[derive(Debug, Clone)]
pub struct SdsQueryService {
    client: Arc<SdsClient>,
    resolver: SchemaResolver,
}

impl SdsQueryService {
    pub fn new(client: SdsClient) -> Self {
        let client = Arc::new(client);
        Self {
            resolver: SchemaResolver::new(Arc::clone(&client)),
            client,
        }
    }

    pub fn client(&self) -> &SdsClient {
        &self.client
    }

    /// Streams matching `query` in a namespace, as an `Id`/`Name` table.
    pub async fn list_streams(
        &self,
        token: &str,
        scope: &NamespaceScope,
        query: &str,
    ) -> Result<Table> {
        let streams = self.client.get_streams(token, scope, query).await?;
        debug!(
            "Namespace {} returned {} streams for query {:?}",
            scope.namespace_id,
            streams.len(),
            query
        );

        let (ids, names) = streams.into_iter().map(|s| (s.id, s.name)).unzip();
        streams_table(ids, names)
    }

    /// Community streams matching `query`. The `Id` column holds each
    /// stream's `Self` URL, since community streams have no local id.
    pub async fn list_community_streams(
        &self,
        token: &str,
        community: &CommunityScope,
        query: &str,
    ) -> Result<Table> {
        let results = self
            .client
            .search_community_streams(token, community, query)
            .await?;
        debug!(
            "Community {} returned {} streams for query {:?}",
            community.community_id,
            results.len(),
            query
        );

        let (ids, names) = results
            .into_iter()
            .map(|r| (r.self_link, r.name))
            .unzip();
        streams_table(ids, names)
    }

    /// Data of one stream over `[start, end]`, named after the stream.
    pub async fn fetch_stream_data(
        &self,
        token: &str,
        scope: &NamespaceScope,
        stream_id: &str,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
    ) -> Result<Table> {
        let stream = self.client.get_stream(token, scope, stream_id).await?;
        let descriptor = self
            .resolver
            .resolve_direct(token, scope, &stream.type_id)
            .await?;
        let records = self
            .client
            .get_stream_data(
                token,
                scope,
                stream_id,
                &format_index(start),
                &format_index(end),
            )
            .await?;

        info!(
            "Fetched {} records from stream {}",
            records.len(),
            stream_id
        );
        build_table(stream.name, &descriptor, &records)
    }

    /// Data of a community stream over `[start, end]`, addressed by its
    /// `Self` URL.
    pub async fn fetch_community_stream_data(
        &self,
        token: &str,
        community: &CommunityScope,
        self_link: &str,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
    ) -> Result<Table> {
        let stream = self
            .client
            .get_stream_by_ref(token, community, self_link)
            .await?;
        let descriptor = self
            .resolver
            .resolve_federated(token, community, self_link)
            .await?;
        let records = self
            .client
            .get_stream_data_by_ref(
                token,
                community,
                self_link,
                &format_index(start),
                &format_index(end),
            )
            .await?;

        info!(
            "Fetched {} records from community stream {}",
            records.len(),
            self_link
        );
        build_table(stream.name, &descriptor, &records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_index() {
        let instant = Utc.with_ymd_and_hms(2022, 6, 4, 0, 0, 0).unwrap();
        assert_eq!(format_index(&instant), "2022-06-04T00:00:00Z");
    }
}
