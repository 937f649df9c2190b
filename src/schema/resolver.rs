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

//! Fetch a stream's type and normalize it into a [`TypeDescriptor`].

use crate::client::{CommunityScope, NamespaceScope, SdsClient};
use crate::error::Result;
use crate::schema::TypeDescriptor;
use std::sync::Arc;
use tracing::debug;

/// Resolves stream types, directly by type id or through a community.
///
/// No retries: any failure is returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct SchemaResolver {
    client: Arc<SdsClient>,
}

impl SchemaResolver {
    pub fn new(client: Arc<SdsClient>) -> Self {
        Self { client }
    }

    /// `GET .../types/{typeId}` within a namespace.
    pub async fn resolve_direct(
        &self,
        token: &str,
        scope: &NamespaceScope,
        type_id: &str,
    ) -> Result<TypeDescriptor> {
        let sds_type = self.client.get_type(token, scope, type_id).await?;
        let descriptor = TypeDescriptor::from(sds_type);
        debug!(
            "Resolved type {} with {} properties",
            descriptor.id,
            descriptor.properties.len()
        );
        Ok(descriptor)
    }

    /// `GET {self}/resolved` through a community, unwrapping the inlined type.
    pub async fn resolve_federated(
        &self,
        token: &str,
        community: &CommunityScope,
        self_link: &str,
    ) -> Result<TypeDescriptor> {
        let resolved = self
            .client
            .get_resolved_stream(token, community, self_link)
            .await?;
        let descriptor = TypeDescriptor::from(resolved);
        debug!(
            "Resolved community stream type {} with {} properties",
            descriptor.id,
            descriptor.properties.len()
        );
        Ok(descriptor)
    }
}
