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

//! Authentication providers for SDS requests.
//!
//! # Implementations
//!
//! - [`ClientCredentials`] - OpenID discovery + client-credentials exchange with token caching
//! - [`PassThroughToken`] - an `Authorization` value forwarded by the host
//! - [`NoAuth`] - no authentication (Edge Data Store)

mod client_credentials;

pub use client_credentials::{
    ClientCredentials, OPENID_CONFIGURATION_PATH, TOKEN_REFRESH_MARGIN_SECS,
};

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::fmt::Debug;

/// Source of the `Authorization` header value for SDS requests.
#[async_trait]
pub trait AuthProvider: Debug + Send + Sync {
    /// Full header value, e.g. `Bearer <token>`. An empty string means the
    /// request is sent without authorization.
    async fn auth_header(&self) -> Result<String>;
}

/// An `Authorization` value supplied by the host, used verbatim.
#[derive(Debug, Clone)]
pub struct PassThroughToken {
    header: String,
}

impl PassThroughToken {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

#[async_trait]
impl AuthProvider for PassThroughToken {
    async fn auth_header(&self) -> Result<String> {
        if self.header.trim().is_empty() {
            return Err(Error::auth("unable to retrieve token"));
        }
        Ok(self.header.clone())
    }
}

/// No-op authentication.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

#[async_trait]
impl AuthProvider for NoAuth {
    async fn auth_header(&self) -> Result<String> {
        Ok(String::new())
    }
}
