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

//! Error types for SDS data source operations.

use arrow_schema::ArrowError;
use thiserror::Error;

/// Errors raised while talking to SDS or building tables from its responses.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid data source settings or an unsupported query shape.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token acquisition failed or no token was supplied.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Network or connection failure before a response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("Status: {status}\nBody: {body}")]
    HttpStatus {
        /// Status line, e.g. `404 Not Found`.
        status: String,
        /// Response body text.
        body: String,
    },

    /// Malformed JSON, an unexpected response shape, or an unconvertible cell.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Arrow rejected the assembled columns.
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Status line of an [`Error::HttpStatus`], if this is one.
    pub fn status(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { status, .. } => Some(status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type for SDS data source operations.
pub type Result<T> = std::result::Result<T, Error>;
