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

//! Type definitions for the SDS data source.
//!
//! This module contains data structures organized by domain:
//! - `sds`: SDS REST request/response types
//! - `type_code`: the SDS type code vocabulary

pub mod sds;
pub mod type_code;

// Re-export commonly used types
pub use sds::{
    OpenIdConfiguration, SdsRecord, SdsResolvedStream, SdsStream, SdsType, SdsTypeProperty,
    StreamSearchResult, TokenResponse,
};
pub use type_code::SdsTypeCode;
