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

//! SDS REST request/response types.
//!
//! These types map directly to the JSON documents returned by the
//! Sequential Data Store API. Fields SDS may send as `null` are defaulted so
//! that a partially populated document still parses.

use crate::types::type_code::SdsTypeCode;
use serde::{Deserialize, Deserializer};

/// A single data record: property id to raw JSON value.
pub type SdsRecord = serde_json::Map<String, serde_json::Value>;

/// Stream metadata returned by `GET .../streams` and `GET .../streams/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SdsStream {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub type_id: String,
}

/// One hit from a community stream search.
///
/// Community streams live in other tenants and are addressed by their
/// absolute `Self` URL rather than by id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamSearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub type_id: String,
    #[serde(rename = "Self", default, deserialize_with = "null_as_default")]
    pub self_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tenant_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub community_id: String,
}

/// An SDS type as returned by `GET .../types/{typeId}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SdsType {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub sds_type_code: SdsTypeCode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Vec<SdsTypeProperty>,
}

/// A property of an [`SdsType`]. Only the nested type code is consulted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SdsTypeProperty {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sds_type: SdsType,
}

/// Response of `GET {stream}/resolved`: the stream with its type inlined.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SdsResolvedStream {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub resolved: bool,
    #[serde(rename = "Type")]
    pub sds_type: SdsType,
}

/// OpenID discovery document; only the token endpoint is used.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenIdConfiguration {
    #[serde(default)]
    pub token_endpoint: Option<String>,
}

/// Response from the client-credentials token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    /// Lifetime in seconds. Some identity servers send this as a float.
    #[serde(default)]
    pub expires_in: Option<f64>,
}

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let opt: Option<T> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stream_with_nulls() {
        let json = r#"{
            "TypeId": "StreamType1",
            "Id": "StreamId1",
            "Name": "StreamName1",
            "Description": null,
            "InterpolationMode": null
        }"#;
        let stream: SdsStream = serde_json::from_str(json).unwrap();
        assert_eq!(stream.id, "StreamId1");
        assert_eq!(stream.type_id, "StreamType1");
        assert_eq!(stream.description, "");
    }

    #[test]
    fn test_parse_type_with_numeric_codes() {
        let json = r#"{
            "Id": "StreamType1",
            "Name": "StreamType1",
            "SdsTypeCode": 1,
            "Properties": [
                {"Id": "Timestamp", "Name": "Timestamp", "IsKey": true,
                 "SdsType": {"Id": "DateTime", "SdsTypeCode": 16, "Properties": null}},
                {"Id": "Value", "Name": "Value", "IsKey": false,
                 "SdsType": {"Id": "Single", "SdsTypeCode": 13, "Properties": null}}
            ]
        }"#;
        let sds_type: SdsType = serde_json::from_str(json).unwrap();
        assert_eq!(sds_type.sds_type_code, SdsTypeCode::Object);
        assert_eq!(sds_type.properties.len(), 2);
        assert_eq!(sds_type.properties[0].id, "Timestamp");
        assert_eq!(
            sds_type.properties[0].sds_type.sds_type_code,
            SdsTypeCode::DateTime
        );
        assert_eq!(
            sds_type.properties[1].sds_type.sds_type_code,
            SdsTypeCode::Single
        );
        assert!(sds_type.properties[1].sds_type.properties.is_empty());
    }

    #[test]
    fn test_parse_resolved_stream_with_symbolic_codes() {
        let json = r#"{
            "Id": "StreamId1",
            "Name": "StreamName1",
            "Resolved": true,
            "Type": {
                "Id": "StreamType1",
                "SdsTypeCode": "Object",
                "Properties": [
                    {"Id": "Timestamp", "SdsType": {"SdsTypeCode": "DateTime", "Properties": []}},
                    {"Id": "Value", "SdsType": {"SdsTypeCode": "Single", "Properties": []}}
                ]
            }
        }"#;
        let resolved: SdsResolvedStream = serde_json::from_str(json).unwrap();
        assert!(resolved.resolved);
        assert_eq!(resolved.sds_type.id, "StreamType1");
        assert_eq!(
            resolved.sds_type.properties[1].sds_type.sds_type_code,
            SdsTypeCode::Single
        );
    }

    #[test]
    fn test_parse_search_result_self_link() {
        let json = r#"{"Id": "S1", "Name": "N1", "Self": "http://host/S1", "CommunityId": "c"}"#;
        let hit: StreamSearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(hit.self_link, "http://host/S1");
        assert_eq!(hit.community_id, "c");
        assert_eq!(hit.tenant_id, "");
    }

    #[test]
    fn test_parse_token_response() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token": "abc", "expires_in": 3600}"#).unwrap();
        assert_eq!(token.access_token.as_deref(), Some("abc"));
        assert_eq!(token.expires_in, Some(3600.0));
    }
}
