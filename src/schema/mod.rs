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

//! Stream schema resolution.
//!
//! SDS describes a stream's records with an `SdsType`, reachable either
//! directly by type id or nested inside a stream's `/resolved` document.
//! Both shapes are normalized into a [`TypeDescriptor`] right after parsing,
//! so table assembly never cares which path produced it.
//!
//! ## Module Structure
//!
//! - `resolver`: fetches and normalizes type descriptors

pub mod resolver;

pub use resolver::SchemaResolver;

use crate::types::{SdsResolvedStream, SdsType, SdsTypeCode};

/// Ordered schema of a stream's records.
///
/// Property order is column order in every table built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub id: String,
    pub type_code: SdsTypeCode,
    pub properties: Vec<PropertyDescriptor>,
}

/// One record property: its id (the column name) and value type code.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub id: String,
    pub type_code: SdsTypeCode,
}

impl TypeDescriptor {
    pub fn new(id: impl Into<String>, properties: Vec<PropertyDescriptor>) -> Self {
        Self {
            id: id.into(),
            type_code: SdsTypeCode::Object,
            properties,
        }
    }
}

impl PropertyDescriptor {
    pub fn new(id: impl Into<String>, type_code: SdsTypeCode) -> Self {
        Self {
            id: id.into(),
            type_code,
        }
    }
}

impl From<SdsType> for TypeDescriptor {
    fn from(sds_type: SdsType) -> Self {
        Self {
            id: sds_type.id,
            type_code: sds_type.sds_type_code,
            properties: sds_type
                .properties
                .into_iter()
                .map(|p| PropertyDescriptor {
                    id: p.id,
                    type_code: p.sds_type.sds_type_code,
                })
                .collect(),
        }
    }
}

impl From<SdsResolvedStream> for TypeDescriptor {
    fn from(resolved: SdsResolvedStream) -> Self {
        resolved.sds_type.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_and_resolved_shapes_normalize_equally() {
        let flat: SdsType = serde_json::from_str(
            r#"{"Id": "T", "SdsTypeCode": 1, "Properties": [
                {"Id": "Timestamp", "SdsType": {"SdsTypeCode": 16}},
                {"Id": "Value", "SdsType": {"SdsTypeCode": 13}}
            ]}"#,
        )
        .unwrap();
        let resolved: SdsResolvedStream = serde_json::from_str(
            r#"{"Id": "S", "Name": "S", "Resolved": true, "Type": {
                "Id": "T", "SdsTypeCode": "Object", "Properties": [
                    {"Id": "Timestamp", "SdsType": {"SdsTypeCode": "DateTime"}},
                    {"Id": "Value", "SdsType": {"SdsTypeCode": "Single"}}
                ]}}"#,
        )
        .unwrap();

        let a = TypeDescriptor::from(flat);
        let b = TypeDescriptor::from(resolved);
        assert_eq!(a, b);
        assert_eq!(
            a.properties,
            vec![
                PropertyDescriptor::new("Timestamp", SdsTypeCode::DateTime),
                PropertyDescriptor::new("Value", SdsTypeCode::Single),
            ]
        );
    }
}
