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

//! SDS type codes.
//!
//! SDS reports a property's type code either as its symbolic name
//! (`"Single"`) or as a compact integer (`13`), depending on the endpoint.
//! [`SdsTypeCode`] accepts both forms when deserialized, so nothing
//! downstream branches on the wire representation.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

macro_rules! sds_type_codes {
    ($($code:literal => $variant:ident),* $(,)?) => {
        /// Canonical SDS type code.
        ///
        /// Codes outside the known vocabulary are carried as
        /// [`SdsTypeCode::Unrecognized`]; an unknown numeric code is
        /// `Unrecognized("")`.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum SdsTypeCode {
            $($variant,)*
            Unrecognized(String),
        }

        impl SdsTypeCode {
            /// Look up a numeric type code.
            pub fn from_code(code: i64) -> Self {
                match code {
                    $($code => Self::$variant,)*
                    _ => Self::Unrecognized(String::new()),
                }
            }

            /// Look up a symbolic type code name.
            pub fn from_name(name: &str) -> Self {
                match name {
                    $(stringify!($variant) => Self::$variant,)*
                    other => Self::Unrecognized(other.to_string()),
                }
            }

            /// Canonical name, e.g. `"NullableDouble"`.
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                    Self::Unrecognized(name) => name,
                }
            }

            /// Numeric code, or `None` for unrecognized codes.
            pub fn code(&self) -> Option<i64> {
                match self {
                    $(Self::$variant => Some($code),)*
                    Self::Unrecognized(_) => None,
                }
            }
        }
    };
}

sds_type_codes! {
    0 => Empty,
    1 => Object,
    2 => DBNull,
    3 => Boolean,
    4 => Char,
    5 => SByte,
    6 => Byte,
    7 => Int16,
    8 => UInt16,
    9 => Int32,
    10 => UInt32,
    11 => Int64,
    12 => UInt64,
    13 => Single,
    14 => Double,
    15 => Decimal,
    16 => DateTime,
    18 => String,
    19 => Guid,
    20 => DateTimeOffset,
    21 => TimeSpan,
    22 => Version,
    103 => NullableBoolean,
    104 => NullableChar,
    105 => NullableSByte,
    106 => NullableByte,
    107 => NullableInt16,
    108 => NullableUInt16,
    109 => NullableInt32,
    110 => NullableUInt32,
    111 => NullableInt64,
    112 => NullableUInt64,
    113 => NullableSingle,
    114 => NullableDouble,
    115 => NullableDecimal,
    116 => NullableDateTime,
    119 => NullableGuid,
    120 => NullableDateTimeOffset,
    121 => NullableTimeSpan,
    203 => BooleanArray,
    204 => CharArray,
    205 => SByteArray,
    206 => ByteArray,
    207 => Int16Array,
    208 => UInt16Array,
    209 => Int32Array,
    210 => UInt32Array,
    211 => Int64Array,
    212 => UInt64Array,
    213 => SingleArray,
    214 => DoubleArray,
    215 => DecimalArray,
    216 => DateTimeArray,
    218 => StringArray,
    219 => GuidArray,
    220 => DateTimeOffsetArray,
    221 => TimeSpanArray,
    222 => VersionArray,
    400 => Array,
    401 => IList,
    402 => IDictionary,
    403 => IEnumerable,
    501 => SdsType,
    502 => SdsTypeProperty,
    605 => SByteEnum,
    606 => ByteEnum,
    607 => Int16Enum,
    608 => UInt16Enum,
    609 => Int32Enum,
    610 => UInt32Enum,
    611 => Int64Enum,
    612 => UInt64Enum,
    705 => NullableSByteEnum,
    706 => NullableByteEnum,
    707 => NullableInt16Enum,
    708 => NullableUInt16Enum,
    709 => NullableInt32Enum,
    710 => NullableUInt32Enum,
    711 => NullableInt64Enum,
    712 => NullableUInt64Enum,
}

impl Default for SdsTypeCode {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl fmt::Display for SdsTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SdsTypeCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

struct SdsTypeCodeVisitor;

impl<'de> Visitor<'de> for SdsTypeCodeVisitor {
    type Value = SdsTypeCode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an SDS type code name or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(SdsTypeCode::from_name(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(SdsTypeCode::from_code(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v)
            .map(SdsTypeCode::from_code)
            .unwrap_or_default())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(SdsTypeCode::from_code(v as i64))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(SdsTypeCode::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(SdsTypeCode::default())
    }

    // Any other shape is unrecognized rather than a parse failure.

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(SdsTypeCode::default())
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(SdsTypeCode::default())
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map
            .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
            .is_some()
        {}
        Ok(SdsTypeCode::default())
    }
}

impl<'de> Deserialize<'de> for SdsTypeCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SdsTypeCodeVisitor)
    }
}
