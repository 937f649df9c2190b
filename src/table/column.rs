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

//! SDS type code → typed Arrow column mapping.
//!
//! [`empty_column`] creates the column for a type code and
//! [`convert_value`] turns a raw JSON cell into an [`SdsValue`] that the
//! column accepts. Pairing the two for the same code never produces a
//! nullability mismatch:
//!
//! | Codes | Arrow type | Null input |
//! |-------|------------|------------|
//! | `Boolean`, numeric, `DateTime` | non-null column | zero value |
//! | `Nullable…` of the above | nullable column | null |
//! | everything else | nullable `Utf8` | null |
//!
//! Nullability comes only from this mapping, never from the code's name: an
//! unrecognized `"NullableFoo"` is a nullable `Utf8` column like any other
//! unknown code.
//!
//! Timestamps are `Timestamp(Microsecond, "UTC")`. SDS timestamps carry up
//! to seven fractional digits (100 ns ticks); the seventh is truncated. A
//! non-nullable `DateTime` with no value, and any malformed timestamp,
//! becomes the Unix epoch.

use crate::error::{Error, Result};
use crate::types::SdsTypeCode;
use arrow_array::builder::{
    BooleanBuilder, Float32Builder, Float64Builder, Int16Builder, Int32Builder, Int64Builder,
    StringBuilder, TimestampMicrosecondBuilder, UInt16Builder, UInt32Builder, UInt64Builder,
};
use arrow_array::ArrayRef;
use arrow_schema::{DataType, Field, TimeUnit};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Timezone attached to every timestamp column.
pub const TIMESTAMP_TIMEZONE: &str = "UTC";

/// Native column shape behind a type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Boolean,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    DateTime,
    String,
}

impl ColumnKind {
    fn data_type(self) -> DataType {
        match self {
            Self::Boolean => DataType::Boolean,
            Self::Int16 => DataType::Int16,
            Self::UInt16 => DataType::UInt16,
            Self::Int32 => DataType::Int32,
            Self::UInt32 => DataType::UInt32,
            Self::Int64 => DataType::Int64,
            Self::UInt64 => DataType::UInt64,
            Self::Single => DataType::Float32,
            Self::Double => DataType::Float64,
            Self::DateTime => {
                DataType::Timestamp(TimeUnit::Microsecond, Some(TIMESTAMP_TIMEZONE.into()))
            }
            Self::String => DataType::Utf8,
        }
    }

    fn zero_value(self) -> SdsValue {
        match self {
            Self::Boolean => SdsValue::Boolean(false),
            Self::Int16 => SdsValue::Int16(0),
            Self::UInt16 => SdsValue::UInt16(0),
            Self::Int32 => SdsValue::Int32(0),
            Self::UInt32 => SdsValue::UInt32(0),
            Self::Int64 => SdsValue::Int64(0),
            Self::UInt64 => SdsValue::UInt64(0),
            Self::Single => SdsValue::Single(0.0),
            Self::Double => SdsValue::Double(0.0),
            Self::DateTime => SdsValue::DateTime(DateTime::<Utc>::UNIX_EPOCH),
            Self::String => SdsValue::Null,
        }
    }
}

/// Map a type code to its column kind and nullability.
fn column_kind(code: &SdsTypeCode) -> (ColumnKind, bool) {
    use SdsTypeCode as C;

    match code {
        C::Boolean => (ColumnKind::Boolean, false),
        C::NullableBoolean => (ColumnKind::Boolean, true),
        C::Int16 => (ColumnKind::Int16, false),
        C::NullableInt16 => (ColumnKind::Int16, true),
        C::UInt16 => (ColumnKind::UInt16, false),
        C::NullableUInt16 => (ColumnKind::UInt16, true),
        C::Int32 => (ColumnKind::Int32, false),
        C::NullableInt32 => (ColumnKind::Int32, true),
        C::UInt32 => (ColumnKind::UInt32, false),
        C::NullableUInt32 => (ColumnKind::UInt32, true),
        C::Int64 => (ColumnKind::Int64, false),
        C::NullableInt64 => (ColumnKind::Int64, true),
        C::UInt64 => (ColumnKind::UInt64, false),
        C::NullableUInt64 => (ColumnKind::UInt64, true),
        C::Single => (ColumnKind::Single, false),
        C::NullableSingle => (ColumnKind::Single, true),
        C::Double => (ColumnKind::Double, false),
        C::NullableDouble => (ColumnKind::Double, true),
        C::DateTime => (ColumnKind::DateTime, false),
        C::NullableDateTime => (ColumnKind::DateTime, true),
        _ => (ColumnKind::String, true),
    }
}

/// Arrow type and nullability used for a type code.
pub fn sds_type_to_arrow(code: &SdsTypeCode) -> (DataType, bool) {
    let (kind, nullable) = column_kind(code);
    (kind.data_type(), nullable)
}

/// A converted cell, ready to append to a [`TypedColumn`].
#[derive(Debug, Clone, PartialEq)]
pub enum SdsValue {
    Null,
    Boolean(bool),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
    DateTime(DateTime<Utc>),
    String(String),
}

#[derive(Debug)]
enum ColumnBuilder {
    Boolean(BooleanBuilder),
    Int16(Int16Builder),
    UInt16(UInt16Builder),
    Int32(Int32Builder),
    UInt32(UInt32Builder),
    Int64(Int64Builder),
    UInt64(UInt64Builder),
    Single(Float32Builder),
    Double(Float64Builder),
    DateTime(TimestampMicrosecondBuilder),
    String(StringBuilder),
}

impl ColumnBuilder {
    fn new(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Boolean => Self::Boolean(BooleanBuilder::new()),
            ColumnKind::Int16 => Self::Int16(Int16Builder::new()),
            ColumnKind::UInt16 => Self::UInt16(UInt16Builder::new()),
            ColumnKind::Int32 => Self::Int32(Int32Builder::new()),
            ColumnKind::UInt32 => Self::UInt32(UInt32Builder::new()),
            ColumnKind::Int64 => Self::Int64(Int64Builder::new()),
            ColumnKind::UInt64 => Self::UInt64(UInt64Builder::new()),
            ColumnKind::Single => Self::Single(Float32Builder::new()),
            ColumnKind::Double => Self::Double(Float64Builder::new()),
            ColumnKind::DateTime => Self::DateTime(
                TimestampMicrosecondBuilder::new().with_timezone(TIMESTAMP_TIMEZONE),
            ),
            ColumnKind::String => Self::String(StringBuilder::new()),
        }
    }
}

/// A growable, strongly-typed column for one SDS property.
#[derive(Debug)]
pub struct TypedColumn {
    code: SdsTypeCode,
    kind: ColumnKind,
    nullable: bool,
    len: usize,
    builder: ColumnBuilder,
}

impl TypedColumn {
    /// Type code this column was created for.
    pub fn type_code(&self) -> &SdsTypeCode {
        &self.code
    }

    pub fn data_type(&self) -> DataType {
        self.kind.data_type()
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Arrow field for this column under the given name.
    pub fn field(&self, name: &str) -> Field {
        Field::new(name, self.data_type(), self.nullable)
    }

    /// Append one value.
    ///
    /// Fails if the value's type does not match the column, or if a null is
    /// appended to a non-nullable column.
    pub fn append(&mut self, value: SdsValue) -> Result<()> {
        if matches!(value, SdsValue::Null) {
            if !self.nullable {
                return Err(Error::decode(format!(
                    "null value for non-nullable {} column",
                    self.code
                )));
            }
            self.append_null();
            self.len += 1;
            return Ok(());
        }

        match (&mut self.builder, value) {
            (ColumnBuilder::Boolean(b), SdsValue::Boolean(v)) => b.append_value(v),
            (ColumnBuilder::Int16(b), SdsValue::Int16(v)) => b.append_value(v),
            (ColumnBuilder::UInt16(b), SdsValue::UInt16(v)) => b.append_value(v),
            (ColumnBuilder::Int32(b), SdsValue::Int32(v)) => b.append_value(v),
            (ColumnBuilder::UInt32(b), SdsValue::UInt32(v)) => b.append_value(v),
            (ColumnBuilder::Int64(b), SdsValue::Int64(v)) => b.append_value(v),
            (ColumnBuilder::UInt64(b), SdsValue::UInt64(v)) => b.append_value(v),
            (ColumnBuilder::Single(b), SdsValue::Single(v)) => b.append_value(v),
            (ColumnBuilder::Double(b), SdsValue::Double(v)) => b.append_value(v),
            (ColumnBuilder::DateTime(b), SdsValue::DateTime(v)) => {
                b.append_value(v.timestamp_micros())
            }
            (ColumnBuilder::String(b), SdsValue::String(v)) => b.append_value(v),
            (_, other) => {
                return Err(Error::decode(format!(
                    "value {:?} does not fit a {} column",
                    other, self.code
                )))
            }
        }
        self.len += 1;
        Ok(())
    }

    fn append_null(&mut self) {
        match &mut self.builder {
            ColumnBuilder::Boolean(b) => b.append_null(),
            ColumnBuilder::Int16(b) => b.append_null(),
            ColumnBuilder::UInt16(b) => b.append_null(),
            ColumnBuilder::Int32(b) => b.append_null(),
            ColumnBuilder::UInt32(b) => b.append_null(),
            ColumnBuilder::Int64(b) => b.append_null(),
            ColumnBuilder::UInt64(b) => b.append_null(),
            ColumnBuilder::Single(b) => b.append_null(),
            ColumnBuilder::Double(b) => b.append_null(),
            ColumnBuilder::DateTime(b) => b.append_null(),
            ColumnBuilder::String(b) => b.append_null(),
        }
    }

    /// Build the Arrow array and reset the column to empty.
    pub fn finish(&mut self) -> ArrayRef {
        self.len = 0;
        match &mut self.builder {
            ColumnBuilder::Boolean(b) => Arc::new(b.finish()),
            ColumnBuilder::Int16(b) => Arc::new(b.finish()),
            ColumnBuilder::UInt16(b) => Arc::new(b.finish()),
            ColumnBuilder::Int32(b) => Arc::new(b.finish()),
            ColumnBuilder::UInt32(b) => Arc::new(b.finish()),
            ColumnBuilder::Int64(b) => Arc::new(b.finish()),
            ColumnBuilder::UInt64(b) => Arc::new(b.finish()),
            ColumnBuilder::Single(b) => Arc::new(b.finish()),
            ColumnBuilder::Double(b) => Arc::new(b.finish()),
            ColumnBuilder::DateTime(b) => Arc::new(b.finish()),
            ColumnBuilder::String(b) => Arc::new(b.finish()),
        }
    }
}

/// Create an empty column for a type code.
///
/// Codes without a typed mapping (arrays, enums, `String`, `Guid`, ...)
/// get a nullable `Utf8` column.
pub fn empty_column(code: &SdsTypeCode) -> TypedColumn {
    let (kind, nullable) = column_kind(code);
    if kind == ColumnKind::String {
        debug!("No typed column for SDS type code '{}', using strings", code);
    }
    TypedColumn {
        code: code.clone(),
        kind,
        nullable,
        len: 0,
        builder: ColumnBuilder::new(kind),
    }
}

/// Convert a raw JSON cell to the native value for a type code.
///
/// `Boolean` cells only test presence: any non-null value is `true`.
/// Numbers are narrowed to the target width, truncating toward zero.
pub fn convert_value(code: &SdsTypeCode, raw: &Value) -> Result<SdsValue> {
    let (kind, nullable) = column_kind(code);

    if raw.is_null() {
        return Ok(if nullable {
            SdsValue::Null
        } else {
            kind.zero_value()
        });
    }

    let value = match kind {
        ColumnKind::Boolean => SdsValue::Boolean(true),
        ColumnKind::Int16 => SdsValue::Int16(number(code, raw)? as i16),
        ColumnKind::UInt16 => SdsValue::UInt16(number(code, raw)? as u16),
        ColumnKind::Int32 => SdsValue::Int32(number(code, raw)? as i32),
        ColumnKind::UInt32 => SdsValue::UInt32(number(code, raw)? as u32),
        ColumnKind::Int64 => match raw.as_i64() {
            Some(v) => SdsValue::Int64(v),
            None => SdsValue::Int64(number(code, raw)? as i64),
        },
        ColumnKind::UInt64 => match raw.as_u64() {
            Some(v) => SdsValue::UInt64(v),
            None => SdsValue::UInt64(number(code, raw)? as u64),
        },
        ColumnKind::Single => SdsValue::Single(number(code, raw)? as f32),
        ColumnKind::Double => SdsValue::Double(number(code, raw)?),
        ColumnKind::DateTime => SdsValue::DateTime(parse_timestamp(raw)),
        ColumnKind::String => match raw {
            Value::String(s) => SdsValue::String(s.clone()),
            other => SdsValue::String(other.to_string()),
        },
    };
    Ok(value)
}

/// Read a numeric cell as `f64`. SDS writes non-finite values as strings.
fn number(code: &SdsTypeCode, raw: &Value) -> Result<f64> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Error::decode(format!("number {} out of range for {}", n, code))),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            Error::decode(format!("expected a number for {} value, got {:?}", code, s))
        }),
        other => Err(Error::decode(format!(
            "expected a number for {} value, got {}",
            code, other
        ))),
    }
}

/// Parse an RFC 3339 timestamp, falling back to the Unix epoch.
fn parse_timestamp(raw: &Value) -> DateTime<Utc> {
    let parsed = raw
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    match parsed {
        Some(dt) => dt,
        None => {
            warn!("Unparseable timestamp {}, using Unix epoch", raw);
            DateTime::<Utc>::UNIX_EPOCH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::cast::AsArray;
    use arrow_array::types::{
        Float32Type, Int16Type, Int32Type, TimestampMicrosecondType, UInt16Type, UInt64Type,
    };
    use arrow_array::Array;
    use chrono::TimeZone;
    use serde_json::json;

    fn all_known_codes() -> Vec<SdsTypeCode> {
        (0..800)
            .map(SdsTypeCode::from_code)
            .filter(|c| c.code().is_some())
            .collect()
    }

    #[test]
    fn test_null_conversion_fits_empty_column_for_every_code() {
        let mut codes = all_known_codes();
        codes.push(SdsTypeCode::default());
        codes.push(SdsTypeCode::from_name("SomethingNew"));

        for code in codes {
            let mut column = empty_column(&code);
            assert!(column.is_empty());
            let value = convert_value(&code, &Value::Null).unwrap();
            column
                .append(value)
                .unwrap_or_else(|e| panic!("{} rejected its own null conversion: {}", code, e));
            assert_eq!(column.len(), 1);
            let array = column.finish();
            assert_eq!(array.data_type(), &sds_type_to_arrow(&code).0);
        }
    }

    #[test]
    fn test_type_mapping() {
        assert_eq!(
            sds_type_to_arrow(&SdsTypeCode::Single),
            (DataType::Float32, false)
        );
        assert_eq!(
            sds_type_to_arrow(&SdsTypeCode::NullableInt64),
            (DataType::Int64, true)
        );
        assert_eq!(
            sds_type_to_arrow(&SdsTypeCode::NullableUInt64),
            (DataType::UInt64, true)
        );
        assert_eq!(
            sds_type_to_arrow(&SdsTypeCode::DateTime),
            (
                DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
                false
            )
        );
        assert_eq!(
            sds_type_to_arrow(&SdsTypeCode::String),
            (DataType::Utf8, true)
        );
        assert_eq!(
            sds_type_to_arrow(&SdsTypeCode::DoubleArray),
            (DataType::Utf8, true)
        );
        assert_eq!(
            sds_type_to_arrow(&SdsTypeCode::Int32Enum),
            (DataType::Utf8, true)
        );
    }

    #[test]
    fn test_nullable_prefix_alone_does_not_pick_a_column() {
        let unknown = SdsTypeCode::from_name("NullableFoo");
        assert_eq!(sds_type_to_arrow(&unknown), (DataType::Utf8, true));
        assert_eq!(
            sds_type_to_arrow(&SdsTypeCode::NullableInt32Enum),
            (DataType::Utf8, true)
        );
        assert_eq!(
            convert_value(&unknown, &json!(5)).unwrap(),
            SdsValue::String("5".to_string())
        );
    }

    #[test]
    fn test_hundred_nanosecond_digit_is_truncated() {
        let mut column = empty_column(&SdsTypeCode::DateTime);
        let value = convert_value(
            &SdsTypeCode::DateTime,
            &json!("2022-06-04T00:00:00.1234567Z"),
        )
        .unwrap();
        column.append(value).unwrap();

        let array = column.finish();
        let array = array.as_primitive::<TimestampMicrosecondType>();
        let midnight = Utc
            .with_ymd_and_hms(2022, 6, 4, 0, 0, 0)
            .unwrap()
            .timestamp_micros();
        assert_eq!(array.value(0), midnight + 123_456);
    }

    #[test]
    fn test_null_zero_values() {
        assert_eq!(
            convert_value(&SdsTypeCode::Int32, &Value::Null).unwrap(),
            SdsValue::Int32(0)
        );
        assert_eq!(
            convert_value(&SdsTypeCode::Boolean, &Value::Null).unwrap(),
            SdsValue::Boolean(false)
        );
        assert_eq!(
            convert_value(&SdsTypeCode::DateTime, &Value::Null).unwrap(),
            SdsValue::DateTime(DateTime::<Utc>::UNIX_EPOCH)
        );
        assert_eq!(
            convert_value(&SdsTypeCode::NullableDouble, &Value::Null).unwrap(),
            SdsValue::Null
        );
    }

    #[test]
    fn test_numeric_truncation() {
        assert_eq!(
            convert_value(&SdsTypeCode::Int16, &json!(12.9)).unwrap(),
            SdsValue::Int16(12)
        );
        assert_eq!(
            convert_value(&SdsTypeCode::Int32, &json!(-7.8)).unwrap(),
            SdsValue::Int32(-7)
        );
        assert_eq!(
            convert_value(&SdsTypeCode::NullableUInt16, &json!(65535)).unwrap(),
            SdsValue::UInt16(65535)
        );
        assert_eq!(
            convert_value(&SdsTypeCode::Int64, &json!(9_007_199_254_740_993_i64)).unwrap(),
            SdsValue::Int64(9_007_199_254_740_993)
        );
        assert_eq!(
            convert_value(&SdsTypeCode::UInt64, &json!(42.5)).unwrap(),
            SdsValue::UInt64(42)
        );
        assert_eq!(
            convert_value(&SdsTypeCode::Single, &json!(1.5)).unwrap(),
            SdsValue::Single(1.5)
        );
        assert_eq!(
            convert_value(&SdsTypeCode::NullableDouble, &json!(-0.25)).unwrap(),
            SdsValue::Double(-0.25)
        );
    }

    #[test]
    fn test_numeric_from_string() {
        match convert_value(&SdsTypeCode::Double, &json!("NaN")).unwrap() {
            SdsValue::Double(v) => assert!(v.is_nan()),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            convert_value(&SdsTypeCode::Int32, &json!("17")).unwrap(),
            SdsValue::Int32(17)
        );
        assert!(matches!(
            convert_value(&SdsTypeCode::Int32, &json!("seventeen")),
            Err(Error::Decode(_))
        ));
        assert!(matches!(
            convert_value(&SdsTypeCode::Double, &json!([1, 2])),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_boolean_tests_presence_only() {
        assert_eq!(
            convert_value(&SdsTypeCode::Boolean, &json!(false)).unwrap(),
            SdsValue::Boolean(true)
        );
        assert_eq!(
            convert_value(&SdsTypeCode::Boolean, &json!(0)).unwrap(),
            SdsValue::Boolean(true)
        );
        assert_eq!(
            convert_value(&SdsTypeCode::NullableBoolean, &json!(false)).unwrap(),
            SdsValue::Boolean(true)
        );
    }

    #[test]
    fn test_datetime_parsing() {
        let expected = Utc.with_ymd_and_hms(2022, 6, 4, 0, 0, 0).unwrap();
        assert_eq!(
            convert_value(&SdsTypeCode::DateTime, &json!("2022-06-04T00:00:00Z")).unwrap(),
            SdsValue::DateTime(expected)
        );
        assert_eq!(
            convert_value(
                &SdsTypeCode::NullableDateTime,
                &json!("2022-06-04T02:00:00+02:00")
            )
            .unwrap(),
            SdsValue::DateTime(expected)
        );
    }

    #[test]
    fn test_malformed_datetime_is_epoch() {
        assert_eq!(
            convert_value(&SdsTypeCode::DateTime, &json!("yesterday")).unwrap(),
            SdsValue::DateTime(DateTime::<Utc>::UNIX_EPOCH)
        );
        assert_eq!(
            convert_value(&SdsTypeCode::NullableDateTime, &json!(12345)).unwrap(),
            SdsValue::DateTime(DateTime::<Utc>::UNIX_EPOCH)
        );
    }

    #[test]
    fn test_unrecognized_keeps_opaque_strings() {
        let code = SdsTypeCode::from_code(999);
        assert_eq!(
            convert_value(&code, &json!("abc")).unwrap(),
            SdsValue::String("abc".to_string())
        );
        assert_eq!(
            convert_value(&SdsTypeCode::DoubleArray, &json!([1.0, 2.5])).unwrap(),
            SdsValue::String("[1.0,2.5]".to_string())
        );
        assert_eq!(convert_value(&code, &Value::Null).unwrap(), SdsValue::Null);
    }

    #[test]
    fn test_append_rejects_mismatch() {
        let mut column = empty_column(&SdsTypeCode::Int32);
        assert!(column.append(SdsValue::Single(1.0)).is_err());
        assert!(column.append(SdsValue::Null).is_err());
        assert!(column.is_empty());
    }

    #[test]
    fn test_columns_round_trip_values() {
        let mut int16 = empty_column(&SdsTypeCode::NullableInt16);
        for raw in [json!(3.9), Value::Null, json!(-3.9)] {
            int16
                .append(convert_value(&SdsTypeCode::NullableInt16, &raw).unwrap())
                .unwrap();
        }
        let array = int16.finish();
        let array = array.as_primitive::<Int16Type>();
        assert_eq!(array.value(0), 3);
        assert!(array.is_null(1));
        assert_eq!(array.value(2), -3);

        let mut single = empty_column(&SdsTypeCode::Single);
        single
            .append(convert_value(&SdsTypeCode::Single, &json!(0.1)).unwrap())
            .unwrap();
        assert_eq!(single.finish().as_primitive::<Float32Type>().value(0), 0.1_f32);

        let mut uint16 = empty_column(&SdsTypeCode::UInt16);
        uint16
            .append(convert_value(&SdsTypeCode::UInt16, &json!(7)).unwrap())
            .unwrap();
        assert_eq!(uint16.finish().as_primitive::<UInt16Type>().value(0), 7);

        let mut uint64 = empty_column(&SdsTypeCode::NullableUInt64);
        uint64
            .append(convert_value(&SdsTypeCode::NullableUInt64, &json!(u64::MAX)).unwrap())
            .unwrap();
        assert_eq!(
            uint64.finish().as_primitive::<UInt64Type>().value(0),
            u64::MAX
        );

        let mut int32 = empty_column(&SdsTypeCode::Int32);
        int32
            .append(convert_value(&SdsTypeCode::Int32, &Value::Null).unwrap())
            .unwrap();
        let int32 = int32.finish();
        assert_eq!(int32.null_count(), 0);
        assert_eq!(int32.as_primitive::<Int32Type>().value(0), 0);
    }

    #[test]
    fn test_timestamp_column_has_utc_timezone() {
        let mut column = empty_column(&SdsTypeCode::DateTime);
        column
            .append(convert_value(&SdsTypeCode::DateTime, &json!("2022-06-05T00:00:00Z")).unwrap())
            .unwrap();
        assert!(!column.is_nullable());
        let field = column.field("Timestamp");
        assert_eq!(field.name(), "Timestamp");
        assert!(!field.is_nullable());

        let array = column.finish();
        let array = array.as_primitive::<TimestampMicrosecondType>();
        assert_eq!(array.timezone(), Some("UTC"));
        assert_eq!(
            array.value(0),
            Utc.with_ymd_and_hms(2022, 6, 5, 0, 0, 0)
                .unwrap()
                .timestamp_micros()
        );
    }
}
