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

//! Builder for turning SDS data records into a [`Table`].
//!
//! SDS returns stream data row by row as JSON objects. `TableBuilder`
//! allocates one typed column per type property and appends each record's
//! converted cells in property order.
//!
//! # Example
//!
//! ```ignore
//! use sds_datasource::table::TableBuilder;
//!
//! let mut builder = TableBuilder::new("Pump 1", &descriptor);
//! for record in &records {
//!     builder.append_record(record)?;
//! }
//! let table = builder.finish()?;
//! ```

use crate::error::Result;
use crate::schema::TypeDescriptor;
use crate::table::column::{convert_value, empty_column, TypedColumn};
use crate::table::Table;
use crate::types::SdsRecord;
use arrow_array::{ArrayRef, StringArray};
use arrow_schema::{DataType, Field};
use serde_json::Value;
use std::sync::Arc;

/// Name of the table returned by stream listings.
pub const STREAMS_TABLE_NAME: &str = "streams";

/// Accumulates SDS records into typed columns.
#[derive(Debug)]
pub struct TableBuilder {
    name: String,
    /// Property id and column, in descriptor order.
    columns: Vec<(String, TypedColumn)>,
    num_rows: usize,
}

impl TableBuilder {
    /// Creates a builder with one empty column per descriptor property.
    pub fn new(name: impl Into<String>, descriptor: &TypeDescriptor) -> Self {
        let columns = descriptor
            .properties
            .iter()
            .map(|p| (p.id.clone(), empty_column(&p.type_code)))
            .collect();

        Self {
            name: name.into(),
            columns,
            num_rows: 0,
        }
    }

    /// Appends one record.
    ///
    /// Keys the type does not declare are ignored; declared properties the
    /// record lacks are treated as `null`. If any cell fails to convert,
    /// nothing from this record is appended.
    pub fn append_record(&mut self, record: &SdsRecord) -> Result<()> {
        let values = self
            .columns
            .iter()
            .map(|(id, column)| {
                let raw = record.get(id).unwrap_or(&Value::Null);
                convert_value(column.type_code(), raw)
            })
            .collect::<Result<Vec<_>>>()?;

        for ((_, column), value) in self.columns.iter_mut().zip(values) {
            column.append(value)?;
        }
        self.num_rows += 1;
        Ok(())
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Finishes all columns into a [`Table`].
    pub fn finish(mut self) -> Result<Table> {
        let mut fields = Vec::with_capacity(self.columns.len());
        let mut arrays = Vec::with_capacity(self.columns.len());
        for (id, column) in self.columns.iter_mut() {
            fields.push(column.field(id));
            arrays.push(column.finish());
        }
        Table::try_new(self.name, fields, arrays, self.num_rows)
    }
}

/// Builds a table from a descriptor and records, preserving record order.
pub fn build_table(
    name: impl Into<String>,
    descriptor: &TypeDescriptor,
    records: &[SdsRecord],
) -> Result<Table> {
    let mut builder = TableBuilder::new(name, descriptor);
    for record in records {
        builder.append_record(record)?;
    }
    builder.finish()
}

/// Builds the two-column `Id`/`Name` table for stream listings.
pub fn streams_table(ids: Vec<String>, names: Vec<String>) -> Result<Table> {
    let num_rows = ids.len();
    let fields = vec![
        Field::new("Id", DataType::Utf8, false),
        Field::new("Name", DataType::Utf8, false),
    ];
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(ids)),
        Arc::new(StringArray::from(names)),
    ];
    Table::try_new(STREAMS_TABLE_NAME, fields, columns, num_rows)
}
