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

//! Columnar tables built from SDS responses.
//!
//! ## Module Structure
//!
//! - `column`: type code → typed Arrow column and cell conversion
//! - `builder`: row-to-column assembly of stream data

pub mod builder;
pub mod column;

pub use builder::{build_table, streams_table, TableBuilder};
pub use column::{convert_value, empty_column, sds_type_to_arrow, SdsValue, TypedColumn};

use crate::error::Result;
use arrow_array::{ArrayRef, RecordBatch, RecordBatchOptions};
use arrow_schema::{Field, Schema, SchemaRef};
use std::sync::Arc;

/// A named table of equal-length, typed columns.
///
/// Column order follows the stream type's property order. The table is
/// never modified after construction.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    batch: RecordBatch,
}

impl Table {
    /// Assemble a table from fields and their arrays.
    ///
    /// `num_rows` is explicit so a type without properties still yields a
    /// table with the right row count.
    pub fn try_new(
        name: impl Into<String>,
        fields: Vec<Field>,
        columns: Vec<ArrayRef>,
        num_rows: usize,
    ) -> Result<Self> {
        let schema = Arc::new(Schema::new(fields));
        let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
        let batch = RecordBatch::try_new_with_options(schema, columns, &options)?;
        Ok(Self {
            name: name.into(),
            batch,
        })
    }

    /// Display name (the stream name for data tables).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn column_by_name(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }
}
