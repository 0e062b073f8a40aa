use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray};
use arrow::compute::{cast, filter_record_batch};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};

use crate::core::SweeperError;

use super::Cell;

/// In-memory table: an Arrow batch restricted to `Int64`, `Float64`,
/// `Boolean` and `Utf8` columns plus a positional row index.
///
/// Tables are values. Every transformation returns a new `Table` and leaves
/// the receiver untouched; column buffers are shared between the two where
/// Arrow allows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    batch: RecordBatch,
    index: Vec<u64>,
}

impl Table {
    /// Wraps a batch, normalizing column types and numbering rows from 0.
    pub fn new(batch: RecordBatch) -> Result<Self, ArrowError> {
        let schema = batch.schema();
        let mut fields = Vec::with_capacity(schema.fields().len());
        let mut columns = Vec::with_capacity(schema.fields().len());

        for (field, column) in schema.fields().iter().zip(batch.columns()) {
            let column = normalize(column)?;
            fields.push(Field::new(field.name(), column.data_type().clone(), true));
            columns.push(column);
        }

        let num_rows = batch.num_rows();
        let batch = batch_with_rows(Arc::new(Schema::new(fields)), columns, num_rows)?;
        Ok(Self {
            batch,
            index: (0..num_rows as u64).collect(),
        })
    }

    pub fn empty() -> Self {
        Self {
            batch: RecordBatch::new_empty(Arc::new(Schema::empty())),
            index: Vec::new(),
        }
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn index(&self) -> &[u64] {
        &self.index
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn column_position(&self, name: &str) -> Result<usize, SweeperError> {
        self.batch
            .schema()
            .index_of(name)
            .map_err(|_| SweeperError::UnknownColumn(name.to_string()))
    }

    pub fn column(&self, name: &str) -> Result<&ArrayRef, SweeperError> {
        let pos = self.column_position(name)?;
        Ok(self.batch.column(pos))
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        Cell::from_array(self.batch.column(column).as_ref(), row)
    }

    /// Total number of missing cells across all columns.
    pub fn missing_count(&self) -> usize {
        self.batch.columns().iter().map(|c| c.null_count()).sum()
    }

    /// Keeps the rows where `mask` is true, carrying their index labels along.
    pub fn filter(&self, mask: &BooleanArray) -> Result<Table, ArrowError> {
        let batch = filter_record_batch(&self.batch, mask)?;
        let index = self
            .index
            .iter()
            .zip(mask.iter())
            .filter(|(_, keep)| keep.unwrap_or(false))
            .map(|(label, _)| *label)
            .collect();
        Ok(Table { batch, index })
    }

    /// Removes the named columns. Every name must exist.
    pub fn drop_columns(&self, names: &[String]) -> Result<Table, SweeperError> {
        let mut dropped = Vec::with_capacity(names.len());
        for name in names {
            dropped.push(self.column_position(name)?);
        }
        let keep: Vec<usize> = (0..self.num_columns())
            .filter(|i| !dropped.contains(i))
            .collect();
        let batch = self
            .batch
            .project(&keep)
            .map_err(|e| SweeperError::InvalidRequest(e.to_string()))?;
        Ok(Table {
            batch,
            index: self.index.clone(),
        })
    }

    /// Swaps the column at `pos` for `column`, which may change its type.
    pub fn replace_column(&self, pos: usize, column: ArrayRef) -> Result<Table, ArrowError> {
        let column = normalize(&column)?;
        let schema = self.batch.schema();
        let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
        fields[pos] = Field::new(fields[pos].name(), column.data_type().clone(), true);

        let mut columns = self.batch.columns().to_vec();
        columns[pos] = column;

        let batch = batch_with_rows(Arc::new(Schema::new(fields)), columns, self.num_rows())?;
        Ok(Table {
            batch,
            index: self.index.clone(),
        })
    }

    pub fn with_reset_index(&self) -> Table {
        Table {
            batch: self.batch.clone(),
            index: (0..self.num_rows() as u64).collect(),
        }
    }
}

fn batch_with_rows(
    schema: Arc<Schema>,
    columns: Vec<ArrayRef>,
    num_rows: usize,
) -> Result<RecordBatch, ArrowError> {
    let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
    RecordBatch::try_new_with_options(schema, columns, &options)
}

fn normalize(column: &ArrayRef) -> Result<ArrayRef, ArrowError> {
    let target = match column.data_type() {
        DataType::Int64 | DataType::Float64 | DataType::Boolean | DataType::Utf8 => {
            return Ok(column.clone());
        }
        dt if dt.is_integer() => DataType::Int64,
        dt if dt.is_floating() => DataType::Float64,
        DataType::Decimal128(_, _) | DataType::Decimal256(_, _) => DataType::Float64,
        _ => DataType::Utf8,
    };
    cast(column, &target)
}
