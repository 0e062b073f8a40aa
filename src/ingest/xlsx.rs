use std::io::Cursor;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use calamine::{Data, Reader, Xlsx};

use crate::core::SweeperError;
use crate::table::Table;

use super::column_names;

/// Reads the first worksheet. The first row of the used range is the header.
pub(super) fn read_xlsx(name: &str, bytes: &[u8]) -> Result<Table, SweeperError> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| SweeperError::parse(name, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SweeperError::parse(name, "workbook contains no sheets"))?
        .map_err(|e| SweeperError::parse(name, e))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::empty());
    };
    let headers = header_names(header);
    let body: Vec<&[Data]> = rows.collect();

    let mut fields = Vec::with_capacity(headers.len());
    let mut columns = Vec::with_capacity(headers.len());
    for (col, header) in headers.into_iter().enumerate() {
        let cells: Vec<&Data> = body.iter().map(|row| &row[col]).collect();
        let column = build_column(&cells);
        fields.push(Field::new(header, column.data_type().clone(), true));
        columns.push(column);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(body.len()));
    let batch = RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), columns, &options)
        .map_err(|e| SweeperError::parse(name, e))?;
    Table::new(batch).map_err(|e| SweeperError::parse(name, e))
}

fn header_names(header: &[Data]) -> Vec<String> {
    column_names(header.iter().map(|cell| match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }))
}

fn is_missing(cell: &Data) -> bool {
    matches!(cell, Data::Empty | Data::Error(_))
}

fn build_column(cells: &[&Data]) -> ArrayRef {
    let present: Vec<&Data> = cells.iter().copied().filter(|c| !is_missing(c)).collect();

    let all_ints = present.iter().all(|c| match c {
        Data::Int(_) => true,
        Data::Float(f) => f.fract() == 0.0 && f.abs() < i64::MAX as f64,
        _ => false,
    });
    let all_numbers = present
        .iter()
        .all(|c| matches!(c, Data::Int(_) | Data::Float(_)));
    let all_bools = present.iter().all(|c| matches!(c, Data::Bool(_)));

    if present.is_empty() {
        Arc::new(StringArray::from(vec![None::<&str>; cells.len()]))
    } else if all_ints {
        Arc::new(
            cells
                .iter()
                .map(|c| match c {
                    Data::Int(i) => Some(*i),
                    Data::Float(f) => Some(*f as i64),
                    _ => None,
                })
                .collect::<Int64Array>(),
        )
    } else if all_numbers {
        Arc::new(
            cells
                .iter()
                .map(|c| match c {
                    Data::Int(i) => Some(*i as f64),
                    Data::Float(f) => Some(*f),
                    _ => None,
                })
                .collect::<Float64Array>(),
        )
    } else if all_bools {
        Arc::new(
            cells
                .iter()
                .map(|c| match c {
                    Data::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect::<BooleanArray>(),
        )
    } else {
        Arc::new(cells.iter().map(|c| cell_text(c)).collect::<StringArray>())
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::DateTime(dt) => Some(
            dt.as_datetime()
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| dt.as_f64().to_string()),
        ),
        other => Some(other.to_string()),
    }
}
