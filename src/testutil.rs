//! Table builders for tests and benchmarks.
//!
//! This module is only available when the `testutil` feature is enabled.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::table::Table;

fn build(fields: Vec<Field>, columns: Vec<ArrayRef>) -> Table {
    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).unwrap();
    Table::new(batch).unwrap()
}

/// Table of nullable `Int64` columns, given row by row.
pub fn int_table(names: &[&str], rows: &[&[Option<i64>]]) -> Table {
    let fields = names
        .iter()
        .map(|n| Field::new(*n, DataType::Int64, true))
        .collect();
    let columns = (0..names.len())
        .map(|col| {
            let arr: Int64Array = rows.iter().map(|row| row[col]).collect();
            Arc::new(arr) as ArrayRef
        })
        .collect();
    build(fields, columns)
}

/// Table of nullable `Utf8` columns, given row by row.
pub fn text_table(names: &[&str], rows: &[&[Option<&str>]]) -> Table {
    let fields = names
        .iter()
        .map(|n| Field::new(*n, DataType::Utf8, true))
        .collect();
    let columns = (0..names.len())
        .map(|col| {
            let arr: StringArray = rows.iter().map(|row| row[col]).collect();
            Arc::new(arr) as ArrayRef
        })
        .collect();
    build(fields, columns)
}

/// Deterministic table with an id-like integer column, a float column and a
/// small-cardinality text column. Values repeat often enough to produce
/// duplicate rows and roughly one cell in ten is missing.
pub fn random_table(num_rows: usize, seed: u64) -> Table {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ids = Vec::with_capacity(num_rows);
    let mut scores = Vec::with_capacity(num_rows);
    let mut labels = Vec::with_capacity(num_rows);

    for _ in 0..num_rows {
        ids.push((!rng.gen_bool(0.1)).then(|| rng.gen_range(0..20i64)));
        scores.push((!rng.gen_bool(0.1)).then(|| f64::from(rng.gen_range(0..4u8)) * 0.5));
        labels.push((!rng.gen_bool(0.1)).then(|| ["red", "green", "blue"][rng.gen_range(0..3)]));
    }

    build(
        vec![
            Field::new("id", DataType::Int64, true),
            Field::new("score", DataType::Float64, true),
            Field::new("label", DataType::Utf8, true),
        ],
        vec![
            Arc::new(Int64Array::from(ids)),
            Arc::new(Float64Array::from(scores)),
            Arc::new(StringArray::from(labels)),
        ],
    )
}

/// Joins a header line and data lines into CSV bytes.
pub fn csv_bytes(header: &str, rows: &[&str]) -> Vec<u8> {
    let mut out = String::from(header);
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out.into_bytes()
}
