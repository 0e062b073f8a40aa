use std::sync::Arc;

use ahash::AHashSet;
use arrow::array::{Array, ArrayRef, AsArray, BooleanArray};
use arrow::compute::kernels::arity::unary;
use arrow::datatypes::{DataType, Float64Type};
use arrow::row::{RowConverter, SortField};

use crate::core::SweeperError;
use crate::table::Table;

fn arrow_err(e: arrow::error::ArrowError) -> SweeperError {
    SweeperError::InvalidRequest(e.to_string())
}

/// Drops rows equal in every column to an earlier row. Missing cells compare
/// equal to each other, and so do `0.0` and `-0.0`.
pub fn remove_duplicates(table: &Table) -> Result<Table, SweeperError> {
    if table.num_columns() == 0 {
        return Ok(table.clone());
    }
    let batch = table.batch();
    let fields = batch
        .schema()
        .fields()
        .iter()
        .map(|f| SortField::new(f.data_type().clone()))
        .collect();
    let converter = RowConverter::new(fields).map_err(arrow_err)?;
    let columns: Vec<ArrayRef> = batch.columns().iter().map(comparable).collect();
    let rows = converter.convert_columns(&columns).map_err(arrow_err)?;

    let mut seen = AHashSet::with_capacity(rows.num_rows());
    let mask: BooleanArray = rows.iter().map(|row| Some(seen.insert(row))).collect();
    table.filter(&mask).map_err(arrow_err)
}

// The row format compares floats by bit pattern.
fn comparable(column: &ArrayRef) -> ArrayRef {
    match column.data_type() {
        DataType::Float64 => {
            let values = column.as_primitive::<Float64Type>();
            Arc::new(unary::<_, _, Float64Type>(values, |v| if v == 0.0 { 0.0 } else { v }))
        }
        _ => column.clone(),
    }
}

/// Drops every row holding at least one missing cell.
pub fn drop_missing_rows(table: &Table) -> Result<Table, SweeperError> {
    let columns = table.batch().columns();
    let mask: BooleanArray = (0..table.num_rows())
        .map(|row| Some(columns.iter().all(|c| c.is_valid(row))))
        .collect();
    table.filter(&mask).map_err(arrow_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use crate::testutil::{int_table, random_table};

    #[test]
    fn test_remove_duplicates_keeps_first() {
        let table = int_table(
            &["a", "b"],
            &[
                &[Some(1), None],
                &[Some(2), Some(2)],
                &[Some(1), None],
                &[Some(2), Some(2)],
                &[Some(1), Some(0)],
            ],
        );
        let deduped = remove_duplicates(&table).unwrap();
        assert_eq!(deduped.num_rows(), 3);
        assert_eq!(deduped.index(), &[0, 1, 4]);
        assert_eq!(deduped.cell(0, 1), Cell::Missing);
    }

    #[test]
    fn test_remove_duplicates_signed_zero() {
        let table = Table::new(
            arrow::record_batch::RecordBatch::try_from_iter(vec![(
                "x",
                Arc::new(arrow::array::Float64Array::from(vec![0.0, -0.0, 1.0])) as ArrayRef,
            )])
            .unwrap(),
        )
        .unwrap();
        let deduped = remove_duplicates(&table).unwrap();
        assert_eq!(deduped.index(), &[0, 2]);
        assert_eq!(deduped.cell(0, 0), Cell::Float(0.0));
    }

    #[test]
    fn test_remove_duplicates_idempotent() {
        let table = random_table(500, 7);
        let once = remove_duplicates(&table).unwrap();
        let twice = remove_duplicates(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_drop_missing_rows_leaves_no_missing() {
        let table = random_table(500, 11);
        assert!(table.missing_count() > 0);
        let dropped = drop_missing_rows(&table).unwrap();
        assert_eq!(dropped.missing_count(), 0);
        assert!(dropped.num_rows() < table.num_rows());
    }

    #[test]
    fn test_drop_missing_rows_on_clean_table() {
        let table = int_table(&["a"], &[&[Some(1)], &[Some(2)]]);
        assert_eq!(drop_missing_rows(&table).unwrap(), table);
    }
}
