use ahash::AHashMap;
use arrow::array::{Array, AsArray, make_array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::row::{RowConverter, SortField};

use super::Cell;

/// Int64 and Float64 are the numeric column types of the table model.
pub fn is_numeric(data_type: &DataType) -> bool {
    data_type.is_numeric()
}

/// Non-missing values of a numeric column as `f64`, in row order.
pub fn numeric_values(array: &dyn Array) -> Vec<f64> {
    if !is_numeric(array.data_type()) {
        return Vec::new();
    }
    match cast(array, &DataType::Float64) {
        Ok(floats) => floats
            .as_primitive::<Float64Type>()
            .iter()
            .flatten()
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Linear-interpolated quantile of already sorted values, `q` in `[0, 1]`.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(&sorted(values), 0.5)
}

/// Most frequent non-missing value, the smallest one on ties.
pub fn mode(column: &dyn Array) -> Option<Cell> {
    let converter = RowConverter::new(vec![SortField::new(column.data_type().clone())]).ok()?;
    let rows = converter
        .convert_columns(&[make_array(column.to_data())])
        .ok()?;

    let mut counts: AHashMap<_, (usize, usize)> = AHashMap::new();
    for (i, row) in rows.iter().enumerate() {
        if column.is_null(i) {
            continue;
        }
        counts.entry(row).or_insert((0, i)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(row_a, (count_a, _)), (row_b, (count_b, _))| {
            count_a.cmp(count_b).then_with(|| row_b.cmp(row_a))
        })
        .map(|(_, (_, first))| Cell::from_array(column, first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{BooleanArray, Int64Array, StringArray};

    #[test]
    fn test_numeric_values_skip_missing() {
        let arr = Int64Array::from(vec![Some(1), None, Some(3)]);
        assert_eq!(numeric_values(&arr), vec![1.0, 3.0]);

        let text = StringArray::from(vec!["1"]);
        assert!(numeric_values(&text).is_empty());
    }

    #[test]
    fn test_summary_statistics() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(mean(&values), Some(2.5));
        assert_eq!(median(&values), Some(2.5));
        assert_eq!(quantile(&sorted(&values), 0.25), Some(1.75));
        let std = std_dev(&values).unwrap();
        assert!((std - 1.2909944).abs() < 1e-6);
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(std_dev(&[1.0]), None);
    }

    #[test]
    fn test_mode() {
        let arr = Int64Array::from(vec![Some(3), None, Some(1), Some(3), None, None]);
        assert_eq!(mode(&arr), Some(Cell::Int(3)));

        let tie = BooleanArray::from(vec![true, false]);
        assert_eq!(mode(&tie), Some(Cell::Bool(false)));

        let empty = StringArray::from(vec![None::<&str>]);
        assert_eq!(mode(&empty), None);
    }
}
