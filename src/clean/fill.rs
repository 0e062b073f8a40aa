use arrow::array::{Array, ArrayRef, Scalar};
use arrow::compute::kernels::zip::zip;
use arrow::compute::{cast, is_not_null};
use arrow::datatypes::DataType;
use arrow::error::ArrowError;

use crate::core::SweeperError;
use crate::table::stats::{self, is_numeric};
use crate::table::{Cell, Table};

use super::FillMethod;

fn arrow_err(e: ArrowError) -> SweeperError {
    SweeperError::InvalidRequest(e.to_string())
}

/// Replaces the missing cells of each named column. Mean and Median turn
/// the column into floats; a specific value widens the column type when it
/// does not parse as the current one.
pub fn fill_missing(
    table: &Table,
    columns: &[String],
    method: &FillMethod,
) -> Result<Table, SweeperError> {
    let mut current = table.clone();
    for name in columns {
        let pos = current.column_position(name)?;
        let column = current.batch().column(pos).clone();
        if method.is_numeric() && !is_numeric(column.data_type()) {
            return Err(SweeperError::InvalidFillTarget {
                column: name.clone(),
                method: method.to_string(),
            });
        }
        if column.null_count() == 0 {
            continue;
        }

        let Some((target, value)) = fill_value(column.as_ref(), method) else {
            continue;
        };
        let filled = fill_column(&column, &target, &value).map_err(arrow_err)?;
        current = current.replace_column(pos, filled).map_err(arrow_err)?;
    }
    Ok(current)
}

/// The value to fill with and the type the column must have to hold it.
/// `None` when the column has nothing to derive a value from.
fn fill_value(column: &dyn Array, method: &FillMethod) -> Option<(DataType, Cell)> {
    let float = |v: f64| (DataType::Float64, Cell::Float(v));
    match method {
        FillMethod::Mean => stats::mean(&stats::numeric_values(column)).map(float),
        FillMethod::Median => stats::median(&stats::numeric_values(column)).map(float),
        FillMethod::Mode => stats::mode(column).map(|cell| (column.data_type().clone(), cell)),
        FillMethod::Value(raw) => Some(parse_value(column.data_type(), raw)),
    }
}

fn parse_value(data_type: &DataType, raw: &str) -> (DataType, Cell) {
    let text = || (DataType::Utf8, Cell::Text(raw.to_string()));
    match data_type {
        DataType::Int64 => {
            if let Ok(v) = raw.trim().parse::<i64>() {
                (DataType::Int64, Cell::Int(v))
            } else if let Ok(v) = raw.trim().parse::<f64>() {
                (DataType::Float64, Cell::Float(v))
            } else {
                text()
            }
        }
        DataType::Float64 => match raw.trim().parse::<f64>() {
            Ok(v) => (DataType::Float64, Cell::Float(v)),
            Err(_) => text(),
        },
        DataType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => (DataType::Boolean, Cell::Bool(true)),
            "false" => (DataType::Boolean, Cell::Bool(false)),
            _ => text(),
        },
        _ => text(),
    }
}

fn fill_column(column: &ArrayRef, target: &DataType, value: &Cell) -> Result<ArrayRef, ArrowError> {
    let column = if column.data_type() == target {
        column.clone()
    } else {
        cast(column, target)?
    };
    let present = is_not_null(&column)?;
    let fill = Scalar::new(value.to_array(target));
    zip(&present, &column, &fill)
}
