use std::fmt;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int64Array, StringArray, new_null_array,
};
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use serde_json::Value;

/// A single table value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    /// Reads one value out of a normalized column. Types outside the table
    /// model read as their display text.
    pub fn from_array(array: &dyn Array, row: usize) -> Cell {
        if array.is_null(row) {
            return Cell::Missing;
        }
        match array.data_type() {
            DataType::Int64 => Cell::Int(array.as_primitive::<Int64Type>().value(row)),
            DataType::Float64 => Cell::Float(array.as_primitive::<Float64Type>().value(row)),
            DataType::Boolean => Cell::Bool(array.as_boolean().value(row)),
            DataType::Utf8 => Cell::Text(array.as_string::<i32>().value(row).to_string()),
            _ => Cell::Text(
                arrow::util::display::array_value_to_string(array, row).unwrap_or_default(),
            ),
        }
    }

    /// One-element array holding this value, typed as `data_type`.
    pub fn to_array(&self, data_type: &DataType) -> ArrayRef {
        match self {
            Cell::Int(v) => Arc::new(Int64Array::from(vec![*v])),
            Cell::Float(v) => Arc::new(Float64Array::from(vec![*v])),
            Cell::Bool(v) => Arc::new(BooleanArray::from(vec![*v])),
            Cell::Text(v) => Arc::new(StringArray::from(vec![v.as_str()])),
            Cell::Missing => new_null_array(data_type, 1),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn to_json(&self) -> Value {
        match self {
            Cell::Missing => Value::Null,
            Cell::Int(v) => Value::from(*v),
            // NaN and infinities have no JSON form
            Cell::Float(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Cell::Bool(v) => Value::Bool(*v),
            Cell::Text(v) => Value::String(v.clone()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(v) => write!(f, "{v}"),
            Cell::Text(v) => f.write_str(v),
        }
    }
}
