//! Per-file overview: shapes, a head preview, descriptive statistics and
//! missing-value counts.

use ahash::AHashSet;
use arrow::array::Array;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::session::TableEntry;
use crate::table::stats::{self, is_numeric};
use crate::table::{Cell, Table};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

impl From<&Table> for Shape {
    fn from(table: &Table) -> Self {
        let (rows, columns) = table.shape();
        Shape { rows, columns }
    }
}

/// `describe(include="all")` style statistics of one column. Numeric fields
/// are `None` for text columns and the other way around.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub name: String,
    pub dtype: String,
    pub count: usize,
    pub unique: Option<usize>,
    pub top: Option<Value>,
    pub freq: Option<usize>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub q50: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingStats {
    pub name: String,
    pub missing: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub name: String,
    pub original_shape: Shape,
    pub current_shape: Shape,
    pub size_kb: f64,
    pub steps: Vec<String>,
    pub preview: Vec<Value>,
    pub statistics: Vec<ColumnStats>,
    pub missing: Vec<MissingStats>,
}

pub fn summarize(entry: &TableEntry, preview_rows: usize) -> Summary {
    let table = entry.working();
    Summary {
        name: entry.name.clone(),
        original_shape: Shape::from(entry.original()),
        current_shape: Shape::from(table),
        size_kb: round2(entry.size_bytes as f64 / 1024.0),
        steps: entry.steps().to_vec(),
        preview: preview(table, preview_rows),
        statistics: describe(table),
        missing: missing(table),
    }
}

/// First `rows` rows as objects, each carrying its index label under
/// `index`, or `level_0` when a column already owns `index`.
pub fn preview(table: &Table, rows: usize) -> Vec<Value> {
    let names = table.column_names();
    let label = ["index", "level_0"]
        .into_iter()
        .find(|key| !names.iter().any(|name| name == key));
    (0..table.num_rows().min(rows))
        .map(|row| {
            let mut record = Map::new();
            if let Some(label) = label {
                record.insert(label.to_string(), Value::from(table.index()[row]));
            }
            for (col, name) in names.iter().enumerate() {
                record.insert(name.clone(), table.cell(row, col).to_json());
            }
            Value::Object(record)
        })
        .collect()
}

pub fn describe(table: &Table) -> Vec<ColumnStats> {
    let schema = table.batch().schema();
    schema
        .fields()
        .iter()
        .zip(table.batch().columns())
        .map(|(field, column)| {
            let count = column.len() - column.null_count();
            let mut out = ColumnStats {
                name: field.name().clone(),
                dtype: field.data_type().to_string(),
                count,
                unique: None,
                top: None,
                freq: None,
                mean: None,
                std: None,
                min: None,
                q25: None,
                q50: None,
                q75: None,
                max: None,
            };

            if is_numeric(field.data_type()) {
                let values = stats::numeric_values(column.as_ref());
                let sorted = stats::sorted(&values);
                out.mean = stats::mean(&values);
                out.std = stats::std_dev(&values);
                out.min = sorted.first().copied();
                out.q25 = stats::quantile(&sorted, 0.25);
                out.q50 = stats::quantile(&sorted, 0.5);
                out.q75 = stats::quantile(&sorted, 0.75);
                out.max = sorted.last().copied();
            } else {
                let cells: Vec<Cell> = (0..column.len())
                    .map(|row| Cell::from_array(column.as_ref(), row))
                    .filter(|c| !c.is_missing())
                    .collect();
                let distinct: AHashSet<String> = cells.iter().map(|c| c.to_string()).collect();
                out.unique = Some(distinct.len());
                if let Some(top) = stats::mode(column.as_ref()) {
                    let top_text = top.to_string();
                    out.freq = Some(cells.iter().filter(|c| c.to_string() == top_text).count());
                    out.top = Some(top.to_json());
                }
            }
            out
        })
        .collect()
}

pub fn missing(table: &Table) -> Vec<MissingStats> {
    let rows = table.num_rows();
    table
        .column_names()
        .into_iter()
        .zip(table.batch().columns())
        .map(|(name, column)| {
            let missing = column.null_count();
            let percent = if rows == 0 {
                0.0
            } else {
                round2(missing as f64 / rows as f64 * 100.0)
            };
            MissingStats {
                name,
                missing,
                percent,
            }
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
