//! Chart specifications for the working table.
//!
//! A [`ChartSpec`] carries the plotted values only; [`ChartSpec::to_plotly`]
//! turns it into a Plotly figure that a browser can render as is.

use arrow::array::AsArray;
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::SweeperError;
use crate::table::Table;
use crate::table::stats::is_numeric;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Histogram,
    Box,
}

impl ChartKind {
    pub fn uses_y(&self) -> bool {
        !matches!(self, ChartKind::Histogram)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub x_column: String,
    pub y_column: Option<String>,
    pub x: Vec<Option<f64>>,
    pub y: Option<Vec<Option<f64>>>,
}

/// Columns a caller may offer as chart axes.
pub fn numeric_columns(table: &Table) -> Vec<String> {
    table
        .batch()
        .schema()
        .fields()
        .iter()
        .filter(|f| is_numeric(f.data_type()))
        .map(|f| f.name().clone())
        .collect()
}

/// Builds the chart of `x` against `y`. Histograms ignore `y`. Values that
/// are not numbers plot as gaps.
pub fn build(table: &Table, kind: ChartKind, x: &str, y: &str) -> Result<ChartSpec, SweeperError> {
    let x_values = values(table, x)?;
    let (y_column, y_values) = if kind.uses_y() {
        (Some(y.to_string()), Some(values(table, y)?))
    } else {
        (None, None)
    };

    Ok(ChartSpec {
        kind,
        x_column: x.to_string(),
        y_column,
        x: x_values,
        y: y_values,
    })
}

fn values(table: &Table, name: &str) -> Result<Vec<Option<f64>>, SweeperError> {
    let column = table.column(name)?;
    let floats = cast(column.as_ref(), &DataType::Float64)
        .map_err(|e| SweeperError::InvalidRequest(format!("column '{name}': {e}")))?;
    Ok(floats.as_primitive::<Float64Type>().iter().collect())
}

impl ChartSpec {
    pub fn to_plotly(&self) -> Value {
        let x = json!(self.x);
        let y = json!(self.y);
        let trace = match self.kind {
            ChartKind::Bar => json!({"type": "bar", "x": x, "y": y}),
            ChartKind::Line => json!({"type": "scatter", "mode": "lines", "x": x, "y": y}),
            ChartKind::Scatter => json!({"type": "scatter", "mode": "markers", "x": x, "y": y}),
            ChartKind::Histogram => json!({"type": "histogram", "x": x}),
            ChartKind::Box => json!({"type": "box", "x": x, "y": y}),
        };
        let y_title = match &self.y_column {
            Some(name) => name.clone(),
            None => "count".to_string(),
        };
        json!({
            "data": [trace],
            "layout": {
                "xaxis": {"title": {"text": self.x_column}},
                "yaxis": {"title": {"text": y_title}},
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{int_table, text_table};
    use rstest::rstest;

    fn table() -> Table {
        int_table(&["a", "b"], &[&[Some(1), Some(10)], &[Some(2), None]])
    }

    #[rstest]
    #[case(ChartKind::Bar, "bar")]
    #[case(ChartKind::Line, "scatter")]
    #[case(ChartKind::Scatter, "scatter")]
    #[case(ChartKind::Box, "box")]
    fn test_two_axis_charts(#[case] kind: ChartKind, #[case] trace: &str) {
        let spec = build(&table(), kind, "a", "b").unwrap();
        assert_eq!(spec.x, vec![Some(1.0), Some(2.0)]);
        assert_eq!(spec.y, Some(vec![Some(10.0), None]));

        let fig = spec.to_plotly();
        assert_eq!(fig["data"][0]["type"], trace);
        assert_eq!(fig["data"][0]["y"][1], Value::Null);
        assert_eq!(fig["layout"]["yaxis"]["title"]["text"], "b");
    }

    #[test]
    fn test_histogram_uses_x_only() {
        let spec = build(&table(), ChartKind::Histogram, "a", "does-not-matter").unwrap();
        assert_eq!(spec.y, None);
        assert_eq!(spec.y_column, None);
        let fig = spec.to_plotly();
        assert_eq!(fig["data"][0]["type"], "histogram");
        assert!(fig["data"][0].get("y").is_none());
    }

    #[test]
    fn test_empty_table_gives_empty_chart() {
        let empty = int_table(&["a", "b"], &[]);
        let spec = build(&empty, ChartKind::Scatter, "a", "b").unwrap();
        assert!(spec.x.is_empty());
        assert_eq!(spec.y, Some(vec![]));
    }

    #[test]
    fn test_unknown_axis() {
        let err = build(&table(), ChartKind::Bar, "a", "zzz").unwrap_err();
        assert_eq!(err, SweeperError::UnknownColumn("zzz".to_string()));
    }

    #[test]
    fn test_numeric_columns() {
        assert_eq!(numeric_columns(&table()), vec!["a", "b"]);
        let text = text_table(&["s"], &[&[Some("x")]]);
        assert!(numeric_columns(&text).is_empty());
    }
}
