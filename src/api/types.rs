use serde::{Deserialize, Serialize};

use crate::chart::ChartKind;
use crate::clean::CleaningOp;
use crate::export::ExportFormat;

/// Body of the clean endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct CleanRequest {
    pub operations: Vec<CleaningOp>,
}

/// Body of the chart endpoint. `y` may be omitted for histograms.
#[derive(Debug, Deserialize, Serialize)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub x: String,
    #[serde(default)]
    pub y: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "ExportQuery::default_format")]
    pub format: ExportFormat,
}

impl ExportQuery {
    fn default_format() -> ExportFormat {
        ExportFormat::Csv
    }
}
