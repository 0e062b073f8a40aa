//! Serializes tables for download.

mod archive;
mod excel;

use arrow::csv::WriterBuilder as CsvWriterBuilder;
use arrow::json::writer::{JsonArray, WriterBuilder as JsonWriterBuilder};
use serde::{Deserialize, Serialize};

use crate::core::SweeperError;
use crate::table::Table;

pub use archive::{ARCHIVE_MEDIA_TYPE, ARCHIVE_NAME, archive_entry_name, encode_archive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
    Json,
}

impl ExportFormat {
    pub fn media_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => ".csv",
            ExportFormat::Excel => ".xlsx",
            ExportFormat::Json => ".json",
        }
    }
}

/// Encoded table ready to be sent to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
    pub extension: &'static str,
}

pub fn encode(table: &Table, format: ExportFormat) -> Result<Export, SweeperError> {
    let bytes = match format {
        ExportFormat::Csv => encode_csv(table)?,
        ExportFormat::Excel => excel::encode_xlsx(table)?,
        ExportFormat::Json => encode_json(table)?,
    };
    Ok(Export {
        bytes,
        media_type: format.media_type(),
        extension: format.extension(),
    })
}

/// `sales.2024.csv` exported as JSON downloads as `sales.json`.
pub fn download_name(name: &str, format: ExportFormat) -> String {
    let stem = name.split('.').next().unwrap_or(name);
    format!("{}{}", stem, format.extension())
}

fn encoding_err(e: impl ToString) -> SweeperError {
    SweeperError::EncodingError(e.to_string())
}

/// Header plus one line per row. The index is not written; missing cells
/// are empty fields.
pub fn encode_csv(table: &Table) -> Result<Vec<u8>, SweeperError> {
    let mut buf = Vec::new();
    {
        let mut writer = CsvWriterBuilder::new().with_header(true).build(&mut buf);
        writer.write(table.batch()).map_err(encoding_err)?;
    }
    Ok(buf)
}

/// Array of row objects, missing cells as `null`.
pub fn encode_json(table: &Table) -> Result<Vec<u8>, SweeperError> {
    let mut buf = Vec::new();
    {
        let mut writer = JsonWriterBuilder::new()
            .with_explicit_nulls(true)
            .build::<_, JsonArray>(&mut buf);
        writer.write(table.batch()).map_err(encoding_err)?;
        writer.finish().map_err(encoding_err)?;
    }
    if buf.is_empty() {
        buf.extend_from_slice(b"[]");
    }
    Ok(buf)
}
