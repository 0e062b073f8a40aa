use arrow::datatypes::DataType;
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::core::SweeperError;
use crate::table::{Cell, Table};

const SHEET_NAME: &str = "Sheet1";

impl From<XlsxError> for SweeperError {
    fn from(err: XlsxError) -> Self {
        SweeperError::EncodingError(err.to_string())
    }
}

/// Single worksheet: header row, then one row per table row. Missing cells
/// are left blank.
pub(super) fn encode_xlsx(table: &Table) -> Result<Vec<u8>, SweeperError> {
    let schema = table.batch().schema();
    for field in schema.fields() {
        match field.data_type() {
            DataType::Int64 | DataType::Float64 | DataType::Boolean | DataType::Utf8 => {}
            other => {
                return Err(SweeperError::EncodingError(format!(
                    "column '{}': cannot write {} to Excel",
                    field.name(),
                    other
                )));
            }
        }
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, field) in schema.fields().iter().enumerate() {
        sheet.write_string(0, col as u16, field.name())?;
    }

    for row in 0..table.num_rows() {
        let xl_row = row as u32 + 1;
        for col in 0..table.num_columns() {
            let xl_col = col as u16;
            match table.cell(row, col) {
                Cell::Missing => {}
                Cell::Int(v) => {
                    sheet.write_number(xl_row, xl_col, v as f64)?;
                }
                Cell::Float(v) => {
                    sheet.write_number(xl_row, xl_col, v)?;
                }
                Cell::Bool(v) => {
                    sheet.write_boolean(xl_row, xl_col, v)?;
                }
                Cell::Text(v) => {
                    sheet.write_string(xl_row, xl_col, v)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
