use std::io::Cursor;
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use log::debug;
use regex::Regex;

use crate::core::SweeperError;
use crate::table::Table;

use super::{ParseOptions, column_names};

/// Field values read as missing, matched against the whole field.
const MISSING_VALUES: &str = r"^(|#N/A|#N/A N/A|#NA|-1\.#IND|-1\.#QNAN|-NaN|-nan|1\.#IND|1\.#QNAN|<NA>|N/A|NA|NULL|NaN|None|n/a|nan|null)$";

pub(super) fn read_csv(
    name: &str,
    bytes: &[u8],
    options: &ParseOptions,
) -> Result<Table, SweeperError> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(SweeperError::parse(name, "No columns to parse from file"));
    }

    let missing = Regex::new(MISSING_VALUES).map_err(|e| SweeperError::parse(name, e))?;
    let format = Format::default()
        .with_header(true)
        .with_null_regex(missing);
    let (inferred, scanned) = format
        .infer_schema(Cursor::new(bytes), options.schema_inference_rows)
        .map_err(|e| SweeperError::parse(name, e))?;
    debug!("inferred schema for {} from {} records", name, scanned);

    let names = column_names(inferred.fields().iter().map(|f| f.name().clone()));
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .zip(names)
        .map(|(field, renamed)| field.as_ref().clone().with_name(renamed))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .build(Cursor::new(bytes))
        .map_err(|e| SweeperError::parse(name, e))?;

    let batches = reader
        .collect::<Result<Vec<RecordBatch>, _>>()
        .map_err(|e| SweeperError::parse(name, e))?;
    let batch = concat_batches(&schema, &batches).map_err(|e| SweeperError::parse(name, e))?;

    Table::new(batch).map_err(|e| SweeperError::parse(name, e))
}
