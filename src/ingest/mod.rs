//! Turns uploaded bytes into a [`Table`].
//!
//! Dispatch is on the file extension only; the content is never sniffed.

mod csv;
mod xlsx;

use std::path::Path;

use bytes::Bytes;

use crate::core::SweeperError;
use crate::table::Table;

/// An upload as received from the client. Lives only for the duration of
/// ingestion.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Bytes,
    pub size: u64,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xlsx,
}

impl FileKind {
    pub fn from_name(name: &str) -> Result<FileKind, SweeperError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(FileKind::Csv),
            Some("xlsx") => Ok(FileKind::Xlsx),
            Some(other) => Err(SweeperError::UnsupportedFormat(format!(".{other}"))),
            None => Err(SweeperError::UnsupportedFormat(name.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Rows scanned for CSV type inference, all rows when `None`.
    pub schema_inference_rows: Option<usize>,
}

/// Blank headers become `Unnamed: <i>`, repeats get a `.<n>` suffix.
pub(crate) fn column_names<I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut names: Vec<String> = Vec::new();
    for (i, header) in headers.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            header
        };
        let mut candidate = base.clone();
        let mut n = 1;
        while names.contains(&candidate) {
            candidate = format!("{base}.{n}");
            n += 1;
        }
        names.push(candidate);
    }
    names
}

/// Parses `file` according to its extension.
pub fn parse(file: &UploadedFile, options: &ParseOptions) -> Result<Table, SweeperError> {
    match FileKind::from_name(&file.name)? {
        FileKind::Csv => csv::read_csv(&file.name, &file.bytes, options),
        FileKind::Xlsx => xlsx::read_xlsx(&file.name, &file.bytes),
    }
}
