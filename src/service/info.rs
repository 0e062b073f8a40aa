use serde::Serialize;

use crate::chart::numeric_columns;
use crate::session::TableEntry;
use crate::summary::Shape;

/// Listing view of one session entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub size_bytes: u64,
    pub original_shape: Shape,
    pub current_shape: Shape,
    pub columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub steps: Vec<String>,
}

impl From<&TableEntry> for FileInfo {
    fn from(entry: &TableEntry) -> Self {
        FileInfo {
            name: entry.name.clone(),
            size_bytes: entry.size_bytes,
            original_shape: Shape::from(entry.original()),
            current_shape: Shape::from(entry.working()),
            columns: entry.working().column_names(),
            numeric_columns: numeric_columns(entry.working()),
            steps: entry.steps().to_vec(),
        }
    }
}
