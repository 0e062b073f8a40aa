mod entry;

use std::collections::BTreeMap;

use log::{info, warn};

use crate::clean::{self, CleaningOp};
use crate::core::SweeperError;
use crate::ingest::{self, FileKind, ParseOptions, UploadedFile};

pub use entry::TableEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Created,
    /// An entry with that name already existed and was left as is.
    Existing,
}

/// Every file one user is working on, keyed by file name.
///
/// A session starts empty and lives until the hosting layer drops it or
/// calls [`Session::remove_all`].
#[derive(Debug, Default)]
pub struct Session {
    entries: BTreeMap<String, TableEntry>,
    parse_options: ParseOptions,
}

impl Session {
    pub fn new(parse_options: ParseOptions) -> Self {
        Self {
            entries: BTreeMap::new(),
            parse_options,
        }
    }

    pub fn get(&self, name: &str) -> Result<&TableEntry, SweeperError> {
        self.entries
            .get(name)
            .ok_or_else(|| SweeperError::EntryNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut TableEntry, SweeperError> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| SweeperError::EntryNotFound(name.to_string()))
    }

    /// Inserts `entry`, replacing any entry with the same name.
    pub fn put(&mut self, entry: TableEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn remove_all(&mut self) {
        info!("resetting session with {} files", self.entries.len());
        self.entries.clear();
    }

    /// Parses `file` and stores it, unless a file with the same name is
    /// already in the session. In that case the upload is ignored so that
    /// cleaning done so far survives.
    pub fn ingest(&mut self, file: &UploadedFile) -> Result<IngestOutcome, SweeperError> {
        FileKind::from_name(&file.name).inspect_err(|e| warn!("rejected {}: {}", file.name, e))?;
        if self.contains(&file.name) {
            info!("{} already loaded, keeping current state", file.name);
            return Ok(IngestOutcome::Existing);
        }

        let table = ingest::parse(file, &self.parse_options)
            .inspect_err(|e| warn!("rejected {}: {}", file.name, e))?;
        info!(
            "loaded {}: {} rows, {} columns, {} bytes",
            file.name,
            table.num_rows(),
            table.num_columns(),
            file.size
        );
        self.put(TableEntry::new(file.name.clone(), table, file.size));
        Ok(IngestOutcome::Created)
    }

    /// Cleans the working table of `name`. On error the entry is untouched.
    pub fn apply_cleaning(
        &mut self,
        name: &str,
        ops: &[CleaningOp],
    ) -> Result<&TableEntry, SweeperError> {
        let entry = self.get_mut(name)?;
        let cleaned = clean::apply(entry.working(), ops)?;
        info!("{}: applied {} cleaning operations", name, cleaned.steps.len());
        entry.commit(cleaned.table, cleaned.steps);
        Ok(entry)
    }
}
