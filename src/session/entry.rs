use crate::table::Table;

/// One uploaded file and everything done to it since.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    pub name: String,
    original: Table,
    working: Table,
    steps: Vec<String>,
    pub size_bytes: u64,
}

impl TableEntry {
    pub fn new(name: impl Into<String>, table: Table, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            working: table.clone(),
            original: table,
            steps: Vec::new(),
            size_bytes,
        }
    }

    /// The table as parsed. Never changes after the entry is created.
    pub fn original(&self) -> &Table {
        &self.original
    }

    pub fn working(&self) -> &Table {
        &self.working
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Replaces the working table and extends the step log.
    pub fn commit(&mut self, working: Table, steps: impl IntoIterator<Item = String>) {
        self.working = working;
        self.steps.extend(steps);
    }
}
