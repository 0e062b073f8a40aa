//! Table cleaning operations.
//!
//! [`apply`] is pure: it takes the current working table and returns the
//! cleaned copy together with a description of each step it performed.
//! Operations always run in [`CleaningOp::precedence`] order, whatever order
//! the caller listed them in.

mod fill;
mod rows;

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::SweeperError;
use crate::table::Table;

pub use fill::fill_missing;
pub use rows::{drop_missing_rows, remove_duplicates};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "value", rename_all = "snake_case")]
pub enum FillMethod {
    Mean,
    Median,
    Mode,
    Value(String),
}

impl FillMethod {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FillMethod::Mean | FillMethod::Median)
    }
}

impl fmt::Display for FillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FillMethod::Mean => "Mean",
            FillMethod::Median => "Median",
            FillMethod::Mode => "Mode",
            FillMethod::Value(_) => "Specific Value",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CleaningOp {
    RemoveDuplicates,
    FillMissing {
        columns: Vec<String>,
        #[serde(flatten)]
        method: FillMethod,
    },
    DropColumns {
        columns: Vec<String>,
    },
    DropMissingRows,
    ResetIndex,
}

impl CleaningOp {
    pub fn precedence(&self) -> u8 {
        match self {
            CleaningOp::RemoveDuplicates => 0,
            CleaningOp::FillMissing { .. } => 1,
            CleaningOp::DropColumns { .. } => 2,
            CleaningOp::DropMissingRows => 3,
            CleaningOp::ResetIndex => 4,
        }
    }

    fn is_noop(&self) -> bool {
        match self {
            CleaningOp::FillMissing { columns, .. } | CleaningOp::DropColumns { columns } => {
                columns.is_empty()
            }
            _ => false,
        }
    }

    fn run(&self, table: &Table) -> Result<(Table, String), SweeperError> {
        match self {
            CleaningOp::RemoveDuplicates => {
                Ok((remove_duplicates(table)?, "Removed duplicates".to_string()))
            }
            CleaningOp::FillMissing { columns, method } => Ok((
                fill_missing(table, columns, method)?,
                format!("Filled missing values using {method}"),
            )),
            CleaningOp::DropColumns { columns } => Ok((
                table.drop_columns(columns)?,
                format!("Dropped columns: {}", columns.join(", ")),
            )),
            CleaningOp::DropMissingRows => Ok((
                drop_missing_rows(table)?,
                "Dropped rows with missing values".to_string(),
            )),
            CleaningOp::ResetIndex => Ok((table.with_reset_index(), "Reset index".to_string())),
        }
    }
}

/// Result of one [`apply`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    pub table: Table,
    pub steps: Vec<String>,
}

/// Applies `ops` to a copy of `table`. Operations with nothing selected are
/// skipped and leave no step behind. The first failing operation aborts the
/// whole call.
pub fn apply(table: &Table, ops: &[CleaningOp]) -> Result<Cleaned, SweeperError> {
    let mut ordered: Vec<&CleaningOp> = ops.iter().filter(|op| !op.is_noop()).collect();
    ordered.sort_by_key(|op| op.precedence());

    let mut current = table.clone();
    let mut steps = Vec::with_capacity(ordered.len());
    for op in ordered {
        let (next, step) = op.run(&current)?;
        debug!("{}: {:?} -> {:?}", step, current.shape(), next.shape());
        current = next;
        steps.push(step);
    }

    Ok(Cleaned {
        table: current,
        steps,
    })
}
