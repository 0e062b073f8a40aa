mod cell;
pub mod stats;
mod table;

pub use cell::Cell;
pub use table::Table;
