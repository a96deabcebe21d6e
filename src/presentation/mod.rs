/// Tabular rendering of task data rows
pub mod table;

pub use table::*;
