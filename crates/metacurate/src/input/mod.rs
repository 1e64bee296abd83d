//! Delimited table reading.

mod parser;
mod source;

pub use parser::TableReader;
pub use source::{DataTable, TableSource};
