//! Parsed tables and the files they were read from.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where a table came from: path, content digest and row count.
///
/// Recorded for every directive file a run consumes, so a curated model can
/// be traced back to the exact directive tables that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSource {
    pub path: PathBuf,
    /// `sha256:<hex>` digest of the raw file bytes.
    pub digest: String,
    /// Data rows, header excluded.
    pub rows: usize,
}

impl TableSource {
    /// The digest without its algorithm prefix, cut to `len` characters.
    pub fn short_digest(&self, len: usize) -> &str {
        let hex = self.digest.strip_prefix("sha256:").unwrap_or(&self.digest);
        hex.get(..len).unwrap_or(hex)
    }
}

/// Parsed tabular data.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub headers: Vec<String>,
    /// Rows in file order, each padded to the header width.
    pub rows: Vec<Vec<String>>,
    pub delimiter: u8,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_digest() {
        let source = TableSource {
            path: PathBuf::from("curation_compartments.tsv"),
            digest: "sha256:0123456789abcdef".to_string(),
            rows: 2,
        };

        assert_eq!(source.short_digest(8), "01234567");
        assert_eq!(source.short_digest(64), "0123456789abcdef");
    }

    #[test]
    fn test_column_index() {
        let table = DataTable::new(
            vec!["identifier".to_string(), "name".to_string()],
            vec![vec!["c".to_string(), "cytosol".to_string()]],
            b'\t',
        );

        assert_eq!(table.column_index("name"), Some(1));
        assert_eq!(table.column_index("missing"), None);
    }
}
