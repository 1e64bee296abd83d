//! Delimited text reader with delimiter detection.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, TableSource};
use crate::error::{CurationError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Reads delimited tables such as curator directive files.
///
/// Cells are trimmed, short rows padded and blank rows skipped. The
/// delimiter is detected per file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableReader;

impl TableReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a file into a table, along with its path and content digest.
    ///
    /// A file with a header and no rows yields an empty table.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, TableSource)> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| CurationError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let delimiter = detect_delimiter(&contents)?;
        let table = self.read_bytes(&contents, delimiter)?;

        let source = TableSource {
            path: path.to_path_buf(),
            digest: format!("sha256:{:x}", Sha256::digest(&contents)),
            rows: table.row_count(),
        };

        Ok((table, source))
    }

    /// Parse bytes directly.
    pub fn read_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(CurationError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;
            if record.iter().all(|cell| cell.is_empty()) {
                continue;
            }

            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            // Pad short rows, drop overflow
            row.resize(expected_cols, String::new());

            rows.push(row);
        }

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(CurationError::EmptyData("No lines to analyze".to_string()));
    }

    // Directive files are tab-separated unless the data says otherwise
    let mut best_delimiter = b'\t';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);

        // Higher count with consistent rows wins; tab breaks ties
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
