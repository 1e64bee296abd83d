//! Decoding of curator directive tables.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CurationError, Result};
use crate::input::{DataTable, TableReader, TableSource};
use crate::model::EntityKind;

use super::operation::{Directive, DirectiveSet, DirectiveSource, MetaboliteDirective, ReferenceEdit};
use super::record::{DirectiveRecord, DELETE_MARKER};

/// Columns every directive table must have.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "identifier_original",
    "identifier_novel",
    "name_original",
    "name_novel",
];

// Reference edit columns: reference_<database>_novel / reference_<database>_error
static REFERENCE_COLUMN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^reference_(?P<database>.+)_(?P<kind>novel|error)$").unwrap());

/// Reads directive tables into typed directives.
pub struct DirectiveReader {
    reader: TableReader,
    delete_marker: String,
}

impl DirectiveReader {
    /// Create a reader recognising the default delete marker.
    pub fn new() -> Self {
        Self {
            reader: TableReader::new(),
            delete_marker: DELETE_MARKER.to_string(),
        }
    }

    /// Use a different delete marker.
    pub fn with_delete_marker(mut self, marker: impl Into<String>) -> Self {
        self.delete_marker = marker.into();
        self
    }

    /// Read a compartment, process or reaction directive file.
    pub fn read_directives(&self, path: impl AsRef<Path>) -> Result<Vec<Directive>> {
        let (directives, _) = self.decode_file(path.as_ref(), DirectiveRecord::decode)?;
        Ok(directives)
    }

    /// Read a metabolite directive file, including reference edits.
    pub fn read_metabolite_directives(&self, path: impl AsRef<Path>) -> Result<Vec<MetaboliteDirective>> {
        let (directives, _) = self.decode_file(path.as_ref(), DirectiveRecord::decode_metabolite)?;
        Ok(directives)
    }

    fn decode_file<T>(
        &self,
        path: &Path,
        decode: impl Fn(&DirectiveRecord, &str) -> Result<T>,
    ) -> Result<(Vec<T>, TableSource)> {
        let (table, source) = self.reader.read_file(path)?;
        let directives = records(&table, &file_label(path))?
            .iter()
            .map(|record| decode(record, &self.delete_marker))
            .collect::<Result<Vec<_>>>()?;
        Ok((directives, source))
    }

    /// Read all four directive files from a directory.
    ///
    /// Files are named `curation_<collection>.tsv`. A missing file means no
    /// directives for that entity type. Every file read is recorded in
    /// [`DirectiveSet::sources`].
    pub fn load_dir(&self, directory: impl AsRef<Path>) -> Result<DirectiveSet> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(CurationError::Io {
                path: directory.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            });
        }

        let mut set = DirectiveSet::new();
        for kind in EntityKind::ALL {
            let path = directive_path(directory, kind);
            if !path.exists() {
                tracing::warn!(
                    target: "metacurate::input",
                    entity = %kind,
                    path = %path.display(),
                    "Directive file not found; no directives for this entity type"
                );
                continue;
            }

            let table = match kind {
                EntityKind::Compartment => {
                    let (directives, table) = self.decode_file(&path, DirectiveRecord::decode)?;
                    set.compartments = directives;
                    table
                }
                EntityKind::Process => {
                    let (directives, table) = self.decode_file(&path, DirectiveRecord::decode)?;
                    set.processes = directives;
                    table
                }
                EntityKind::Metabolite => {
                    let (directives, table) = self.decode_file(&path, DirectiveRecord::decode_metabolite)?;
                    set.metabolites = directives;
                    table
                }
                EntityKind::Reaction => {
                    let (directives, table) = self.decode_file(&path, DirectiveRecord::decode)?;
                    set.reactions = directives;
                    table
                }
            };

            tracing::debug!(
                target: "metacurate::input",
                entity = %kind,
                rows = table.rows,
                digest = %table.digest,
                "Read directive file"
            );
            set.sources.push(DirectiveSource { entity: kind, table });
        }

        tracing::debug!(
            target: "metacurate::input",
            directives = set.len(),
            directory = %directory.display(),
            "Loaded directives"
        );

        Ok(set)
    }
}

impl Default for DirectiveReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveSet {
    /// Read a directive directory with the default delete marker.
    pub fn load_dir(directory: impl AsRef<Path>) -> Result<Self> {
        DirectiveReader::new().load_dir(directory)
    }
}

/// Path of one entity type's directive file.
///
/// # Example
///
/// ```
/// use metacurate::directive::directive_path;
/// use metacurate::model::EntityKind;
///
/// let path = directive_path("customization", EntityKind::Process);
/// assert_eq!(path.to_string_lossy(), "customization/curation_processes.tsv");
/// ```
pub fn directive_path(directory: impl AsRef<Path>, kind: EntityKind) -> PathBuf {
    directory
        .as_ref()
        .join(format!("curation_{}.tsv", kind.plural()))
}

/// Extract directive records from a table.
///
/// `file` names the table in error messages.
pub fn records(table: &DataTable, file: &str) -> Result<Vec<DirectiveRecord>> {
    let mut positions = [0usize; 4];
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = table
            .column_index(column)
            .ok_or_else(|| CurationError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            })?;
    }

    // database -> (novel column, error column)
    let mut reference_columns: IndexMap<String, (Option<usize>, Option<usize>)> = IndexMap::new();
    for (index, header) in table.headers.iter().enumerate() {
        if let Some(captures) = REFERENCE_COLUMN.captures(header) {
            let slot = reference_columns
                .entry(captures["database"].to_string())
                .or_default();
            match &captures["kind"] {
                "novel" => slot.0 = Some(index),
                _ => slot.1 = Some(index),
            }
        }
    }

    let cell = |row: &[String], index: Option<usize>| -> Option<String> {
        index
            .and_then(|i| row.get(i))
            .filter(|value| !value.is_empty())
            .cloned()
    };

    let records = table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let [original, novel, name_original, name_novel] =
                positions.map(|i| row.get(i).cloned().unwrap_or_default());

            let references = reference_columns
                .iter()
                .map(|(database, (novel_col, error_col))| ReferenceEdit {
                    database: database.clone(),
                    novel: cell(row, *novel_col),
                    error: cell(row, *error_col),
                })
                .collect();

            DirectiveRecord {
                row: index + 2,
                identifier_original: original,
                identifier_novel: novel,
                name_original,
                name_novel,
                references,
            }
        })
        .collect();

    Ok(records)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
