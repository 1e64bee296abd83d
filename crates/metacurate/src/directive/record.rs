//! Raw directive rows and their decoding into typed directives.

use serde::{Deserialize, Serialize};

use crate::error::{CurationError, Result};

use super::operation::{Directive, DirectiveOperation, MetaboliteDirective, ReferenceEdit};

/// Marker in `identifier_novel` that requests deletion.
pub const DELETE_MARKER: &str = "null";

/// One row of a curator's directive table, as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveRecord {
    /// Line in the source file (header is line 1).
    pub row: usize,
    pub identifier_original: String,
    pub identifier_novel: String,
    pub name_original: String,
    pub name_novel: String,

    /// Reference edits, metabolite tables only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ReferenceEdit>,
}

impl DirectiveRecord {
    pub fn new(
        identifier_original: impl Into<String>,
        identifier_novel: impl Into<String>,
        name_original: impl Into<String>,
        name_novel: impl Into<String>,
    ) -> Self {
        Self {
            row: 0,
            identifier_original: identifier_original.into(),
            identifier_novel: identifier_novel.into(),
            name_original: name_original.into(),
            name_novel: name_novel.into(),
            references: Vec::new(),
        }
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }

    pub fn with_reference(mut self, edit: ReferenceEdit) -> Self {
        self.references.push(edit);
        self
    }

    /// Decode into a typed directive.
    ///
    /// A novel identifier equal to `delete_marker` deletes; differing
    /// identifiers rename; differing names relabel. Names compare as
    /// written, so a blank novel name against a non-blank original clears
    /// the name.
    pub fn decode(&self, delete_marker: &str) -> Result<Directive> {
        if self.identifier_original.is_empty() {
            return Err(self.malformed("identifier_original is empty"));
        }
        if self.identifier_novel.is_empty() {
            return Err(self.malformed("identifier_novel is empty"));
        }

        let name_changed = self.name_original != self.name_novel;

        let operation = if self.identifier_novel == delete_marker {
            DirectiveOperation::Delete
        } else if self.identifier_original != self.identifier_novel {
            DirectiveOperation::Rename {
                identifier: self.identifier_novel.clone(),
                name: name_changed.then(|| self.name_novel.clone()),
            }
        } else if name_changed {
            DirectiveOperation::Relabel {
                name: self.name_novel.clone(),
            }
        } else {
            DirectiveOperation::NoOp
        };

        Ok(Directive::new(self.identifier_original.clone(), operation))
    }

    /// Decode into a metabolite directive, keeping non-empty reference edits.
    pub fn decode_metabolite(&self, delete_marker: &str) -> Result<MetaboliteDirective> {
        let directive = self.decode(delete_marker)?;
        let references = self
            .references
            .iter()
            .filter(|edit| !edit.is_empty())
            .cloned()
            .collect();

        Ok(MetaboliteDirective {
            directive,
            references,
        })
    }

    fn malformed(&self, message: &str) -> CurationError {
        CurationError::MalformedDirective {
            row: self.row,
            message: message.to_string(),
        }
    }
}
