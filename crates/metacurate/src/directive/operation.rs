//! Typed curation directives.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::TableSource;
use crate::model::EntityKind;

/// What a directive asks for, decoded from the curator's row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DirectiveOperation {
    /// Remove the entity.
    Delete,

    /// Move the entity to a new identifier, merging into any entity already
    /// there. The optional name is applied under the new identifier.
    Rename {
        identifier: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// Change the display name only.
    Relabel { name: String },

    /// Nothing to change on the entity itself.
    NoOp,
}

impl DirectiveOperation {
    /// Get a human-readable description of the operation.
    pub fn description(&self) -> String {
        match self {
            DirectiveOperation::Delete => "delete".to_string(),
            DirectiveOperation::Rename {
                identifier,
                name: Some(name),
            } => format!("rename → '{}' ('{}')", identifier, name),
            DirectiveOperation::Rename {
                identifier,
                name: None,
            } => format!("rename → '{}'", identifier),
            DirectiveOperation::Relabel { name } => format!("relabel → '{}'", name),
            DirectiveOperation::NoOp => "no change".to_string(),
        }
    }

    /// Identifier the entity lives under once the operation is applied.
    pub fn resulting_identifier<'a>(&'a self, target: &'a str) -> Option<&'a str> {
        match self {
            DirectiveOperation::Delete => None,
            DirectiveOperation::Rename { identifier, .. } => Some(identifier.as_str()),
            DirectiveOperation::Relabel { .. } | DirectiveOperation::NoOp => Some(target),
        }
    }
}

impl fmt::Display for DirectiveOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// A curator's edit to one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Identifier of the entity as it exists before curation.
    pub target: String,
    pub operation: DirectiveOperation,
}

impl Directive {
    pub fn new(target: impl Into<String>, operation: DirectiveOperation) -> Self {
        Self {
            target: target.into(),
            operation,
        }
    }

    pub fn delete(target: impl Into<String>) -> Self {
        Self::new(target, DirectiveOperation::Delete)
    }

    pub fn rename(target: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::new(
            target,
            DirectiveOperation::Rename {
                identifier: identifier.into(),
                name: None,
            },
        )
    }

    pub fn relabel(target: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(target, DirectiveOperation::Relabel { name: name.into() })
    }

    pub fn no_op(target: impl Into<String>) -> Self {
        Self::new(target, DirectiveOperation::NoOp)
    }

    /// Also set the name when renaming.
    pub fn with_name(mut self, new_name: impl Into<String>) -> Self {
        let new_name = new_name.into();
        self.operation = match self.operation {
            DirectiveOperation::Rename { identifier, .. } => DirectiveOperation::Rename {
                identifier,
                name: Some(new_name),
            },
            DirectiveOperation::Delete => DirectiveOperation::Delete,
            DirectiveOperation::Relabel { .. } | DirectiveOperation::NoOp => {
                DirectiveOperation::Relabel { name: new_name }
            }
        };
        self
    }

    /// Identifier the entity lives under once this directive is applied.
    pub fn resulting_identifier(&self) -> Option<&str> {
        self.operation.resulting_identifier(&self.target)
    }
}

/// A change to one database's reference list on a metabolite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEdit {
    pub database: String,

    /// Value to append.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub novel: Option<String>,

    /// Value to remove wherever it occurs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReferenceEdit {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            novel: None,
            error: None,
        }
    }

    pub fn with_novel(mut self, value: impl Into<String>) -> Self {
        self.novel = Some(value.into());
        self
    }

    pub fn with_error(mut self, value: impl Into<String>) -> Self {
        self.error = Some(value.into());
        self
    }

    /// Whether the edit changes nothing.
    pub fn is_empty(&self) -> bool {
        self.novel.is_none() && self.error.is_none()
    }
}

/// A metabolite directive with its reference edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaboliteDirective {
    #[serde(flatten)]
    pub directive: Directive,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ReferenceEdit>,
}

impl MetaboliteDirective {
    pub fn new(directive: Directive) -> Self {
        Self {
            directive,
            references: Vec::new(),
        }
    }

    pub fn with_reference(mut self, edit: ReferenceEdit) -> Self {
        self.references.push(edit);
        self
    }
}

impl From<Directive> for MetaboliteDirective {
    fn from(directive: Directive) -> Self {
        Self::new(directive)
    }
}

/// A directive file read into a [`DirectiveSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveSource {
    pub entity: EntityKind,
    #[serde(flatten)]
    pub table: TableSource,
}

/// Ordered directive lists for all four entity types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveSet {
    /// Files the directives were read from, empty for sets built in code.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<DirectiveSource>,
    #[serde(default)]
    pub compartments: Vec<Directive>,
    #[serde(default)]
    pub processes: Vec<Directive>,
    #[serde(default)]
    pub metabolites: Vec<MetaboliteDirective>,
    #[serde(default)]
    pub reactions: Vec<Directive>,
}

impl DirectiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compartment(mut self, directive: Directive) -> Self {
        self.compartments.push(directive);
        self
    }

    pub fn with_process(mut self, directive: Directive) -> Self {
        self.processes.push(directive);
        self
    }

    pub fn with_metabolite(mut self, directive: impl Into<MetaboliteDirective>) -> Self {
        self.metabolites.push(directive.into());
        self
    }

    pub fn with_reaction(mut self, directive: Directive) -> Self {
        self.reactions.push(directive);
        self
    }

    /// Total number of directives.
    pub fn len(&self) -> usize {
        self.compartments.len() + self.processes.len() + self.metabolites.len() + self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
