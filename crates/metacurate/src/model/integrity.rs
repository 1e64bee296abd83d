//! Referential integrity audit of an entity store.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use super::store::{Collection, EntityStore};

/// Kind of broken reference found by the audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A participant names a compartment that does not exist.
    DanglingCompartment,
    /// A participant names a metabolite that does not exist.
    DanglingMetabolite,
    /// A reaction lists a process that does not exist.
    DanglingProcess,
    /// A reaction lists a replicate that does not exist.
    DanglingReplicate,
    /// A record's own identifier differs from its key.
    IdentifierMismatch,
}

impl ViolationKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ViolationKind::DanglingCompartment => "dangling compartment",
            ViolationKind::DanglingMetabolite => "dangling metabolite",
            ViolationKind::DanglingProcess => "dangling process",
            ViolationKind::DanglingReplicate => "dangling replicate",
            ViolationKind::IdentifierMismatch => "identifier mismatch",
        }
    }
}

/// A single broken reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityViolation {
    pub kind: ViolationKind,

    /// Collection holding the offending record.
    pub collection: EntityKind,

    /// Key of the offending record.
    pub record: String,

    /// The identifier that does not resolve.
    pub identifier: String,
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}': {} '{}'",
            self.collection,
            self.record,
            self.kind.label(),
            self.identifier
        )
    }
}

impl EntityStore {
    /// Find every reference that does not resolve within the store.
    ///
    /// Dangling processes are reported even though the default process policy
    /// leaves them in place after a process is deleted.
    pub fn integrity_violations(&self) -> Vec<IntegrityViolation> {
        let mut violations = Vec::new();

        check_keys(&self.compartments, &mut violations);
        check_keys(&self.processes, &mut violations);
        check_keys(&self.metabolites, &mut violations);
        check_keys(&self.reactions, &mut violations);

        for (key, reaction) in &self.reactions {
            let mut flag = |kind: ViolationKind, identifier: &str| {
                violations.push(IntegrityViolation {
                    kind,
                    collection: EntityKind::Reaction,
                    record: key.clone(),
                    identifier: identifier.to_string(),
                });
            };

            for compartment in reaction.compartments() {
                if !self.compartments.contains_key(compartment) {
                    flag(ViolationKind::DanglingCompartment, compartment);
                }
            }
            for metabolite in reaction.metabolites() {
                if !self.metabolites.contains_key(metabolite) {
                    flag(ViolationKind::DanglingMetabolite, metabolite);
                }
            }
            for process in &reaction.processes {
                if !self.processes.contains_key(process) {
                    flag(ViolationKind::DanglingProcess, process);
                }
            }
            for replicate in &reaction.replicates {
                if !self.reactions.contains_key(replicate) {
                    flag(ViolationKind::DanglingReplicate, replicate);
                }
            }
        }

        violations
    }

    /// Whether the store has no broken references at all.
    pub fn is_consistent(&self) -> bool {
        self.integrity_violations().is_empty()
    }
}

fn check_keys<E: Entity>(collection: &Collection<E>, violations: &mut Vec<IntegrityViolation>) {
    for (key, record) in collection {
        if key != record.identifier() {
            violations.push(IntegrityViolation {
                kind: ViolationKind::IdentifierMismatch,
                collection: E::KIND,
                record: key.clone(),
                identifier: record.identifier().to_string(),
            });
        }
    }
}
