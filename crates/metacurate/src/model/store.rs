//! Identifier-keyed collections of a metabolic model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::entity::{Compartment, Entity, EntityKind, Metabolite, Process, Reaction};

/// An identifier-keyed, insertion-ordered collection of records.
pub type Collection<E> = IndexMap<String, E>;

/// Build a collection from records, keyed by each record's identifier.
///
/// Later records replace earlier ones with the same identifier.
pub fn collect<E: Entity>(records: impl IntoIterator<Item = E>) -> Collection<E> {
    records
        .into_iter()
        .map(|record| (record.identifier().to_string(), record))
        .collect()
}

/// The four interlinked collections of a model.
///
/// Entities reference each other only by identifier, so every cross-collection
/// access re-checks membership instead of assuming a live link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    #[serde(default)]
    pub compartments: Collection<Compartment>,
    #[serde(default)]
    pub processes: Collection<Process>,
    #[serde(default)]
    pub metabolites: Collection<Metabolite>,
    #[serde(default)]
    pub reactions: Collection<Reaction>,
}

/// Number of records in each collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub compartments: usize,
    pub processes: usize,
    pub metabolites: usize,
    pub reactions: usize,
}

impl StoreCounts {
    /// Count for one collection.
    pub fn get(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Compartment => self.compartments,
            EntityKind::Process => self.processes,
            EntityKind::Metabolite => self.metabolites,
            EntityKind::Reaction => self.reactions,
        }
    }
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compartment(mut self, compartment: Compartment) -> Self {
        self.compartments
            .insert(compartment.identifier.clone(), compartment);
        self
    }

    pub fn with_process(mut self, process: Process) -> Self {
        self.processes.insert(process.identifier.clone(), process);
        self
    }

    pub fn with_metabolite(mut self, metabolite: Metabolite) -> Self {
        self.metabolites
            .insert(metabolite.identifier.clone(), metabolite);
        self
    }

    pub fn with_reaction(mut self, reaction: Reaction) -> Self {
        self.reactions.insert(reaction.identifier.clone(), reaction);
        self
    }

    /// Get the record counts of every collection.
    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            compartments: self.compartments.len(),
            processes: self.processes.len(),
            metabolites: self.metabolites.len(),
            reactions: self.reactions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_keys_by_identifier() {
        let collection = collect(vec![Compartment::new("c", "cytosol"), Compartment::new("e", "extracellular")]);

        let keys: Vec<&str> = collection.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["c", "e"]);
    }

    #[test]
    fn test_counts() {
        let store = EntityStore::new()
            .with_compartment(Compartment::new("c", "cytosol"))
            .with_process(Process::new("P1", "glycolysis"))
            .with_reaction(Reaction::new("R1", "hexokinase"));

        let counts = store.counts();
        assert_eq!(counts.compartments, 1);
        assert_eq!(counts.get(EntityKind::Process), 1);
        assert_eq!(counts.metabolites, 0);
        assert_eq!(counts.get(EntityKind::Reaction), 1);
    }
}
