//! Entity records of a metabolic model.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// External cross-references keyed by database name.
///
/// Each database maps to an insertion-ordered set, so a reference list never
/// holds the same value twice and keeps first-seen order.
pub type References = IndexMap<String, IndexSet<String>>;

/// The four collections of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Compartment,
    Process,
    Metabolite,
    Reaction,
}

impl EntityKind {
    /// All kinds in curation order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Compartment,
        EntityKind::Process,
        EntityKind::Metabolite,
        EntityKind::Reaction,
    ];

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Compartment => "compartment",
            EntityKind::Process => "process",
            EntityKind::Metabolite => "metabolite",
            EntityKind::Reaction => "reaction",
        }
    }

    /// Plural form, used for file and collection names.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Compartment => "compartments",
            EntityKind::Process => "processes",
            EntityKind::Metabolite => "metabolites",
            EntityKind::Reaction => "reactions",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Common behavior of records held in an identifier-keyed collection.
pub trait Entity: Clone {
    /// Which collection this record lives in.
    const KIND: EntityKind;

    /// Identifier stored on the record itself.
    fn identifier(&self) -> &str;

    /// Re-key the record. The store keeps this equal to the map key.
    fn set_identifier(&mut self, identifier: &str);

    /// Current display name.
    fn name(&self) -> &str;

    /// Replace the display name.
    fn set_name(&mut self, name: &str);

    /// Fold a record that is being merged away into this surviving record.
    ///
    /// Merges are destructive: the default discards `merged` entirely.
    fn absorb(&mut self, merged: Self) {
        let _ = merged;
    }
}

/// A cellular location housing reaction participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compartment {
    pub identifier: String,
    pub name: String,
}

impl Compartment {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
        }
    }
}

/// A biological pathway or process a reaction belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub identifier: String,
    pub name: String,
}

impl Process {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
        }
    }
}

/// A chemical entity cross-referenced to external databases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metabolite {
    pub identifier: String,
    pub name: String,

    /// Chemical formula.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub formula: String,

    /// Monoisotopic mass, as reported by the source.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mass: String,

    /// Formal charge, as reported by the source.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub charge: String,

    /// Cross-references by database.
    #[serde(default)]
    pub references: References,
}

impl Metabolite {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            formula: String::new(),
            mass: String::new(),
            charge: String::new(),
            references: References::new(),
        }
    }

    /// Attach a reference value to a database.
    pub fn with_reference(mut self, database: impl Into<String>, value: impl Into<String>) -> Self {
        self.references
            .entry(database.into())
            .or_default()
            .insert(value.into());
        self
    }

    /// References for one database, empty when the database is unknown.
    pub fn references_for(&self, database: &str) -> Vec<&str> {
        self.references
            .get(database)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Role of a participant in a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Reactant,
    Product,
}

/// A metabolite in a compartment taking part in a reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub metabolite: String,
    pub compartment: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_coefficient")]
    pub coefficient: f64,
}

fn default_coefficient() -> f64 {
    1.0
}

impl Participant {
    pub fn new(metabolite: impl Into<String>, compartment: impl Into<String>, role: Role) -> Self {
        Self {
            metabolite: metabolite.into(),
            compartment: compartment.into(),
            role,
            coefficient: default_coefficient(),
        }
    }

    pub fn reactant(metabolite: impl Into<String>, compartment: impl Into<String>) -> Self {
        Self::new(metabolite, compartment, Role::Reactant)
    }

    pub fn product(metabolite: impl Into<String>, compartment: impl Into<String>) -> Self {
        Self::new(metabolite, compartment, Role::Product)
    }

    pub fn with_coefficient(mut self, coefficient: f64) -> Self {
        self.coefficient = coefficient;
        self
    }
}

/// A transformation between participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub identifier: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub equation: String,

    #[serde(default)]
    pub reversibility: bool,

    /// Whether any metabolite changes chemically.
    #[serde(default)]
    pub conversion: bool,

    /// Whether the reaction exchanges with the extracellular space.
    #[serde(default)]
    pub dispersal: bool,

    /// Whether any metabolite moves between compartments.
    #[serde(default)]
    pub transport: bool,

    /// Whether the reaction has replicates.
    #[serde(default)]
    pub replication: bool,

    #[serde(default)]
    pub participants: Vec<Participant>,

    /// Identifiers of processes.
    #[serde(default)]
    pub processes: IndexSet<String>,

    /// Identifiers of equivalent reactions.
    #[serde(default)]
    pub replicates: IndexSet<String>,

    #[serde(default)]
    pub references: References,
}

impl Reaction {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            equation: String::new(),
            reversibility: false,
            conversion: false,
            dispersal: false,
            transport: false,
            replication: false,
            participants: Vec::new(),
            processes: IndexSet::new(),
            replicates: IndexSet::new(),
            references: References::new(),
        }
    }

    pub fn with_participant(mut self, participant: Participant) -> Self {
        self.participants.push(participant);
        self
    }

    pub fn with_process(mut self, process: impl Into<String>) -> Self {
        self.processes.insert(process.into());
        self
    }

    pub fn with_replicate(mut self, reaction: impl Into<String>) -> Self {
        self.replicates.insert(reaction.into());
        self
    }

    /// Whether any participant sits in the compartment.
    pub fn involves_compartment(&self, compartment: &str) -> bool {
        self.participants.iter().any(|p| p.compartment == compartment)
    }

    /// Whether any participant is the metabolite.
    pub fn involves_metabolite(&self, metabolite: &str) -> bool {
        self.participants.iter().any(|p| p.metabolite == metabolite)
    }

    /// Unique metabolite identifiers in participant order.
    pub fn metabolites(&self) -> IndexSet<&str> {
        self.participants.iter().map(|p| p.metabolite.as_str()).collect()
    }

    /// Unique compartment identifiers in participant order.
    pub fn compartments(&self) -> IndexSet<&str> {
        self.participants.iter().map(|p| p.compartment.as_str()).collect()
    }
}

/// Merge every reference of `from` into `into`, keeping `into`'s values first.
pub fn merge_references(into: &mut References, from: References) {
    for (database, values) in from {
        into.entry(database).or_default().extend(values);
    }
}

macro_rules! impl_entity {
    ($record:ty, $kind:expr) => {
        impl Entity for $record {
            const KIND: EntityKind = $kind;

            fn identifier(&self) -> &str {
                &self.identifier
            }

            fn set_identifier(&mut self, identifier: &str) {
                self.identifier = identifier.to_string();
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn set_name(&mut self, name: &str) {
                self.name = name.to_string();
            }
        }
    };
}

impl_entity!(Compartment, EntityKind::Compartment);
impl_entity!(Process, EntityKind::Process);
impl_entity!(Reaction, EntityKind::Reaction);

impl Entity for Metabolite {
    const KIND: EntityKind = EntityKind::Metabolite;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn set_identifier(&mut self, identifier: &str) {
        self.identifier = identifier.to_string();
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Metabolite merges keep the union of both records' references.
    fn absorb(&mut self, merged: Self) {
        merge_references(&mut self.references, merged.references);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_references_keeps_first_seen_order() {
        let mut into = Metabolite::new("M2", "b")
            .with_reference("hmdb", "HMDB2")
            .with_reference("hmdb", "HMDB1")
            .references;
        let from = Metabolite::new("M1", "a")
            .with_reference("hmdb", "HMDB1")
            .with_reference("hmdb", "HMDB3")
            .with_reference("pubchem", "100")
            .references;

        merge_references(&mut into, from);

        let hmdb: Vec<&str> = into["hmdb"].iter().map(String::as_str).collect();
        assert_eq!(hmdb, vec!["HMDB2", "HMDB1", "HMDB3"]);
        assert!(into["pubchem"].contains("100"));
    }

    #[test]
    fn test_metabolite_absorb_merges_references_only() {
        let mut survivor = Metabolite::new("M2", "glucose").with_reference("hmdb", "A");
        let mut merged = Metabolite::new("M1", "dextrose").with_reference("hmdb", "B");
        merged.formula = "C6H12O6".to_string();

        survivor.absorb(merged);

        assert_eq!(survivor.name, "glucose");
        assert!(survivor.formula.is_empty());
        assert_eq!(survivor.references_for("hmdb"), vec!["A", "B"]);
    }

    #[test]
    fn test_reaction_absorb_is_destructive() {
        let mut survivor = Reaction::new("R2", "two");
        let merged = Reaction::new("R1", "one").with_process("P1");

        survivor.absorb(merged);

        assert!(survivor.processes.is_empty());
    }

    #[test]
    fn test_reaction_participant_queries() {
        let reaction = Reaction::new("R1", "transport")
            .with_participant(Participant::reactant("M1", "c"))
            .with_participant(Participant::product("M1", "e"));

        assert!(reaction.involves_compartment("e"));
        assert!(!reaction.involves_compartment("m"));
        assert!(reaction.involves_metabolite("M1"));
        assert_eq!(reaction.metabolites().len(), 1);
        assert_eq!(reaction.compartments().len(), 2);
    }

    #[test]
    fn test_participant_defaults_on_deserialize() {
        let participant: Participant =
            serde_json::from_str(r#"{"metabolite": "M1", "compartment": "c"}"#).unwrap();

        assert_eq!(participant.role, Role::Reactant);
        assert_eq!(participant.coefficient, 1.0);
    }
}
