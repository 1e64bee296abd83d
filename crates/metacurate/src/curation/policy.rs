//! Cascade policies: what an entity delete or rename implies for reactions.

use serde::{Deserialize, Serialize};

use crate::model::EntityKind;

/// Effect on reactions when an entity is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteCascade {
    /// Remove every reaction that references the entity.
    RemoveReactions,
    /// Keep reactions but drop the references to the entity (participants,
    /// process entries or replicate entries).
    StripReferences,
    /// Leave reactions untouched, references and all.
    Retain,
}

/// What an identifier change in a directive does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameCascade {
    /// Move the record to the new identifier and point every reference at it.
    Rewrite,
    /// Keep the record under its current identifier. Only the name change
    /// of the directive applies, so no reaction is touched.
    KeepIdentifier,
}

/// Cascade behavior for one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadePolicy {
    pub on_delete: DeleteCascade,
    pub on_rename: RenameCascade,
}

impl CascadePolicy {
    pub fn new(on_delete: DeleteCascade, on_rename: RenameCascade) -> Self {
        Self {
            on_delete,
            on_rename,
        }
    }

    /// Default policy for an entity type.
    ///
    /// Deleting a compartment removes the reactions inside it, while deleting
    /// a process leaves reactions listing it as they are. Compartments keep
    /// their identifier on rename and only take the new name.
    pub fn default_for(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Compartment => Self::new(DeleteCascade::RemoveReactions, RenameCascade::KeepIdentifier),
            EntityKind::Process => Self::new(DeleteCascade::Retain, RenameCascade::Rewrite),
            EntityKind::Metabolite => Self::new(DeleteCascade::StripReferences, RenameCascade::Rewrite),
            EntityKind::Reaction => Self::new(DeleteCascade::Retain, RenameCascade::Rewrite),
        }
    }
}

/// Cascade policies for all four entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadePolicies {
    pub compartment: CascadePolicy,
    pub process: CascadePolicy,
    pub metabolite: CascadePolicy,
    pub reaction: CascadePolicy,
}

impl CascadePolicies {
    /// Policy for one entity type.
    pub fn get(&self, kind: EntityKind) -> &CascadePolicy {
        match kind {
            EntityKind::Compartment => &self.compartment,
            EntityKind::Process => &self.process,
            EntityKind::Metabolite => &self.metabolite,
            EntityKind::Reaction => &self.reaction,
        }
    }

    /// Replace the policy for one entity type.
    pub fn set(&mut self, kind: EntityKind, policy: CascadePolicy) {
        match kind {
            EntityKind::Compartment => self.compartment = policy,
            EntityKind::Process => self.process = policy,
            EntityKind::Metabolite => self.metabolite = policy,
            EntityKind::Reaction => self.reaction = policy,
        }
    }
}

impl Default for CascadePolicies {
    fn default() -> Self {
        Self {
            compartment: CascadePolicy::default_for(EntityKind::Compartment),
            process: CascadePolicy::default_for(EntityKind::Process),
            metabolite: CascadePolicy::default_for(EntityKind::Metabolite),
            reaction: CascadePolicy::default_for(EntityKind::Reaction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies_keep_compartment_process_asymmetry() {
        let policies = CascadePolicies::default();

        assert_eq!(
            policies.get(EntityKind::Compartment).on_delete,
            DeleteCascade::RemoveReactions
        );
        assert_eq!(policies.get(EntityKind::Process).on_delete, DeleteCascade::Retain);
        assert_eq!(
            policies.get(EntityKind::Compartment).on_rename,
            RenameCascade::KeepIdentifier
        );
        assert_eq!(
            policies.get(EntityKind::Metabolite).on_delete,
            DeleteCascade::StripReferences
        );
    }

    #[test]
    fn test_set_policy() {
        let mut policies = CascadePolicies::default();
        policies.set(
            EntityKind::Process,
            CascadePolicy::new(DeleteCascade::StripReferences, RenameCascade::Rewrite),
        );

        assert_eq!(
            policies.process.on_delete,
            DeleteCascade::StripReferences
        );
    }

    #[test]
    fn test_partial_policies_deserialize_with_defaults() {
        let policies: CascadePolicies = serde_json::from_str(
            r#"{"compartment": {"on_delete": "strip_references", "on_rename": "rewrite"}}"#,
        )
        .unwrap();

        assert_eq!(policies.compartment.on_rename, RenameCascade::Rewrite);
        assert_eq!(policies.process, CascadePolicy::default_for(EntityKind::Process));
    }
}
