//! Cascade resolution: rewriting reactions after an entity delete or rename.

use serde::{Deserialize, Serialize};

use crate::model::{Collection, EntityKind, Reaction};

use super::policy::{DeleteCascade, RenameCascade};

/// Reaction-side effect of one cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeEffect {
    /// Reactions removed from the collection.
    pub reactions_removed: usize,
    /// Reactions kept but edited.
    pub reactions_modified: usize,
}

impl CascadeEffect {
    pub fn is_empty(&self) -> bool {
        self.reactions_removed == 0 && self.reactions_modified == 0
    }
}

/// Apply the reaction-side consequences of deleting `identifier`.
pub fn resolve_delete(
    kind: EntityKind,
    identifier: &str,
    policy: DeleteCascade,
    reactions: &mut Collection<Reaction>,
) -> CascadeEffect {
    match policy {
        DeleteCascade::RemoveReactions => {
            let before = reactions.len();
            reactions.retain(|_, reaction| !references(reaction, kind, identifier));
            CascadeEffect {
                reactions_removed: before - reactions.len(),
                reactions_modified: 0,
            }
        }
        DeleteCascade::StripReferences => {
            let mut effect = CascadeEffect::default();
            for reaction in reactions.values_mut() {
                if strip(reaction, kind, identifier) {
                    effect.reactions_modified += 1;
                }
            }
            effect
        }
        DeleteCascade::Retain => CascadeEffect::default(),
    }
}

/// Apply the reaction-side consequences of renaming `from` to `to`.
///
/// Process and replicate sets are deduplicated after the rewrite; participant
/// lists are not, so two participants may end up naming the same metabolite
/// and compartment. A reaction never lists itself as a replicate, so merging
/// a reaction into one of its replicates drops that entry.
pub fn resolve_rename(
    kind: EntityKind,
    from: &str,
    to: &str,
    policy: RenameCascade,
    reactions: &mut Collection<Reaction>,
) -> CascadeEffect {
    let mut effect = CascadeEffect::default();
    if policy == RenameCascade::KeepIdentifier {
        return effect;
    }

    for reaction in reactions.values_mut() {
        if rewrite(reaction, kind, from, to) {
            effect.reactions_modified += 1;
        }
    }
    effect
}

/// Whether a reaction points at an entity.
pub fn references(reaction: &Reaction, kind: EntityKind, identifier: &str) -> bool {
    match kind {
        EntityKind::Compartment => reaction.involves_compartment(identifier),
        EntityKind::Metabolite => reaction.involves_metabolite(identifier),
        EntityKind::Process => reaction.processes.contains(identifier),
        EntityKind::Reaction => reaction.replicates.contains(identifier),
    }
}

fn strip(reaction: &mut Reaction, kind: EntityKind, identifier: &str) -> bool {
    match kind {
        EntityKind::Compartment => {
            let before = reaction.participants.len();
            reaction.participants.retain(|p| p.compartment != identifier);
            reaction.participants.len() != before
        }
        EntityKind::Metabolite => {
            let before = reaction.participants.len();
            reaction.participants.retain(|p| p.metabolite != identifier);
            reaction.participants.len() != before
        }
        EntityKind::Process => reaction.processes.shift_remove(identifier),
        EntityKind::Reaction => reaction.replicates.shift_remove(identifier),
    }
}

fn rewrite(reaction: &mut Reaction, kind: EntityKind, from: &str, to: &str) -> bool {
    if !references(reaction, kind, from) {
        return false;
    }

    match kind {
        EntityKind::Compartment => {
            for participant in reaction.participants.iter_mut().filter(|p| p.compartment == from) {
                participant.compartment = to.to_string();
            }
        }
        EntityKind::Metabolite => {
            for participant in reaction.participants.iter_mut().filter(|p| p.metabolite == from) {
                participant.metabolite = to.to_string();
            }
        }
        // Set semantics collapse a rename into an existing entry
        EntityKind::Process => {
            reaction.processes = reaction
                .processes
                .iter()
                .map(|p| if p == from { to.to_string() } else { p.clone() })
                .collect();
        }
        EntityKind::Reaction => {
            reaction.replicates = reaction
                .replicates
                .iter()
                .map(|r| if r == from { to.to_string() } else { r.clone() })
                .filter(|r| *r != reaction.identifier)
                .collect();
        }
    }
    true
}
