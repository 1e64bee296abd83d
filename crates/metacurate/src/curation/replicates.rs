//! Replicate integrity filter.

use crate::model::{Collection, Reaction};

/// Drop replicate entries that name reactions no longer in the collection,
/// and entries where a reaction names itself.
///
/// Returns the number of entries removed. Must run after every stage that
/// can remove reactions.
pub fn filter_replicates(reactions: &mut Collection<Reaction>) -> usize {
    let dangling: Vec<(usize, Vec<String>)> = reactions
        .values()
        .enumerate()
        .filter_map(|(index, reaction)| {
            let missing: Vec<String> = reaction
                .replicates
                .iter()
                .filter(|replicate| {
                    **replicate == reaction.identifier || !reactions.contains_key(replicate.as_str())
                })
                .cloned()
                .collect();
            (!missing.is_empty()).then_some((index, missing))
        })
        .collect();

    let mut pruned = 0;
    for (index, missing) in dangling {
        if let Some((_, reaction)) = reactions.get_index_mut(index) {
            for replicate in &missing {
                if reaction.replicates.shift_remove(replicate) {
                    pruned += 1;
                }
            }
        }
    }

    if pruned > 0 {
        tracing::debug!(target: "metacurate::curation", pruned, "Pruned dangling replicates");
    }
    pruned
}
