//! Fuzz target for directive decoding and curation.
//!
//! This fuzzer tests that:
//! 1. Directive tables never panic the reader or decoder
//! 2. Any decodable directive list curates a model without panicking
//! 3. The curated model has no dangling replicate references

#![no_main]

use libfuzzer_sys::fuzz_target;
use metacurate::directive::{records, DELETE_MARKER};
use metacurate::model::{Compartment, Metabolite, Participant, Process, Reaction};
use metacurate::{Curator, DirectiveSet, EntityStore, TableReader};

fn model() -> EntityStore {
    EntityStore::new()
        .with_compartment(Compartment::new("c", "cytosol"))
        .with_compartment(Compartment::new("e", "extracellular"))
        .with_process(Process::new("P1", "glycolysis"))
        .with_metabolite(Metabolite::new("M1", "glucose").with_reference("hmdb", "HMDB1"))
        .with_metabolite(Metabolite::new("M2", "pyruvate"))
        .with_reaction(
            Reaction::new("R1", "uptake")
                .with_participant(Participant::reactant("M1", "e"))
                .with_participant(Participant::product("M1", "c"))
                .with_process("P1")
                .with_replicate("R2"),
        )
        .with_reaction(
            Reaction::new("R2", "uptake")
                .with_participant(Participant::reactant("M1", "e"))
                .with_replicate("R1"),
        )
}

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let Ok(table) = TableReader::new().read_bytes(data, b'\t') else {
        return;
    };
    let Ok(rows) = records(&table, "fuzz") else {
        return;
    };

    let Ok(metabolites) = rows
        .iter()
        .map(|row| row.decode_metabolite(DELETE_MARKER))
        .collect::<Result<Vec<_>, _>>()
    else {
        return;
    };
    let others: Vec<_> = metabolites.iter().map(|m| m.directive.clone()).collect();

    let directives = DirectiveSet {
        compartments: others.clone(),
        processes: others.clone(),
        metabolites,
        reactions: others,
        ..DirectiveSet::default()
    };

    let result = Curator::new().curate(&model(), &directives);
    for reaction in result.store.reactions.values() {
        for replicate in &reaction.replicates {
            assert!(result.store.reactions.contains_key(replicate));
        }
    }
});
