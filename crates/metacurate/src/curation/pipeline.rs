//! The curation pipeline: stages run in a fixed order over one model.

use chrono::Utc;

use crate::directive::DirectiveSet;
use crate::model::{EntityKind, EntityStore};

use super::config::CurationConfig;
use super::outcome::{CurationOutcome, CurationSummary};
use super::processor::{curate_compartments, curate_metabolites, curate_processes, curate_reactions};
use super::replicates::filter_replicates;

/// A curated model together with the record of how it was produced.
#[derive(Debug, Clone)]
pub struct CurationResult {
    pub store: EntityStore,
    pub outcome: CurationOutcome,
}

/// Applies directive sets to models.
///
/// # Example
///
/// ```
/// use metacurate::{Curator, Directive, DirectiveSet, EntityStore};
/// use metacurate::model::{Compartment, Participant, Reaction};
///
/// let store = EntityStore::new()
///     .with_compartment(Compartment::new("e", "extracellular"))
///     .with_compartment(Compartment::new("c", "cytosol"))
///     .with_reaction(Reaction::new("R1", "uptake").with_participant(Participant::reactant("M1", "e")));
/// let directives = DirectiveSet::new().with_compartment(Directive::delete("e"));
///
/// let result = Curator::new().curate(&store, &directives);
/// assert!(result.store.reactions.is_empty());
/// assert_eq!(result.outcome.summary.applied, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Curator {
    config: CurationConfig,
}

impl Curator {
    /// Create a curator with default cascade policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a curator with a custom configuration.
    pub fn with_config(config: CurationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CurationConfig {
        &self.config
    }

    /// Run every stage over a copy of `store`.
    ///
    /// Stages run compartments, processes, metabolites, then reactions, each
    /// consuming the reactions the previous stage produced. The replicate
    /// filter runs last. The input store is never modified.
    pub fn curate(&self, store: &EntityStore, directives: &DirectiveSet) -> CurationResult {
        let policies = &self.config.policies;
        let before = store.counts();

        tracing::info!(
            target: "metacurate::curation",
            directives = directives.len(),
            reactions = before.reactions,
            "Starting curation"
        );

        let compartments = curate_compartments(
            &directives.compartments,
            &store.compartments,
            &store.reactions,
            policies.get(EntityKind::Compartment),
        );
        let processes = curate_processes(
            &directives.processes,
            &store.processes,
            &compartments.reactions,
            policies.get(EntityKind::Process),
        );
        let metabolites = curate_metabolites(
            &directives.metabolites,
            &store.metabolites,
            &processes.reactions,
            policies.get(EntityKind::Metabolite),
        );
        let (mut reactions, reaction_outcome) = curate_reactions(
            &directives.reactions,
            &metabolites.reactions,
            policies.get(EntityKind::Reaction),
        );

        let replicates_pruned = if self.config.filter_replicates {
            filter_replicates(&mut reactions)
        } else {
            0
        };

        let curated = EntityStore {
            compartments: compartments.entities,
            processes: processes.entities,
            metabolites: metabolites.entities,
            reactions,
        };

        let stages = vec![
            compartments.outcome,
            processes.outcome,
            metabolites.outcome,
            reaction_outcome,
        ];

        let summary = CurationSummary {
            before,
            after: curated.counts(),
            directives: directives.len(),
            applied: stages.iter().map(|s| s.applied).sum(),
            skipped: stages.iter().map(|s| s.skipped).sum(),
            reactions_removed: before.reactions.saturating_sub(curated.counts().reactions),
            replicates_pruned,
        };

        tracing::info!(
            target: "metacurate::curation",
            applied = summary.applied,
            skipped = summary.skipped,
            reactions_removed = summary.reactions_removed,
            replicates_pruned,
            "Curation complete"
        );

        CurationResult {
            store: curated,
            outcome: CurationOutcome {
                sources: directives.sources.clone(),
                stages,
                summary,
                completed_at: Utc::now(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curation::policy::{CascadePolicy, DeleteCascade, RenameCascade};
    use crate::directive::Directive;
    use crate::model::{Compartment, Metabolite, Participant, Process, Reaction};

    fn model() -> EntityStore {
        EntityStore::new()
            .with_compartment(Compartment::new("e", "extracellular"))
            .with_compartment(Compartment::new("c", "cytosol"))
            .with_process(Process::new("P1", "glycolysis"))
            .with_metabolite(Metabolite::new("M1", "glucose"))
            .with_metabolite(Metabolite::new("M2", "glucose-6-phosphate"))
            .with_reaction(
                Reaction::new("R1", "uptake")
                    .with_participant(Participant::reactant("M1", "e"))
                    .with_participant(Participant::product("M1", "c"))
                    .with_replicate("R2"),
            )
            .with_reaction(
                Reaction::new("R2", "hexokinase")
                    .with_participant(Participant::reactant("M1", "c"))
                    .with_participant(Participant::product("M2", "c"))
                    .with_process("P1")
                    .with_replicate("R1"),
            )
    }

    #[test]
    fn test_compartment_delete_then_replicate_filter() {
        let directives = DirectiveSet::new().with_compartment(Directive::delete("e"));
        let result = Curator::new().curate(&model(), &directives);

        assert!(!result.store.reactions.contains_key("R1"));
        assert!(result.store.reactions["R2"].replicates.is_empty());
        assert_eq!(result.outcome.summary.replicates_pruned, 1);
        assert_eq!(result.outcome.summary.reactions_removed, 1);
        assert!(result.store.is_consistent());
    }

    #[test]
    fn test_filter_can_be_disabled() {
        let directives = DirectiveSet::new().with_compartment(Directive::delete("e"));
        let curator = Curator::with_config(CurationConfig::default().with_filter_replicates(false));
        let result = curator.curate(&model(), &directives);

        assert!(result.store.reactions["R2"].replicates.contains("R1"));
        assert_eq!(result.outcome.summary.replicates_pruned, 0);
    }

    #[test]
    fn test_metabolite_stage_sees_compartment_stage_reactions() {
        let directives = DirectiveSet::new()
            .with_compartment(Directive::delete("e"))
            .with_metabolite(Directive::rename("M1", "M3"));
        let result = Curator::new().curate(&model(), &directives);

        let r2 = &result.store.reactions["R2"];
        assert_eq!(r2.participants[0].metabolite, "M3");
        let metabolites = result.outcome.stage(EntityKind::Metabolite).unwrap();
        assert_eq!(metabolites.audits[0].reactions_modified, 1);
    }

    #[test]
    fn test_cross_type_order_is_fixed() {
        // The reaction directive targets R1, which the compartment stage
        // has already removed.
        let directives = DirectiveSet::new()
            .with_reaction(Directive::relabel("R1", "glucose uptake"))
            .with_compartment(Directive::delete("e"));
        let result = Curator::new().curate(&model(), &directives);

        let reactions = result.outcome.stage(EntityKind::Reaction).unwrap();
        assert_eq!(reactions.skipped, 1);
        assert!(!result.store.reactions.contains_key("R1"));
    }

    #[test]
    fn test_configured_compartment_rename_rewrites_participants() {
        let config = CurationConfig::default().with_policy(
            EntityKind::Compartment,
            CascadePolicy::new(DeleteCascade::RemoveReactions, RenameCascade::Rewrite),
        );
        let directives = DirectiveSet::new().with_compartment(Directive::rename("c", "cyto"));
        let result = Curator::with_config(config).curate(&model(), &directives);

        assert!(result.store.reactions["R2"].involves_compartment("cyto"));
        assert!(!result.store.reactions["R2"].involves_compartment("c"));
    }

    #[test]
    fn test_default_compartment_rename_keeps_store_consistent() {
        let directives = DirectiveSet::new()
            .with_compartment(Directive::rename("c", "cyto").with_name("cytoplasm"));
        let result = Curator::new().curate(&model(), &directives);

        assert_eq!(result.store.compartments["c"].name, "cytoplasm");
        assert!(!result.store.compartments.contains_key("cyto"));
        assert!(result.store.integrity_violations().is_empty());
    }

    #[test]
    fn test_reaction_merge_into_replicate_leaves_no_self_reference() {
        let directives = DirectiveSet::new().with_reaction(Directive::rename("R1", "R2"));
        let result = Curator::new().curate(&model(), &directives);

        assert!(!result.store.reactions.contains_key("R1"));
        assert!(result.store.reactions["R2"].replicates.is_empty());
        assert!(result.store.integrity_violations().is_empty());
    }

    #[test]
    fn test_input_store_is_untouched() {
        let store = model();
        let directives = DirectiveSet::new()
            .with_compartment(Directive::delete("e"))
            .with_reaction(Directive::delete("R2"));
        let _ = Curator::new().curate(&store, &directives);

        assert_eq!(store, model());
    }

    #[test]
    fn test_summary_counts() {
        let directives = DirectiveSet::new()
            .with_process(Directive::delete("P9"))
            .with_reaction(Directive::delete("R2"));
        let result = Curator::new().curate(&model(), &directives);
        let summary = &result.outcome.summary;

        assert_eq!(summary.directives, 2);
        assert_eq!(summary.applied, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.before.reactions, 2);
        assert_eq!(summary.after.reactions, 1);
        assert_eq!(summary.reactions_removed, 1);
        assert_eq!(summary.replicates_pruned, 1);
    }
}
