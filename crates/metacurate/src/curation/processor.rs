//! Directive processors: one curation stage per entity type.
//!
//! Every stage takes its inputs by reference and returns fresh collections,
//! so callers keep the pre-stage state untouched.

use crate::directive::{Directive, DirectiveOperation, MetaboliteDirective};
use crate::model::{Collection, Compartment, Entity, EntityKind, Metabolite, Process, Reaction};

use super::cascade::{resolve_delete, resolve_rename, CascadeEffect};
use super::outcome::{DirectiveAudit, DirectiveStatus, SkipReason, StageOutcome};
use super::policy::{CascadePolicy, RenameCascade};
use super::references::curate_references;

/// Collections produced by one stage.
#[derive(Debug, Clone)]
pub struct StageResult<E> {
    pub entities: Collection<E>,
    pub reactions: Collection<Reaction>,
    pub outcome: StageOutcome,
}

/// What a directive did to its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocalEdit {
    Removed,
    Renamed { merged: bool },
    Relabeled,
    Unchanged,
    Missing,
}

impl AsRef<Directive> for MetaboliteDirective {
    fn as_ref(&self) -> &Directive {
        &self.directive
    }
}

impl AsRef<Directive> for Directive {
    fn as_ref(&self) -> &Directive {
        self
    }
}

/// Apply compartment directives.
pub fn curate_compartments(
    directives: &[Directive],
    compartments: &Collection<Compartment>,
    reactions: &Collection<Reaction>,
    policy: &CascadePolicy,
) -> StageResult<Compartment> {
    run_stage(directives, compartments, reactions, policy, |_, _| 0)
}

/// Apply process directives.
pub fn curate_processes(
    directives: &[Directive],
    processes: &Collection<Process>,
    reactions: &Collection<Reaction>,
    policy: &CascadePolicy,
) -> StageResult<Process> {
    run_stage(directives, processes, reactions, policy, |_, _| 0)
}

/// Apply metabolite directives, including their reference edits.
///
/// Reference edits go to the metabolite under the directive's resulting
/// identifier, after the rename or relabel of the same directive. A
/// directive whose target is missing edits no references.
pub fn curate_metabolites(
    directives: &[MetaboliteDirective],
    metabolites: &Collection<Metabolite>,
    reactions: &Collection<Reaction>,
    policy: &CascadePolicy,
) -> StageResult<Metabolite> {
    run_stage(directives, metabolites, reactions, policy, |directive, metabolites| {
        if directive.references.is_empty() {
            return 0;
        }
        directive
            .directive
            .resulting_identifier()
            .and_then(|identifier| metabolites.get_mut(identifier))
            .map(|metabolite| curate_references(metabolite, &directive.references))
            .unwrap_or(0)
    })
}

/// Apply reaction directives.
///
/// Reactions are both the curated collection and the cascade target, so
/// cascades here only touch replicate lists.
pub fn curate_reactions(
    directives: &[Directive],
    reactions: &Collection<Reaction>,
    policy: &CascadePolicy,
) -> (Collection<Reaction>, StageOutcome) {
    let mut reactions = reactions.clone();
    let mut outcome = StageOutcome::new(EntityKind::Reaction);

    for directive in directives {
        let edit = apply_local(&mut reactions, directive, policy.on_rename);
        let effect = cascade(EntityKind::Reaction, directive, edit, policy, &mut reactions);
        let audit = audit(EntityKind::Reaction, directive, edit, effect, 0);
        log_audit(&audit);
        outcome.record(audit);
    }

    log_stage(&outcome);
    (reactions, outcome)
}

fn run_stage<E, D>(
    directives: &[D],
    entities: &Collection<E>,
    reactions: &Collection<Reaction>,
    policy: &CascadePolicy,
    mut extra: impl FnMut(&D, &mut Collection<E>) -> usize,
) -> StageResult<E>
where
    E: Entity,
    D: AsRef<Directive>,
{
    let mut entities = entities.clone();
    let mut reactions = reactions.clone();
    let mut outcome = StageOutcome::new(E::KIND);

    for item in directives {
        let directive = item.as_ref();
        let edit = apply_local(&mut entities, directive, policy.on_rename);
        let effect = cascade(E::KIND, directive, edit, policy, &mut reactions);
        let references_changed = match edit {
            LocalEdit::Missing => 0,
            _ => extra(item, &mut entities),
        };

        let audit = audit(E::KIND, directive, edit, effect, references_changed);
        log_audit(&audit);
        outcome.record(audit);
    }

    log_stage(&outcome);
    StageResult {
        entities,
        reactions,
        outcome,
    }
}

/// Apply a directive to its own collection.
///
/// Under [`RenameCascade::KeepIdentifier`] a rename only applies its name.
fn apply_local<E: Entity>(
    collection: &mut Collection<E>,
    directive: &Directive,
    on_rename: RenameCascade,
) -> LocalEdit {
    let target = directive.target.as_str();

    match &directive.operation {
        DirectiveOperation::Delete => match collection.shift_remove(target) {
            Some(_) => LocalEdit::Removed,
            None => LocalEdit::Missing,
        },
        DirectiveOperation::Rename { name, .. } if on_rename == RenameCascade::KeepIdentifier => {
            match (collection.get_mut(target), name) {
                (None, _) => LocalEdit::Missing,
                (Some(record), Some(name)) if record.name() != name => {
                    record.set_name(name);
                    LocalEdit::Relabeled
                }
                (Some(_), _) => LocalEdit::Unchanged,
            }
        }
        DirectiveOperation::Rename { identifier, name } => {
            let Some(mut record) = collection.shift_remove(target) else {
                return LocalEdit::Missing;
            };

            let merged = match collection.get_mut(identifier) {
                Some(existing) => {
                    existing.absorb(record);
                    true
                }
                None => {
                    record.set_identifier(identifier);
                    collection.insert(identifier.clone(), record);
                    false
                }
            };

            if let Some(name) = name {
                if let Some(record) = collection.get_mut(identifier) {
                    record.set_name(name);
                }
            }

            LocalEdit::Renamed { merged }
        }
        DirectiveOperation::Relabel { name } => match collection.get_mut(target) {
            Some(record) if record.name() == name => LocalEdit::Unchanged,
            Some(record) => {
                record.set_name(name);
                LocalEdit::Relabeled
            }
            None => LocalEdit::Missing,
        },
        DirectiveOperation::NoOp => {
            if collection.contains_key(target) {
                LocalEdit::Unchanged
            } else {
                LocalEdit::Missing
            }
        }
    }
}

/// Resolve the reaction-side cascade of a local edit.
///
/// Skipped directives cascade nothing.
fn cascade(
    kind: EntityKind,
    directive: &Directive,
    edit: LocalEdit,
    policy: &CascadePolicy,
    reactions: &mut Collection<Reaction>,
) -> CascadeEffect {
    match (edit, &directive.operation) {
        (LocalEdit::Removed, _) => resolve_delete(kind, &directive.target, policy.on_delete, reactions),
        (LocalEdit::Renamed { .. }, DirectiveOperation::Rename { identifier, .. }) => {
            resolve_rename(kind, &directive.target, identifier, policy.on_rename, reactions)
        }
        _ => CascadeEffect::default(),
    }
}

fn audit(
    kind: EntityKind,
    directive: &Directive,
    edit: LocalEdit,
    effect: CascadeEffect,
    references_changed: usize,
) -> DirectiveAudit {
    let status = match edit {
        LocalEdit::Removed | LocalEdit::Renamed { .. } | LocalEdit::Relabeled => DirectiveStatus::Applied,
        _ if references_changed > 0 => DirectiveStatus::Applied,
        LocalEdit::Missing => DirectiveStatus::Skipped(SkipReason::MissingTarget),
        LocalEdit::Unchanged => DirectiveStatus::Skipped(SkipReason::NoChange),
    };

    DirectiveAudit {
        entity: kind,
        target: directive.target.clone(),
        operation: directive.operation.clone(),
        status,
        merged: matches!(edit, LocalEdit::Renamed { merged: true }),
        reactions_removed: effect.reactions_removed,
        reactions_modified: effect.reactions_modified,
        references_changed,
    }
}

fn log_audit(audit: &DirectiveAudit) {
    tracing::debug!(
        target: "metacurate::curation",
        entity = %audit.entity,
        target_id = %audit.target,
        operation = %audit.operation,
        status = audit.status.label(),
        merged = audit.merged,
        reactions_removed = audit.reactions_removed,
        reactions_modified = audit.reactions_modified,
        "Directive processed"
    );
}

fn log_stage(outcome: &StageOutcome) {
    tracing::info!(
        target: "metacurate::curation",
        entity = %outcome.entity,
        applied = outcome.applied,
        skipped = outcome.skipped,
        "Stage complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curation::policy::DeleteCascade;
    use crate::directive::ReferenceEdit;
    use crate::model::{collect, Participant};

    fn compartments() -> Collection<Compartment> {
        collect(vec![Compartment::new("e", "extracellular"), Compartment::new("c", "cytosol")])
    }

    fn reactions() -> Collection<Reaction> {
        collect(vec![
            Reaction::new("R1", "uptake").with_participant(Participant::reactant("M1", "e")),
            Reaction::new("R2", "hexokinase")
                .with_participant(Participant::reactant("M1", "c"))
                .with_participant(Participant::product("M2", "c"))
                .with_process("P1")
                .with_process("P2"),
        ])
    }

    fn policy(kind: EntityKind) -> CascadePolicy {
        CascadePolicy::default_for(kind)
    }

    #[test]
    fn test_compartment_delete_cascades_to_reactions() {
        let result = curate_compartments(
            &[Directive::delete("e")],
            &compartments(),
            &reactions(),
            &policy(EntityKind::Compartment),
        );

        assert!(!result.entities.contains_key("e"));
        assert!(!result.reactions.contains_key("R1"));
        assert!(result.reactions.contains_key("R2"));
        assert_eq!(result.outcome.applied, 1);
        assert_eq!(result.outcome.audits[0].reactions_removed, 1);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let compartments = compartments();
        let reactions = reactions();
        let _ = curate_compartments(
            &[Directive::delete("e")],
            &compartments,
            &reactions,
            &policy(EntityKind::Compartment),
        );

        assert_eq!(compartments.len(), 2);
        assert_eq!(reactions.len(), 2);
    }

    #[test]
    fn test_missing_target_is_skipped_without_cascade() {
        let mut compartments = compartments();
        compartments.shift_remove("e");

        let result = curate_compartments(
            &[Directive::delete("e")],
            &compartments,
            &reactions(),
            &policy(EntityKind::Compartment),
        );

        assert_eq!(result.reactions.len(), 2);
        assert_eq!(
            result.outcome.audits[0].status,
            DirectiveStatus::Skipped(SkipReason::MissingTarget)
        );
    }

    #[test]
    fn test_compartment_rename_keeps_identifier_and_applies_name() {
        let result = curate_compartments(
            &[
                Directive::rename("c", "cyto").with_name("cytoplasm"),
                Directive::rename("c", "cyto"),
            ],
            &compartments(),
            &reactions(),
            &policy(EntityKind::Compartment),
        );

        assert!(!result.entities.contains_key("cyto"));
        assert_eq!(result.entities["c"].name, "cytoplasm");
        assert_eq!(result.reactions, reactions());
        assert_eq!(result.outcome.applied, 1);
        assert_eq!(
            result.outcome.audits[1].status,
            DirectiveStatus::Skipped(SkipReason::NoChange)
        );
    }

    #[test]
    fn test_compartment_rename_with_rewrite_moves_participants() {
        let rewrite = CascadePolicy::new(DeleteCascade::RemoveReactions, RenameCascade::Rewrite);
        let result = curate_compartments(
            &[Directive::rename("c", "cyto")],
            &compartments(),
            &reactions(),
            &rewrite,
        );

        assert_eq!(result.entities["cyto"].identifier, "cyto");
        assert!(!result.reactions["R2"].involves_compartment("c"));
        assert!(result.reactions["R2"].involves_compartment("cyto"));
    }

    #[test]
    fn test_relabel_changes_name_only() {
        let result = curate_compartments(
            &[Directive::relabel("c", "cytoplasm"), Directive::relabel("c", "cytoplasm")],
            &compartments(),
            &reactions(),
            &policy(EntityKind::Compartment),
        );

        assert_eq!(result.entities["c"].name, "cytoplasm");
        assert_eq!(result.outcome.applied, 1);
        assert_eq!(
            result.outcome.audits[1].status,
            DirectiveStatus::Skipped(SkipReason::NoChange)
        );
    }

    #[test]
    fn test_process_merge_deduplicates_reaction_processes() {
        let processes = collect(vec![Process::new("P1", "glycolysis"), Process::new("P2", "Glycolysis")]);
        let result = curate_processes(
            &[Directive::rename("P1", "P2")],
            &processes,
            &reactions(),
            &policy(EntityKind::Process),
        );

        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities["P2"].name, "Glycolysis");
        let r2: Vec<&str> = result.reactions["R2"].processes.iter().map(String::as_str).collect();
        assert_eq!(r2, vec!["P2"]);
        assert!(result.outcome.audits[0].merged);
    }

    #[test]
    fn test_process_delete_leaves_reaction_references() {
        let processes = collect(vec![Process::new("P1", "glycolysis")]);
        let result = curate_processes(
            &[Directive::delete("P1")],
            &processes,
            &reactions(),
            &policy(EntityKind::Process),
        );

        assert!(result.entities.is_empty());
        assert!(result.reactions["R2"].processes.contains("P1"));
    }

    #[test]
    fn test_metabolite_rename_then_references_on_new_identifier() {
        let metabolites = collect(vec![
            Metabolite::new("M1", "glucose").with_reference("hmdb", "HMDB1"),
            Metabolite::new("M2", "glucose-6-phosphate"),
        ]);
        let directive = MetaboliteDirective::new(Directive::rename("M1", "M3"))
            .with_reference(ReferenceEdit::new("hmdb").with_novel("HMDB9").with_error("HMDB1"));

        let result = curate_metabolites(
            &[directive],
            &metabolites,
            &reactions(),
            &policy(EntityKind::Metabolite),
        );

        assert!(!result.entities.contains_key("M1"));
        assert_eq!(result.entities["M3"].references_for("hmdb"), vec!["HMDB9"]);
        assert_eq!(result.reactions["R1"].participants[0].metabolite, "M3");
        assert_eq!(result.outcome.audits[0].references_changed, 2);
    }

    #[test]
    fn test_reference_edit_alone_counts_as_applied() {
        let metabolites = collect(vec![Metabolite::new("M1", "glucose")]);
        let directive = MetaboliteDirective::new(Directive::no_op("M1"))
            .with_reference(ReferenceEdit::new("pubchem").with_novel("5793"));

        let result = curate_metabolites(
            &[directive],
            &metabolites,
            &reactions(),
            &policy(EntityKind::Metabolite),
        );

        assert_eq!(result.outcome.applied, 1);
        assert_eq!(result.entities["M1"].references_for("pubchem"), vec!["5793"]);
    }

    #[test]
    fn test_missing_target_skips_reference_edits() {
        let metabolites = collect(vec![Metabolite::new("M2", "glucose").with_reference("hmdb", "A")]);
        let directive = MetaboliteDirective::new(Directive::rename("M1", "M2"))
            .with_reference(ReferenceEdit::new("hmdb").with_error("A"));

        let result = curate_metabolites(
            &[directive],
            &metabolites,
            &reactions(),
            &policy(EntityKind::Metabolite),
        );

        assert_eq!(result.entities["M2"].references_for("hmdb"), vec!["A"]);
        assert_eq!(result.outcome.skipped, 1);
    }

    #[test]
    fn test_metabolite_delete_strips_participants() {
        let metabolites = collect(vec![Metabolite::new("M1", "glucose"), Metabolite::new("M2", "g6p")]);
        let result = curate_metabolites(
            &[MetaboliteDirective::new(Directive::delete("M1"))],
            &metabolites,
            &reactions(),
            &policy(EntityKind::Metabolite),
        );

        assert!(result.reactions["R1"].participants.is_empty());
        assert_eq!(result.reactions["R2"].participants.len(), 1);
        assert_eq!(result.outcome.audits[0].reactions_modified, 2);
    }

    #[test]
    fn test_later_directives_see_earlier_effects() {
        let metabolites = collect(vec![Metabolite::new("M1", "glucose")]);
        let directives = vec![
            MetaboliteDirective::new(Directive::rename("M1", "M5")),
            MetaboliteDirective::new(Directive::relabel("M5", "D-glucose")),
            MetaboliteDirective::new(Directive::relabel("M1", "never")),
        ];

        let result = curate_metabolites(
            &directives,
            &metabolites,
            &reactions(),
            &policy(EntityKind::Metabolite),
        );

        assert_eq!(result.entities["M5"].name, "D-glucose");
        assert_eq!(result.outcome.applied, 2);
        assert_eq!(result.outcome.skipped, 1);
    }

    #[test]
    fn test_reaction_directives() {
        let reactions = collect(vec![
            Reaction::new("R1", "uptake").with_replicate("R2"),
            Reaction::new("R2", "uptake").with_replicate("R1"),
            Reaction::new("R3", "export"),
        ]);
        let (reactions, outcome) = curate_reactions(
            &[
                Directive::delete("R3"),
                Directive::relabel("R1", "glucose uptake"),
                Directive::rename("R2", "R20"),
            ],
            &reactions,
            &policy(EntityKind::Reaction),
        );

        assert_eq!(outcome.applied, 3);
        assert!(!reactions.contains_key("R3"));
        assert_eq!(reactions["R1"].name, "glucose uptake");
        assert!(reactions["R1"].replicates.contains("R20"));
        assert_eq!(reactions["R20"].identifier, "R20");
    }
}
