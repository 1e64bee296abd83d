//! The curation engine.
//!
//! Directives are applied one entity type at a time, and each stage threads
//! the reaction collection on to the next:
//!
//! ```text
//! compartments ─► processes ─► metabolites ─► reactions ─► replicate filter
//!      │              │              │             │
//!      └── cascades into the reaction collection ──┘
//! ```
//!
//! What a delete or rename implies for reactions is set per entity type by a
//! [`CascadePolicy`]. By default compartments keep their identifier on
//! rename and only take the new name. Missing targets are never errors: the
//! directive is recorded as skipped and the run continues.
//!
//! # Usage
//!
//! ```
//! use metacurate::curation::{CurationConfig, Curator};
//! use metacurate::{Directive, DirectiveSet, EntityStore};
//! use metacurate::model::{Metabolite, Participant, Reaction};
//!
//! let store = EntityStore::new()
//!     .with_metabolite(Metabolite::new("M1", "glucose"))
//!     .with_metabolite(Metabolite::new("M2", "D-glucose"))
//!     .with_reaction(Reaction::new("R1", "uptake").with_participant(Participant::reactant("M1", "e")));
//! let directives = DirectiveSet::new().with_metabolite(Directive::rename("M1", "M2"));
//!
//! let result = Curator::with_config(CurationConfig::default()).curate(&store, &directives);
//! assert_eq!(result.store.metabolites.len(), 1);
//! assert_eq!(result.store.reactions["R1"].participants[0].metabolite, "M2");
//! ```

mod cascade;
mod config;
mod outcome;
mod pipeline;
mod policy;
mod processor;
mod references;
mod replicates;

pub use cascade::{resolve_delete, resolve_rename, CascadeEffect};
pub use config::CurationConfig;
pub use outcome::{
    CurationOutcome, CurationSummary, DirectiveAudit, DirectiveStatus, SkipReason, StageOutcome,
};
pub use pipeline::{CurationResult, Curator};
pub use policy::{CascadePolicies, CascadePolicy, DeleteCascade, RenameCascade};
pub use processor::{
    curate_compartments, curate_metabolites, curate_processes, curate_reactions, StageResult,
};
pub use references::curate_references;
pub use replicates::filter_replicates;
