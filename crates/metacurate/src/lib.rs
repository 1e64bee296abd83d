//! Metacurate: directive-driven curation of metabolic models.
//!
//! A model is four identifier-keyed collections (compartments, processes,
//! metabolites and reactions) that point at each other by identifier only.
//! Curators describe edits as directive tables; the engine applies them one
//! entity type at a time and cascades deletes and identifier changes into
//! the reactions that reference the entity.
//!
//! # Core Principles
//!
//! - **Fixed order**: compartments, then processes, metabolites and reactions
//! - **Non-destructive**: the input model is never modified
//! - **Tolerant**: a directive whose target is gone is skipped, not an error
//!
//! # Example
//!
//! ```no_run
//! use metacurate::{Curator, DirectiveSet, EntityStore};
//!
//! let store = EntityStore::load_dir("model/enhancement").unwrap();
//! let directives = DirectiveSet::load_dir("model/customization").unwrap();
//!
//! let result = Curator::new().curate(&store, &directives);
//! result.store.save_dir("model/curation").unwrap();
//!
//! println!("Applied: {}", result.outcome.summary.applied);
//! println!("Reactions: {}", result.store.reactions.len());
//! ```

pub mod curation;
pub mod directive;
pub mod error;
pub mod input;
pub mod model;
pub mod report;

pub use curation::{
    CascadePolicies, CascadePolicy, CurationConfig, CurationOutcome, CurationResult,
    CurationSummary, Curator, DeleteCascade, DirectiveAudit, DirectiveStatus, RenameCascade,
    StageOutcome,
};
pub use directive::{Directive, DirectiveOperation, DirectiveReader, DirectiveSet, MetaboliteDirective};
pub use error::{CurationError, Result};
pub use input::{DataTable, TableReader, TableSource};
pub use model::{EntityKind, EntityStore, IntegrityViolation};
