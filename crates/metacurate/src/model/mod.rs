//! In-memory model of metabolic entities.
//!
//! Four identifier-keyed collections (compartments, processes, metabolites
//! and reactions) that reference each other by string identifier only.

mod entity;
mod integrity;
mod persistence;
mod store;

pub use entity::{
    merge_references, Compartment, Entity, EntityKind, Metabolite, Participant, Process, Reaction,
    References, Role,
};
pub use integrity::{IntegrityViolation, ViolationKind};
pub use persistence::collection_path;
pub use store::{collect, Collection, EntityStore, StoreCounts};
