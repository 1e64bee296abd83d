//! Curator directives: delete, rename and relabel instructions per entity.
//!
//! Directive tables arrive as rows of four string columns (plus reference
//! edit columns for metabolites) and are decoded into explicit operations
//! before they reach the curation engine.

mod operation;
mod reader;
mod record;

pub use operation::{
    Directive, DirectiveOperation, DirectiveSet, DirectiveSource, MetaboliteDirective, ReferenceEdit,
};
pub use reader::{directive_path, records, DirectiveReader, REQUIRED_COLUMNS};
pub use record::{DirectiveRecord, DELETE_MARKER};
