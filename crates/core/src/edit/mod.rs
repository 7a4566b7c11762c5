//! Structural edits expressed as replayable text splices

pub mod operations;
pub mod plan;

pub use operations::{add_array_element, add_named_import, remove_declaration};
pub use plan::{EditPlan, SourceEdit};
