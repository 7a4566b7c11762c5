//! Schema models and static type generation

pub mod model;
pub mod typescript;

pub use model::{FieldDefinition, SchemaDefinition, SchemaSet, SchemaType};
pub use typescript::TypeScriptGenerator;
