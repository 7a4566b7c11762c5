//! Migration directories, engine access and migration file rendering

pub mod engine;
pub mod path_resolver;
pub mod template;

pub use engine::{HostMigrationEngine, MigrationEngine, SchemaDiff};
pub use path_resolver::migration_directory_candidates;
pub use template::{MigrationFile, MigrationName};
