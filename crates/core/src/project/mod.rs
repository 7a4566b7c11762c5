//! Loading a host project from its compiler configuration

pub mod compiler_config;
pub mod jsonc;
pub mod loader;
pub mod source_file;

pub use compiler_config::{CompilerConfig, CompilerOptions};
pub use loader::{Project, ProjectHandle, ProjectLoader};
pub use source_file::SourceFile;
