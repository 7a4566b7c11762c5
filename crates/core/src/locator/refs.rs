//! Handles onto declarations discovered in a [`Project`](crate::project::Project).
//!
//! Every ref borrows the project it came from, so none can outlive it.
//! Metadata is computed on demand from the wrapped declaration.

use crate::{
    project::SourceFile,
    types::{ClassDeclaration, VariableDeclaration},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The canonical configuration variable of a project
#[derive(Debug, Clone, Copy)]
pub struct ConfigRef<'p> {
    file: &'p SourceFile,
    declaration: &'p VariableDeclaration,
}

impl<'p> ConfigRef<'p> {
    pub(crate) fn new(file: &'p SourceFile, declaration: &'p VariableDeclaration) -> Self {
        Self { file, declaration }
    }

    pub fn file(&self) -> &'p SourceFile {
        self.file
    }

    pub fn declaration(&self) -> &'p VariableDeclaration {
        self.declaration
    }

    /// Name of the exported variable holding the configuration
    pub fn variable_name(&self) -> &'p str {
        &self.declaration.name
    }

    pub fn module_path(&self) -> &'p Path {
        self.file.path()
    }

    /// Directory of the file declaring the configuration
    pub fn directory(&self) -> &'p Path {
        self.file.directory()
    }

    pub fn is_exported(&self) -> bool {
        self.declaration.exported
    }
}

/// A class declaration together with the file it lives in
#[derive(Debug, Clone, Copy)]
pub struct ClassRef<'p> {
    file: &'p SourceFile,
    class: &'p ClassDeclaration,
}

impl<'p> ClassRef<'p> {
    pub(crate) fn new(file: &'p SourceFile, class: &'p ClassDeclaration) -> Self {
        Self { file, class }
    }

    pub fn file(&self) -> &'p SourceFile {
        self.file
    }

    pub fn class(&self) -> &'p ClassDeclaration {
        self.class
    }

    pub fn name(&self) -> &'p str {
        &self.class.name
    }

    pub fn file_path(&self) -> &'p Path {
        self.file.path()
    }

    pub fn directory(&self) -> &'p Path {
        self.file.directory()
    }

    pub fn summary(&self, kind: &'static str) -> DeclarationSummary {
        DeclarationSummary {
            kind,
            name: self.name().to_string(),
            file: self.file_path().to_path_buf(),
            line: self.class.span.start.line + 1,
            exported: self.class.exported,
        }
    }
}

/// Serializable description of a discovered declaration, used in reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationSummary {
    pub kind: &'static str,
    pub name: String,
    pub file: PathBuf,
    pub line: u32,
    pub exported: bool,
}

macro_rules! class_ref {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'p>(ClassRef<'p>);

        impl<'p> $name<'p> {
            pub(crate) fn new(inner: ClassRef<'p>) -> Self {
                Self(inner)
            }

            pub fn name(&self) -> &'p str {
                self.0.name()
            }

            pub fn directory(&self) -> &'p Path {
                self.0.directory()
            }

            pub fn file_path(&self) -> &'p Path {
                self.0.file_path()
            }

            pub fn class(&self) -> &'p ClassDeclaration {
                self.0.class()
            }

            pub fn as_class_ref(&self) -> ClassRef<'p> {
                self.0
            }
        }
    };
}

class_ref!(
    /// A class decorated as a framework plugin
    PluginRef
);
class_ref!(
    /// An injectable service class
    ServiceRef
);
class_ref!(
    /// A class implementing the migration-record interface
    MigrationClassRef
);

/// A class decorated as an ORM entity
#[derive(Debug, Clone, Copy)]
pub struct EntityRef<'p> {
    inner: ClassRef<'p>,
    translatable_interface: &'p str,
}

impl<'p> EntityRef<'p> {
    pub(crate) fn new(inner: ClassRef<'p>, translatable_interface: &'p str) -> Self {
        Self {
            inner,
            translatable_interface,
        }
    }

    pub fn name(&self) -> &'p str {
        self.inner.name()
    }

    pub fn directory(&self) -> &'p Path {
        self.inner.directory()
    }

    pub fn file_path(&self) -> &'p Path {
        self.inner.file_path()
    }

    pub fn class(&self) -> &'p ClassDeclaration {
        self.inner.class()
    }

    pub fn as_class_ref(&self) -> ClassRef<'p> {
        self.inner
    }

    /// Whether the entity carries translations (implements the
    /// translatable interface)
    pub fn is_translatable(&self) -> bool {
        self.inner
            .class()
            .implements_interface(self.translatable_interface)
    }
}
