use crate::{
    error::Result,
    parser::{DeclarationDetector, Dialect, TypeScriptParser},
    types::{ClassDeclaration, Declaration, ImportDeclaration, VariableDeclaration},
};
use std::path::{Path, PathBuf};
use tree_sitter::Tree;

/// A parsed source file of the host project.
///
/// The text and syntax tree never change after loading. Changes are
/// expressed as [`crate::edit::EditPlan`]s against the original text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    tree: Tree,
    declarations: Vec<Declaration>,
}

impl SourceFile {
    pub fn parse(path: PathBuf, text: String, parser: &mut TypeScriptParser) -> Result<Self> {
        let tree = parser.parse(&text, Dialect::from_path(&path))?;
        let declarations = DeclarationDetector::new().detect(&tree, &text);
        Ok(Self {
            path,
            text,
            tree,
            declarations,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDeclaration> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Class(class) => Some(class),
            _ => None,
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Variable(variable) => Some(variable),
            _ => None,
        })
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportDeclaration> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Import(import) => Some(import),
            _ => None,
        })
    }

    /// Whether `name` is already bound by an import in this file
    pub fn imports_name(&self, name: &str) -> bool {
        self.imports()
            .any(|import| import.specifiers.iter().any(|s| s == name))
    }
}
