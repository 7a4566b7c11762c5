use serde::{Deserialize, Serialize};

use super::position::Span;

/// A top-level declaration found in a TypeScript source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Variable(VariableDeclaration),
    Class(ClassDeclaration),
    Import(ImportDeclaration),
}

impl Declaration {
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Variable(v) => Some(&v.name),
            Declaration::Class(c) => Some(&c.name),
            Declaration::Import(_) => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Declaration::Variable(v) => v.span,
            Declaration::Class(c) => c.span,
            Declaration::Import(i) => i.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    Const,
    Let,
    Var,
}

/// `export const config: FirelancerConfig = { ... }` and friends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub name: String,
    pub kind: VariableKind,
    pub exported: bool,
    /// Text of the explicit type annotation, without the leading colon
    pub type_annotation: Option<String>,
    /// Type named by a trailing `satisfies T` or `as T` on the initializer
    pub asserted_type: Option<String>,
    /// The whole statement, including `export` when present
    pub span: Span,
    pub value_span: Option<Span>,
}

impl VariableDeclaration {
    /// Whether the statically visible type of this variable is `type_name`.
    ///
    /// Qualified names (`core.FirelancerConfig`) and generic instantiations
    /// match on their base identifier.
    pub fn has_static_type(&self, type_name: &str) -> bool {
        [&self.type_annotation, &self.asserted_type]
            .into_iter()
            .flatten()
            .any(|ty| base_type_name(ty) == type_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decorator {
    pub name: String,
    /// Raw text between the call parentheses, if the decorator is a call
    pub arguments: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    pub name: String,
    pub exported: bool,
    pub is_abstract: bool,
    pub decorators: Vec<Decorator>,
    /// Types named in the `implements` clause, as written
    pub implements: Vec<String>,
    pub extends: Option<String>,
    pub span: Span,
    pub body_span: Span,
}

impl ClassDeclaration {
    pub fn implements_interface(&self, interface_name: &str) -> bool {
        self.implements
            .iter()
            .any(|ty| base_type_name(ty) == interface_name)
    }

    pub fn has_decorator(&self, decorator_name: &str) -> bool {
        self.decorators.iter().any(|d| d.name == decorator_name)
    }

    pub fn decorator(&self, decorator_name: &str) -> Option<&Decorator> {
        self.decorators.iter().find(|d| d.name == decorator_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDeclaration {
    /// Module specifier without quotes
    pub source: String,
    /// Local names brought into scope (default, named and namespace imports)
    pub specifiers: Vec<String>,
    pub span: Span,
}

/// Strip generic arguments and namespace qualifiers from a type reference:
/// `typeorm.MigrationInterface<T>` becomes `MigrationInterface`.
pub fn base_type_name(ty: &str) -> &str {
    let without_generics = ty.split('<').next().unwrap_or(ty).trim();
    without_generics
        .rsplit('.')
        .next()
        .unwrap_or(without_generics)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_type_name() {
        assert_eq!(base_type_name("FirelancerConfig"), "FirelancerConfig");
        assert_eq!(base_type_name("core.FirelancerConfig"), "FirelancerConfig");
        assert_eq!(
            base_type_name("typeorm.MigrationInterface<Foo.Bar>"),
            "MigrationInterface"
        );
        assert_eq!(base_type_name(" Partial<Config> "), "Partial");
    }
}
