use crate::{
    error::{Error, Result},
    parser::declaration_detector::DeclarationDetector,
    types::Declaration,
};
use std::path::Path;
use tree_sitter::{Parser, Tree};

/// Grammar variant used for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx") => Dialect::Tsx,
            _ => Dialect::TypeScript,
        }
    }
}

pub struct TypeScriptParser {
    typescript: Parser,
    tsx: Parser,
}

impl TypeScriptParser {
    pub fn new() -> Result<Self> {
        let mut typescript = Parser::new();
        typescript
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|e| Error::TreeSitter(format!("Failed to set language: {e}")))?;

        let mut tsx = Parser::new();
        tsx.set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .map_err(|e| Error::TreeSitter(format!("Failed to set language: {e}")))?;

        Ok(Self { typescript, tsx })
    }

    pub fn parse(&mut self, source: &str, dialect: Dialect) -> Result<Tree> {
        let parser = match dialect {
            Dialect::TypeScript => &mut self.typescript,
            Dialect::Tsx => &mut self.tsx,
        };
        parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse("Failed to parse source code".to_string()))
    }

    pub fn get_declarations(&mut self, source: &str, dialect: Dialect) -> Result<Vec<Declaration>> {
        let tree = self.parse(source, dialect)?;
        Ok(DeclarationDetector::new().detect(&tree, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_creation() {
        let parser = TypeScriptParser::new();
        assert!(parser.is_ok());
    }

    #[test]
    fn test_parse_empty_source() {
        let mut parser = TypeScriptParser::new().unwrap();
        let tree = parser.parse("", Dialect::TypeScript);
        assert!(tree.is_ok());
    }

    #[test]
    fn test_parse_invalid_syntax() {
        let mut parser = TypeScriptParser::new().unwrap();
        // Tree-sitter still produces a tree with error nodes
        let tree = parser.parse("const x = ;", Dialect::TypeScript).unwrap();
        assert!(tree.root_node().has_error());
    }

    #[test]
    fn test_tsx_dialect_from_path() {
        assert_eq!(Dialect::from_path(Path::new("src/app.tsx")), Dialect::Tsx);
        assert_eq!(
            Dialect::from_path(Path::new("src/app.ts")),
            Dialect::TypeScript
        );
        assert_eq!(
            Dialect::from_path(Path::new("src/app.mts")),
            Dialect::TypeScript
        );
    }

    #[test]
    fn test_parse_tsx_component() {
        let mut parser = TypeScriptParser::new().unwrap();
        let source = "export const App = () => <div>hello</div>;\n";
        let tree = parser.parse(source, Dialect::Tsx).unwrap();
        assert!(!tree.root_node().has_error());
    }
}
