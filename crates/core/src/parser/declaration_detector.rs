use super::utils::{node_span, node_text, unquote};
use crate::types::{
    ClassDeclaration, Declaration, Decorator, ImportDeclaration, VariableDeclaration, VariableKind,
};
use tree_sitter::{Node, Tree};

/// Collects the top-level declarations of a parsed TypeScript file.
///
/// Only statements directly under `program` are visited; declarations nested
/// inside functions or namespaces are not part of a file's structural surface.
pub struct DeclarationDetector;

impl Default for DeclarationDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, tree: &Tree, source: &str) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        for statement in named_children(tree.root_node()) {
            self.visit_statement(statement, source, &mut declarations);
        }
        declarations
    }

    fn visit_statement(&self, node: Node, source: &str, out: &mut Vec<Declaration>) {
        match node.kind() {
            "export_statement" => self.visit_export(node, source, out),
            "lexical_declaration" | "variable_declaration" => {
                self.collect_variables(node, node, false, source, out)
            }
            "class_declaration" | "abstract_class_declaration" => {
                if let Some(class) = self.class(node, node, false, Vec::new(), source) {
                    out.push(Declaration::Class(class));
                }
            }
            "import_statement" => {
                if let Some(import) = self.import(node, source) {
                    out.push(Declaration::Import(import));
                }
            }
            _ => {}
        }
    }

    fn visit_export(&self, node: Node, source: &str, out: &mut Vec<Declaration>) {
        // `@Dec() export class Foo {}` attaches the decorators to the export statement
        let decorators: Vec<Decorator> = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "decorator")
            .filter_map(|child| self.decorator(child, source))
            .collect();

        let Some(declaration) = node.child_by_field_name("declaration") else {
            return;
        };

        match declaration.kind() {
            "lexical_declaration" | "variable_declaration" => {
                self.collect_variables(declaration, node, true, source, out)
            }
            "class_declaration" | "abstract_class_declaration" => {
                if let Some(class) = self.class(declaration, node, true, decorators, source) {
                    out.push(Declaration::Class(class));
                }
            }
            _ => {}
        }
    }

    fn collect_variables(
        &self,
        declaration: Node,
        statement: Node,
        exported: bool,
        source: &str,
        out: &mut Vec<Declaration>,
    ) {
        let kind = match declaration.child(0).map(|k| node_text(&k, source)) {
            Some("const") => VariableKind::Const,
            Some("let") => VariableKind::Let,
            _ => VariableKind::Var,
        };

        for declarator in named_children(declaration) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            // Destructuring patterns do not declare a single named value
            let Some(name) = declarator
                .child_by_field_name("name")
                .filter(|n| n.kind() == "identifier")
            else {
                continue;
            };

            let type_annotation = declarator.child_by_field_name("type").map(|t| {
                node_text(&t, source)
                    .trim_start_matches(':')
                    .trim()
                    .to_string()
            });
            let value = declarator.child_by_field_name("value");
            let asserted_type = value.and_then(|v| self.asserted_type(v, source));

            out.push(Declaration::Variable(VariableDeclaration {
                name: node_text(&name, source).to_string(),
                kind,
                exported,
                type_annotation,
                asserted_type,
                span: node_span(&statement),
                value_span: value.map(|v| node_span(&v)),
            }));
        }
    }

    fn asserted_type(&self, value: Node, source: &str) -> Option<String> {
        match value.kind() {
            "satisfies_expression" | "as_expression" => {
                let count = value.named_child_count();
                let ty = value.named_child(count.checked_sub(1)?)?;
                Some(node_text(&ty, source).trim().to_string())
            }
            "parenthesized_expression" => self.asserted_type(value.named_child(0)?, source),
            _ => None,
        }
    }

    fn class(
        &self,
        class: Node,
        statement: Node,
        exported: bool,
        mut decorators: Vec<Decorator>,
        source: &str,
    ) -> Option<ClassDeclaration> {
        let name = class.child_by_field_name("name")?;
        let body = class.child_by_field_name("body")?;

        let mut implements = Vec::new();
        let mut extends = None;

        for child in named_children(class) {
            match child.kind() {
                "decorator" => decorators.extend(self.decorator(child, source)),
                "class_heritage" => {
                    for clause in named_children(child) {
                        match clause.kind() {
                            "extends_clause" => {
                                extends = clause
                                    .child_by_field_name("value")
                                    .or_else(|| clause.named_child(0))
                                    .map(|v| node_text(&v, source).trim().to_string());
                            }
                            "implements_clause" => implements.extend(
                                named_children(clause)
                                    .into_iter()
                                    .map(|ty| node_text(&ty, source).trim().to_string()),
                            ),
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }

        Some(ClassDeclaration {
            name: node_text(&name, source).to_string(),
            exported,
            is_abstract: class.kind() == "abstract_class_declaration",
            decorators,
            implements,
            extends,
            span: node_span(&statement),
            body_span: node_span(&body),
        })
    }

    fn decorator(&self, node: Node, source: &str) -> Option<Decorator> {
        let expression = node.named_child(0)?;
        let (callee, arguments) = match expression.kind() {
            "call_expression" => {
                let callee = expression.child_by_field_name("function")?;
                let arguments = expression.child_by_field_name("arguments").map(|args| {
                    let text = node_text(&args, source);
                    text.strip_prefix('(')
                        .and_then(|t| t.strip_suffix(')'))
                        .unwrap_or(text)
                        .trim()
                        .to_string()
                });
                (callee, arguments)
            }
            _ => (expression, None),
        };

        let callee_text = node_text(&callee, source);
        let name = callee_text.rsplit('.').next().unwrap_or(callee_text).trim();

        Some(Decorator {
            name: name.to_string(),
            arguments,
            span: node_span(&node),
        })
    }

    fn import(&self, node: Node, source: &str) -> Option<ImportDeclaration> {
        let module = node.child_by_field_name("source")?;
        let mut specifiers = Vec::new();

        for clause in named_children(node) {
            if clause.kind() != "import_clause" {
                continue;
            }
            for item in named_children(clause) {
                match item.kind() {
                    "identifier" => specifiers.push(node_text(&item, source).to_string()),
                    "namespace_import" => specifiers.extend(
                        named_children(item)
                            .into_iter()
                            .filter(|n| n.kind() == "identifier")
                            .map(|n| node_text(&n, source).to_string()),
                    ),
                    "named_imports" => {
                        for specifier in named_children(item) {
                            if specifier.kind() != "import_specifier" {
                                continue;
                            }
                            let local = specifier
                                .child_by_field_name("alias")
                                .or_else(|| specifier.child_by_field_name("name"));
                            if let Some(local) = local {
                                specifiers.push(node_text(&local, source).to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        Some(ImportDeclaration {
            source: unquote(node_text(&module, source)).to_string(),
            specifiers,
            span: node_span(&node),
        })
    }
}

pub(crate) fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    let children = node.named_children(&mut cursor).collect();
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Dialect, TypeScriptParser};

    fn detect(source: &str) -> Vec<Declaration> {
        let mut parser = TypeScriptParser::new().unwrap();
        parser.get_declarations(source, Dialect::TypeScript).unwrap()
    }

    fn classes(declarations: &[Declaration]) -> Vec<&ClassDeclaration> {
        declarations
            .iter()
            .filter_map(|d| match d {
                Declaration::Class(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_exported_typed_config_variable() {
        let source = r#"
import { FirelancerConfig } from '@firelancer/core';

export const config: FirelancerConfig = {
    apiOptions: { port: 3000 },
};
"#;
        let declarations = detect(source);
        let variable = declarations
            .iter()
            .find_map(|d| match d {
                Declaration::Variable(v) => Some(v),
                _ => None,
            })
            .unwrap();

        assert_eq!(variable.name, "config");
        assert!(variable.exported);
        assert_eq!(variable.kind, VariableKind::Const);
        assert_eq!(variable.type_annotation.as_deref(), Some("FirelancerConfig"));
        assert!(variable.has_static_type("FirelancerConfig"));
        assert!(variable.span.text(source).starts_with("export const config"));
    }

    #[test]
    fn test_satisfies_and_as_assertions() {
        let source = r#"
const a = { port: 1 } satisfies FirelancerConfig;
let b = ({ port: 2 } as core.FirelancerConfig);
var c = { port: 3 };
"#;
        let declarations = detect(source);
        let vars: Vec<_> = declarations
            .iter()
            .filter_map(|d| match d {
                Declaration::Variable(v) => Some(v),
                _ => None,
            })
            .collect();

        assert_eq!(vars.len(), 3);
        assert!(vars[0].has_static_type("FirelancerConfig"));
        assert!(!vars[0].exported);
        assert_eq!(vars[1].kind, VariableKind::Let);
        assert!(vars[1].has_static_type("FirelancerConfig"));
        assert_eq!(vars[2].kind, VariableKind::Var);
        assert!(!vars[2].has_static_type("FirelancerConfig"));
    }

    #[test]
    fn test_class_with_decorators_and_heritage() {
        let source = r#"
@FirelancerPlugin({
    imports: [PluginCommonModule],
})
export class ReviewsPlugin extends BasePlugin implements OnApplicationBootstrap, typeorm.Translatable<Review> {}

@Injectable()
class HiddenService {}

export abstract class Base {}
"#;
        let declarations = detect(source);
        let classes = classes(&declarations);
        assert_eq!(classes.len(), 3);

        let plugin = classes[0];
        assert_eq!(plugin.name, "ReviewsPlugin");
        assert!(plugin.exported);
        assert!(plugin.has_decorator("FirelancerPlugin"));
        assert_eq!(
            plugin.decorator("FirelancerPlugin").unwrap().arguments.as_deref(),
            Some("{\n    imports: [PluginCommonModule],\n}")
        );
        assert_eq!(plugin.extends.as_deref(), Some("BasePlugin"));
        assert!(plugin.implements_interface("OnApplicationBootstrap"));
        assert!(plugin.implements_interface("Translatable"));

        let service = classes[1];
        assert!(!service.exported);
        assert!(service.has_decorator("Injectable"));

        assert!(classes[2].is_abstract);
    }

    #[test]
    fn test_imports() {
        let source = r#"
import path from 'path';
import * as fs from "fs";
import { FirelancerConfig, DefaultJobQueuePlugin as Queue } from '@firelancer/core';
"#;
        let declarations = detect(source);
        let imports: Vec<_> = declarations
            .iter()
            .filter_map(|d| match d {
                Declaration::Import(i) => Some(i),
                _ => None,
            })
            .collect();

        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].source, "path");
        assert_eq!(imports[0].specifiers, vec!["path"]);
        assert_eq!(imports[1].specifiers, vec!["fs"]);
        assert_eq!(imports[2].source, "@firelancer/core");
        assert_eq!(imports[2].specifiers, vec!["FirelancerConfig", "Queue"]);
    }

    #[test]
    fn test_nested_declarations_are_ignored() {
        let source = r#"
function build() {
    const inner: FirelancerConfig = {};
    class Local implements MigrationInterface {}
}
"#;
        assert!(detect(source).is_empty());
    }
}
