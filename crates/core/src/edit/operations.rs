//! Edits computed from the syntax tree of a [`SourceFile`]

use super::plan::SourceEdit;
use crate::{
    error::{Error, Result},
    parser::{declaration_detector::named_children, node_text, utils::unquote},
    project::SourceFile,
    types::{Span, VariableDeclaration},
};
use tree_sitter::Node;

/// Append `element` to the array stored under `property` in the object
/// literal assigned to `variable`.
///
/// Returns `None` when the array already contains the element. Indentation
/// and trailing comma style of multi-line arrays are kept.
pub fn add_array_element(
    file: &SourceFile,
    variable: &VariableDeclaration,
    property: &str,
    element: &str,
) -> Result<Option<SourceEdit>> {
    let text = file.text();
    let edit_error = |message: String| Error::Edit {
        path: file.path().to_path_buf(),
        message,
    };

    let value_span = variable
        .value_span
        .ok_or_else(|| edit_error(format!("`{}` has no initializer", variable.name)))?;
    let object = node_at_span(file, &value_span)
        .and_then(unwrap_expression)
        .filter(|node| node.kind() == "object")
        .ok_or_else(|| edit_error(format!("`{}` is not an object literal", variable.name)))?;
    let array = find_property(object, property, text)
        .filter(|node| node.kind() == "array")
        .ok_or_else(|| {
            edit_error(format!(
                "`{}` has no `{property}` array literal",
                variable.name
            ))
        })?;

    let elements: Vec<Node> = named_children(array)
        .into_iter()
        .filter(|node| node.kind() != "comment")
        .collect();
    if elements
        .iter()
        .any(|node| node_text(node, text).trim() == element)
    {
        return Ok(None);
    }

    let Some(last) = elements.last() else {
        return Ok(Some(SourceEdit::insert(array.start_byte() + 1, element)));
    };

    let array_text = node_text(&array, text);
    if !array_text.contains('\n') {
        return Ok(Some(SourceEdit::insert(last.end_byte(), format!(", {element}"))));
    }

    let indent = line_indent(text, last.start_byte());
    let edit = match trailing_comma(text, last.end_byte(), array.end_byte()) {
        Some(comma) => SourceEdit::insert(comma + 1, format!("\n{indent}{element},")),
        None => SourceEdit::insert(last.end_byte(), format!(",\n{indent}{element}")),
    };
    Ok(Some(edit))
}

/// Import `name` from `specifier` unless the file already binds `name`.
///
/// The statement goes after the last existing import and follows its quote
/// style.
pub fn add_named_import(file: &SourceFile, name: &str, specifier: &str) -> Option<SourceEdit> {
    if file.imports_name(name) {
        return None;
    }
    let last_import = file.imports().last();
    let quote = match last_import {
        Some(import) if import.span.text(file.text()).contains('"') => '"',
        _ => '\'',
    };
    let statement = format!("import {{ {name} }} from {quote}{specifier}{quote};");

    Some(match last_import {
        Some(import) => SourceEdit::insert(import.span.end_byte, format!("\n{statement}")),
        None => SourceEdit::insert(0, format!("{statement}\n\n")),
    })
}

/// Remove a top-level declaration together with the rest of its line
pub fn remove_declaration(file: &SourceFile, span: &Span) -> SourceEdit {
    let text = file.text();
    let mut end = span.end_byte;
    let rest = &text[end..];
    let line_rest = rest.find('\n').map(|i| i + 1).unwrap_or(rest.len());
    if rest[..line_rest].trim().is_empty() {
        end += line_rest;
    }
    SourceEdit::remove(span.start_byte..end)
}

/// Outermost node covering exactly `span`
fn node_at_span<'t>(file: &'t SourceFile, span: &Span) -> Option<Node<'t>> {
    let root = file.tree().root_node();
    let mut node = root.descendant_for_byte_range(span.start_byte, span.end_byte)?;
    while let Some(parent) = node.parent() {
        if parent.start_byte() != span.start_byte || parent.end_byte() != span.end_byte {
            break;
        }
        node = parent;
    }
    (node.start_byte() == span.start_byte && node.end_byte() == span.end_byte).then_some(node)
}

/// Look through `satisfies`, `as` and parentheses
fn unwrap_expression(node: Node) -> Option<Node> {
    match node.kind() {
        "satisfies_expression" | "as_expression" | "parenthesized_expression" => {
            unwrap_expression(node.named_child(0)?)
        }
        _ => Some(node),
    }
}

fn find_property<'t>(object: Node<'t>, property: &str, text: &str) -> Option<Node<'t>> {
    named_children(object)
        .into_iter()
        .filter(|child| child.kind() == "pair")
        .find(|pair| {
            pair.child_by_field_name("key")
                .map(|key| unquote(node_text(&key, text)) == property)
                .unwrap_or(false)
        })
        .and_then(|pair| pair.child_by_field_name("value"))
}

fn line_indent(text: &str, offset: usize) -> &str {
    let line_start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = &text[line_start..offset];
    let width = line.len() - line.trim_start().len();
    &line[..width]
}

/// Offset of a comma directly following the last element, if any
fn trailing_comma(text: &str, from: usize, until: usize) -> Option<usize> {
    let between = &text[from..until];
    let trimmed = between.trim_start();
    trimmed
        .starts_with(',')
        .then(|| from + (between.len() - trimmed.len()))
}
