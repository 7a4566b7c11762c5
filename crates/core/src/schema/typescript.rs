//! Static TypeScript declarations for runtime schema sets
//!
//! Output depends only on the input set: the same set always produces the
//! same bytes, and declarations follow the order schemas were reported in.

use super::model::{FieldDefinition, SchemaDefinition, SchemaSet, SchemaType};
use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt::Write;

const INDENT: &str = "    ";

/// Names a type alias cannot take: keywords, predefined types, and the
/// globals rendered fields refer to.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "any", "Array", "as", "await", "bigint", "boolean", "break", "case", "catch", "class",
    "const", "continue", "Date", "debugger", "default", "delete", "do", "else", "enum",
    "export", "extends", "false", "finally", "for", "function", "if", "implements", "import",
    "in", "instanceof", "interface", "let", "never", "new", "null", "number", "object",
    "package", "private", "protected", "public", "Record", "return", "static", "string",
    "super", "switch", "symbol", "this", "throw", "true", "try", "type", "typeof",
    "undefined", "unknown", "var", "void", "while", "with", "yield",
];

pub struct TypeScriptGenerator {
    identifier: Regex,
}

impl TypeScriptGenerator {
    pub fn new() -> Result<Self> {
        let identifier = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$")
            .map_err(|e| Error::Parse(format!("invalid identifier pattern: {e}")))?;
        Ok(Self { identifier })
    }

    /// Render one exported type per schema of `set`
    pub fn generate(&self, set: &SchemaSet) -> Result<String> {
        self.validate(set)?;

        let mut out = String::new();
        let _ = writeln!(out, "// @generated by firelancer generate-schema-types. Do not edit.");
        let _ = writeln!(out, "// Schema types for the `{}` API.", set.name);

        for schema in &set.schemas {
            out.push('\n');
            self.render_schema(&mut out, schema);
        }
        Ok(out)
    }

    fn validate(&self, set: &SchemaSet) -> Result<()> {
        let names: HashSet<&str> = set.schemas.iter().map(|s| s.name.as_str()).collect();
        let mut seen = HashSet::new();

        for schema in &set.schemas {
            if !self.is_identifier(&schema.name) {
                return Err(Error::schema(&schema.name, "schema name is not a valid identifier"));
            }
            if RESERVED_TYPE_NAMES.contains(&schema.name.as_str()) {
                return Err(Error::schema(&schema.name, "schema name is reserved"));
            }
            if !seen.insert(schema.name.as_str()) {
                return Err(Error::schema(&schema.name, "schema name is declared more than once"));
            }
            validate_fields(&schema.name, "", &schema.fields, &names)?;
        }
        Ok(())
    }

    fn render_schema(&self, out: &mut String, schema: &SchemaDefinition) {
        if let Some(description) = &schema.description {
            render_doc(out, "", &description_lines(description));
        }
        let _ = writeln!(
            out,
            "export type {} = {};",
            schema.name,
            self.render_object(&schema.fields, 0)
        );
    }

    fn render_object(&self, fields: &[FieldDefinition], depth: usize) -> String {
        if fields.is_empty() {
            return "{}".to_string();
        }
        let member_indent = INDENT.repeat(depth + 1);
        let mut out = String::from("{\n");
        for field in fields {
            let mut doc = field
                .description
                .as_deref()
                .map(description_lines)
                .unwrap_or_default();
            doc.extend(constraint_tags(&field.schema));
            render_doc(&mut out, &member_indent, &doc);

            let mut ty = self.render_type(&field.schema, depth + 1);
            if field.nullable {
                ty.push_str(" | null");
            }
            let _ = writeln!(
                out,
                "{member_indent}{}{}: {ty};",
                self.property_name(&field.name),
                if field.optional { "?" } else { "" }
            );
        }
        out.push_str(&INDENT.repeat(depth));
        out.push('}');
        out
    }

    fn render_type(&self, schema: &SchemaType, depth: usize) -> String {
        match schema {
            SchemaType::String { .. } => "string".to_string(),
            SchemaType::Number { .. } => "number".to_string(),
            SchemaType::Boolean => "boolean".to_string(),
            SchemaType::Date => "Date".to_string(),
            SchemaType::Unknown => "unknown".to_string(),
            SchemaType::Literal { value } => literal(value).unwrap_or_else(|| "never".to_string()),
            SchemaType::Enum { values } => values
                .iter()
                .filter_map(literal)
                .collect::<Vec<_>>()
                .join(" | "),
            SchemaType::Array { items } => format!("Array<{}>", self.render_type(items, depth)),
            SchemaType::Record { values } => {
                format!("Record<string, {}>", self.render_type(values, depth))
            }
            SchemaType::Object { fields } => self.render_object(fields, depth),
            SchemaType::Union { variants } => variants
                .iter()
                .map(|variant| self.render_type(variant, depth))
                .collect::<Vec<_>>()
                .join(" | "),
            SchemaType::Lazy { target } => target.clone(),
            // Rejected during validation
            SchemaType::Unsupported { .. } => "never".to_string(),
        }
    }

    fn property_name(&self, name: &str) -> String {
        if self.is_identifier(name) {
            name.to_string()
        } else {
            quote(name)
        }
    }

    fn is_identifier(&self, name: &str) -> bool {
        self.identifier.is_match(name)
    }
}

fn validate_fields(
    schema: &str,
    prefix: &str,
    fields: &[FieldDefinition],
    names: &HashSet<&str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for field in fields {
        let path = format!("{prefix}{}", field.name);
        if !seen.insert(field.name.as_str()) {
            return Err(Error::schema(schema, format!("field `{path}` is declared more than once")));
        }
        validate_type(schema, &path, &field.schema, names)?;
    }
    Ok(())
}

fn validate_type(schema: &str, path: &str, ty: &SchemaType, names: &HashSet<&str>) -> Result<()> {
    match ty {
        SchemaType::Unsupported { combinator } => Err(Error::schema(
            schema,
            format!("field `{path}` uses unsupported combinator `{combinator}`"),
        )),
        SchemaType::Enum { values } if values.is_empty() => {
            Err(Error::schema(schema, format!("field `{path}` is an empty enum")))
        }
        SchemaType::Enum { values } => match values.iter().find(|v| literal(v).is_none()) {
            Some(value) => Err(Error::schema(
                schema,
                format!("field `{path}` has a non-literal enum value {value}"),
            )),
            None => Ok(()),
        },
        SchemaType::Literal { value } if literal(value).is_none() => Err(Error::schema(
            schema,
            format!("field `{path}` has a non-literal value {value}"),
        )),
        SchemaType::Lazy { target } if !names.contains(target.as_str()) => Err(Error::schema(
            schema,
            format!("field `{path}` references unknown schema `{target}`"),
        )),
        SchemaType::Array { items } => validate_type(schema, &format!("{path}[]"), items, names),
        SchemaType::Record { values } => validate_type(schema, &format!("{path}{{}}"), values, names),
        SchemaType::Union { variants } if variants.is_empty() => {
            Err(Error::schema(schema, format!("field `{path}` is an empty union")))
        }
        SchemaType::Union { variants } => variants
            .iter()
            .try_for_each(|variant| validate_type(schema, path, variant, names)),
        SchemaType::Object { fields } => validate_fields(schema, &format!("{path}."), fields, names),
        _ => Ok(()),
    }
}

fn literal(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(quote(s)),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn constraint_tags(schema: &SchemaType) -> Vec<String> {
    let mut tags = Vec::new();
    match schema {
        SchemaType::String {
            format,
            min_length,
            max_length,
        } => {
            if let Some(format) = format {
                tags.push(format!("@format {format}"));
            }
            if let Some(min) = min_length {
                tags.push(format!("@minLength {min}"));
            }
            if let Some(max) = max_length {
                tags.push(format!("@maxLength {max}"));
            }
        }
        SchemaType::Number {
            integer,
            minimum,
            maximum,
        } => {
            if *integer {
                tags.push("@integer".to_string());
            }
            if let Some(min) = minimum {
                tags.push(format!("@minimum {min}"));
            }
            if let Some(max) = maximum {
                tags.push(format!("@maximum {max}"));
            }
        }
        _ => {}
    }
    tags
}

fn description_lines(description: &str) -> Vec<String> {
    description
        .lines()
        .map(|line| line.trim_end().replace("*/", "*\\/"))
        .collect()
}

fn render_doc(out: &mut String, indent: &str, lines: &[String]) {
    match lines {
        [] => {}
        [line] => {
            let _ = writeln!(out, "{indent}/** {line} */");
        }
        lines => {
            let _ = writeln!(out, "{indent}/**");
            for line in lines {
                if line.is_empty() {
                    let _ = writeln!(out, "{indent} *");
                } else {
                    let _ = writeln!(out, "{indent} * {line}");
                }
            }
            let _ = writeln!(out, "{indent} */");
        }
    }
}
