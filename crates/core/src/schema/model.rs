//! Schema definitions as reported by the host framework's introspection

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kinds the generator understands. Anything else is mapped to
/// [`SchemaType::Unsupported`] when reading host output.
const KNOWN_KINDS: &[&str] = &[
    "string",
    "number",
    "boolean",
    "date",
    "literal",
    "enum",
    "array",
    "object",
    "record",
    "union",
    "lazy",
    "unknown",
    "unsupported",
];

/// The schemas of one API surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaSet {
    pub name: String,
    #[serde(default)]
    pub schemas: Vec<SchemaDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub description: Option<String>,
    pub schema: SchemaType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SchemaType {
    String {
        #[serde(default)]
        format: Option<String>,
        #[serde(default, rename = "minLength")]
        min_length: Option<u64>,
        #[serde(default, rename = "maxLength")]
        max_length: Option<u64>,
    },
    Number {
        #[serde(default)]
        integer: bool,
        #[serde(default)]
        minimum: Option<f64>,
        #[serde(default)]
        maximum: Option<f64>,
    },
    Boolean,
    Date,
    Literal {
        value: Value,
    },
    /// Allowed values in declared order
    Enum {
        values: Vec<Value>,
    },
    Array {
        items: Box<SchemaType>,
    },
    Object {
        fields: Vec<FieldDefinition>,
    },
    Record {
        values: Box<SchemaType>,
    },
    Union {
        variants: Vec<SchemaType>,
    },
    /// Reference to another schema of the same set, by name
    Lazy {
        target: String,
    },
    Unknown,
    Unsupported {
        combinator: String,
    },
}

impl SchemaSet {
    /// Read a schema set from host output, keeping unrecognized kinds as
    /// [`SchemaType::Unsupported`] so generation can report them
    pub fn from_value(mut value: Value) -> Result<Self> {
        mark_unsupported(&mut value);
        Ok(serde_json::from_value(value)?)
    }

    pub fn find(&self, name: &str) -> Option<&SchemaDefinition> {
        self.schemas.iter().find(|schema| schema.name == name)
    }
}

fn mark_unsupported(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(mark_unsupported),
        Value::Object(map) => {
            let unknown_kind = match map.get("kind") {
                Some(Value::String(kind)) if !KNOWN_KINDS.contains(&kind.as_str()) => {
                    Some(kind.clone())
                }
                _ => None,
            };
            if let Some(kind) = unknown_kind {
                map.clear();
                map.insert("kind".to_string(), Value::String("unsupported".to_string()));
                map.insert("combinator".to_string(), Value::String(kind));
                return;
            }
            let is_literal = matches!(map.get("kind"), Some(Value::String(kind)) if kind == "literal");
            for (key, child) in map.iter_mut() {
                if is_literal && key == "value" {
                    continue;
                }
                mark_unsupported(child);
            }
        }
        _ => {}
    }
}
