#![deny(missing_docs)]

//! # Schema Conversion
//!
//! Converts a raw schema payload (`serde_json::Value`) into a `SchemaNode`.
//!
//! Conversion is shallow with respect to references: a `$ref` becomes a
//! `Reference` node carrying the target name and is never expanded here.
//! A missing or null payload becomes `Unknown`, never an absent value.

use crate::ir::{PrimitiveKind, SchemaNode};
use indexmap::IndexMap;
use serde_json::Value;

/// Converts an optional raw schema into a node, defaulting to `Unknown`.
pub(crate) fn schema_node_or_unknown(raw: Option<&Value>) -> SchemaNode {
    match raw {
        Some(value) => schema_node(value),
        None => SchemaNode::Unknown,
    }
}

/// Converts one raw schema payload into a `SchemaNode`.
pub(crate) fn schema_node(raw: &Value) -> SchemaNode {
    let Value::Object(map) = raw else {
        return SchemaNode::Unknown;
    };

    if let Some(target) = map.get("$ref").and_then(Value::as_str) {
        return SchemaNode::Reference {
            target: ref_target(target),
        };
    }

    if let Some(Value::Array(values)) = map.get("enum") {
        return SchemaNode::Enum {
            values: values.clone(),
        };
    }

    match type_tag(map.get("type")) {
        Some("object") => object_node(map),
        Some("array") => SchemaNode::Array {
            items: map
                .get("items")
                .filter(|v| !v.is_null())
                .map(|v| Box::new(schema_node(v))),
        },
        Some("string") => SchemaNode::Primitive(PrimitiveKind::String),
        Some("number") => SchemaNode::Primitive(PrimitiveKind::Number),
        Some("integer") => SchemaNode::Primitive(PrimitiveKind::Integer),
        Some("boolean") => SchemaNode::Primitive(PrimitiveKind::Boolean),
        // An untyped schema with declared properties is still an object.
        _ if map.contains_key("properties") => object_node(map),
        _ => SchemaNode::Unknown,
    }
}

fn object_node(map: &serde_json::Map<String, Value>) -> SchemaNode {
    let mut properties = IndexMap::new();
    if let Some(Value::Object(props)) = map.get("properties") {
        for (name, prop) in props {
            properties.insert(name.clone(), schema_node(prop));
        }
    }

    let required = match map.get("required") {
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    SchemaNode::Object {
        properties,
        required,
    }
}

/// Extracts the effective `type` tag. OpenAPI 3.1 allows a type union such
/// as `["string", "null"]`; the first non-null member wins.
fn type_tag(raw: Option<&Value>) -> Option<&str> {
    match raw {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Array(members)) => members
            .iter()
            .filter_map(Value::as_str)
            .find(|s| *s != "null"),
        _ => None,
    }
}

/// Extracts the simple name from a reference string.
/// e.g. `#/components/schemas/User` -> `User`
pub(crate) fn ref_target(ref_loc: &str) -> String {
    ref_loc
        .split('/')
        .next_back()
        .unwrap_or("Unknown")
        .to_string()
}
