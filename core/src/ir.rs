#![deny(missing_docs)]

//! # Intermediate Representation
//!
//! Definition of the IR structures produced by the normalizer.
//!
//! These structs transport parsed spec data into the type resolver and the
//! route classifier. Created once per generation run; read-only downstream.

use indexmap::IndexMap;
use serde_json::Value;

/// A single node in the recursive type-shape tree describing one schema
/// definition or inline shape.
///
/// References carry the target definition's raw name and are never expanded
/// at construction time; expansion happens lazily at resolution time so
/// that cyclic definitions stay representable.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// A scalar type.
    Primitive(PrimitiveKind),
    /// An object shape with ordered properties.
    Object {
        /// Property name -> schema, insertion order preserved.
        properties: IndexMap<String, SchemaNode>,
        /// Names of properties that are mandatory.
        required: Vec<String>,
    },
    /// A homogeneous sequence.
    Array {
        /// Element schema; `None` means "sequence of any".
        items: Option<Box<SchemaNode>>,
    },
    /// A closed set of literal values, declaration order preserved.
    Enum {
        /// The literal values.
        values: Vec<Value>,
    },
    /// A by-name pointer to a globally defined schema.
    Reference {
        /// Raw (uncanonicalized) name of the referenced definition.
        target: String,
    },
    /// Missing or unrecognized schema; resolves to the universal any type.
    Unknown,
}

/// Scalar subtypes recognized by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// `type: string`
    String,
    /// `type: number`
    Number,
    /// `type: integer`
    Integer,
    /// `type: boolean`
    Boolean,
}

/// The source location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// Path template placeholder.
    Path,
    /// Query string member.
    Query,
    /// HTTP header.
    Header,
    /// Cookie value.
    Cookie,
}

/// One declared operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name as declared.
    pub name: String,
    /// Where the parameter is carried.
    pub location: ParamLocation,
    /// Whether the parameter is mandatory.
    pub required: bool,
    /// Shape of the parameter value; `Unknown` when the spec omits it.
    pub schema: SchemaNode,
}

/// Declared request body of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    /// Whether the body is mandatory.
    pub required: bool,
    /// Content-type -> schema, declaration order preserved.
    pub content: IndexMap<String, SchemaNode>,
}

/// One declared response of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// The status code as written in the document (e.g. "200", "default").
    pub status: String,
    /// Human-readable description.
    pub description: String,
    /// Content-type -> schema; empty when the response carries no body.
    pub content: IndexMap<String, SchemaNode>,
}

/// One HTTP verb bound to one path template.
///
/// `(path, verb)` pairs are unique within one document; the same path may
/// legally appear under several verbs.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Path template with `{param}` placeholders.
    pub path: String,
    /// Upper-case HTTP verb: "GET", "POST", ...
    pub verb: String,
    /// The `operationId` declared in the document, when present.
    pub operation_id: Option<String>,
    /// Guaranteed identifier: the declared id, or one synthesized from
    /// verb + path with non-alphanumeric characters stripped.
    pub ident: String,
    /// Optional human summary.
    pub summary: Option<String>,
    /// Optional longer description.
    pub description: Option<String>,
    /// Declared parameters in document order (path-item level merged in).
    pub parameters: Vec<Parameter>,
    /// Declared request body, if any.
    pub request_body: Option<RequestBody>,
    /// Declared responses in document order.
    pub responses: Vec<Response>,
    /// Group tags in declaration order.
    pub tags: Vec<String>,
}

/// Top-level document metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiInfo {
    /// Document title.
    pub title: String,
    /// Document version string.
    pub version: String,
    /// Optional description.
    pub description: Option<String>,
}

/// The normalized, validation-complete structural model derived from the
/// raw specification.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiIr {
    /// Top-level info block.
    pub info: ApiInfo,
    /// Server URLs, declaration order.
    pub servers: Vec<String>,
    /// Operations in document traversal order (paths, then verbs).
    pub operations: Vec<Operation>,
    /// Named schema definitions by raw name, declaration order preserved.
    pub schemas: IndexMap<String, SchemaNode>,
}

/// Output of the type resolver for a given schema node: a structural type
/// expression plus whether it denotes a named, reusable type or an inline
/// structural one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// The rendered type expression (e.g. `string`, `{ id: number }`).
    pub expr: String,
    /// True when `expr` is a reference to a reusable named definition.
    pub named: bool,
}

impl ResolvedType {
    /// A reference to a named, reusable definition.
    pub fn named(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            named: true,
        }
    }

    /// An inline structural expression.
    pub fn inline(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            named: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_properties_preserve_insertion_order() {
        let mut properties = IndexMap::new();
        properties.insert("z".to_string(), SchemaNode::Unknown);
        properties.insert("a".to_string(), SchemaNode::Unknown);
        let keys: Vec<_> = properties.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_resolved_type_constructors() {
        assert!(ResolvedType::named("User").named);
        assert!(!ResolvedType::inline("string").named);
    }
}
