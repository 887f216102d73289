#![deny(missing_docs)]

//! # Type Resolver
//!
//! Recursively converts a `SchemaNode` into a structural type expression.
//!
//! Owns reference resolution and cycle safety. References expand eagerly
//! at the use site; the `seen` parameter is a call-chain set (conceptually
//! a stack, never a persistent memo) so that a name appearing twice on one
//! chain is a cycle, while the same name reached from two unrelated
//! positions in the same run resolves normally.
//!
//! A reference whose target is absent from the named-schema table resolves
//! to the universal `any` type instead of failing; generation stays
//! resilient against partially-specified documents.

use crate::ir::{PrimitiveKind, ResolvedType, SchemaNode};
use crate::naming;
use indexmap::IndexMap;
use serde_json::Value;

/// The universal "any" type expression.
pub const ANY: &str = "any";

/// Resolves schema nodes against a named-schema table.
pub struct TypeResolver<'a> {
    schemas: &'a IndexMap<String, SchemaNode>,
}

impl<'a> TypeResolver<'a> {
    /// Builds a resolver over the IR's named-schema table.
    pub fn new(schemas: &'a IndexMap<String, SchemaNode>) -> Self {
        Self { schemas }
    }

    /// Resolves one node. `seen` holds the canonicalized names currently
    /// being expanded on this call chain.
    pub fn resolve(&self, node: &SchemaNode, seen: &mut Vec<String>) -> ResolvedType {
        match node {
            SchemaNode::Reference { target } => {
                let canon = naming::type_name(target);
                if seen.contains(&canon) {
                    // Cycle: fall back to the named type instead of
                    // expanding forever.
                    return ResolvedType::named(canon);
                }
                match self.lookup(target) {
                    None => ResolvedType::inline(ANY),
                    Some(definition) => {
                        seen.push(canon);
                        let resolved = self.resolve(definition, seen);
                        seen.pop();
                        resolved
                    }
                }
            }
            SchemaNode::Primitive(kind) => ResolvedType::inline(primitive_expr(*kind)),
            SchemaNode::Array { items } => {
                let element = match items {
                    Some(node) => self.resolve(node, seen).expr,
                    None => ANY.to_string(),
                };
                ResolvedType::inline(sequence_expr(&element))
            }
            SchemaNode::Enum { values } => ResolvedType::inline(union_expr(values)),
            SchemaNode::Object {
                properties,
                required,
            } => {
                if properties.is_empty() {
                    return ResolvedType::inline("{}");
                }
                let members: Vec<String> = properties
                    .iter()
                    .map(|(name, prop)| {
                        let optional = !required.iter().any(|r| r == name);
                        let key = if naming::is_plain_identifier(name) {
                            name.clone()
                        } else {
                            format!("\"{}\"", name)
                        };
                        format!(
                            "{}{}: {}",
                            key,
                            if optional { "?" } else { "" },
                            self.resolve(prop, seen).expr
                        )
                    })
                    .collect();
                ResolvedType::inline(format!("{{ {} }}", members.join("; ")))
            }
            SchemaNode::Unknown => ResolvedType::inline(ANY),
        }
    }

    /// Resolves a top-level named definition with fresh `seen` state.
    ///
    /// The definition's own canonical name seeds the chain so that
    /// self-references collapse to the name. A definition whose body is
    /// solely a reference collapses to a bare named-type alias instead of
    /// an inline structural copy.
    pub fn resolve_named(&self, raw_name: &str) -> ResolvedType {
        let canon = naming::type_name(raw_name);
        let Some(definition) = self.lookup(raw_name) else {
            return ResolvedType::inline(ANY);
        };

        if let SchemaNode::Reference { target } = definition {
            let target_canon = naming::type_name(target);
            if target_canon != canon && self.lookup(target).is_some() {
                return ResolvedType::named(target_canon);
            }
            // Self-alias or dangling target: degrade to any.
            return ResolvedType::named(ANY);
        }

        let mut seen = vec![canon];
        let body = self.resolve(definition, &mut seen);
        ResolvedType::named(body.expr)
    }

    /// Resolves every named definition in declaration order, keyed by
    /// canonical name. When two raw names canonicalize identically the
    /// last write wins; collisions are not detected here.
    pub fn resolve_all(&self) -> IndexMap<String, ResolvedType> {
        let mut table = IndexMap::new();
        for raw_name in self.schemas.keys() {
            table.insert(naming::type_name(raw_name), self.resolve_named(raw_name));
        }
        table
    }

    /// Looks up a definition by raw name, falling back to a canonical-name
    /// match so that `user-profile` and `user_profile` address the same
    /// entry.
    fn lookup(&self, raw_name: &str) -> Option<&SchemaNode> {
        if let Some(node) = self.schemas.get(raw_name) {
            return Some(node);
        }
        let canon = naming::type_name(raw_name);
        self.schemas
            .iter()
            .find(|(key, _)| naming::type_name(key) == canon)
            .map(|(_, node)| node)
    }
}

fn primitive_expr(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::String => "string",
        PrimitiveKind::Number | PrimitiveKind::Integer => "number",
        PrimitiveKind::Boolean => "boolean",
    }
}

/// Wraps an element expression as a sequence-of type, parenthesizing
/// unions so the suffix binds correctly.
fn sequence_expr(element: &str) -> String {
    if element.contains(" | ") {
        format!("({})[]", element)
    } else {
        format!("{}[]", element)
    }
}

/// A closed union of literal values: strings quoted, numbers bare,
/// declaration order preserved.
fn union_expr(values: &[Value]) -> String {
    if values.is_empty() {
        return ANY.to_string();
    }
    values
        .iter()
        .map(literal_expr)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn literal_expr(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => ANY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn table(pairs: Vec<(&str, SchemaNode)>) -> IndexMap<String, SchemaNode> {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn object(props: Vec<(&str, SchemaNode)>, required: Vec<&str>) -> SchemaNode {
        SchemaNode::Object {
            properties: props
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            required: required.into_iter().map(str::to_string).collect(),
        }
    }

    #[test]
    fn test_primitives_and_unknown() {
        let schemas = table(vec![]);
        let resolver = TypeResolver::new(&schemas);
        let mut seen = Vec::new();
        assert_eq!(
            resolver
                .resolve(&SchemaNode::Primitive(PrimitiveKind::String), &mut seen)
                .expr,
            "string"
        );
        assert_eq!(
            resolver
                .resolve(&SchemaNode::Primitive(PrimitiveKind::Integer), &mut seen)
                .expr,
            "number"
        );
        assert_eq!(
            resolver.resolve(&SchemaNode::Unknown, &mut seen).expr,
            "any"
        );
    }

    #[test]
    fn test_array_of_string_and_itemless_array() {
        let schemas = table(vec![]);
        let resolver = TypeResolver::new(&schemas);
        let arr = SchemaNode::Array {
            items: Some(Box::new(SchemaNode::Primitive(PrimitiveKind::String))),
        };
        assert_eq!(resolver.resolve(&arr, &mut Vec::new()).expr, "string[]");

        let bare = SchemaNode::Array { items: None };
        assert_eq!(resolver.resolve(&bare, &mut Vec::new()).expr, "any[]");
    }

    #[test]
    fn test_enum_union_preserves_order() {
        let schemas = table(vec![]);
        let resolver = TypeResolver::new(&schemas);
        let node = SchemaNode::Enum {
            values: vec![json!("active"), json!("inactive"), json!("pending")],
        };
        assert_eq!(
            resolver.resolve(&node, &mut Vec::new()).expr,
            "\"active\" | \"inactive\" | \"pending\""
        );

        let numeric = SchemaNode::Enum {
            values: vec![json!(1), json!(2)],
        };
        assert_eq!(resolver.resolve(&numeric, &mut Vec::new()).expr, "1 | 2");
    }

    #[test]
    fn test_array_of_enum_is_parenthesized() {
        let schemas = table(vec![]);
        let resolver = TypeResolver::new(&schemas);
        let node = SchemaNode::Array {
            items: Some(Box::new(SchemaNode::Enum {
                values: vec![json!("a"), json!("b")],
            })),
        };
        assert_eq!(
            resolver.resolve(&node, &mut Vec::new()).expr,
            "(\"a\" | \"b\")[]"
        );
    }

    #[test]
    fn test_required_propagation() {
        let schemas = table(vec![]);
        let resolver = TypeResolver::new(&schemas);
        let node = object(
            vec![
                ("id", SchemaNode::Primitive(PrimitiveKind::Integer)),
                ("name", SchemaNode::Primitive(PrimitiveKind::String)),
            ],
            vec!["id"],
        );
        assert_eq!(
            resolver.resolve(&node, &mut Vec::new()).expr,
            "{ id: number; name?: string }"
        );
    }

    #[test]
    fn test_empty_object_is_valid() {
        let schemas = table(vec![]);
        let resolver = TypeResolver::new(&schemas);
        let node = object(vec![], vec![]);
        assert_eq!(resolver.resolve(&node, &mut Vec::new()).expr, "{}");
    }

    #[test]
    fn test_unresolvable_reference_degrades_to_any() {
        let schemas = table(vec![]);
        let resolver = TypeResolver::new(&schemas);
        let node = SchemaNode::Reference {
            target: "Ghost".into(),
        };
        let resolved = resolver.resolve(&node, &mut Vec::new());
        assert_eq!(resolved.expr, "any");
        assert!(!resolved.named);
    }

    #[test]
    fn test_mutual_cycle_terminates_with_named_reference() {
        let schemas = table(vec![
            (
                "A",
                object(
                    vec![("b", SchemaNode::Reference { target: "B".into() })],
                    vec![],
                ),
            ),
            (
                "B",
                object(
                    vec![("a", SchemaNode::Reference { target: "A".into() })],
                    vec![],
                ),
            ),
        ]);
        let resolver = TypeResolver::new(&schemas);
        let resolved = resolver.resolve_named("A");
        assert!(resolved.named);
        // The inner reference back to A collapses to the name.
        assert_eq!(resolved.expr, "{ b?: { a?: A } }");
    }

    #[test]
    fn test_sibling_references_are_not_mistaken_for_cycles() {
        // Two properties referencing the same non-cyclic target must both
        // expand once the chain unwinds.
        let schemas = table(vec![
            (
                "Pair",
                object(
                    vec![
                        (
                            "left",
                            SchemaNode::Reference {
                                target: "Point".into(),
                            },
                        ),
                        (
                            "right",
                            SchemaNode::Reference {
                                target: "Point".into(),
                            },
                        ),
                    ],
                    vec!["left", "right"],
                ),
            ),
            (
                "Point",
                object(
                    vec![("x", SchemaNode::Primitive(PrimitiveKind::Number))],
                    vec!["x"],
                ),
            ),
        ]);
        let resolver = TypeResolver::new(&schemas);
        let resolved = resolver.resolve_named("Pair");
        assert_eq!(
            resolved.expr,
            "{ left: { x: number }; right: { x: number } }"
        );
    }

    #[test]
    fn test_reference_body_collapses_to_named_alias() {
        let schemas = table(vec![
            (
                "Profile",
                SchemaNode::Reference {
                    target: "User".into(),
                },
            ),
            (
                "User",
                object(
                    vec![("id", SchemaNode::Primitive(PrimitiveKind::Integer))],
                    vec!["id"],
                ),
            ),
        ]);
        let resolver = TypeResolver::new(&schemas);
        let resolved = resolver.resolve_named("Profile");
        assert!(resolved.named);
        assert_eq!(resolved.expr, "User");
    }

    #[test]
    fn test_idempotence_with_fresh_seen_state() {
        let schemas = table(vec![(
            "Node",
            object(
                vec![(
                    "next",
                    SchemaNode::Reference {
                        target: "Node".into(),
                    },
                )],
                vec![],
            ),
        )]);
        let resolver = TypeResolver::new(&schemas);
        assert_eq!(resolver.resolve_named("Node"), resolver.resolve_named("Node"));
    }

    #[test]
    fn test_canonicalization_consistency() {
        let schemas = table(vec![(
            "user-profile",
            object(
                vec![("bio", SchemaNode::Primitive(PrimitiveKind::String))],
                vec![],
            ),
        )]);
        let resolver = TypeResolver::new(&schemas);
        let all = resolver.resolve_all();
        assert!(all.contains_key("UserProfile"));

        // A reference written with underscores still finds the entry.
        let node = SchemaNode::Reference {
            target: "user_profile".into(),
        };
        assert_eq!(
            resolver.resolve(&node, &mut Vec::new()).expr,
            "{ bio?: string }"
        );
    }

    #[test]
    fn test_quoted_property_names() {
        let schemas = table(vec![]);
        let resolver = TypeResolver::new(&schemas);
        let node = object(
            vec![("x-rate-limit", SchemaNode::Primitive(PrimitiveKind::Integer))],
            vec![],
        );
        assert_eq!(
            resolver.resolve(&node, &mut Vec::new()).expr,
            "{ \"x-rate-limit\"?: number }"
        );
    }
}
