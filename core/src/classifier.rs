#![deny(missing_docs)]

//! # Route Classifier
//!
//! Maps each IR operation to a storage-group key, a CRUD intent, a
//! canonical function name, a canonical database-operation name and a
//! parameter/body shape.
//!
//! Intent derivation is a pure decision table over (verb, path shape) so
//! the mapping stays independently testable. Name collisions within a
//! storage group are not deduplicated here; two operations that synthesize
//! to the same function name overwrite one another downstream. That is a
//! documented open risk, not something this component papers over.

use crate::ir::{ApiIr, Operation, ParamLocation};
use crate::naming;
use crate::resolver::TypeResolver;
use indexmap::IndexMap;

/// Storage-group key used when an operation carries no tags.
pub const DEFAULT_GROUP: &str = "Default";

/// The canonical operation category assigned to an HTTP operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudIntent {
    /// GET without a trailing path parameter.
    List,
    /// GET with a trailing path parameter.
    GetById,
    /// POST.
    Create,
    /// PUT or PATCH.
    Update,
    /// DELETE.
    Delete,
    /// Any other verb.
    Custom,
}

impl CrudIntent {
    /// Stable lower-camel label, used by emitters.
    pub fn as_str(&self) -> &'static str {
        match self {
            CrudIntent::List => "list",
            CrudIntent::GetById => "getById",
            CrudIntent::Create => "create",
            CrudIntent::Update => "update",
            CrudIntent::Delete => "delete",
            CrudIntent::Custom => "custom",
        }
    }
}

/// A path parameter with its resolved primitive type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam {
    /// Placeholder name from the path template.
    pub name: String,
    /// Resolved type expression (e.g. `string`, `number`).
    pub ty: String,
}

/// One member of the structural query argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryField {
    /// Query parameter name.
    pub name: String,
    /// Resolved type expression.
    pub ty: String,
    /// Mirrors the parameter's own required flag.
    pub required: bool,
}

/// The single structural argument carrying all query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryShape {
    /// Members in declaration order.
    pub fields: Vec<QueryField>,
    /// True when at least one member is required, making the argument
    /// itself mandatory.
    pub required: bool,
}

impl QueryShape {
    /// Renders the structural literal for this argument.
    pub fn expr(&self) -> String {
        let members: Vec<String> = self
            .fields
            .iter()
            .map(|f| {
                let key = if naming::is_plain_identifier(&f.name) {
                    f.name.clone()
                } else {
                    format!("\"{}\"", f.name)
                };
                format!("{}{}: {}", key, if f.required { "" } else { "?" }, f.ty)
            })
            .collect();
        format!("{{ {} }}", members.join("; "))
    }
}

/// The classification record for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteClassification {
    /// Path template, unchanged from the IR.
    pub path: String,
    /// Upper-case HTTP verb.
    pub verb: String,
    /// Partitioning key: canonicalized first tag, or the fixed default.
    pub storage_group: String,
    /// Canonical operation category.
    pub intent: CrudIntent,
    /// Canonical function name.
    pub function_name: String,
    /// Canonical database-operation name.
    pub db_operation: String,
    /// Required positional path parameters in path-declaration order.
    pub path_params: Vec<PathParam>,
    /// Structural query argument, when any query parameters exist.
    pub query: Option<QueryShape>,
    /// Whether a request body argument is emitted.
    pub has_body: bool,
    /// Concrete body shape when the resolver supplies one.
    pub body_type: Option<String>,
    /// Chosen success status code.
    pub success_status: u16,
    /// Status text for the chosen success code.
    pub success_text: String,
    /// Chosen error status code.
    pub error_status: u16,
}

/// The verb x path-shape decision table.
///
/// | verb       | trailing path parameter | intent  |
/// |------------|-------------------------|---------|
/// | GET        | yes                     | getById |
/// | GET        | no                      | list    |
/// | POST       | -                       | create  |
/// | PUT, PATCH | -                       | update  |
/// | DELETE     | -                       | delete  |
/// | other      | -                       | custom  |
pub fn intent_of(verb: &str, trailing_path_param: bool) -> CrudIntent {
    match (verb, trailing_path_param) {
        ("GET", true) => CrudIntent::GetById,
        ("GET", false) => CrudIntent::List,
        ("POST", _) => CrudIntent::Create,
        ("PUT", _) | ("PATCH", _) => CrudIntent::Update,
        ("DELETE", _) => CrudIntent::Delete,
        _ => CrudIntent::Custom,
    }
}

/// Classifies one operation against the IR's schema table.
pub fn classify(op: &Operation, resolver: &TypeResolver<'_>) -> RouteClassification {
    let storage_group = op
        .tags
        .first()
        .map(|t| naming::type_name(t))
        .unwrap_or_else(|| DEFAULT_GROUP.to_string());

    let intent = intent_of(&op.verb, has_trailing_path_param(&op.path));
    let function_name = derive_function_name(op);
    let db_operation = match intent {
        CrudIntent::List => "getAll".to_string(),
        CrudIntent::GetById => "getById".to_string(),
        CrudIntent::Create => "insert".to_string(),
        CrudIntent::Update => "update".to_string(),
        CrudIntent::Delete => "remove".to_string(),
        CrudIntent::Custom => function_name.clone(),
    };

    let path_params = collect_path_params(op, resolver);

    let query_fields: Vec<QueryField> = op
        .parameters
        .iter()
        .filter(|p| p.location == ParamLocation::Query)
        .map(|p| QueryField {
            name: p.name.clone(),
            ty: resolver.resolve(&p.schema, &mut Vec::new()).expr,
            required: p.required,
        })
        .collect();
    let query = if query_fields.is_empty() {
        None
    } else {
        let required = query_fields.iter().any(|f| f.required);
        Some(QueryShape {
            fields: query_fields,
            required,
        })
    };

    let has_body = op.request_body.is_some() && op.verb != "GET";
    let body_type = if has_body {
        op.request_body.as_ref().and_then(|body| {
            let schema = body
                .content
                .get("application/json")
                .or_else(|| body.content.values().next())?;
            let resolved = resolver.resolve(schema, &mut Vec::new());
            if resolved.expr == crate::resolver::ANY {
                None
            } else {
                Some(resolved.expr)
            }
        })
    } else {
        None
    };

    let success_status = select_status(op, '2').unwrap_or(match op.verb.as_str() {
        "POST" => 201,
        "DELETE" => 204,
        _ => 200,
    });
    let error_status = select_status(op, '4').unwrap_or(400);

    RouteClassification {
        path: op.path.clone(),
        verb: op.verb.clone(),
        storage_group,
        intent,
        function_name,
        db_operation,
        path_params,
        query,
        has_body,
        body_type,
        success_status,
        success_text: status_text(success_status).to_string(),
        error_status,
    }
}

/// Classifies every operation of the IR in traversal order.
pub fn classify_all(ir: &ApiIr) -> Vec<RouteClassification> {
    let resolver = TypeResolver::new(&ir.schemas);
    ir.operations
        .iter()
        .map(|op| classify(op, &resolver))
        .collect()
}

/// Groups classified routes by storage-group key, first-seen order.
pub fn group_by_storage(
    routes: Vec<RouteClassification>,
) -> IndexMap<String, Vec<RouteClassification>> {
    let mut grouped: IndexMap<String, Vec<RouteClassification>> = IndexMap::new();
    for route in routes {
        grouped
            .entry(route.storage_group.clone())
            .or_default()
            .push(route);
    }
    grouped
}

fn has_trailing_path_param(path: &str) -> bool {
    path.split('/')
        .filter(|s| !s.is_empty())
        .next_back()
        .map(|s| s.starts_with('{') && s.ends_with('}'))
        .unwrap_or(false)
}

/// The operation's declared identifier in canonical camel form, otherwise
/// verb + canonicalized last non-parameter path segment
/// (`GET /users/profiles` -> `getProfiles`).
fn derive_function_name(op: &Operation) -> String {
    if let Some(id) = &op.operation_id {
        return naming::function_name(id);
    }
    let segment = op
        .path
        .split('/')
        .filter(|s| !s.is_empty())
        .rev()
        .find(|s| !(s.starts_with('{') && s.ends_with('}')))
        .unwrap_or("");
    format!("{}{}", op.verb.to_lowercase(), naming::type_name(segment))
}

/// Path parameters in path-declaration order, resolved to primitive type
/// expressions. A placeholder with no matching declaration defaults to
/// `string`.
fn collect_path_params(op: &Operation, resolver: &TypeResolver<'_>) -> Vec<PathParam> {
    op.path
        .split('/')
        .filter(|s| s.starts_with('{') && s.ends_with('}'))
        .map(|placeholder| {
            let name = placeholder.trim_start_matches('{').trim_end_matches('}');
            let ty = op
                .parameters
                .iter()
                .find(|p| p.location == ParamLocation::Path && p.name == name)
                .map(|p| resolver.resolve(&p.schema, &mut Vec::new()).expr)
                .unwrap_or_else(|| "string".to_string());
            PathParam {
                name: name.to_string(),
                ty,
            }
        })
        .collect()
}

/// First declared response whose numeric status code starts with `leading`.
fn select_status(op: &Operation, leading: char) -> Option<u16> {
    op.responses
        .iter()
        .filter(|r| r.status.starts_with(leading))
        .find_map(|r| r.status.parse::<u16>().ok())
}

/// Fixed lookup from the chosen numeric code to its status text.
fn status_text(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        _ => "Success",
    }
}
