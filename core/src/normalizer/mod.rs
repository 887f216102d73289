#![deny(missing_docs)]

//! # Spec Normalizer
//!
//! Ingests a raw OpenAPI 3.x / Swagger 2.0 document and produces the IR:
//! a flat list of operations plus a map of named schema definitions.
//!
//! No recursion beyond schema payload conversion; pure reshaping. Missing
//! optional fields normalize to empty collections, never null placeholders
//! that must be checked downstream. Reference nodes are never expanded
//! here; the type resolver expands them lazily.

mod schemas;
mod shims;

use crate::error::{AppError, AppResult};
use crate::ir::{
    ApiInfo, ApiIr, Operation, ParamLocation, Parameter, RequestBody, Response, SchemaNode,
};
use crate::naming;
use indexmap::IndexMap;
use schemas::{schema_node, schema_node_or_unknown};
use shims::{ShimDocument, ShimOperation, ShimParameter, ShimPathItem};

/// Parses and normalizes a raw document (YAML or JSON) into the IR.
///
/// Structural validation failures are fatal and surface as a single
/// wrapped [`AppError::Validation`]; everything downstream of a valid
/// document degrades gracefully instead of failing.
pub fn parse_document(text: &str) -> AppResult<ApiIr> {
    let shim: ShimDocument = serde_yaml::from_str(text)
        .map_err(|e| AppError::Validation(format!("failed to parse document: {}", e)))?;
    validate(&shim)?;

    let info = shim
        .info
        .as_ref()
        .map(|i| ApiInfo {
            title: i.title.clone().unwrap_or_default(),
            version: i.version.clone().unwrap_or_default(),
            description: i.description.clone(),
        })
        .unwrap_or_default();

    let mut servers: Vec<String> = shim.servers.iter().map(|s| s.url.clone()).collect();
    if servers.is_empty() {
        if let Some(host) = &shim.host {
            let base = shim.base_path.as_deref().unwrap_or("");
            servers.push(format!("{}{}", host, base));
        }
    }

    let schemas = named_schemas(&shim);

    let mut operations = Vec::new();
    if let Some(paths) = &shim.paths {
        for (path, item) in paths {
            collect_operations(&mut operations, path, item);
        }
    }

    Ok(ApiIr {
        info,
        servers,
        operations,
        schemas,
    })
}

/// Structural checks that gate the rest of the run.
fn validate(shim: &ShimDocument) -> AppResult<()> {
    if shim.openapi.is_none() && shim.swagger.is_none() {
        return Err(AppError::Validation(
            "document carries neither an 'openapi' nor a 'swagger' version marker".into(),
        ));
    }
    if shim.info.is_none() {
        return Err(AppError::Validation(
            "document is missing the required 'info' object".into(),
        ));
    }
    if shim.paths.is_none() {
        return Err(AppError::Validation(
            "document is missing the required 'paths' object".into(),
        ));
    }
    Ok(())
}

/// Named definitions converted exactly once each, declaration order kept.
/// OpenAPI 3.x stores them under `components/schemas`, Swagger 2.0 under
/// `definitions`.
fn named_schemas(shim: &ShimDocument) -> IndexMap<String, SchemaNode> {
    let mut table = IndexMap::new();
    if let Some(components) = &shim.components {
        for (name, raw) in &components.schemas {
            table.insert(name.clone(), schema_node(raw));
        }
    }
    for (name, raw) in &shim.definitions {
        table.insert(name.clone(), schema_node(raw));
    }
    table
}

fn collect_operations(operations: &mut Vec<Operation>, path: &str, item: &ShimPathItem) {
    let common = convert_parameters(&item.parameters);

    let mut add_op = |verb: &str, op: &Option<ShimOperation>| {
        if let Some(o) = op {
            operations.push(build_operation(path, verb, o, &common));
        }
    };

    add_op("GET", &item.get);
    add_op("POST", &item.post);
    add_op("PUT", &item.put);
    add_op("PATCH", &item.patch);
    add_op("DELETE", &item.delete);
    add_op("HEAD", &item.head);
    add_op("OPTIONS", &item.options);
}

fn build_operation(
    path: &str,
    verb: &str,
    op: &ShimOperation,
    common_params: &[Parameter],
) -> Operation {
    // Operation-level parameters win over path-item parameters on a
    // (name, location) conflict.
    let own = convert_parameters(&op.parameters);
    let mut seen: Vec<(String, ParamLocation)> = own
        .iter()
        .map(|p| (p.name.clone(), p.location))
        .collect();
    let mut parameters = own;
    for p in common_params {
        if !seen.contains(&(p.name.clone(), p.location)) {
            seen.push((p.name.clone(), p.location));
            parameters.push(p.clone());
        }
    }

    let mut request_body = op.request_body.as_ref().map(|b| RequestBody {
        required: b.required,
        content: b
            .content
            .iter()
            .map(|(mt, media)| (mt.clone(), schema_node_or_unknown(media.schema.as_ref())))
            .collect(),
    });

    // Swagger 2.0 carries the request body as an `in: body` parameter.
    if request_body.is_none() {
        if let Some(body_param) = op
            .parameters
            .iter()
            .find(|p| p.location == "body" && p.schema.is_some())
        {
            let mut content = IndexMap::new();
            content.insert(
                "application/json".to_string(),
                schema_node_or_unknown(body_param.schema.as_ref()),
            );
            request_body = Some(RequestBody {
                required: body_param.required,
                content,
            });
        }
    }

    let responses = op
        .responses
        .iter()
        .map(|(status, r)| Response {
            status: status.clone(),
            description: r.description.clone().unwrap_or_default(),
            content: if r.content.is_empty() {
                // Swagger 2.0 response schema maps to a JSON body.
                match &r.schema {
                    Some(raw) => {
                        let mut content = IndexMap::new();
                        content.insert("application/json".to_string(), schema_node(raw));
                        content
                    }
                    None => IndexMap::new(),
                }
            } else {
                r.content
                    .iter()
                    .map(|(mt, media)| (mt.clone(), schema_node_or_unknown(media.schema.as_ref())))
                    .collect()
            },
        })
        .collect();

    let ident = op
        .operation_id
        .clone()
        .unwrap_or_else(|| naming::synthesize_operation_ident(verb, path));

    Operation {
        path: path.to_string(),
        verb: verb.to_string(),
        operation_id: op.operation_id.clone(),
        ident,
        summary: op.summary.clone(),
        description: op.description.clone(),
        parameters,
        request_body,
        responses,
        tags: op.tags.clone(),
    }
}

fn convert_parameters(raw: &[ShimParameter]) -> Vec<Parameter> {
    raw.iter()
        .filter_map(|p| {
            let name = p.name.clone()?;
            let location = match p.location.as_str() {
                "path" => ParamLocation::Path,
                "query" => ParamLocation::Query,
                "header" => ParamLocation::Header,
                "cookie" => ParamLocation::Cookie,
                // Swagger body params are folded into the request body.
                "body" => return None,
                _ => ParamLocation::Query,
            };

            let schema = match (&p.schema, &p.legacy_type) {
                (Some(raw_schema), _) => schema_node(raw_schema),
                (None, Some(ty)) => schema_node(&serde_json::json!({ "type": ty })),
                (None, None) => SchemaNode::Unknown,
            };

            Some(Parameter {
                name,
                location,
                // Path placeholders are always mandatory.
                required: p.required || location == ParamLocation::Path,
                schema,
            })
        })
        .collect()
}
