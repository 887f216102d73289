#![deny(missing_docs)]

//! # Artifact Emitter
//!
//! Mechanical string assembly of the generated mock-backend sources from
//! the three read-only core outputs: the IR, the resolved-type table and
//! the classified routes grouped by storage-group key.
//!
//! No algorithmic work happens here; everything interesting was decided by
//! the core. The emitted dialect is TypeScript.

use heck::ToSnakeCase;
use indexmap::IndexMap;
use mockgen_core::{ApiIr, ResolvedType, RouteClassification, SeedSource};

/// One generated file: name relative to the output directory + content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name, e.g. `types.ts` or `pets.ts`.
    pub name: String,
    /// Full text content.
    pub content: String,
}

/// Assembles the full artifact set.
pub fn emit_artifacts(
    ir: &ApiIr,
    types: &IndexMap<String, ResolvedType>,
    grouped: &IndexMap<String, Vec<RouteClassification>>,
    seeds: &dyn SeedSource,
) -> Vec<GeneratedFile> {
    let mut files = Vec::new();

    files.push(GeneratedFile {
        name: "types.ts".to_string(),
        content: render_types(ir, types),
    });

    for (group, routes) in grouped {
        files.push(GeneratedFile {
            name: format!("{}.ts", group.to_snake_case()),
            content: render_group(group, routes, seeds),
        });
    }

    files.push(GeneratedFile {
        name: "index.ts".to_string(),
        content: render_index(grouped),
    });

    files
}

fn header(ir: &ApiIr) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// Generated by mockgen from \"{}\" v{}. Do not edit by hand.\n",
        ir.info.title, ir.info.version
    ));
    out.push('\n');
    out
}

/// Named type declarations in schema declaration order. Structural bodies
/// become interfaces; aliases, unions and sequences become type aliases.
fn render_types(ir: &ApiIr, types: &IndexMap<String, ResolvedType>) -> String {
    let mut out = header(ir);
    for (name, resolved) in types {
        if resolved.expr.starts_with('{') {
            out.push_str(&format!("export interface {} {}\n\n", name, resolved.expr));
        } else {
            out.push_str(&format!("export type {} = {};\n\n", name, resolved.expr));
        }
    }
    out
}

/// One storage-group module: its seed records plus route descriptors.
fn render_group(group: &str, routes: &[RouteClassification], seeds: &dyn SeedSource) -> String {
    let mut out = String::new();
    out.push_str(&format!("// Storage group: {}\n\n", group));

    let records = seeds.records(group);
    let seed_json = serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string());
    out.push_str(&format!("export const seed: any[] = {};\n\n", seed_json));

    out.push_str("export const routes = [\n");
    for route in routes {
        out.push_str(&render_route(route));
    }
    out.push_str("];\n");
    out
}

fn render_route(route: &RouteClassification) -> String {
    let mut entry = String::new();
    entry.push_str("  {\n");
    entry.push_str(&format!("    name: \"{}\",\n", route.function_name));
    entry.push_str(&format!("    method: \"{}\",\n", route.verb));
    entry.push_str(&format!("    path: \"{}\",\n", route.path));
    entry.push_str(&format!("    intent: \"{}\",\n", route.intent.as_str()));
    entry.push_str(&format!("    dbOperation: \"{}\",\n", route.db_operation));

    if !route.path_params.is_empty() {
        let params: Vec<String> = route
            .path_params
            .iter()
            .map(|p| format!("\"{}: {}\"", p.name, p.ty))
            .collect();
        entry.push_str(&format!("    pathParams: [{}],\n", params.join(", ")));
    }
    if let Some(query) = &route.query {
        entry.push_str(&format!(
            "    query: \"{}{}\",\n",
            query.expr().replace('"', "\\\""),
            if query.required { "" } else { " | undefined" }
        ));
    }
    if route.has_body {
        entry.push_str(&format!(
            "    body: \"{}\",\n",
            route
                .body_type
                .as_deref()
                .unwrap_or("any")
                .replace('"', "\\\"")
        ));
    }

    entry.push_str(&format!("    successStatus: {},\n", route.success_status));
    entry.push_str(&format!("    successText: \"{}\",\n", route.success_text));
    entry.push_str(&format!("    errorStatus: {},\n", route.error_status));
    entry.push_str("  },\n");
    entry
}

fn render_index(grouped: &IndexMap<String, Vec<RouteClassification>>) -> String {
    let mut out = String::new();
    out.push_str("export * from \"./types\";\n");
    for group in grouped.keys() {
        let module = group.to_snake_case();
        out.push_str(&format!("export * as {} from \"./{}\";\n", module, module));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockgen_core::{
        classify_all, group_by_storage, parse_document, EmptySeeds, SeedSource, SeedTable,
        TypeResolver,
    };

    const SPEC: &str = r#"
openapi: 3.0.0
info: {title: Petstore, version: 1.0.0}
paths:
  /pets:
    get:
      tags: [pets]
      responses:
        '200': {description: OK}
  /pets/{petId}:
    delete:
      tags: [pets]
      parameters:
        - name: petId
          in: path
          required: true
          schema: { type: string }
      responses: {}
components:
  schemas:
    Pet:
      type: object
      properties:
        id: { type: integer }
        name: { type: string }
      required: [id]
    PetStatus:
      type: string
      enum: [active, retired]
"#;

    fn artifacts(seeds: &dyn SeedSource) -> Vec<GeneratedFile> {
        let ir = parse_document(SPEC).unwrap();
        let resolver = TypeResolver::new(&ir.schemas);
        let types = resolver.resolve_all();
        let grouped = group_by_storage(classify_all(&ir));
        emit_artifacts(&ir, &types, &grouped, seeds)
    }

    #[test]
    fn test_types_file_renders_interfaces_and_aliases() {
        let files = artifacts(&EmptySeeds);
        let types = files.iter().find(|f| f.name == "types.ts").unwrap();
        assert!(types
            .content
            .contains("export interface Pet { id: number; name?: string }"));
        assert!(types
            .content
            .contains("export type PetStatus = \"active\" | \"retired\";"));
    }

    #[test]
    fn test_group_module_contains_routes_and_seed() {
        let seeds = SeedTable::parse("pets:\n  - {id: 1, name: Rex}\n").unwrap();
        let files = artifacts(&seeds);
        let pets = files.iter().find(|f| f.name == "pets.ts").unwrap();
        assert!(pets.content.contains("\"name\": \"Rex\""));
        assert!(pets.content.contains("name: \"getPets\""));
        assert!(pets.content.contains("dbOperation: \"getAll\""));
        assert!(pets.content.contains("dbOperation: \"remove\""));
        assert!(pets.content.contains("successStatus: 204"));
        assert!(pets.content.contains("pathParams: [\"petId: string\"]"));
    }

    #[test]
    fn test_index_reexports_groups() {
        let files = artifacts(&EmptySeeds);
        let index = files.iter().find(|f| f.name == "index.ts").unwrap();
        assert!(index.content.contains("export * from \"./types\";"));
        assert!(index.content.contains("export * as pets from \"./pets\";"));
    }
}
