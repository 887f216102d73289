#![deny(missing_docs)]

//! # Generate Command
//!
//! Produces the mock-backend source set from an OpenAPI/Swagger file.
//!
//! This command:
//! 1. Reads and normalizes the spec (fatal on structural validation failure).
//! 2. Resolves every named schema into a type expression.
//! 3. Classifies routes and groups them by storage-group key.
//! 4. Writes the assembled artifacts under the output directory.

use crate::emitter::emit_artifacts;
use crate::error::{CliError, CliResult};
use mockgen_core::{
    classify_all, group_by_storage, parse_document, EmptySeeds, SeedSource, SeedTable,
    TypeResolver,
};
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the OpenAPI/Swagger spec (YAML or JSON).
    #[clap(long)]
    pub spec: PathBuf,

    /// Output directory for the generated mock backend.
    #[clap(long, default_value = "mock")]
    pub out: PathBuf,

    /// Optional seed file: a map of storage-group name -> record list.
    #[clap(long)]
    pub seeds: Option<PathBuf>,

    /// Print the group/route summary without writing any files.
    #[clap(long)]
    pub dry_run: bool,
}

/// Executes the generation pipeline.
pub fn execute(args: &GenerateArgs) -> CliResult<()> {
    println!("Generating mock backend from {:?}...", args.spec);

    if !args.spec.exists() {
        return Err(CliError::General(format!(
            "spec file not found: {:?}",
            args.spec
        )));
    }

    let text = fs::read_to_string(&args.spec)?;
    let ir = parse_document(&text)?;

    let resolver = TypeResolver::new(&ir.schemas);
    let types = resolver.resolve_all();
    let grouped = group_by_storage(classify_all(&ir));

    let seeds: Box<dyn SeedSource> = match &args.seeds {
        Some(path) => {
            let seed_text = fs::read_to_string(path)?;
            Box::new(SeedTable::parse(&seed_text)?)
        }
        None => Box::new(EmptySeeds),
    };

    if args.dry_run {
        for (group, routes) in &grouped {
            println!("  {} ({} routes)", group, routes.len());
            for route in routes {
                println!(
                    "    {} {} -> {} [{}]",
                    route.verb,
                    route.path,
                    route.function_name,
                    route.intent.as_str()
                );
            }
        }
        return Ok(());
    }

    if !args.out.exists() {
        fs::create_dir_all(&args.out)?;
    }

    let files = emit_artifacts(&ir, &types, &grouped, seeds.as_ref());
    for file in &files {
        let path = args.out.join(&file.name);
        fs::write(&path, &file.content)?;
        println!("  -> {:?}", path);
    }

    println!(
        "Generated {} files ({} storage groups, {} named types).",
        files.len(),
        grouped.len(),
        types.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const SPEC: &str = r#"
openapi: 3.0.0
info: {title: Shop, version: 1.0.0}
paths:
  /orders:
    get:
      tags: [orders]
      responses:
        '200': {description: OK}
    post:
      tags: [orders]
      requestBody:
        content:
          application/json:
            schema: { $ref: '#/components/schemas/Order' }
      responses: {}
components:
  schemas:
    Order:
      type: object
      properties:
        id: { type: integer }
        total: { type: number }
      required: [id]
"#;

    #[test]
    fn test_generate_writes_artifact_set() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("openapi.yaml");
        let out_dir = dir.path().join("mock");

        let mut f = fs::File::create(&spec_path).unwrap();
        f.write_all(SPEC.as_bytes()).unwrap();

        let seeds_path = dir.path().join("seeds.yaml");
        fs::write(&seeds_path, "orders:\n  - {id: 1, total: 9.5}\n").unwrap();

        let args = GenerateArgs {
            spec: spec_path,
            out: out_dir.clone(),
            seeds: Some(seeds_path),
            dry_run: false,
        };
        execute(&args).unwrap();

        let types = fs::read_to_string(out_dir.join("types.ts")).unwrap();
        assert!(types.contains("export interface Order { id: number; total?: number }"));

        let orders = fs::read_to_string(out_dir.join("orders.ts")).unwrap();
        assert!(orders.contains("dbOperation: \"getAll\""));
        assert!(orders.contains("dbOperation: \"insert\""));
        assert!(orders.contains("successStatus: 201"));
        assert!(orders.contains("\"total\": 9.5"));

        assert!(out_dir.join("index.ts").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("openapi.yaml");
        let out_dir = dir.path().join("mock");
        fs::write(&spec_path, SPEC).unwrap();

        let args = GenerateArgs {
            spec: spec_path,
            out: out_dir.clone(),
            seeds: None,
            dry_run: true,
        };
        execute(&args).unwrap();
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_invalid_document_is_fatal() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("openapi.yaml");
        fs::write(&spec_path, "info: {title: broken, version: 1}\npaths: {}\n").unwrap();

        let args = GenerateArgs {
            spec: spec_path,
            out: dir.path().join("mock"),
            seeds: None,
            dry_run: false,
        };
        let err = execute(&args).unwrap_err();
        assert!(format!("{}", err).contains("Invalid specification"));
    }
}
