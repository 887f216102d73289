#![deny(missing_docs)]

//! # Mockgen Core
//!
//! The schema-and-route synthesis engine behind the mock-backend
//! generator: normalizes a raw OpenAPI/Swagger document into an immutable
//! IR, resolves schema definitions into structural type expressions, and
//! classifies each operation into a CRUD intent bound to a storage group.
//!
//! The engine is single-threaded and purely functional over its inputs;
//! downstream emitters consume three read-only outputs: the IR, the
//! name -> resolved-type table, and the classified routes grouped by
//! storage-group key.

/// Shared error types.
pub mod error;

/// Intermediate Representation definitions.
pub mod ir;

/// Identifier canonicalization rules.
pub mod naming;

/// Raw document -> IR normalization.
pub mod normalizer;

/// Schema node -> type expression resolution.
pub mod resolver;

/// Operation -> CRUD classification.
pub mod classifier;

/// Seed Adapter contract.
pub mod seeds;

pub use classifier::{
    classify, classify_all, group_by_storage, intent_of, CrudIntent, PathParam, QueryField,
    QueryShape, RouteClassification, DEFAULT_GROUP,
};
pub use error::{AppError, AppResult};
pub use ir::{
    ApiInfo, ApiIr, Operation, ParamLocation, Parameter, PrimitiveKind, RequestBody,
    ResolvedType, Response, SchemaNode,
};
pub use normalizer::parse_document;
pub use resolver::{TypeResolver, ANY};
pub use seeds::{EmptySeeds, SeedSource, SeedTable};
