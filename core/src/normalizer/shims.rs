#![deny(missing_docs)]

//! # Deserialization Shims
//!
//! Loosely-typed serde structs used to ingest a raw OpenAPI 3.x or
//! Swagger 2.0 document before normalization.
//!
//! We deserialize into these instead of a full OpenAPI object model so the
//! normalizer can stay permissive: unknown fields are ignored, schema
//! payloads stay as raw `serde_json::Value` until conversion, and ordered
//! maps preserve declaration order.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Root of the raw document. YAML is a superset of JSON, so one
/// `serde_yaml` pass accepts both formats.
#[derive(Debug, Deserialize)]
pub(crate) struct ShimDocument {
    /// OpenAPI 3.x version marker.
    pub openapi: Option<String>,
    /// Swagger 2.0 version marker.
    pub swagger: Option<String>,
    pub info: Option<ShimInfo>,
    #[serde(default)]
    pub servers: Vec<ShimServer>,
    /// Swagger 2.0 host, folded into the server list.
    pub host: Option<String>,
    /// Swagger 2.0 base path, folded into the server list.
    #[serde(rename = "basePath")]
    pub base_path: Option<String>,
    pub paths: Option<IndexMap<String, ShimPathItem>>,
    pub components: Option<ShimComponents>,
    /// Swagger 2.0 named schema location.
    #[serde(default)]
    pub definitions: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShimInfo {
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShimServer {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShimComponents {
    #[serde(default)]
    pub schemas: IndexMap<String, Value>,
}

/// One path entry with its seven recognized verbs.
#[derive(Debug, Deserialize)]
pub(crate) struct ShimPathItem {
    #[serde(default)]
    pub parameters: Vec<ShimParameter>,
    pub get: Option<ShimOperation>,
    pub post: Option<ShimOperation>,
    pub put: Option<ShimOperation>,
    pub patch: Option<ShimOperation>,
    pub delete: Option<ShimOperation>,
    pub head: Option<ShimOperation>,
    pub options: Option<ShimOperation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShimOperation {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ShimParameter>,
    #[serde(rename = "requestBody")]
    pub request_body: Option<ShimRequestBody>,
    #[serde(default)]
    pub responses: IndexMap<String, ShimResponse>,
}

/// A declared parameter. `name` is optional so that unresolved
/// `$ref` parameter entries deserialize instead of failing the run;
/// entries without a name are dropped during normalization.
#[derive(Debug, Deserialize)]
pub(crate) struct ShimParameter {
    pub name: Option<String>,
    #[serde(rename = "in", default)]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<Value>,
    /// Swagger 2.0 inline parameter type (no `schema` wrapper).
    #[serde(rename = "type")]
    pub legacy_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShimRequestBody {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub content: IndexMap<String, ShimMedia>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShimMedia {
    pub schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShimResponse {
    pub description: Option<String>,
    #[serde(default)]
    pub content: IndexMap<String, ShimMedia>,
    /// Swagger 2.0 response body schema.
    pub schema: Option<Value>,
}
