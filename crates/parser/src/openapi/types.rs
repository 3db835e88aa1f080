//! OpenAPI 2.0 / 3.x document model
//!
//! A read-only view of the fields the Markdown generator consumes. Every
//! field is optional and deserialized leniently, so partial or malformed
//! documents still produce a usable model. Schema nodes and examples are
//! kept as raw JSON.

use super::lenient;
use indexmap::IndexMap;
use openapi_llms_common::{LlmsError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// OpenAPI document root
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiDocument {
    /// OpenAPI version (3.x)
    #[serde(default, deserialize_with = "lenient::text")]
    pub openapi: Option<String>,

    /// Swagger version (2.0)
    #[serde(default, deserialize_with = "lenient::text")]
    pub swagger: Option<String>,

    /// API metadata
    #[serde(default, deserialize_with = "lenient::option")]
    pub info: Option<Info>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub external_docs: Option<ExternalDocs>,

    #[serde(default, deserialize_with = "lenient::seq")]
    pub servers: Vec<Server>,

    /// Global security requirements (alternatives)
    #[serde(default, deserialize_with = "lenient::seq")]
    pub security: Vec<SecurityRequirement>,

    #[serde(default, deserialize_with = "lenient::seq")]
    pub tags: Vec<Tag>,

    /// API paths, in source order
    #[serde(default, deserialize_with = "lenient::map")]
    pub paths: IndexMap<String, PathItem>,

    /// Webhooks (3.1), in source order
    #[serde(default, deserialize_with = "lenient::map")]
    pub webhooks: IndexMap<String, PathItem>,

    /// Reusable components
    #[serde(default, deserialize_with = "lenient::option")]
    pub components: Option<Components>,

    /// Swagger 2.0 host
    #[serde(default, deserialize_with = "lenient::text")]
    pub host: Option<String>,

    /// Swagger 2.0 base path
    #[serde(default, deserialize_with = "lenient::text")]
    pub base_path: Option<String>,

    /// Swagger 2.0 transfer schemes
    #[serde(default, deserialize_with = "lenient::text_seq")]
    pub schemes: Vec<String>,

    /// Swagger 2.0 schema definitions
    #[serde(default, deserialize_with = "lenient::map")]
    pub definitions: IndexMap<String, Value>,

    /// Swagger 2.0 security definitions
    #[serde(default, deserialize_with = "lenient::map")]
    pub security_definitions: IndexMap<String, SecurityScheme>,
}

/// API information
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub version: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub contact: Option<Contact>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub license: Option<License>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct License {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,

    /// SPDX identifier (3.1)
    #[serde(default, deserialize_with = "lenient::text")]
    pub identifier: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalDocs {
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub url: Option<String>,
}

/// Server information
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Server {
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::map")]
    pub variables: IndexMap<String, ServerVariable>,
}

/// Server URL template variable
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerVariable {
    #[serde(default, deserialize_with = "lenient::text")]
    pub default: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    #[serde(rename = "enum", default, deserialize_with = "lenient::text_seq")]
    pub enum_values: Vec<String>,
}

/// One security requirement: every listed scheme applies together
///
/// Maps scheme name to required scopes, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityRequirement(pub IndexMap<String, Vec<String>>);

impl<'de> Deserialize<'de> for SecurityRequirement {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        let schemes = raw
            .into_iter()
            .map(|(name, scopes)| {
                let scopes = match scopes {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(lenient::scalar_to_string)
                        .collect(),
                    _ => Vec::new(),
                };
                (name, scopes)
            })
            .collect();
        Ok(Self(schemes))
    }
}

impl SecurityRequirement {
    /// Iterate `(scheme name, scopes)` pairs in source order
    pub fn schemes(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub external_docs: Option<ExternalDocs>,
}

/// Path item: HTTP method keys mapped to operations, plus path-level fields
///
/// Entries are kept raw and in source order. Only JSON-object values under
/// keys other than `parameters` are treated as operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem(pub IndexMap<String, Value>);

impl PathItem {
    /// Iterate `(method, operation)` pairs in source order
    pub fn operations(&self) -> impl Iterator<Item = (&str, Operation)> + '_ {
        self.0
            .iter()
            .filter(|(key, value)| key.as_str() != "parameters" && value.is_object())
            .filter_map(|(key, value)| {
                serde_json::from_value::<Operation>(value.clone())
                    .ok()
                    .map(|op| (key.as_str(), op))
            })
    }
}

/// HTTP operation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, deserialize_with = "lenient::text")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub operation_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub deprecated: Option<bool>,

    #[serde(default, deserialize_with = "lenient::text_seq")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "lenient::seq")]
    pub security: Vec<SecurityRequirement>,

    #[serde(default, deserialize_with = "lenient::seq")]
    pub parameters: Vec<Parameter>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub request_body: Option<RequestBody>,

    /// Responses keyed by status code, in source order
    #[serde(default, deserialize_with = "lenient::map")]
    pub responses: IndexMap<String, Response>,

    /// Callbacks: name -> runtime expression -> path item
    #[serde(default, deserialize_with = "lenient::map")]
    pub callbacks: IndexMap<String, IndexMap<String, PathItem>>,
}

impl Operation {
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.unwrap_or(false)
    }
}

/// Parameter definition
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,

    /// Location: query, header, path, cookie (body, formData in 2.0)
    #[serde(rename = "in", default, deserialize_with = "lenient::text")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub required: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub schema: Option<Value>,

    /// Swagger 2.0 inline type
    #[serde(rename = "type", default, deserialize_with = "lenient::text")]
    pub param_type: Option<String>,

    #[serde(rename = "$ref", default, deserialize_with = "lenient::text")]
    pub ref_path: Option<String>,
}

impl Parameter {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// Request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub required: Option<bool>,

    /// Media types, in source order
    #[serde(default, deserialize_with = "lenient::map")]
    pub content: IndexMap<String, MediaType>,

    #[serde(rename = "$ref", default, deserialize_with = "lenient::text")]
    pub ref_path: Option<String>,
}

impl RequestBody {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// Response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::map")]
    pub headers: IndexMap<String, Header>,

    #[serde(default, deserialize_with = "lenient::map")]
    pub content: IndexMap<String, MediaType>,

    /// Swagger 2.0 response schema
    #[serde(default, deserialize_with = "lenient::option")]
    pub schema: Option<Value>,

    #[serde(rename = "$ref", default, deserialize_with = "lenient::text")]
    pub ref_path: Option<String>,
}

/// Media type
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    #[serde(default, deserialize_with = "lenient::option")]
    pub schema: Option<Value>,
}

/// Response or component header
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Header {
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub required: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub schema: Option<Value>,

    /// Swagger 2.0 inline type
    #[serde(rename = "type", default, deserialize_with = "lenient::text")]
    pub header_type: Option<String>,
}

/// Reusable components
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default, deserialize_with = "lenient::map")]
    pub schemas: IndexMap<String, Value>,

    #[serde(default, deserialize_with = "lenient::map")]
    pub security_schemes: IndexMap<String, SecurityScheme>,

    #[serde(default, deserialize_with = "lenient::map")]
    pub responses: IndexMap<String, Response>,

    #[serde(default, deserialize_with = "lenient::map")]
    pub parameters: IndexMap<String, Parameter>,

    #[serde(default, deserialize_with = "lenient::map")]
    pub examples: IndexMap<String, Example>,

    #[serde(default, deserialize_with = "lenient::map")]
    pub request_bodies: IndexMap<String, RequestBody>,

    #[serde(default, deserialize_with = "lenient::map")]
    pub headers: IndexMap<String, Header>,

    #[serde(default, deserialize_with = "lenient::map")]
    pub links: IndexMap<String, Link>,
}

/// Security scheme definition
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    /// apiKey, http, oauth2, openIdConnect (basic in 2.0)
    #[serde(rename = "type", default, deserialize_with = "lenient::text")]
    pub scheme_type: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    /// HTTP auth scheme (bearer, basic, ...)
    #[serde(default, deserialize_with = "lenient::text")]
    pub scheme: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub bearer_format: Option<String>,

    /// API key location
    #[serde(rename = "in", default, deserialize_with = "lenient::text")]
    pub location: Option<String>,

    /// API key name
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub open_id_connect_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    #[serde(default, deserialize_with = "lenient::text")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub value: Option<Value>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub external_value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(default, deserialize_with = "lenient::text")]
    pub operation_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub operation_ref: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

impl OpenApiDocument {
    /// Build the document model from a parsed JSON value
    ///
    /// Fails only when the root is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(LlmsError::Parse(format!(
                "OpenAPI document root must be a JSON object, got {}",
                json_kind(&value)
            )));
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Parse a document from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| LlmsError::Parse(format!("Failed to parse OpenAPI JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Number of operations across all paths
    pub fn operation_count(&self) -> usize {
        self.paths
            .values()
            .map(|item| item.operations().count())
            .sum()
    }

    /// Number of operations across all webhooks
    pub fn webhook_operation_count(&self) -> usize {
        self.webhooks
            .values()
            .map(|item| item.operations().count())
            .sum()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
