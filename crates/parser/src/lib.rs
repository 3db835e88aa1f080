//! OpenAPI parsing and loading for openapi-llms
//!
//! This crate turns an OpenAPI 2.0 / 3.x JSON document into a lenient,
//! order-preserving model (`OpenApiDocument`) and provides the loaders that
//! read it from a local file or an HTTP URL.
//!
//! ## Leniency
//!
//! Missing or malformed fields never fail the document:
//! - a field with the wrong JSON shape becomes `None` or empty
//! - malformed array items and map entries are dropped
//! - only a non-object root is rejected

mod loader;
pub mod openapi;

pub use loader::{load_from_file, load_from_url, SpecLoader};
pub use openapi::OpenApiDocument;
