//! OpenAPI / Swagger document model
//!
//! Parses OpenAPI 2.0 and 3.x documents into a lenient, order-preserving
//! model for Markdown generation.
//!
//! ## Usage
//! ```rust,ignore
//! use openapi_llms_parser::openapi::OpenApiDocument;
//!
//! let doc = OpenApiDocument::from_json(r#"{"info": {"title": "Pet Store"}}"#)?;
//! assert_eq!(doc.info.unwrap().title.as_deref(), Some("Pet Store"));
//! ```

mod lenient;
mod types;

pub use types::*;
