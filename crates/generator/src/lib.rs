//! Markdown generation for llms.txt
//!
//! This crate turns a parsed OpenAPI document into a single Markdown
//! document suited for language models (`llms.txt`).
//!
//! Sections are emitted in a fixed order and skipped when their data is
//! absent:
//! - title, description, contact, license, external docs
//! - servers, security, tags
//! - endpoints (paths), webhooks
//! - components

mod components;
mod converter;
mod endpoint;
mod markdown;
mod schema;
mod templates;

pub use converter::{MarkdownConverter, DEFAULT_TITLE};
pub use endpoint::{Endpoint, EndpointKind};
pub use schema::{ref_name, schema_type};

use openapi_llms_common::{LlmsConfig, LlmsError, Result};
use openapi_llms_parser::OpenApiDocument;
use std::fs;
use std::path::Path;
use tera::Tera;
use tracing::debug;

/// Raw text placed around the generated Markdown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    pub header: Option<String>,
    pub footer: Option<String>,
}

impl Envelope {
    pub fn new(header: Option<String>, footer: Option<String>) -> Self {
        Self {
            header: header.filter(|h| !h.trim().is_empty()),
            footer: footer.filter(|f| !f.trim().is_empty()),
        }
    }
}

impl From<&LlmsConfig> for Envelope {
    fn from(config: &LlmsConfig) -> Self {
        Self::new(config.header.clone(), config.footer.clone())
    }
}

/// llms.txt generator
///
/// Converts an OpenAPI document to Markdown and wraps it with the
/// configured header and footer.
pub struct LlmsGenerator {
    envelope: Envelope,
    tera: Tera,
}

impl LlmsGenerator {
    /// Create a new generator with the given envelope
    pub fn new(envelope: Envelope) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { envelope, tera })
    }

    /// Generator configured from `header`/`footer` of an [`LlmsConfig`]
    pub fn from_config(config: &LlmsConfig) -> Result<Self> {
        Self::new(Envelope::from(config))
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Generate the full llms.txt document
    pub fn generate(&self, document: &OpenApiDocument) -> Result<String> {
        let body = MarkdownConverter::new(document).convert();
        self.render(&body)
    }

    /// Wrap already generated Markdown with the envelope
    pub fn render(&self, body: &str) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("header", &self.envelope.header);
        context.insert("body", body);
        context.insert("footer", &self.envelope.footer);

        self.tera
            .render(templates::LLMS_TEMPLATE, &context)
            .map_err(|e| LlmsError::Render(format!("Template error: {:?}", e)))
    }

    /// Generate the document and write it to a file
    pub fn generate_to_file(&self, document: &OpenApiDocument, output: &Path) -> Result<()> {
        let rendered = self.generate(document)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LlmsError::Render(format!("Failed to create output directory: {}", e))
            })?;
        }

        fs::write(output, &rendered).map_err(|e| {
            LlmsError::Render(format!("Failed to write {}: {}", output.display(), e))
        })?;

        debug!(path = %output.display(), bytes = rendered.len(), "Wrote llms.txt");
        Ok(())
    }
}

/// Convert a document to Markdown without header or footer (convenience function)
pub fn generate_markdown(document: &OpenApiDocument) -> String {
    MarkdownConverter::new(document).convert()
}
