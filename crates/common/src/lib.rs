//! Common types and utilities for openapi-llms
//!
//! This crate contains the shared error type, the configuration model and
//! spec source resolution used across the parser, generator, server and CLI
//! components.

mod config;

pub use config::{
    LlmsConfig, SourceConfig, SourceType, SpecSource, DEFAULT_CONTENT_TYPE, FULL_ROUTE, LLMS_ROUTE,
};

use thiserror::Error;

/// Errors that can occur while loading a spec or generating llms.txt
#[derive(Error, Debug)]
pub enum LlmsError {
    /// Source configuration is inconsistent (raised before any I/O)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading the spec file or fetching the spec URL failed
    #[error("Failed to load OpenAPI spec from {location}: {cause}")]
    Load { location: String, cause: String },

    /// Input is not a JSON object
    #[error("Parse error: {0}")]
    Parse(String),

    /// Envelope template failed to render
    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LlmsError {
    /// Build a load error naming the failed path or URL
    pub fn load(location: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        LlmsError::Load {
            location: location.into(),
            cause: cause.to_string(),
        }
    }
}

/// Result type for openapi-llms operations
pub type Result<T> = std::result::Result<T, LlmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_names_source() {
        let err = LlmsError::load("./openapi.json", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "Failed to load OpenAPI spec from ./openapi.json: No such file or directory"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = LlmsError::Config("source.file is required".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: source.file is required"
        );
    }
}
