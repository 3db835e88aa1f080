//! Spec loaders
//!
//! Reads an OpenAPI document from a local file or fetches it over HTTP and
//! parses it as JSON. Nothing is cached: every call performs the read or
//! request again.

use crate::openapi::OpenApiDocument;
use openapi_llms_common::{LlmsError, Result, SpecSource};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Read and parse a JSON spec file
pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let location = path.display().to_string();
    debug!(path = %location, "Reading OpenAPI spec file");

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LlmsError::load(&location, e))?;

    serde_json::from_str(&content)
        .map_err(|e| LlmsError::load(&location, format!("invalid JSON: {}", e)))
}

/// Fetch and parse a JSON spec from a URL
pub async fn load_from_url(client: &reqwest::Client, url: &str) -> Result<Value> {
    debug!(%url, "Fetching OpenAPI spec");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LlmsError::load(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LlmsError::load(url, format!("HTTP {}", status)));
    }

    let body = response
        .text()
        .await
        .map_err(|e| LlmsError::load(url, e))?;

    serde_json::from_str(&body).map_err(|e| LlmsError::load(url, format!("invalid JSON: {}", e)))
}

/// Loads OpenAPI documents from resolved spec sources
#[derive(Debug, Clone, Default)]
pub struct SpecLoader {
    client: reqwest::Client,
}

impl SpecLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing HTTP client for URL sources
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Load the raw JSON value from a source
    pub async fn load_value(&self, source: &SpecSource) -> Result<Value> {
        match source {
            SpecSource::File(path) => load_from_file(path).await,
            SpecSource::Url(url) => load_from_url(&self.client, url).await,
        }
    }

    /// Load and model the document from a source
    pub async fn load(&self, source: &SpecSource) -> Result<OpenApiDocument> {
        let value = self.load_value(source).await?;
        OpenApiDocument::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"info": {{"title": "Local"}}}}"#).unwrap();

        let value = load_from_file(file.path()).await.unwrap();
        assert_eq!(value["info"]["title"], "Local");
    }

    #[tokio::test]
    async fn test_missing_file_names_path() {
        let err = load_from_file("/definitely/not/here/openapi.json")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmsError::Load { .. }));
        assert!(err.to_string().contains("/definitely/not/here/openapi.json"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "openapi: 3.0.0").unwrap();

        let err = load_from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }
}
