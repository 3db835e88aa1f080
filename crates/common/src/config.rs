//! llms.txt configuration
//!
//! The configuration names where the OpenAPI document comes from and how the
//! generated Markdown is served. It can be written as YAML or JSON:
//!
//! ```yaml
//! source:
//!   type: url
//!   url: /openapi.json
//! contentType: text/markdown; charset=utf-8
//! header: "> Generated from the public API"
//! footer: "See https://example.com/docs for more."
//! ```

use crate::{LlmsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Content type used when the configuration does not set one
pub const DEFAULT_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Route serving the generated document
pub const LLMS_ROUTE: &str = "/llms.txt";

/// Alias route, permanently redirected to [`LLMS_ROUTE`]
pub const FULL_ROUTE: &str = "/llms-full.txt";

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmsConfig {
    /// Where the OpenAPI document is loaded from
    #[serde(default)]
    pub source: SourceConfig,

    /// Response content type
    #[serde(default)]
    pub content_type: Option<String>,

    /// Raw text prepended to the generated Markdown
    #[serde(default)]
    pub header: Option<String>,

    /// Raw text appended to the generated Markdown
    #[serde(default)]
    pub footer: Option<String>,
}

/// Spec source settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Source kind; inferred from `file`/`url` when omitted
    #[serde(rename = "type", default)]
    pub source_type: Option<SourceType>,

    /// Local file path
    #[serde(default)]
    pub file: Option<String>,

    /// Absolute URL, or a path resolved against the serving host
    #[serde(default)]
    pub url: Option<String>,
}

/// Source kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    File,
    Url,
}

/// A validated, fully resolved spec location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// Local file
    File(PathBuf),

    /// Absolute HTTP(S) URL
    Url(String),
}

impl fmt::Display for SpecSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecSource::File(path) => write!(f, "{}", path.display()),
            SpecSource::Url(url) => write!(f, "{}", url),
        }
    }
}

impl SpecSource {
    /// Detect the source kind from a single CLI argument
    ///
    /// Anything starting with `http://` or `https://` is a URL, everything
    /// else is a file path.
    pub fn detect(spec: &str) -> Self {
        if is_absolute_url(spec) {
            SpecSource::Url(spec.to_string())
        } else {
            SpecSource::File(PathBuf::from(spec))
        }
    }
}

impl LlmsConfig {
    /// Load configuration from a YAML or JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            LlmsError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml_str(&content).map_err(|e| {
            LlmsError::Config(format!("Failed to parse config from {:?}: {}", path, e))
        })
    }

    /// Parse configuration from a YAML (or JSON) string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Content type for responses, falling back to [`DEFAULT_CONTENT_TYPE`]
    pub fn content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

impl SourceConfig {
    /// Source reading a local file
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            source_type: Some(SourceType::File),
            file: Some(path.into()),
            url: None,
        }
    }

    /// Source fetching a URL
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            source_type: Some(SourceType::Url),
            file: None,
            url: Some(url.into()),
        }
    }

    /// Validate the source and resolve it to a concrete location
    ///
    /// `base` is the serving origin (e.g. `http://localhost:3000`) used to
    /// resolve a relative `url`. No I/O happens here.
    pub fn resolve(&self, base: Option<&str>) -> Result<SpecSource> {
        let file = non_empty(self.file.as_deref());
        let url = non_empty(self.url.as_deref());

        let source_type = match (self.source_type, file, url) {
            (Some(t), _, _) => t,
            (None, Some(_), _) => SourceType::File,
            (None, None, Some(_)) => SourceType::Url,
            (None, None, None) => {
                return Err(LlmsError::Config(
                    "Either source.file or source.url must be set".to_string(),
                ))
            }
        };

        match source_type {
            SourceType::File => file
                .map(|f| SpecSource::File(PathBuf::from(f)))
                .ok_or_else(|| {
                    LlmsError::Config("source.file is required when source.type is \"file\"".into())
                }),
            SourceType::Url => {
                let url = url.ok_or_else(|| {
                    LlmsError::Config("source.url is required when source.type is \"url\"".into())
                })?;
                resolve_url(url, base).map(SpecSource::Url)
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn is_absolute_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn resolve_url(url: &str, base: Option<&str>) -> Result<String> {
    if is_absolute_url(url) {
        return Url::parse(url)
            .map(String::from)
            .map_err(|e| LlmsError::Config(format!("Invalid source.url {}: {}", url, e)));
    }

    let base = base.ok_or_else(|| {
        LlmsError::Config(format!(
            "source.url {} is relative and no base URL is available",
            url
        ))
    })?;

    let base = Url::parse(base)
        .map_err(|e| LlmsError::Config(format!("Invalid base URL {}: {}", base, e)))?;

    base.join(url)
        .map(String::from)
        .map_err(|e| LlmsError::Config(format!("Cannot resolve {} against {}: {}", url, base, e)))
}
