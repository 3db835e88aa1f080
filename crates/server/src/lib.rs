//! llms.txt HTTP routes
//!
//! Exposes the generator behind two routes that can be mounted into any
//! axum application:
//! - `GET /llms.txt` loads the configured spec, converts it and returns Markdown
//! - `GET /llms-full.txt` permanently redirects to `/llms.txt`
//!
//! The spec is reloaded on every request; nothing is cached.

mod error;

pub use error::ServeError;

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use openapi_llms_common::{LlmsConfig, Result, DEFAULT_CONTENT_TYPE, FULL_ROUTE, LLMS_ROUTE};
use openapi_llms_generator::LlmsGenerator;
use openapi_llms_parser::SpecLoader;
use std::sync::Arc;
use tracing::{error, info};

/// Shared state of the llms.txt routes
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<LlmsConfig>,
    pub loader: SpecLoader,
    pub generator: Arc<LlmsGenerator>,
}

impl AppState {
    pub fn new(config: LlmsConfig) -> Result<Self> {
        Self::with_client(config, reqwest::Client::new())
    }

    /// State reusing an existing HTTP client for URL sources
    pub fn with_client(config: LlmsConfig, client: reqwest::Client) -> Result<Self> {
        let generator = LlmsGenerator::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            loader: SpecLoader::with_client(client),
            generator: Arc::new(generator),
        })
    }
}

/// Router with the llms.txt routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(LLMS_ROUTE, get(llms_txt))
        .route(FULL_ROUTE, get(llms_full_txt))
        .with_state(state)
}

/// Bind `addr` and serve the llms.txt routes until the process is stopped
pub async fn serve(config: LlmsConfig, addr: &str) -> Result<()> {
    let app = router(AppState::new(config)?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("llms.txt server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn llms_txt(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> std::result::Result<impl IntoResponse, ServeError> {
    let base = request_base(&headers, &uri);
    let source = state.config.source.resolve(base.as_deref())?;

    let document = state.loader.load(&source).await.map_err(|e| {
        error!(%source, error = %e, "Failed to load OpenAPI spec");
        e
    })?;
    let body = state.generator.generate(&document)?;

    info!(%source, bytes = body.len(), "Served llms.txt");
    Ok(([(header::CONTENT_TYPE, content_type(&state.config))], body))
}

async fn llms_full_txt() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, LLMS_ROUTE)],
    )
}

fn content_type(config: &LlmsConfig) -> HeaderValue {
    HeaderValue::from_str(config.content_type())
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE))
}

/// Origin of the incoming request, used to resolve a relative spec URL
///
/// HTTP/2 requests carry the host in the URI authority instead of `Host`.
fn request_base(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .or_else(|| uri.authority().map(|a| a.as_str()))?;
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| uri.scheme_str())
        .unwrap_or("http");

    Some(format!("{}://{}", scheme, host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_base_from_host() {
        let uri = Uri::from_static("/llms.txt");
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
        assert_eq!(
            request_base(&headers, &uri).as_deref(),
            Some("http://localhost:3000")
        );

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        assert_eq!(
            request_base(&headers, &uri).as_deref(),
            Some("https://localhost:3000")
        );
    }

    #[test]
    fn test_request_base_from_uri_authority() {
        let uri = Uri::from_static("https://api.example.com:8443/llms.txt");
        assert_eq!(
            request_base(&HeaderMap::new(), &uri).as_deref(),
            Some("https://api.example.com:8443")
        );
    }

    #[test]
    fn test_request_base_without_host() {
        let uri = Uri::from_static("/llms.txt");
        assert!(request_base(&HeaderMap::new(), &uri).is_none());
    }

    #[test]
    fn test_invalid_content_type_falls_back() {
        let config = LlmsConfig {
            content_type: Some("text/plain\n".to_string()),
            ..Default::default()
        };
        assert_eq!(content_type(&config), DEFAULT_CONTENT_TYPE);
    }
}
