//! Integration tests for the spec loaders

use openapi_llms_common::{LlmsError, SpecSource};
use openapi_llms_parser::{load_from_url, SpecLoader};
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_load_from_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"info": {"title": "Remote"}})),
        )
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/openapi.json", server.uri());
    let value = load_from_url(&client, &url).await.unwrap();

    assert_eq!(value["info"]["title"], "Remote");
}

#[tokio::test]
async fn test_http_error_status_is_load_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing.json", server.uri());
    let err = load_from_url(&reqwest::Client::new(), &url)
        .await
        .unwrap_err();

    match err {
        LlmsError::Load { location, cause } => {
            assert_eq!(location, url);
            assert!(cause.contains("404"), "unexpected cause: {}", cause);
        }
        other => panic!("expected load error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_spec_loader_dispatches_on_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"info": {{"title": "From File", "version": "2.1"}}}}"#).unwrap();

    let loader = SpecLoader::new();
    let doc = loader
        .load(&SpecSource::File(file.path().to_path_buf()))
        .await
        .unwrap();

    let info = doc.info.unwrap();
    assert_eq!(info.title.as_deref(), Some("From File"));
    assert_eq!(info.version.as_deref(), Some("2.1"));
}

#[tokio::test]
async fn test_spec_loader_rejects_non_object_root() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2, 3]"))
        .mount(&server)
        .await;

    let loader = SpecLoader::new();
    let err = loader
        .load(&SpecSource::Url(format!("{}/spec.json", server.uri())))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmsError::Parse(_)));
}
