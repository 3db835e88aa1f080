//! Integration test for llms.txt generation

use openapi_llms_common::LlmsConfig;
use openapi_llms_generator::{generate_markdown, schema_type, Envelope, LlmsGenerator};
use openapi_llms_parser::OpenApiDocument;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

const PET_STORE: &str = r#"{"info":{"title":"Pet Store","version":"1.0"},"paths":{"/pets":{"get":{"summary":"List pets","responses":{"200":{"description":"OK"}}}}}}"#;

#[test]
fn test_generate_pet_store() {
    let doc = OpenApiDocument::from_json(PET_STORE).unwrap();
    let markdown = generate_markdown(&doc);

    let expected = "# Pet Store (v1.0)

## Endpoints

### List pets

**GET** `/pets`

#### Responses

**200**: OK";
    assert_eq!(markdown, expected);
}

#[test]
fn test_title_only_document() {
    let doc = OpenApiDocument::from_value(json!({
        "info": {"title": "Only Title"},
        "paths": {},
        "webhooks": {},
        "components": {"schemas": {}},
        "servers": [],
        "tags": []
    }))
    .unwrap();

    assert_eq!(generate_markdown(&doc), "# Only Title");
}

#[test]
fn test_paths_follow_source_order() {
    let doc = OpenApiDocument::from_json(
        r#"{
            "info": {"title": "Order"},
            "paths": {
                "/zebra": {"post": {"summary": "Z post"}, "get": {"summary": "Z get"}},
                "/apple": {"get": {"summary": "A get"}}
            }
        }"#,
    )
    .unwrap();
    let markdown = generate_markdown(&doc);

    let z_post = markdown.find("### Z post").unwrap();
    let z_get = markdown.find("### Z get").unwrap();
    let a_get = markdown.find("### A get").unwrap();
    assert!(z_post < z_get && z_get < a_get, "unexpected order:\n{}", markdown);
}

#[test]
fn test_section_order_is_fixed() {
    let doc = OpenApiDocument::from_json(
        r##"{
            "components": {"schemas": {"Pet": {"type": "object"}}},
            "webhooks": {"ping": {"post": {"summary": "Ping"}}},
            "paths": {"/pets": {"get": {"summary": "List"}}},
            "tags": [{"name": "pets"}],
            "security": [{"key": []}],
            "servers": [{"url": "https://api.io"}],
            "externalDocs": {"url": "https://docs.io"},
            "info": {
                "license": {"name": "MIT"},
                "contact": {"name": "Team"},
                "description": "About",
                "title": "Ordered"
            }
        }"##,
    )
    .unwrap();
    let markdown = generate_markdown(&doc);

    let markers = [
        "# Ordered",
        "About",
        "## Contact",
        "## License",
        "## External Documentation",
        "## Servers",
        "## Security",
        "## Tags",
        "## Endpoints",
        "## Webhooks",
        "## Components",
    ];
    let positions: Vec<usize> = markers
        .iter()
        .map(|m| markdown.find(m).unwrap_or_else(|| panic!("missing {}", m)))
        .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "sections out of order:\n{}",
        markdown
    );
}

#[test]
fn test_malformed_fields_never_fail() {
    let doc = OpenApiDocument::from_value(json!({
        "info": "not an object",
        "servers": {"url": "wrong shape"},
        "security": "none",
        "tags": [null, 3, {"name": "ok"}],
        "paths": {"/x": {"get": "not an operation", "post": {"parameters": "bad", "responses": []}}},
        "components": {"schemas": null, "securitySchemes": {"a": "b"}}
    }))
    .unwrap();

    let markdown = generate_markdown(&doc);
    assert_eq!(
        markdown,
        "# API Documentation\n\n## Tags\n\n### ok\n\n## Endpoints\n\n### POST /x\n\n**POST** `/x`"
    );
}

#[test]
fn test_schema_type_resolution() {
    assert_eq!(
        schema_type(&json!({"type": "array", "items": {"type": "array", "items": {"type": "string"}}})),
        "array[array[string]]"
    );
    assert_eq!(schema_type(&json!({"$ref": "#/components/schemas/Pet"})), "Pet");
}

#[test]
fn test_envelope_wraps_markdown() {
    let doc = OpenApiDocument::from_json(r#"{"info": {"title": "Wrapped"}}"#).unwrap();
    let generator = LlmsGenerator::new(Envelope::new(
        Some("> Generated for LLMs\n".to_string()),
        Some("Contact us for more.".to_string()),
    ))
    .unwrap();

    let rendered = generator.generate(&doc).unwrap();
    assert_eq!(
        rendered,
        "> Generated for LLMs\n\n# Wrapped\n\nContact us for more."
    );
}

#[test]
fn test_envelope_is_optional() {
    let doc = OpenApiDocument::from_json(r#"{"info": {"title": "Plain"}}"#).unwrap();
    let config = LlmsConfig {
        header: Some("   ".to_string()),
        ..Default::default()
    };
    let generator = LlmsGenerator::from_config(&config).unwrap();

    assert_eq!(generator.envelope(), &Envelope::default());
    assert_eq!(generator.generate(&doc).unwrap(), "# Plain");
}

#[test]
fn test_generated_html_is_not_escaped() {
    let doc = OpenApiDocument::from_json(
        r#"{"info": {"title": "A <b>bold</b> & \"quoted\" API"}}"#,
    )
    .unwrap();
    let generator = LlmsGenerator::new(Envelope::default()).unwrap();

    assert_eq!(
        generator.generate(&doc).unwrap(),
        "# A <b>bold</b> & \"quoted\" API"
    );
}

#[test]
fn test_generate_to_file() {
    let doc = OpenApiDocument::from_json(PET_STORE).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("public").join("llms.txt");

    let generator = LlmsGenerator::new(Envelope::default()).unwrap();
    let result = generator.generate_to_file(&doc, &output);
    assert!(result.is_ok(), "Generation failed: {:?}", result);

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("# Pet Store (v1.0)"));
    assert_eq!(written, generate_markdown(&doc));
}
