//! Integration test for the OpenAPI document model

use openapi_llms_parser::openapi::OpenApiDocument;

#[test]
fn test_parse_petstore_style_openapi() {
    let openapi_json = r##"{
        "openapi": "3.1.0",
        "info": {
            "title": "Pet Store",
            "version": "1.0.0",
            "description": "A sample API",
            "contact": {"name": "API Team", "email": "api@example.com"},
            "license": {"name": "MIT", "url": "https://opensource.org/licenses/MIT"}
        },
        "servers": [
            {
                "url": "https://{env}.example.com/v1",
                "variables": {
                    "env": {"default": "api", "description": "Environment", "enum": ["api", "staging"]}
                }
            }
        ],
        "tags": [{"name": "pets", "description": "Everything about pets"}],
        "paths": {
            "/pets/{petId}": {
                "parameters": [{"name": "petId", "in": "path", "required": true}],
                "delete": {"summary": "Delete a pet", "deprecated": true},
                "get": {
                    "operationId": "getPet",
                    "tags": ["pets"],
                    "parameters": [
                        {"name": "petId", "in": "path", "required": true, "schema": {"type": "string"}}
                    ],
                    "responses": {
                        "404": {"description": "Not found"},
                        "200": {
                            "description": "A pet",
                            "headers": {"X-Rate-Limit": {"description": "Calls left", "schema": {"type": "integer"}}},
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}}
                        }
                    }
                }
            },
            "/pets": {
                "post": {
                    "summary": "Create a pet",
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}}
                    },
                    "callbacks": {
                        "onCreated": {
                            "{$request.body#/callbackUrl}": {
                                "post": {"summary": "Pet created"}
                            }
                        }
                    }
                }
            }
        },
        "webhooks": {
            "newPet": {"post": {"summary": "New pet"}}
        },
        "components": {
            "schemas": {
                "Pet": {"type": "object", "properties": {"name": {"type": "string"}}}
            },
            "securitySchemes": {
                "bearerAuth": {"type": "http", "scheme": "bearer", "bearerFormat": "JWT"}
            }
        }
    }"##;

    let doc = OpenApiDocument::from_json(openapi_json).unwrap();

    assert_eq!(doc.openapi.as_deref(), Some("3.1.0"));
    let info = doc.info.as_ref().unwrap();
    assert_eq!(info.title.as_deref(), Some("Pet Store"));
    assert_eq!(
        info.contact.as_ref().unwrap().email.as_deref(),
        Some("api@example.com")
    );

    let server = &doc.servers[0];
    assert_eq!(server.variables["env"].default.as_deref(), Some("api"));
    assert_eq!(server.variables["env"].enum_values, vec!["api", "staging"]);

    // Source order is kept, not sorted
    let paths: Vec<&str> = doc.paths.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["/pets/{petId}", "/pets"]);

    let (method, get) = doc.paths["/pets/{petId}"]
        .operations()
        .nth(1)
        .expect("second operation");
    assert_eq!(method, "get");
    assert_eq!(get.operation_id.as_deref(), Some("getPet"));
    let statuses: Vec<&str> = get.responses.keys().map(String::as_str).collect();
    assert_eq!(statuses, vec!["404", "200"]);
    assert_eq!(
        get.responses["200"].headers["X-Rate-Limit"].description.as_deref(),
        Some("Calls left")
    );

    let (_, delete) = doc.paths["/pets/{petId}"].operations().next().unwrap();
    assert!(delete.is_deprecated());

    let (_, post) = doc.paths["/pets"].operations().next().unwrap();
    assert!(post.request_body.as_ref().unwrap().is_required());
    let callback = &post.callbacks["onCreated"]["{$request.body#/callbackUrl}"];
    assert_eq!(callback.operations().count(), 1);

    assert_eq!(doc.operation_count(), 3);
    assert_eq!(doc.webhook_operation_count(), 1);

    let components = doc.components.as_ref().unwrap();
    assert!(components.schemas.contains_key("Pet"));
    assert_eq!(
        components.security_schemes["bearerAuth"].bearer_format.as_deref(),
        Some("JWT")
    );
}

#[test]
fn test_parse_swagger_2_document() {
    let swagger_json = r##"{
        "swagger": "2.0",
        "info": {"title": "Legacy", "version": "0.9"},
        "host": "legacy.example.com",
        "basePath": "/api",
        "schemes": ["https"],
        "paths": {
            "/items": {
                "get": {
                    "parameters": [{"name": "limit", "in": "query", "type": "integer"}],
                    "responses": {
                        "200": {"description": "OK", "schema": {"type": "array", "items": {"$ref": "#/definitions/Item"}}}
                    }
                }
            }
        },
        "definitions": {"Item": {"type": "object"}},
        "securityDefinitions": {"key": {"type": "apiKey", "in": "header", "name": "X-Key"}}
    }"##;

    let doc = OpenApiDocument::from_json(swagger_json).unwrap();

    assert_eq!(doc.swagger.as_deref(), Some("2.0"));
    assert_eq!(doc.host.as_deref(), Some("legacy.example.com"));
    assert_eq!(doc.base_path.as_deref(), Some("/api"));
    assert_eq!(doc.schemes, vec!["https"]);
    assert!(doc.definitions.contains_key("Item"));
    assert_eq!(
        doc.security_definitions["key"].name.as_deref(),
        Some("X-Key")
    );

    let (_, get) = doc.paths["/items"].operations().next().unwrap();
    assert_eq!(get.parameters[0].param_type.as_deref(), Some("integer"));
    assert!(get.responses["200"].schema.is_some());
}
