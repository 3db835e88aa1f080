//! Components section
//!
//! Each subsection is one row of [`COMPONENT_SECTIONS`]: a title and a
//! renderer producing one entry per component, in source order. Empty
//! subsections are dropped, and the whole section disappears when every
//! subsection is empty.

use crate::endpoint::{
    header_type, parameter_type, request_body_details, response_description, response_lists,
};
use crate::markdown::{blocks, heading, json_block, yes_no};
use indexmap::IndexMap;
use openapi_llms_parser::openapi::{
    Components, Example, Header, Link, OpenApiDocument, Parameter, Response, SecurityScheme,
};

type EntryRenderer = fn(&OpenApiDocument) -> Vec<(String, String)>;

/// Subsection title and the renderer yielding `(name, body)` entries
const COMPONENT_SECTIONS: &[(&str, EntryRenderer)] = &[
    ("Schemas", schemas),
    ("Security Schemes", security_schemes),
    ("Responses", responses),
    ("Parameters", parameters),
    ("Examples", examples),
    ("Request Bodies", request_bodies),
    ("Headers", headers),
    ("Links", links),
];

/// Render the `## Components` section, or an empty string
pub(crate) fn components_section(doc: &OpenApiDocument) -> String {
    let subsections: Vec<String> = COMPONENT_SECTIONS
        .iter()
        .filter_map(|(title, render)| {
            let entries = render(doc);
            if entries.is_empty() {
                return None;
            }
            let entries = entries
                .into_iter()
                .map(|(name, body)| blocks([heading(4, &name), body]));
            Some(blocks(std::iter::once(heading(3, title)).chain(entries)))
        })
        .collect();

    if subsections.is_empty() {
        return String::new();
    }

    blocks(std::iter::once(heading(2, "Components")).chain(subsections))
}

fn entries<T>(map: &IndexMap<String, T>, render: impl Fn(&T) -> String) -> Vec<(String, String)> {
    map.iter()
        .map(|(name, item)| (name.clone(), render(item)))
        .collect()
}

fn component_map<T>(
    doc: &OpenApiDocument,
    select: impl Fn(&Components) -> &IndexMap<String, T>,
    render: impl Fn(&T) -> String,
) -> Vec<(String, String)> {
    doc.components
        .as_ref()
        .map(|c| entries(select(c), render))
        .unwrap_or_default()
}

/// `- **Label:** value` lines for the present fields
fn field_list(fields: &[(&str, Option<String>)]) -> String {
    fields
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .map(|value| format!("- **{}:** {}", label, value))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn code(value: Option<&str>) -> Option<String> {
    value.map(|v| format!("`{}`", v))
}

fn schemas(doc: &OpenApiDocument) -> Vec<(String, String)> {
    // Swagger 2.0 keeps schemas under `definitions`
    match doc.components.as_ref().map(|c| &c.schemas) {
        Some(schemas) if !schemas.is_empty() => entries(schemas, json_block),
        _ => entries(&doc.definitions, json_block),
    }
}

fn security_scheme(scheme: &SecurityScheme) -> String {
    let scheme_type = scheme.scheme_type.as_deref().unwrap_or_default();
    let mut fields = vec![
        ("Type", scheme.scheme_type.clone()),
        ("Description", scheme.description.clone()),
    ];

    match scheme_type {
        "http" => {
            fields.push(("Scheme", scheme.scheme.clone()));
            fields.push(("Bearer Format", scheme.bearer_format.clone()));
        }
        "apiKey" => {
            fields.push(("In", scheme.location.clone()));
            fields.push(("Name", code(scheme.name.as_deref())));
        }
        "openIdConnect" => {
            fields.push(("OpenID Connect URL", scheme.open_id_connect_url.clone()));
        }
        _ => {}
    }

    field_list(&fields)
}

fn security_schemes(doc: &OpenApiDocument) -> Vec<(String, String)> {
    match doc.components.as_ref().map(|c| &c.security_schemes) {
        Some(schemes) if !schemes.is_empty() => entries(schemes, security_scheme),
        _ => entries(&doc.security_definitions, security_scheme),
    }
}

fn responses(doc: &OpenApiDocument) -> Vec<(String, String)> {
    component_map(
        doc,
        |c| &c.responses,
        |response: &Response| {
            blocks([
                response_description(response).unwrap_or_default(),
                response_lists(response),
            ])
        },
    )
}

fn parameter(param: &Parameter) -> String {
    field_list(&[
        ("In", param.location.clone()),
        ("Type", Some(parameter_type(param))),
        ("Required", Some(yes_no(param.is_required()).to_string())),
        ("Description", param.description.clone()),
    ])
}

fn parameters(doc: &OpenApiDocument) -> Vec<(String, String)> {
    component_map(doc, |c| &c.parameters, parameter)
}

fn example(example: &Example) -> String {
    blocks([
        field_list(&[
            ("Summary", example.summary.clone()),
            ("Description", example.description.clone()),
            ("External Value", example.external_value.clone()),
        ]),
        example.value.as_ref().map(json_block).unwrap_or_default(),
    ])
}

fn examples(doc: &OpenApiDocument) -> Vec<(String, String)> {
    component_map(doc, |c| &c.examples, example)
}

fn request_bodies(doc: &OpenApiDocument) -> Vec<(String, String)> {
    component_map(doc, |c| &c.request_bodies, request_body_details)
}

fn header(header: &Header) -> String {
    field_list(&[
        ("Type", header_type(header)),
        ("Required", header.required.map(|r| yes_no(r).to_string())),
        ("Description", header.description.clone()),
    ])
}

fn headers(doc: &OpenApiDocument) -> Vec<(String, String)> {
    component_map(doc, |c| &c.headers, header)
}

fn link(link: &Link) -> String {
    field_list(&[
        ("Operation ID", code(link.operation_id.as_deref())),
        ("Operation Ref", code(link.operation_ref.as_deref())),
        ("Description", link.description.clone()),
    ])
}

fn links(doc: &OpenApiDocument) -> Vec<(String, String)> {
    component_map(doc, |c| &c.links, link)
}
