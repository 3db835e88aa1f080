//! OpenAPI to Markdown conversion
//!
//! The document is rendered as a fixed sequence of sections. Each section is
//! a pure function of the document returning Markdown, or an empty string
//! when its data is absent; empty sections are dropped before joining.

use crate::components::components_section;
use crate::endpoint::{path_item_endpoints, security_options, EndpointKind};
use crate::markdown::{blocks, heading, link};
use openapi_llms_parser::openapi::{OpenApiDocument, Server};
use tracing::{debug, trace};

/// Title used when `info.title` is missing
pub const DEFAULT_TITLE: &str = "API Documentation";

type Section = fn(&OpenApiDocument) -> String;

/// Section order of the generated document
const SECTIONS: &[(&str, Section)] = &[
    ("title", title),
    ("description", description),
    ("contact", contact),
    ("license", license),
    ("external docs", external_docs),
    ("servers", servers),
    ("security", security),
    ("tags", tags),
    ("paths", paths),
    ("webhooks", webhooks),
    ("components", components_section),
];

/// Converts one OpenAPI document into a Markdown string
///
/// Conversion is total over the lenient document model and holds no state,
/// so repeated calls return identical output.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownConverter<'a> {
    document: &'a OpenApiDocument,
}

impl<'a> MarkdownConverter<'a> {
    pub fn new(document: &'a OpenApiDocument) -> Self {
        Self { document }
    }

    /// The document being converted
    pub fn document(&self) -> &'a OpenApiDocument {
        self.document
    }

    /// Render every section in order and join them with blank lines
    pub fn convert(&self) -> String {
        let sections: Vec<String> = SECTIONS
            .iter()
            .filter_map(|(name, render)| {
                let rendered = render(self.document);
                if rendered.is_empty() {
                    trace!(section = *name, "Section skipped");
                    None
                } else {
                    Some(rendered)
                }
            })
            .collect();

        debug!(sections = sections.len(), "Converted OpenAPI document to Markdown");
        sections.join("\n\n")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn title(doc: &OpenApiDocument) -> String {
    let info = doc.info.as_ref();
    let title = non_empty(info.and_then(|i| i.title.as_deref())).unwrap_or(DEFAULT_TITLE);

    match non_empty(info.and_then(|i| i.version.as_deref())) {
        Some(version) => format!("# {} (v{})", title, version),
        None => format!("# {}", title),
    }
}

fn description(doc: &OpenApiDocument) -> String {
    non_empty(doc.info.as_ref().and_then(|i| i.description.as_deref()))
        .map(str::to_string)
        .unwrap_or_default()
}

fn contact(doc: &OpenApiDocument) -> String {
    let Some(contact) = doc.info.as_ref().and_then(|i| i.contact.as_ref()) else {
        return String::new();
    };

    let mut lines = Vec::new();
    if let Some(name) = non_empty(contact.name.as_deref()) {
        lines.push(format!("- **Name:** {}", name));
    }
    if let Some(email) = non_empty(contact.email.as_deref()) {
        lines.push(format!("- **Email:** [{}](mailto:{})", email, email));
    }
    if let Some(url) = non_empty(contact.url.as_deref()) {
        lines.push(format!("- **URL:** [{}]({})", url, url));
    }

    if lines.is_empty() {
        return String::new();
    }
    format!("## Contact\n\n{}", lines.join("\n"))
}

fn license(doc: &OpenApiDocument) -> String {
    let Some(license) = doc.info.as_ref().and_then(|i| i.license.as_ref()) else {
        return String::new();
    };

    let url = non_empty(license.url.as_deref());
    let label = non_empty(license.name.as_deref())
        .or_else(|| non_empty(license.identifier.as_deref()))
        .or(url);

    match label {
        Some(label) => format!("## License\n\n{}", link(label, url)),
        None => String::new(),
    }
}

fn external_docs(doc: &OpenApiDocument) -> String {
    let Some(docs) = doc.external_docs.as_ref() else {
        return String::new();
    };

    let url = non_empty(docs.url.as_deref());
    match non_empty(docs.description.as_deref()).or(url) {
        Some(label) => format!("## External Documentation\n\n{}", link(label, url)),
        None => String::new(),
    }
}

fn server_entry(server: &Server) -> Option<String> {
    let url = non_empty(server.url.as_deref())?;

    let mut lines = vec![match non_empty(server.description.as_deref()) {
        Some(description) => format!("- `{}`: {}", url, description),
        None => format!("- `{}`", url),
    }];

    for (name, variable) in &server.variables {
        let mut line = format!("  - `{}`", name);
        if let Some(description) = non_empty(variable.description.as_deref()) {
            line.push_str(&format!(": {}", description));
        }

        let mut notes = Vec::new();
        if let Some(default) = variable.default.as_deref() {
            notes.push(format!("default: `{}`", default));
        }
        if !variable.enum_values.is_empty() {
            let options: Vec<String> = variable
                .enum_values
                .iter()
                .map(|v| format!("`{}`", v))
                .collect();
            notes.push(format!("one of: {}", options.join(", ")));
        }
        if !notes.is_empty() {
            line.push_str(&format!(" ({})", notes.join("; ")));
        }

        lines.push(line);
    }

    Some(lines.join("\n"))
}

/// Swagger 2.0 `schemes` + `host` + `basePath` as server URLs
fn legacy_server_urls(doc: &OpenApiDocument) -> Vec<String> {
    let Some(host) = non_empty(doc.host.as_deref()) else {
        return Vec::new();
    };
    let base_path = doc.base_path.as_deref().unwrap_or_default();

    if doc.schemes.is_empty() {
        return vec![format!("https://{}{}", host, base_path)];
    }
    doc.schemes
        .iter()
        .map(|scheme| format!("{}://{}{}", scheme, host, base_path))
        .collect()
}

fn servers(doc: &OpenApiDocument) -> String {
    let entries: Vec<String> = if doc.servers.is_empty() {
        legacy_server_urls(doc)
            .into_iter()
            .map(|url| format!("- `{}`", url))
            .collect()
    } else {
        doc.servers.iter().filter_map(server_entry).collect()
    };

    if entries.is_empty() {
        return String::new();
    }
    format!("## Servers\n\n{}", entries.join("\n"))
}

fn security(doc: &OpenApiDocument) -> String {
    if doc.security.is_empty() {
        return String::new();
    }
    blocks([heading(2, "Security"), security_options(&doc.security, 3)])
}

fn tags(doc: &OpenApiDocument) -> String {
    let entries: Vec<String> = doc
        .tags
        .iter()
        .filter_map(|tag| {
            let name = non_empty(tag.name.as_deref())?;
            let docs = tag.external_docs.as_ref().and_then(|docs| {
                let url = non_empty(docs.url.as_deref())?;
                let label =
                    non_empty(docs.description.as_deref()).unwrap_or("External Documentation");
                Some(link(label, Some(url)))
            });

            Some(blocks([
                heading(3, name),
                non_empty(tag.description.as_deref())
                    .map(str::to_string)
                    .unwrap_or_default(),
                docs.unwrap_or_default(),
            ]))
        })
        .collect();

    if entries.is_empty() {
        return String::new();
    }
    blocks(std::iter::once(heading(2, "Tags")).chain(entries))
}

fn paths(doc: &OpenApiDocument) -> String {
    let endpoints: Vec<String> = doc
        .paths
        .iter()
        .flat_map(|(path, item)| path_item_endpoints(EndpointKind::Path(path), item, 3))
        .collect();

    if endpoints.is_empty() {
        return String::new();
    }
    blocks(std::iter::once(heading(2, "Endpoints")).chain(endpoints))
}

fn webhooks(doc: &OpenApiDocument) -> String {
    let hooks: Vec<String> = doc
        .webhooks
        .iter()
        .filter_map(|(name, item)| {
            let endpoints = path_item_endpoints(EndpointKind::Webhook(name), item, 4);
            if endpoints.is_empty() {
                return None;
            }
            Some(blocks(std::iter::once(heading(3, name)).chain(endpoints)))
        })
        .collect();

    if hooks.is_empty() {
        return String::new();
    }
    blocks(std::iter::once(heading(2, "Webhooks")).chain(hooks))
}
