//! Endpoint blocks
//!
//! One block per (path, method) or (webhook, method). Path endpoints print a
//! method + path line; webhook endpoints have no path and omit it.

use crate::markdown::{blocks, heading, single_line, table_cell, yes_no};
use crate::schema::{ref_name, schema_type};
use indexmap::IndexMap;
use openapi_llms_parser::openapi::{
    Header, MediaType, Operation, Parameter, PathItem, RequestBody, Response, SecurityRequirement,
};

/// Where an operation is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind<'a> {
    /// Operation under `paths`, keyed by its URL template
    Path(&'a str),

    /// Operation under `webhooks`, keyed by the webhook name
    Webhook(&'a str),
}

impl<'a> EndpointKind<'a> {
    /// Path template or webhook name
    pub fn key(&self) -> &'a str {
        match self {
            EndpointKind::Path(path) => path,
            EndpointKind::Webhook(name) => name,
        }
    }
}

/// A single operation ready to be rendered
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub kind: EndpointKind<'a>,
    pub method: &'a str,
    pub operation: &'a Operation,
    /// Heading level of the block title; subsections sit one level deeper
    pub level: usize,
}

impl<'a> Endpoint<'a> {
    pub fn render(&self) -> String {
        let op = self.operation;
        let method = self.method.to_uppercase();
        let sub = self.level + 1;

        let title = match op.summary.as_deref() {
            Some(summary) if !summary.is_empty() => summary.to_string(),
            _ => format!("{} {}", method, self.kind.key()),
        };

        let location = match self.kind {
            EndpointKind::Path(path) => format!("**{}** `{}`", method, path),
            EndpointKind::Webhook(_) => String::new(),
        };

        let tags = if op.tags.is_empty() {
            String::new()
        } else {
            format!("**Tags:** {}", op.tags.join(", "))
        };

        let operation_id = op
            .operation_id
            .as_deref()
            .map(|id| format!("**Operation ID:** `{}`", id))
            .unwrap_or_default();

        let deprecated = if op.is_deprecated() {
            "**⚠️ DEPRECATED**".to_string()
        } else {
            String::new()
        };

        let security = if op.security.is_empty() {
            String::new()
        } else {
            blocks([heading(sub, "Security"), security_options(&op.security, sub + 1)])
        };

        blocks([
            heading(self.level, &title),
            location,
            tags,
            op.description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_default(),
            operation_id,
            deprecated,
            security,
            parameters_table(&op.parameters, sub),
            request_body_section(op.request_body.as_ref(), sub),
            responses_section(&op.responses, sub),
            callbacks_section(&op.callbacks, sub),
        ])
    }
}

/// Render every operation of a path item, in source order
pub(crate) fn path_item_endpoints(kind: EndpointKind<'_>, item: &PathItem, level: usize) -> Vec<String> {
    item.operations()
        .map(|(method, operation)| {
            Endpoint {
                kind,
                method,
                operation: &operation,
                level,
            }
            .render()
        })
        .collect()
}

/// Security alternatives, one heading per requirement
///
/// Schemes inside a requirement all apply together; the requirements
/// themselves are alternatives.
pub(crate) fn security_options(requirements: &[SecurityRequirement], level: usize) -> String {
    let options = requirements.iter().enumerate().map(|(i, requirement)| {
        let schemes = if requirement.is_empty() {
            "- Anonymous access".to_string()
        } else {
            requirement
                .schemes()
                .map(|(name, scopes)| {
                    if scopes.is_empty() {
                        format!("- **{}**", name)
                    } else {
                        let scopes: Vec<String> =
                            scopes.iter().map(|s| format!("`{}`", s)).collect();
                        format!("- **{}**: {}", name, scopes.join(", "))
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        format!("{}\n\n{}", heading(level, &format!("Option {}", i + 1)), schemes)
    });

    blocks(options)
}

/// Display type of a parameter: schema, then legacy `type`, then `string`
pub(crate) fn parameter_type(param: &Parameter) -> String {
    param
        .schema
        .as_ref()
        .map(schema_type)
        .or_else(|| param.param_type.clone())
        .unwrap_or_else(|| "string".to_string())
}

/// Parameter name, falling back to the referenced component name
pub(crate) fn parameter_name(param: &Parameter) -> String {
    param
        .name
        .clone()
        .or_else(|| param.ref_path.as_deref().map(|r| ref_name(r).to_string()))
        .unwrap_or_default()
}

fn parameters_table(params: &[Parameter], level: usize) -> String {
    if params.is_empty() {
        return String::new();
    }

    let mut table = String::from(
        "| Name | In | Type | Required | Description |\n|------|----|------|----------|-------------|",
    );
    for param in params {
        table.push_str(&format!(
            "\n| {} | {} | {} | {} | {} |",
            table_cell(&parameter_name(param)),
            table_cell(param.location.as_deref().unwrap_or_default()),
            table_cell(&parameter_type(param)),
            yes_no(param.is_required()),
            table_cell(param.description.as_deref().unwrap_or_default()),
        ));
    }

    blocks([heading(level, "Parameters"), table])
}

/// `- \`media/type\`: Type` bullets, indented by `indent` spaces
pub(crate) fn media_type_lines(content: &IndexMap<String, MediaType>, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    content
        .iter()
        .map(|(media_type, media)| {
            let type_name = media
                .schema
                .as_ref()
                .map(schema_type)
                .unwrap_or_else(|| "object".to_string());
            format!("{}- `{}`: {}", pad, media_type, type_name)
        })
        .collect()
}

/// Description, required marker and media types of a request body
pub(crate) fn request_body_details(body: &RequestBody) -> String {
    let reference = body
        .ref_path
        .as_deref()
        .map(|r| format!("See `{}`", ref_name(r)))
        .unwrap_or_default();

    let required = if body.is_required() {
        "Required: Yes".to_string()
    } else {
        String::new()
    };

    blocks([
        body.description.clone().unwrap_or_default(),
        reference,
        required,
        media_type_lines(&body.content, 0).join("\n"),
    ])
}

fn request_body_section(body: Option<&RequestBody>, level: usize) -> String {
    match body {
        Some(body) => blocks([heading(level, "Request Body"), request_body_details(body)]),
        None => String::new(),
    }
}

/// Type label of a header: schema, then legacy `type`
pub(crate) fn header_type(header: &Header) -> Option<String> {
    header
        .schema
        .as_ref()
        .map(schema_type)
        .or_else(|| header.header_type.clone())
}

fn header_line(name: &str, header: &Header) -> String {
    let mut line = format!("  - `{}`", name);
    if let Some(type_name) = header_type(header) {
        line.push_str(&format!(" ({})", type_name));
    }
    if let Some(description) = header.description.as_deref() {
        line.push_str(&format!(": {}", description));
    }
    line
}

/// Nested header and content bullets of a response
pub(crate) fn response_lists(response: &Response) -> String {
    let mut lines = Vec::new();

    if !response.headers.is_empty() {
        lines.push("- Headers:".to_string());
        lines.extend(
            response
                .headers
                .iter()
                .map(|(name, header)| header_line(name, header)),
        );
    }

    if !response.content.is_empty() {
        lines.push("- Content:".to_string());
        lines.extend(media_type_lines(&response.content, 2));
    } else if let Some(schema) = response.schema.as_ref() {
        lines.push("- Content:".to_string());
        lines.push(format!("  - `*/*`: {}", schema_type(schema)));
    }

    lines.join("\n")
}

/// Response description, falling back to the referenced component name
pub(crate) fn response_description(response: &Response) -> Option<String> {
    response
        .description
        .clone()
        .or_else(|| {
            response
                .ref_path
                .as_deref()
                .map(|r| format!("See `{}`", ref_name(r)))
        })
}

fn responses_section(responses: &IndexMap<String, Response>, level: usize) -> String {
    if responses.is_empty() {
        return String::new();
    }

    let entries = responses.iter().map(|(status, response)| {
        let mut entry = format!("**{}**", status);
        // A line break here would detach the nested lists from the status
        let description = response_description(response)
            .map(|d| single_line(&d))
            .filter(|d| !d.is_empty());
        if let Some(description) = description {
            entry.push_str(&format!(": {}", description));
        }
        let lists = response_lists(response);
        if !lists.is_empty() {
            entry.push('\n');
            entry.push_str(&lists);
        }
        entry
    });

    blocks(std::iter::once(heading(level, "Responses")).chain(entries))
}

fn callbacks_section(callbacks: &IndexMap<String, IndexMap<String, PathItem>>, level: usize) -> String {
    if callbacks.is_empty() {
        return String::new();
    }

    let entries = callbacks.iter().map(|(name, expressions)| {
        let mut lines = vec![format!("**{}**", name)];
        for (expression, item) in expressions {
            lines.push(format!("- `{}`", expression));
            for (method, operation) in item.operations() {
                let mut line = format!("  - **{}**", method.to_uppercase());
                if let Some(summary) = operation.summary.as_deref() {
                    line.push_str(&format!(": {}", summary));
                }
                lines.push(line);
            }
        }
        lines.join("\n")
    });

    blocks(std::iter::once(heading(level, "Callbacks")).chain(entries))
}
