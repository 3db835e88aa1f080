//! Template loading and management

use openapi_llms_common::{LlmsError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Name of the document envelope template
pub(crate) const LLMS_TEMPLATE: &str = "llms.txt";

/// Load all templates
pub(crate) fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    // Header and footer are raw text; no escaping for any template name
    tera.autoescape_on(vec![]);
    tera.register_filter("trim_newlines", trim_newlines_filter);

    tera.add_raw_template(LLMS_TEMPLATE, include_str!("../templates/llms.txt.tera"))
        .map_err(|e| LlmsError::Render(format!("Failed to load llms.txt template: {}", e)))?;

    Ok(tera)
}

/// Filter to strip leading and trailing blank lines, keeping indentation
fn trim_newlines_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("trim_newlines filter expects a string"))?;

    Ok(Value::String(
        s.trim_matches(|c: char| c == '\n' || c == '\r').to_string(),
    ))
}
