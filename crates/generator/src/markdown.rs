//! Small Markdown building helpers

/// `#`-prefixed heading at the given level
pub(crate) fn heading(level: usize, text: &str) -> String {
    format!("{} {}", "#".repeat(level), text)
}

/// Join the non-empty blocks with a blank line
pub(crate) fn blocks<I>(parts: I) -> String
where
    I: IntoIterator<Item = String>,
{
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Collapse multi-line text onto one line
pub(crate) fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Make text safe for a single table cell
pub(crate) fn table_cell(text: &str) -> String {
    single_line(&text.replace('|', "\\|"))
}

/// Markdown link, or the bare label when no URL is known
pub(crate) fn link(label: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format!("[{}]({})", label, url),
        None => label.to_string(),
    }
}

/// `Yes` / `No`
pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Fenced, pretty-printed JSON block
pub(crate) fn json_block(value: &serde_json::Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    format!("```json\n{}\n```", pretty)
}
