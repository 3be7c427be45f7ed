//! Flattening of Atlassian Document Format issue descriptions.

use serde_json::Value;

const BLOCK_NODES: &[&str] = &[
    "paragraph",
    "heading",
    "blockquote",
    "codeBlock",
    "listItem",
    "tableRow",
    "panel",
    "rule",
    "mediaSingle",
];

fn walk(node: &Value, out: &mut String) {
    match node {
        Value::String(text) => out.push_str(text),
        Value::Array(items) => items.iter().for_each(|item| walk(item, out)),
        Value::Object(map) => {
            let node_type = map.get("type").and_then(Value::as_str).unwrap_or_default();
            if node_type == "hardBreak" {
                out.push('\n');
                return;
            }
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
            if let Some(content) = map.get("content") {
                walk(content, out);
            }
            if BLOCK_NODES.contains(&node_type) && !out.ends_with('\n') {
                out.push('\n');
            }
        }
        _ => {}
    }
}

/// Plain text of a description field.
///
/// Older tenants return descriptions as strings; v3 endpoints return an ADF
/// document. Returns `None` for null or textless descriptions.
pub fn description_text(description: &Value) -> Option<String> {
    if description.is_null() {
        return None;
    }
    let mut out = String::new();
    walk(description, &mut out);
    let text = out.trim_end().to_string();
    (!text.trim().is_empty()).then_some(text)
}
