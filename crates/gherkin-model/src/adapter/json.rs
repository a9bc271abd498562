//! Field access shared by the JSON shape adapters.

use serde_json::{Map, Value};

use crate::error::{ModelError, Result};
use crate::record::{CellRecord, CommentRecord, RawElement, RowRecord, TagRecord};
use crate::text::{normalise_description, normalise_tag};

/// A string field, or empty when absent.
pub(super) fn text(node: &Value, key: &str) -> String {
    node.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// A trimmed string field, or `None` when absent or blank.
pub(super) fn optional_text(node: &Value, key: &str) -> Option<String> {
    node.get(key)
        .and_then(Value::as_str)
        .and_then(crate::text::non_empty)
}

/// A trimmed keyword field.
pub(super) fn keyword(node: &Value) -> String {
    text(node, "keyword").trim().to_string()
}

/// A trimmed name field.
pub(super) fn name(node: &Value) -> String {
    text(node, "name").trim().to_string()
}

/// A normalised description field.
pub(super) fn description(node: &Value) -> String {
    normalise_description(&text(node, "description"))
}

/// An array field, or an empty slice when absent.
pub(super) fn array<'a>(node: &'a Value, key: &str) -> &'a [Value] {
    node.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// The element's line, read from `line` or `location.line`.
pub(super) fn line(node: &Value) -> Option<usize> {
    node.get("line")
        .or_else(|| node.get("location").and_then(|location| location.get("line")))
        .and_then(Value::as_u64)
        .and_then(|line| usize::try_from(line).ok())
}

/// The `type` discriminator, failing when it is missing.
pub(super) fn discriminator<'a>(node: &'a Value, key: &str) -> Result<&'a str> {
    node.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ModelError::unknown_type(format!("<missing {key}>")))
}

/// A copy of `node` without the listed child keys.
pub(super) fn raw_without(node: &Value, children: &[&str]) -> RawElement {
    let stripped = match node {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| !children.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect::<Map<String, Value>>(),
        ),
        other => other.clone(),
    };
    RawElement::new(stripped)
}

/// Tags of an element; each tag object carries `name` and a line.
pub(super) fn tags(node: &Value) -> Vec<TagRecord> {
    array(node, "tags")
        .iter()
        .map(|tag| TagRecord {
            source_line: line(tag),
            name: normalise_tag(&text(tag, "name")),
            raw: Some(raw_without(tag, &[])),
        })
        .collect()
}

/// Comments of an element; each comment object carries `text` or `value`.
pub(super) fn comments(node: &Value) -> Vec<CommentRecord> {
    array(node, "comments")
        .iter()
        .map(|comment| {
            let body = comment
                .get("text")
                .or_else(|| comment.get("value"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            CommentRecord {
                source_line: line(comment),
                text: body.trim().to_string(),
                raw: Some(raw_without(comment, &[])),
            }
        })
        .collect()
}

/// A row whose cells are either plain strings or `{value}` objects.
pub(super) fn row(node: &Value) -> RowRecord {
    let source_line = line(node);
    let cells = array(node, "cells")
        .iter()
        .map(|cell| match cell {
            Value::String(value) => CellRecord {
                source_line,
                value: value.clone(),
                raw: Some(RawElement::new(cell.clone())),
            },
            other => CellRecord {
                source_line: line(other).or(source_line),
                value: text(other, "value"),
                raw: Some(raw_without(other, &[])),
            },
        })
        .collect();
    RowRecord {
        source_line,
        cells,
        raw: Some(raw_without(node, &["cells"])),
    }
}

/// Rows of a header-and-body table shape, header first.
pub(super) fn header_and_body(node: &Value) -> Vec<RowRecord> {
    node.get("tableHeader")
        .filter(|header| !header.is_null())
        .into_iter()
        .chain(array(node, "tableBody"))
        .map(row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn line_comes_from_either_field() {
        assert_eq!(line(&json!({"line": 3})), Some(3));
        assert_eq!(line(&json!({"location": {"line": 7, "column": 1}})), Some(7));
        assert_eq!(line(&json!({})), None);
    }

    #[test]
    fn raw_copies_drop_children() {
        let node = json!({"keyword": "Scenario", "steps": [1, 2], "tags": []});
        let raw = raw_without(&node, &["steps", "tags"]);
        assert_eq!(raw.as_value(), &json!({"keyword": "Scenario"}));
    }

    #[test]
    fn rows_accept_string_and_object_cells() {
        let strings = row(&json!({"cells": ["a", "b"], "line": 4}));
        assert_eq!(strings.source_line, Some(4));
        assert_eq!(strings.cells.len(), 2);

        let objects = row(&json!({
            "cells": [{"value": "x", "location": {"line": 9, "column": 5}}],
            "location": {"line": 9, "column": 3},
        }));
        assert_eq!(objects.cells.first().map(|cell| cell.value.as_str()), Some("x"));
        assert_eq!(objects.cells.first().and_then(|cell| cell.source_line), Some(9));
    }

    #[test]
    fn missing_discriminator_is_unknown() {
        let untyped = json!({});
        let result = discriminator(&untyped, "type");
        assert!(matches!(result, Err(ModelError::UnknownElementType { .. })));
    }
}
