//! Line-level formatting helpers.

use crate::model::{DocString, Tag, TableRow};

/// Indentation unit for nested elements.
pub(crate) const INDENT: &str = "  ";

/// Indent every non-empty line by `levels` units.
pub(crate) fn indent(lines: Vec<String>, levels: usize) -> Vec<String> {
    let prefix = INDENT.repeat(levels);
    lines
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect()
}

/// All tags on a single line, or `None` when there are no tags.
pub(crate) fn tag_line(tags: &[Tag]) -> Option<String> {
    (!tags.is_empty()).then(|| {
        tags.iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// The `keyword: name` header line, falling back to `default_keyword`.
pub(crate) fn keyword_line(keyword: &str, default_keyword: &str, name: &str) -> String {
    let keyword = if keyword.is_empty() {
        default_keyword
    } else {
        keyword
    };
    format!("{keyword}: {name}").trim_end().to_string()
}

/// Tags, keyword line, and description for a named element.
///
/// The description is separated from the keyword line by one blank line.
pub(crate) fn header(
    tags: &[Tag],
    keyword: &str,
    default_keyword: &str,
    name: &str,
    description: &str,
) -> Vec<String> {
    let mut lines: Vec<String> = tag_line(tags).into_iter().collect();
    lines.push(keyword_line(keyword, default_keyword, name));
    if !description.is_empty() {
        lines.push(String::new());
        lines.extend(description.split('\n').map(str::to_string));
    }
    lines
}

/// Escape a table cell so it round-trips through the cell splitter.
pub(crate) fn escape_cell(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '|' => escaped.push_str("\\|"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render rows as an aligned table.
///
/// Each column is padded to the display width of its widest escaped cell.
pub(crate) fn table_lines(rows: &[TableRow]) -> Vec<String> {
    let escaped: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.cells.iter().map(|cell| escape_cell(&cell.value)).collect())
        .collect();

    let columns = escaped.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|column| {
            escaped
                .iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    escaped
        .iter()
        .map(|row| {
            if row.is_empty() {
                return "|".to_string();
            }
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect();
            format!("| {} |", cells.join(" | "))
        })
        .collect()
}

/// Render a doc string between `"""` fences.
///
/// Content lines that would close the fence early are escaped.
pub(crate) fn doc_string_lines(doc: &DocString) -> Vec<String> {
    let opening = format!("\"\"\"{}", doc.content_type.as_deref().unwrap_or_default());
    let mut lines = vec![opening];
    if !doc.content.is_empty() {
        lines.extend(
            doc.content
                .split('\n')
                .map(|line| line.replace("\"\"\"", "\\\"\\\"\\\"")),
        );
    }
    lines.push("\"\"\"".to_string());
    lines
}
