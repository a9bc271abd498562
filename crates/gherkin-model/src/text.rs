//! Text normalisation shared by every adapter.

/// Count the leading whitespace characters of `line`.
pub(crate) fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Remove at most `width` leading whitespace characters from `line`.
pub(crate) fn strip_indent(line: &str, width: usize) -> &str {
    let mut rest = line;
    for _ in 0..width {
        match rest.strip_prefix(char::is_whitespace) {
            Some(stripped) => rest = stripped,
            None => break,
        }
    }
    rest
}

/// Normalise a description block.
///
/// Trailing whitespace is dropped from every line, the indentation common to
/// all non-blank lines is removed, and leading or trailing blank lines are
/// discarded. Interior blank lines survive as empty lines.
pub(crate) fn normalise_description(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().map(str::trim_end).collect();
    let common = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| indentation(line))
        .min()
        .unwrap_or(0);

    let dedented: Vec<&str> = lines.iter().map(|line| strip_indent(line, common)).collect();
    let first = dedented.iter().position(|line| !line.is_empty());
    let last = dedented.iter().rposition(|line| !line.is_empty());
    match (first, last) {
        (Some(start), Some(end)) => dedented
            .get(start..=end)
            .map(|kept| kept.join("\n"))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Ensure a tag carries its `@` marker.
pub(crate) fn normalise_tag(tag: &str) -> String {
    let trimmed = tag.trim();
    if trimmed.starts_with('@') {
        trimmed.to_string()
    } else {
        format!("@{trimmed}")
    }
}

/// Treat an empty or whitespace-only value as unset.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
