//! Tag and comment recovery from the source text.

use super::source::FeatureSource;

/// Tags written above the keyword on `keyword_line`, each with its line.
///
/// Tag lines may be interleaved with blank and comment lines. Scanning stops
/// at the first other line above the element.
pub(super) fn tag_lines(source: &FeatureSource<'_>, keyword_line: usize) -> Vec<(usize, String)> {
    let mut found = Vec::new();
    let mut line = keyword_line;
    while line > 1 {
        line -= 1;
        let Some(text) = source.line(line) else {
            break;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if !trimmed.starts_with('@') {
            break;
        }
        let tokens: Vec<(usize, String)> = trimmed
            .split_whitespace()
            .take_while(|token| !token.starts_with('#'))
            .filter(|token| token.starts_with('@'))
            .map(|token| (line, token.to_string()))
            .collect();
        found.splice(0..0, tokens);
    }
    found
}

/// Whether `line` is a `# language:` header rather than a comment.
pub(crate) fn is_language_header(line: &str) -> bool {
    line.trim_start()
        .strip_prefix('#')
        .is_some_and(|rest| rest.trim_start().starts_with("language:"))
}

/// Comment lines outside doc strings, with their line numbers.
///
/// Language headers are not comments.
pub(super) fn comment_lines(source: &FeatureSource<'_>) -> Vec<(usize, String)> {
    let mut comments = Vec::new();
    let mut open_fence: Option<&str> = None;
    for (line, text) in source.lines_from(1) {
        let trimmed = text.trim();
        if let Some(fence) = open_fence {
            if trimmed.starts_with(fence) {
                open_fence = None;
            }
            continue;
        }
        if let Some(fence) = ["\"\"\"", "```"]
            .into_iter()
            .find(|fence| trimmed.starts_with(fence))
        {
            open_fence = Some(fence);
            continue;
        }
        if trimmed.starts_with('#') && !is_language_header(trimmed) {
            comments.push((line, trimmed.to_string()));
        }
    }
    comments
}
