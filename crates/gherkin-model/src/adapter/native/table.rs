//! Table row recovery from the source text.
//!
//! The upstream AST stores table rows as plain strings without line numbers.
//! Rows are re-read from the source so every row and cell carries its line
//! and escapes are resolved the same way the renderer writes them.
//!
//! The upstream parser splits rows on every `|`, escaped or not, so escapes
//! are masked before parsing. Masks have the byte length of the escape they
//! replace, keeping the parser's spans valid against the original text.

use super::source::FeatureSource;

const MASKED_PIPE: &str = "\u{1}\u{1}";
const MASKED_BACKSLASH: &str = "\u{2}\u{2}";
const DOC_STRING_FENCES: [&str; 2] = ["\"\"\"", "```"];

/// A table row located in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ScannedRow {
    pub(super) line: usize,
    pub(super) cells: Vec<String>,
}

/// Split a pipe-delimited line into unescaped, trimmed cells.
///
/// `\|` yields a literal pipe, `\\` a backslash, and `\n` a newline. Text
/// after the final pipe is ignored. Returns `None` for lines that are not
/// table rows.
pub(super) fn split_cells(line: &str) -> Option<Vec<String>> {
    let inner = line.trim().strip_prefix('|')?;
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('|') => current.push('|'),
                Some('\\') => current.push('\\'),
                Some('n') => current.push('\n'),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            '|' => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            other => current.push(other),
        }
    }
    Some(cells)
}

/// Replace `\|` and `\\` on table lines with same-length masks.
///
/// Lines inside doc strings are left alone.
pub(crate) fn mask_cell_escapes(text: &str) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut fence: Option<&str> = None;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        match fence {
            Some(open) if trimmed.starts_with(open) => fence = None,
            Some(_) => {}
            None => {
                fence = DOC_STRING_FENCES
                    .into_iter()
                    .find(|candidate| trimmed.starts_with(candidate));
            }
        }
        if fence.is_none() && trimmed.starts_with('|') {
            mask_line(line, &mut masked);
        } else {
            masked.push_str(line);
        }
    }
    masked
}

fn mask_line(line: &str, out: &mut String) {
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('|') => out.push_str(MASKED_PIPE),
            Some('\\') => out.push_str(MASKED_BACKSLASH),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
}

/// Restore the escapes hidden by [`mask_cell_escapes`] in a parsed cell.
pub(super) fn unmask_cell(cell: &str) -> String {
    cell.replace(MASKED_PIPE, "\\|")
        .replace(MASKED_BACKSLASH, "\\\\")
}

/// Resolve the escapes hidden by [`mask_cell_escapes`] to the characters
/// they stand for.
pub(super) fn unescape_masked(cell: &str) -> String {
    cell.replace(MASKED_PIPE, "|").replace(MASKED_BACKSLASH, "\\")
}

/// Read `expected` rows of the table starting on `first_line`.
///
/// Blank and comment lines between rows are skipped. Returns `None` if fewer
/// rows are found, so callers can fall back to the parser's own values.
pub(super) fn scan_rows(
    source: &FeatureSource<'_>,
    first_line: usize,
    expected: usize,
) -> Option<Vec<ScannedRow>> {
    let mut rows = Vec::with_capacity(expected);
    for (line, text) in source.lines_from(first_line) {
        if rows.len() == expected {
            break;
        }
        let trimmed = text.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let cells = split_cells(trimmed)?;
        rows.push(ScannedRow { line, cells });
    }
    (rows.len() == expected).then_some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("| a | b |", vec!["a", "b"])]
    #[case("  |a|b|  ", vec!["a", "b"])]
    #[case("| a\\|b | c |", vec!["a|b", "c"])]
    #[case("| back\\\\slash |", vec!["back\\slash"])]
    #[case("| two\\nlines |", vec!["two\nlines"])]
    #[case("| | empty |", vec!["", "empty"])]
    #[case("| a | trailing", vec!["a"])]
    fn cells_are_unescaped(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_cells(line), Some(expected.into_iter().map(String::from).collect()));
    }

    #[test]
    fn non_rows_are_rejected() {
        assert_eq!(split_cells("Given a step"), None);
    }

    #[test]
    fn rows_carry_their_lines() {
        let source = FeatureSource::new("Given x\n  | a |\n  # note\n  | b |\nThen y\n");
        let rows = scan_rows(&source, 2, 2);
        assert_eq!(
            rows,
            Some(vec![
                ScannedRow { line: 2, cells: vec!["a".into()] },
                ScannedRow { line: 4, cells: vec!["b".into()] },
            ])
        );
    }

    #[test]
    fn masks_keep_byte_offsets() {
        let text = "Given x\n  | a \\| b | c\\\\ |\n  | x | y |\n";
        let masked = mask_cell_escapes(text);
        assert_eq!(masked.len(), text.len());
        assert_eq!(masked.matches('|').count(), 6);
        assert_eq!(masked.find("| x"), text.find("| x"));
    }

    #[test]
    fn masks_skip_doc_strings_and_steps() {
        let text = "Given a \\| step\n  \"\"\"\n  | a \\| b |\n  \"\"\"\n";
        assert_eq!(mask_cell_escapes(text), text);
    }

    #[test]
    fn parsed_cells_are_unmasked() {
        let masked = mask_cell_escapes("| a \\| b \\\\ |");
        let inner = masked.trim_matches(|ch: char| ch == '|' || ch == ' ');
        assert_eq!(unmask_cell(inner), "a \\| b \\\\");
        assert_eq!(unescape_masked(inner), "a | b \\");
    }

    #[test]
    fn short_tables_fall_back() {
        let source = FeatureSource::new("| a |\nThen y\n");
        assert_eq!(scan_rows(&source, 1, 2), None);
    }
}
