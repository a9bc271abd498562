//! Doc string recovery from the source text.
//!
//! The upstream AST keeps only the doc string body as a string. The fence
//! line, its indentation, and the content type are recovered by scanning the
//! lines that follow the owning step.

use crate::text::{indentation, non_empty, strip_indent};

use super::source::FeatureSource;

const FENCES: [&str; 2] = ["\"\"\"", "```"];

/// A doc string located in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ScannedDocString {
    /// Line of the opening fence.
    pub(super) line: usize,
    pub(super) content_type: Option<String>,
    pub(super) content: String,
}

fn opening_fence(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    FENCES.into_iter().find(|fence| trimmed.starts_with(fence))
}

fn escaped(fence: &str) -> String {
    fence.chars().flat_map(|ch| ['\\', ch]).collect()
}

/// Find the doc string attached to the step on `step_line`.
///
/// Only blank and comment lines may sit between the step and the opening
/// fence. Returns `None` when no complete doc string follows the step.
pub(super) fn scan_doc_string(
    source: &FeatureSource<'_>,
    step_line: usize,
) -> Option<ScannedDocString> {
    let mut lines = source.lines_from(step_line + 1);
    let (line, opening, fence) = lines.find_map(|(number, text)| {
        let trimmed = text.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }
        Some((number, text, opening_fence(text)))
    })?;
    let fence = fence?;

    let indent = indentation(opening);
    let content_type = opening
        .trim_start()
        .strip_prefix(fence)
        .and_then(non_empty);
    let escaped_fence = escaped(fence);

    let mut body = Vec::new();
    for (_, text) in lines {
        if text.trim_start().starts_with(fence) {
            return Some(ScannedDocString {
                line,
                content_type,
                content: body.join("\n"),
            });
        }
        body.push(strip_indent(text, indent).replace(&escaped_fence, fence));
    }
    None
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests fail loudly on missing doc strings")]
mod tests {
    use super::*;

    #[test]
    fn content_is_dedented_to_the_fence() {
        let text = "\
Given a step
  \"\"\"json
  {
    \"key\": 1
  }

  \"\"\"
";
        let source = FeatureSource::new(text);
        let doc = scan_doc_string(&source, 1).expect("doc string found");
        assert_eq!(doc.line, 2);
        assert_eq!(doc.content_type.as_deref(), Some("json"));
        assert_eq!(doc.content, "{\n  \"key\": 1\n}\n");
    }

    #[test]
    fn escaped_fences_are_restored() {
        let text = "Given x\n\"\"\"\n\\\"\\\"\\\"\n\"\"\"\n";
        let doc = scan_doc_string(&FeatureSource::new(text), 1).expect("doc string found");
        assert_eq!(doc.content, "\"\"\"");
        assert_eq!(doc.content_type, None);
    }

    #[test]
    fn backtick_fences_are_recognised() {
        let text = "Given x\n  ```\n  body\n  ```\n";
        let doc = scan_doc_string(&FeatureSource::new(text), 1).expect("doc string found");
        assert_eq!(doc.content, "body");
    }

    #[test]
    fn other_content_before_a_fence_means_no_doc_string() {
        let text = "Given x\nAnd y\n\"\"\"\nbody\n\"\"\"\n";
        assert!(scan_doc_string(&FeatureSource::new(text), 1).is_none());
    }

    #[test]
    fn unterminated_doc_string_is_not_found() {
        let text = "Given x\n\"\"\"\nbody\n";
        assert!(scan_doc_string(&FeatureSource::new(text), 1).is_none());
    }
}
