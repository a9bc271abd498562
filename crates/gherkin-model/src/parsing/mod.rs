//! Text parsing entry points.
//!
//! Whole documents go through [`parse_document`]; fragments go through
//! [`parse_snippet`], which wraps them in a minimal English feature before
//! handing them to the grammar parser.

mod snippet;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::adapter::{adapt_native, is_language_header, mask_cell_escapes};
use crate::config::Dialect;
use crate::error::{ModelError, Result};
use crate::record::FeatureFileRecord;

pub(crate) use snippet::{Snippet, parse_snippet};

static LANGUAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#\s*language:\s*([A-Za-z0-9_-]+)\s*$").unwrap_or_else(|_| unreachable!())
});

/// Read a feature file, rejecting paths that are not existing files.
pub(crate) fn read_source(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(ModelError::Argument(format!(
            "'{}' is not an existing feature file",
            path.display()
        )));
    }
    std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a complete document into a canonical record.
///
/// Blank and comment-only documents have no feature. A `# language:` header
/// selects the dialect, overriding `dialect`.
pub(crate) fn parse_document(
    source: &str,
    filename: &str,
    dialect: &Dialect,
) -> Result<FeatureFileRecord> {
    parse_with_offset(source, filename, dialect, 0)
}

fn parse_with_offset(
    source: &str,
    filename: &str,
    dialect: &Dialect,
    line_offset: usize,
) -> Result<FeatureFileRecord> {
    let mut text = source.to_string();
    normalise_trailing_newline(&mut text);

    if is_featureless(&text) {
        debug!(file = filename, "document has no feature");
        return adapt_native(None, &text, filename, line_offset);
    }

    let dialect = declared_dialect(&text).unwrap_or_else(|| dialect.clone());
    debug!(file = filename, dialect = %dialect, "parsing document");
    let masked = mask_cell_escapes(&text);
    let feature = gherkin::Feature::parse(masked.as_str(), dialect.environment()?)
        .map_err(|err| ModelError::grammar(filename, err))?;
    adapt_native(Some(&feature), &text, filename, line_offset)
}

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

fn is_featureless(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

/// The dialect named by a `# language:` header above the first statement.
fn declared_dialect(text: &str) -> Option<Dialect> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take_while(|line| line.starts_with('#'))
        .find(|line| is_language_header(line))
        .and_then(|line| LANGUAGE_RE.captures(line))
        .and_then(|captures| captures.get(1))
        .map(|code| Dialect::new(code.as_str()))
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests fail loudly on parse errors")]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    #[case("")]
    #[case("\n\n   \n")]
    #[case("# only a comment\n\n# and another")]
    fn featureless_documents_keep_their_comments(#[case] source: &str) {
        let record = parse_document(source, "empty.feature", &Dialect::default())
            .expect("featureless document parses");
        assert!(record.feature.is_none());
        assert_eq!(
            record.comments.len(),
            source.lines().filter(|l| l.trim().starts_with('#')).count()
        );
    }

    #[test]
    fn language_header_overrides_the_dialect() {
        let source = "# language: fr\nFonctionnalité: bonjour\n  Scénario: salut\n    Soit une étape\n";
        let record = parse_document(source, "fr.feature", &Dialect::default())
            .expect("french document parses");
        let feature = record.feature.expect("feature present");
        assert_eq!(feature.name, "bonjour");
        assert_eq!(feature.source_line, Some(2));
        assert!(record.comments.is_empty());
    }

    #[rstest]
    #[case("# language: de\nFeature: x\n", Some("de"))]
    #[case("#language:en-au\n", Some("en-au"))]
    #[case("# comment\n# language: es\n", Some("es"))]
    #[case("Feature: x\n# language: fr\n", None)]
    #[case("# just a comment\n", None)]
    fn language_headers_are_detected(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            declared_dialect(text).as_ref().map(Dialect::code),
            expected
        );
    }

    #[test]
    fn grammar_errors_name_the_file() {
        let error = parse_document("this is not gherkin", "broken.feature", &Dialect::default())
            .expect_err("invalid text is rejected");
        assert!(matches!(&error, ModelError::Grammar { file, .. } if file == "broken.feature"));
    }

    #[test]
    fn unsupported_dialects_are_arguments() {
        let error = parse_document("Feature: x\n", "x.feature", &Dialect::new("klingon-xx"))
            .expect_err("unknown dialect is rejected");
        assert!(matches!(error, ModelError::Argument(_)));
    }

    #[test]
    fn read_source_rejects_missing_paths() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing.feature");
        assert!(matches!(read_source(&missing), Err(ModelError::Argument(_))));
        assert!(matches!(read_source(dir.path()), Err(ModelError::Argument(_))));
    }

    #[test]
    fn read_source_returns_file_text() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "Feature: on disk").expect("write feature");
        let text = read_source(file.path()).expect("read feature");
        assert_eq!(text, "Feature: on disk");
    }
}
