//! Stand-alone fragments.
//!
//! A fragment is wrapped in the smallest feature that makes it legal, parsed
//! as a whole document, and then extracted again. Line numbers are shifted so
//! they count from the first line of the fragment, and shell elements carry no
//! line at all.

use crate::config::Dialect;
use crate::error::{ModelError, Result};
use crate::record::{
    BackgroundRecord, BlockRecord, DocStringRecord, ExampleRecord, FeatureFileRecord,
    FeatureRecord, OutlineRecord, RowRecord, ScenarioRecord, StepRecord, TableRecord, TagRecord,
    TestRecord,
};

use super::parse_with_offset;

const FEATURE_SHELL: &str = "Feature: stand-alone shell\n";
const SCENARIO_SHELL: &str = "Feature: stand-alone shell\nScenario: stand-alone shell\n";
const OUTLINE_SHELL: &str =
    "Feature: stand-alone shell\nScenario Outline: stand-alone shell\nGiven a shell step\n";
const STEP_SHELL: &str =
    "Feature: stand-alone shell\nScenario: stand-alone shell\nGiven a shell step\n";
const TAG_SHELL: &str = "\nFeature: stand-alone shell\n";

/// The kind of element a fragment is expected to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Snippet {
    Feature,
    Background,
    Scenario,
    Outline,
    Example,
    Step,
    Table,
    Row,
    DocString,
    Tag,
}

impl Snippet {
    fn label(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Background => "background",
            Self::Scenario => "scenario",
            Self::Outline => "outline",
            Self::Example => "example",
            Self::Step => "step",
            Self::Table => "table",
            Self::Row => "table_row",
            Self::DocString => "doc_string",
            Self::Tag => "tag",
        }
    }

    fn filename(self) -> String {
        format!("stand_alone_{}.feature", self.label())
    }

    /// The wrapped text and the number of shell lines above the fragment.
    fn wrap(self, text: &str) -> (String, usize) {
        match self {
            Self::Feature => (text.to_string(), 0),
            Self::Background | Self::Scenario | Self::Outline => {
                (format!("{FEATURE_SHELL}{text}"), 1)
            }
            Self::Step => (format!("{SCENARIO_SHELL}{text}"), 2),
            Self::Example => (format!("{OUTLINE_SHELL}{text}"), 3),
            Self::Table | Self::Row | Self::DocString => (format!("{STEP_SHELL}{text}"), 3),
            Self::Tag => (format!("{text}{TAG_SHELL}"), 0),
        }
    }
}

/// Parse `text` as a fragment of kind `kind`.
///
/// Grammar errors name the synthetic file `stand_alone_<kind>.feature`.
pub(crate) fn parse_snippet(
    kind: Snippet,
    text: &str,
    dialect: &Dialect,
) -> Result<ParsedSnippet> {
    let filename = kind.filename();
    let (wrapped, offset) = kind.wrap(text);
    let record = parse_with_offset(&wrapped, &filename, dialect, offset)?;
    Ok(ParsedSnippet { kind, record })
}

/// A parsed fragment, ready to be extracted as the element it should hold.
#[derive(Debug)]
pub(crate) struct ParsedSnippet {
    kind: Snippet,
    record: FeatureFileRecord,
}

impl ParsedSnippet {
    fn missing(kind: Snippet) -> ModelError {
        ModelError::grammar(
            kind.filename(),
            format!("no {} found in stand-alone text", kind.label()),
        )
    }

    fn feature(self) -> Result<FeatureRecord> {
        let kind = self.kind;
        self.record.feature.ok_or_else(|| Self::missing(kind))
    }

    fn first_test(self) -> Result<TestRecord> {
        let kind = self.kind;
        self.feature()?
            .tests
            .into_iter()
            .next()
            .ok_or_else(|| Self::missing(kind))
    }

    fn first_step(self) -> Result<StepRecord> {
        let kind = self.kind;
        let steps = match self.first_test()? {
            TestRecord::Scenario(scenario) => scenario.steps,
            TestRecord::Outline(outline) => outline.steps,
        };
        steps.into_iter().next().ok_or_else(|| Self::missing(kind))
    }

    pub(crate) fn into_feature(self) -> Result<FeatureRecord> {
        self.feature()
    }

    pub(crate) fn into_background(self) -> Result<BackgroundRecord> {
        let kind = self.kind;
        self.feature()?
            .background
            .ok_or_else(|| Self::missing(kind))
    }

    pub(crate) fn into_scenario(self) -> Result<ScenarioRecord> {
        let kind = self.kind;
        match self.first_test()? {
            TestRecord::Scenario(scenario) => Ok(scenario),
            TestRecord::Outline(_) => Err(Self::missing(kind)),
        }
    }

    pub(crate) fn into_outline(self) -> Result<OutlineRecord> {
        let kind = self.kind;
        match self.first_test()? {
            TestRecord::Outline(outline) => Ok(outline),
            TestRecord::Scenario(_) => Err(Self::missing(kind)),
        }
    }

    pub(crate) fn into_example(self) -> Result<ExampleRecord> {
        let kind = self.kind;
        match self.first_test()? {
            TestRecord::Outline(outline) => outline.examples.into_iter().next(),
            TestRecord::Scenario(_) => None,
        }
        .ok_or_else(|| Self::missing(kind))
    }

    pub(crate) fn into_step(self) -> Result<StepRecord> {
        self.first_step()
    }

    pub(crate) fn into_table(self) -> Result<TableRecord> {
        let kind = self.kind;
        match self.first_step()?.block {
            Some(BlockRecord::Table(table)) => Ok(table),
            _ => Err(Self::missing(kind)),
        }
    }

    pub(crate) fn into_row(self) -> Result<RowRecord> {
        let kind = self.kind;
        self.into_table()?
            .rows
            .into_iter()
            .next()
            .ok_or_else(|| Self::missing(kind))
    }

    pub(crate) fn into_doc_string(self) -> Result<DocStringRecord> {
        let kind = self.kind;
        match self.first_step()?.block {
            Some(BlockRecord::DocString(doc)) => Ok(doc),
            _ => Err(Self::missing(kind)),
        }
    }

    pub(crate) fn into_tag(self) -> Result<TagRecord> {
        let kind = self.kind;
        self.feature()?
            .tags
            .into_iter()
            .next()
            .ok_or_else(|| Self::missing(kind))
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests fail loudly on parse errors")]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(kind: Snippet, text: &str) -> ParsedSnippet {
        parse_snippet(kind, text, &Dialect::default()).expect("fragment parses")
    }

    #[test]
    fn step_lines_count_from_the_fragment() {
        let step = parse(Snippet::Step, "Given a table\n  | a | b |\n  | 1 | 2 |")
            .into_step()
            .expect("step present");
        assert_eq!(step.source_line, Some(1));
        let Some(BlockRecord::Table(table)) = step.block else {
            panic!("expected a table block");
        };
        let lines: Vec<_> = table.rows.iter().map(|row| row.source_line).collect();
        assert_eq!(lines, vec![Some(2), Some(3)]);
    }

    #[test]
    fn example_fragment_keeps_its_rows() {
        let example = parse(Snippet::Example, "Examples: numbers\n  | x |\n  | 1 |")
            .into_example()
            .expect("example present");
        assert_eq!(example.name, "numbers");
        assert_eq!(example.source_line, Some(1));
        assert_eq!(example.rows.len(), 2);
    }

    #[test]
    fn row_fragment_is_the_first_table_row() {
        let row = parse(Snippet::Row, "| left | right |")
            .into_row()
            .expect("row present");
        let values: Vec<_> = row.cells.iter().map(|cell| cell.value.as_str()).collect();
        assert_eq!(values, vec!["left", "right"]);
        assert_eq!(row.source_line, Some(1));
    }

    #[test]
    fn doc_string_fragment_keeps_its_content_type() {
        let doc = parse(Snippet::DocString, "\"\"\"json\n{}\n\"\"\"")
            .into_doc_string()
            .expect("doc string present");
        assert_eq!(doc.content_type.as_deref(), Some("json"));
        assert_eq!(doc.content, "{}");
        assert_eq!(doc.source_line, Some(1));
    }

    #[test]
    fn tag_fragment_is_normalised() {
        let tag = parse(Snippet::Tag, "@smoke").into_tag().expect("tag present");
        assert_eq!(tag.name, "@smoke");
        assert_eq!(tag.source_line, Some(1));
    }

    #[test]
    fn shell_lines_are_not_reported() {
        let scenario = parse(Snippet::Scenario, "Scenario: s\n  Given x")
            .into_scenario()
            .expect("scenario present");
        assert_eq!(scenario.source_line, Some(1));
        let feature = parse(Snippet::Scenario, "Scenario: s")
            .into_feature()
            .expect("shell feature present");
        assert_eq!(feature.source_line, None);
    }

    #[rstest]
    #[case(Snippet::Scenario, "Scenario Outline: o\n  Given <x>\n  Examples:\n    | x |\n    | 1 |")]
    #[case(Snippet::Outline, "Scenario: plain")]
    #[case(Snippet::Background, "Scenario: plain")]
    #[case(Snippet::Step, "")]
    #[case(Snippet::Table, "")]
    #[case(Snippet::Feature, "# nothing here")]
    fn wrong_content_names_the_synthetic_file(#[case] kind: Snippet, #[case] text: &str) {
        let parsed = parse(kind, text);
        let error = match kind {
            Snippet::Scenario => parsed.into_scenario().map(|_| ()),
            Snippet::Outline => parsed.into_outline().map(|_| ()),
            Snippet::Background => parsed.into_background().map(|_| ()),
            Snippet::Step => parsed.into_step().map(|_| ()),
            Snippet::Table => parsed.into_table().map(|_| ()),
            _ => parsed.into_feature().map(|_| ()),
        }
        .expect_err("fragment lacks the element");
        let expected = kind.filename();
        assert!(matches!(&error, ModelError::Grammar { file, message }
            if *file == expected && message.starts_with("no ")));
    }

    #[test]
    fn grammar_errors_name_the_synthetic_file() {
        let error = parse_snippet(Snippet::Tag, "not a tag", &Dialect::default())
            .expect_err("plain text is not a tag");
        assert!(matches!(&error, ModelError::Grammar { file, .. }
            if file == "stand_alone_tag.feature"));
    }
}
