//! Canonical tagged records produced by the version adapters.
//!
//! Whatever raw shape the upstream tokenizer emits, the adapters translate it
//! into these records. Each record serializes as `{type, source_line, ...}`,
//! so the canonical form can be dumped and diffed as JSON. Nothing downstream
//! of this module knows which shape a record came from.

use serde::Serialize;
use serde_json::Value;

/// Read-only copy of the raw element a node was adapted from.
///
/// Child collections are stripped before storage; each child keeps its own
/// raw element instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawElement(Value);

impl RawElement {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    /// The raw value as produced by the parser.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Look up a single field of the raw element.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// A feature file and everything parsed from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "feature_file")]
pub struct FeatureFileRecord {
    /// Path or synthetic name the source was parsed under.
    pub path: String,
    /// The file's feature, absent for empty files.
    pub feature: Option<FeatureRecord>,
    /// Comments found anywhere in the file, in source order.
    pub comments: Vec<CommentRecord>,
    /// Raw document element, when the shape has one.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

/// Canonical feature record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "feature")]
pub struct FeatureRecord {
    /// 1-based line of the feature keyword.
    pub source_line: Option<usize>,
    /// Localised keyword, e.g. `Feature`.
    pub keyword: String,
    /// Feature name.
    pub name: String,
    /// Normalised description text.
    pub description: String,
    /// Tags, each including the `@` prefix.
    pub tags: Vec<TagRecord>,
    /// Optional background.
    pub background: Option<BackgroundRecord>,
    /// Scenarios and outlines in source order.
    pub tests: Vec<TestRecord>,
    /// Raw feature element.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

/// Canonical background record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "background")]
pub struct BackgroundRecord {
    /// 1-based line of the background keyword.
    pub source_line: Option<usize>,
    /// Localised keyword.
    pub keyword: String,
    /// Background name.
    pub name: String,
    /// Normalised description text.
    pub description: String,
    /// Steps in source order.
    pub steps: Vec<StepRecord>,
    /// Raw background element.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

/// Canonical scenario record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "scenario")]
pub struct ScenarioRecord {
    /// 1-based line of the scenario keyword.
    pub source_line: Option<usize>,
    /// Localised keyword.
    pub keyword: String,
    /// Scenario name.
    pub name: String,
    /// Normalised description text.
    pub description: String,
    /// Tags, each including the `@` prefix.
    pub tags: Vec<TagRecord>,
    /// Steps in source order.
    pub steps: Vec<StepRecord>,
    /// Raw scenario element.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

/// Canonical outline record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "outline")]
pub struct OutlineRecord {
    /// 1-based line of the outline keyword.
    pub source_line: Option<usize>,
    /// Localised keyword.
    pub keyword: String,
    /// Outline name.
    pub name: String,
    /// Normalised description text.
    pub description: String,
    /// Tags, each including the `@` prefix.
    pub tags: Vec<TagRecord>,
    /// Templated steps in source order.
    pub steps: Vec<StepRecord>,
    /// Example blocks in source order.
    pub examples: Vec<ExampleRecord>,
    /// Raw outline element.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

/// A test-case record: either a scenario or an outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TestRecord {
    /// A concrete scenario.
    Scenario(ScenarioRecord),
    /// A templated scenario outline.
    Outline(OutlineRecord),
}

/// Canonical example block record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "example")]
pub struct ExampleRecord {
    /// 1-based line of the examples keyword.
    pub source_line: Option<usize>,
    /// Localised keyword.
    pub keyword: String,
    /// Example block name.
    pub name: String,
    /// Normalised description text.
    pub description: String,
    /// Tags, each including the `@` prefix.
    pub tags: Vec<TagRecord>,
    /// Parameter row followed by argument rows.
    pub rows: Vec<RowRecord>,
    /// Raw examples element.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

/// Canonical step record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "step")]
pub struct StepRecord {
    /// 1-based line of the step.
    pub source_line: Option<usize>,
    /// Trimmed keyword, e.g. `Given` or `And`.
    pub keyword: String,
    /// Step text following the keyword.
    pub text: String,
    /// Attached table or doc string.
    pub block: Option<BlockRecord>,
    /// Raw step element.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

/// The block argument attached to a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BlockRecord {
    /// A data table.
    Table(TableRecord),
    /// A doc string.
    DocString(DocStringRecord),
}

/// Canonical table record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "table")]
pub struct TableRecord {
    /// 1-based line of the first row.
    pub source_line: Option<usize>,
    /// Rows in source order.
    pub rows: Vec<RowRecord>,
    /// Raw table element.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

/// Canonical table row record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "row")]
pub struct RowRecord {
    /// 1-based line of the row.
    pub source_line: Option<usize>,
    /// Cells in column order.
    pub cells: Vec<CellRecord>,
    /// Raw row element.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

/// Canonical table cell record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "cell")]
pub struct CellRecord {
    /// 1-based line of the cell.
    pub source_line: Option<usize>,
    /// Unescaped cell value.
    pub value: String,
    /// Raw cell element.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

/// Canonical doc string record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "doc_string")]
pub struct DocStringRecord {
    /// 1-based line of the opening fence.
    pub source_line: Option<usize>,
    /// Content type written after the opening fence.
    pub content_type: Option<String>,
    /// Content with fence indentation removed.
    pub content: String,
    /// Raw doc string element.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

/// Canonical tag record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "tag")]
pub struct TagRecord {
    /// 1-based line of the tag.
    pub source_line: Option<usize>,
    /// Tag name including the `@` prefix.
    pub name: String,
    /// Raw tag element.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

/// Canonical comment record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "comment")]
pub struct CommentRecord {
    /// 1-based line of the comment.
    pub source_line: Option<usize>,
    /// Comment text including the `#` marker.
    pub text: String,
    /// Raw comment element.
    #[serde(skip)]
    pub raw: Option<RawElement>,
}

impl FeatureFileRecord {
    /// Render the canonical record tree as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the tree cannot be encoded.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
