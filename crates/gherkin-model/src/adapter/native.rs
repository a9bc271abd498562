//! Adapter for the AST produced by the in-process `gherkin` parser.
//!
//! The parser keeps names, descriptions, and step values, but drops details
//! the model needs: doc string fences and content types, exact table row
//! lines, escaped cells, tag lines, and comments. Those are recovered from the
//! normalised source text the AST was parsed from.

mod docstring;
mod markers;
mod source;
mod table;

use gherkin::{LineCol, Span};
use serde_json::{Value, json};
use tracing::warn;

use crate::error::{ModelError, Result};
use crate::record::{
    BackgroundRecord, BlockRecord, CellRecord, CommentRecord, DocStringRecord, ExampleRecord,
    FeatureFileRecord, FeatureRecord, OutlineRecord, RawElement, RowRecord, ScenarioRecord,
    StepRecord, TableRecord, TagRecord, TestRecord,
};
use crate::text::{normalise_description, normalise_tag};

pub(crate) use markers::is_language_header;
pub(crate) use table::mask_cell_escapes;
use source::FeatureSource;

/// Text fields the parser models as either `String` or `Option<String>`.
trait OptionalText {
    fn text(&self) -> &str;
}

impl OptionalText for String {
    fn text(&self) -> &str {
        self
    }
}

impl OptionalText for Option<String> {
    fn text(&self) -> &str {
        self.as_deref().unwrap_or_default()
    }
}

/// Adapt a parsed feature, or an empty document, into canonical records.
///
/// `line_offset` is subtracted from every line so elements parsed inside a
/// synthetic wrapper report lines relative to the wrapped text.
pub(crate) fn adapt_native(
    feature: Option<&gherkin::Feature>,
    text: &str,
    filename: &str,
    line_offset: usize,
) -> Result<FeatureFileRecord> {
    let adapter = NativeAdapter {
        source: FeatureSource::new(text),
        line_offset,
    };
    let feature = feature.map(|feature| adapter.feature(feature)).transpose()?;
    Ok(FeatureFileRecord {
        path: filename.to_string(),
        feature,
        comments: adapter.comments(),
        raw: None,
    })
}

/// An outline has examples, or is introduced by an outline keyword.
pub(super) fn is_outline(scenario: &gherkin::Scenario) -> bool {
    if !scenario.examples.is_empty() {
        return true;
    }
    let keyword = scenario.keyword.to_lowercase();
    keyword.contains("outline") || keyword.contains("template")
}

fn raw_node(
    kind: &str,
    keyword: &str,
    name: &str,
    description: &str,
    span: Span,
    position: &LineCol,
) -> RawElement {
    RawElement::new(json!({
        "type": kind,
        "keyword": keyword,
        "name": name,
        "description": description,
        "span": {"start": span.start, "end": span.end},
        "position": {"line": position.line, "col": position.col},
    }))
}

struct NativeAdapter<'a> {
    source: FeatureSource<'a>,
    line_offset: usize,
}

impl NativeAdapter<'_> {
    fn relative(&self, line: usize) -> Option<usize> {
        line.checked_sub(self.line_offset).filter(|line| *line > 0)
    }

    fn keyword_line(&self, span: Span) -> usize {
        self.source.keyword_line(self.source.line_of(span.start))
    }

    fn feature(&self, feature: &gherkin::Feature) -> Result<FeatureRecord> {
        if !feature.rules.is_empty() {
            return Err(ModelError::unknown_type("Rule"));
        }
        let line = self.keyword_line(feature.span);
        Ok(FeatureRecord {
            source_line: self.relative(line),
            keyword: feature.keyword.trim().to_string(),
            name: feature.name.text().trim().to_string(),
            description: normalise_description(feature.description.text()),
            tags: self.tags(&feature.tags, line),
            background: feature
                .background
                .as_ref()
                .map(|background| self.background(background)),
            tests: feature
                .scenarios
                .iter()
                .map(|scenario| self.test(scenario))
                .collect(),
            raw: Some(raw_node(
                "Feature",
                &feature.keyword,
                feature.name.text(),
                feature.description.text(),
                feature.span,
                &feature.position,
            )),
        })
    }

    fn background(&self, background: &gherkin::Background) -> BackgroundRecord {
        let line = self.keyword_line(background.span);
        BackgroundRecord {
            source_line: self.relative(line),
            keyword: background.keyword.trim().to_string(),
            name: background.name.text().trim().to_string(),
            description: normalise_description(background.description.text()),
            steps: self.steps(&background.steps),
            raw: Some(raw_node(
                "Background",
                &background.keyword,
                background.name.text(),
                background.description.text(),
                background.span,
                &background.position,
            )),
        }
    }

    fn test(&self, scenario: &gherkin::Scenario) -> TestRecord {
        let line = self.keyword_line(scenario.span);
        let source_line = self.relative(line);
        let keyword = scenario.keyword.trim().to_string();
        let name = scenario.name.text().trim().to_string();
        let description = normalise_description(scenario.description.text());
        let tags = self.tags(&scenario.tags, line);
        let steps = self.steps(&scenario.steps);

        if is_outline(scenario) {
            TestRecord::Outline(OutlineRecord {
                source_line,
                keyword,
                name,
                description,
                tags,
                steps,
                examples: scenario
                    .examples
                    .iter()
                    .map(|examples| self.examples(examples))
                    .collect(),
                raw: Some(raw_node(
                    "ScenarioOutline",
                    &scenario.keyword,
                    scenario.name.text(),
                    scenario.description.text(),
                    scenario.span,
                    &scenario.position,
                )),
            })
        } else {
            TestRecord::Scenario(ScenarioRecord {
                source_line,
                keyword,
                name,
                description,
                tags,
                steps,
                raw: Some(raw_node(
                    "Scenario",
                    &scenario.keyword,
                    scenario.name.text(),
                    scenario.description.text(),
                    scenario.span,
                    &scenario.position,
                )),
            })
        }
    }

    fn examples(&self, examples: &gherkin::Examples) -> ExampleRecord {
        let line = self.keyword_line(examples.span);
        ExampleRecord {
            source_line: self.relative(line),
            keyword: examples.keyword.trim().to_string(),
            name: examples.name.text().trim().to_string(),
            description: normalise_description(examples.description.text()),
            tags: self.tags(&examples.tags, line),
            rows: examples
                .table
                .as_ref()
                .map(|table| self.rows(table))
                .unwrap_or_default(),
            raw: Some(raw_node(
                "Examples",
                &examples.keyword,
                examples.name.text(),
                examples.description.text(),
                examples.span,
                &examples.position,
            )),
        }
    }

    fn steps(&self, steps: &[gherkin::Step]) -> Vec<StepRecord> {
        steps.iter().map(|step| self.step(step)).collect()
    }

    fn step(&self, step: &gherkin::Step) -> StepRecord {
        let line = self.source.line_of(step.span.start);
        let block = match (&step.table, &step.docstring) {
            (Some(table), _) => Some(BlockRecord::Table(self.table(table))),
            (None, Some(body)) => Some(BlockRecord::DocString(self.doc_string(line, body))),
            (None, None) => None,
        };
        StepRecord {
            source_line: self.relative(line),
            keyword: step.keyword.trim().to_string(),
            text: step.value.trim().to_string(),
            block,
            raw: Some(RawElement::new(json!({
                "type": "Step",
                "keyword": step.keyword,
                "step_type": format!("{:?}", step.ty),
                "value": step.value,
                "span": {"start": step.span.start, "end": step.span.end},
                "position": {"line": step.position.line, "col": step.position.col},
            }))),
        }
    }

    fn table(&self, table: &gherkin::Table) -> TableRecord {
        let rows = self.rows(table);
        TableRecord {
            source_line: rows.first().and_then(|row| row.source_line),
            rows,
            raw: Some(RawElement::new(json!({
                "type": "DataTable",
                "span": {"start": table.span.start, "end": table.span.end},
                "position": {"line": table.position.line, "col": table.position.col},
            }))),
        }
    }

    fn rows(&self, table: &gherkin::Table) -> Vec<RowRecord> {
        let first_line = self.source.line_of(table.span.start);
        let scanned = table::scan_rows(&self.source, first_line, table.rows.len()).filter(|rows| {
            rows.iter()
                .zip(&table.rows)
                .all(|(scanned, parsed)| scanned.cells.len() == parsed.len())
        });

        if let Some(rows) = scanned {
            return rows
                .into_iter()
                .zip(&table.rows)
                .map(|(row, parsed)| self.row(Some(row.line), row.cells, parsed))
                .collect();
        }
        warn!(
            line = self.relative(first_line),
            "table rows could not be matched to the source; keeping parsed cells"
        );
        table
            .rows
            .iter()
            .map(|parsed| {
                let values = parsed
                    .iter()
                    .map(String::as_str)
                    .map(table::unescape_masked)
                    .collect();
                self.row(None, values, parsed)
            })
            .collect()
    }

    fn row(&self, line: Option<usize>, values: Vec<String>, parsed: &[String]) -> RowRecord {
        let source_line = line.and_then(|line| self.relative(line));
        RowRecord {
            source_line,
            cells: values
                .into_iter()
                .zip(parsed)
                .map(|(value, raw)| CellRecord {
                    source_line,
                    value,
                    raw: Some(RawElement::new(Value::String(table::unmask_cell(raw)))),
                })
                .collect(),
            raw: Some(RawElement::new(json!(
                parsed.iter().map(String::as_str).map(table::unmask_cell).collect::<Vec<_>>()
            ))),
        }
    }

    fn doc_string(&self, step_line: usize, body: &str) -> DocStringRecord {
        let raw = Some(RawElement::new(Value::String(body.to_string())));
        docstring::scan_doc_string(&self.source, step_line).map_or_else(
            || DocStringRecord {
                source_line: None,
                content_type: None,
                content: body.to_string(),
                raw: raw.clone(),
            },
            |scanned| DocStringRecord {
                source_line: self.relative(scanned.line),
                content_type: scanned.content_type,
                content: scanned.content,
                raw: raw.clone(),
            },
        )
    }

    fn tags(&self, tags: &[String], keyword_line: usize) -> Vec<TagRecord> {
        let mut located = markers::tag_lines(&self.source, keyword_line);
        tags.iter()
            .map(|tag| {
                let name = normalise_tag(tag);
                let line = located
                    .iter()
                    .position(|(_, found)| *found == name)
                    .map(|index| located.remove(index).0);
                TagRecord {
                    source_line: line.and_then(|line| self.relative(line)),
                    name,
                    raw: Some(RawElement::new(Value::String(tag.clone()))),
                }
            })
            .collect()
    }

    fn comments(&self) -> Vec<CommentRecord> {
        markers::comment_lines(&self.source)
            .into_iter()
            .map(|(line, text)| CommentRecord {
                source_line: self.relative(line),
                raw: Some(RawElement::new(Value::String(text.clone()))),
                text,
            })
            .collect()
    }
}
