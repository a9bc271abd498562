//! Adapter for the legacy gherkin 2 JSON shape.
//!
//! A document is an array of features. Backgrounds, scenarios, and outlines
//! share one `elements` array and are told apart by a lowercase `type`.
//! Comments hang off whichever element they precede.

use serde_json::Value;

use super::json;
use crate::error::{ModelError, Result};
use crate::record::{
    BackgroundRecord, BlockRecord, CommentRecord, DocStringRecord, ExampleRecord,
    FeatureFileRecord, FeatureRecord, OutlineRecord, RawElement, ScenarioRecord, StepRecord,
    TableRecord, TestRecord,
};

const FEATURE_CHILDREN: &[&str] = &["elements", "tags", "comments"];
const ELEMENT_CHILDREN: &[&str] = &["steps", "examples", "tags", "comments"];
const STEP_CHILDREN: &[&str] = &["rows", "doc_string", "comments"];

pub(super) fn adapt(document: &Value, filename: &str) -> Result<FeatureFileRecord> {
    let Some(feature) = document.as_array().and_then(|features| features.first()) else {
        return Ok(FeatureFileRecord {
            path: filename.to_string(),
            feature: None,
            comments: Vec::new(),
            raw: Some(RawElement::new(document.clone())),
        });
    };

    let mut comments = Vec::new();
    collect_comments(feature, &mut comments);
    comments.sort_by_key(|comment| comment.source_line);

    Ok(FeatureFileRecord {
        path: filename.to_string(),
        feature: Some(adapt_feature(feature)?),
        comments,
        raw: None,
    })
}

fn collect_comments(node: &Value, into: &mut Vec<CommentRecord>) {
    into.extend(json::comments(node));
    for key in ["elements", "steps", "examples", "rows"] {
        for child in json::array(node, key) {
            collect_comments(child, into);
        }
    }
}

fn adapt_feature(feature: &Value) -> Result<FeatureRecord> {
    let mut background = None;
    let mut tests = Vec::new();
    for element in json::array(feature, "elements") {
        match json::discriminator(element, "type")? {
            "background" => background = Some(adapt_background(element)),
            "scenario" => tests.push(TestRecord::Scenario(adapt_scenario(element))),
            "scenario_outline" => tests.push(TestRecord::Outline(adapt_outline(element))),
            other => return Err(ModelError::unknown_type(other)),
        }
    }

    Ok(FeatureRecord {
        source_line: json::line(feature),
        keyword: json::keyword(feature),
        name: json::name(feature),
        description: json::description(feature),
        tags: json::tags(feature),
        background,
        tests,
        raw: Some(json::raw_without(feature, FEATURE_CHILDREN)),
    })
}

fn adapt_background(element: &Value) -> BackgroundRecord {
    BackgroundRecord {
        source_line: json::line(element),
        keyword: json::keyword(element),
        name: json::name(element),
        description: json::description(element),
        steps: adapt_steps(element),
        raw: Some(json::raw_without(element, ELEMENT_CHILDREN)),
    }
}

fn adapt_scenario(element: &Value) -> ScenarioRecord {
    ScenarioRecord {
        source_line: json::line(element),
        keyword: json::keyword(element),
        name: json::name(element),
        description: json::description(element),
        tags: json::tags(element),
        steps: adapt_steps(element),
        raw: Some(json::raw_without(element, ELEMENT_CHILDREN)),
    }
}

fn adapt_outline(element: &Value) -> OutlineRecord {
    OutlineRecord {
        source_line: json::line(element),
        keyword: json::keyword(element),
        name: json::name(element),
        description: json::description(element),
        tags: json::tags(element),
        steps: adapt_steps(element),
        examples: json::array(element, "examples")
            .iter()
            .map(adapt_example)
            .collect(),
        raw: Some(json::raw_without(element, ELEMENT_CHILDREN)),
    }
}

fn adapt_example(example: &Value) -> ExampleRecord {
    ExampleRecord {
        source_line: json::line(example),
        keyword: json::keyword(example),
        name: json::name(example),
        description: json::description(example),
        tags: json::tags(example),
        rows: json::array(example, "rows").iter().map(json::row).collect(),
        raw: Some(json::raw_without(example, &["rows", "tags", "comments"])),
    }
}

fn adapt_steps(element: &Value) -> Vec<StepRecord> {
    json::array(element, "steps").iter().map(adapt_step).collect()
}

fn adapt_step(step: &Value) -> StepRecord {
    let table = step.get("rows").and_then(Value::as_array).map(|rows| {
        let rows: Vec<_> = rows.iter().map(json::row).collect();
        BlockRecord::Table(TableRecord {
            source_line: rows.first().and_then(|row| row.source_line),
            rows,
            raw: None,
        })
    });
    let block = table.or_else(|| {
        step.get("doc_string").map(|doc| {
            BlockRecord::DocString(DocStringRecord {
                source_line: json::line(doc),
                content_type: json::optional_text(doc, "content_type"),
                content: json::text(doc, "value"),
                raw: Some(json::raw_without(doc, &[])),
            })
        })
    });

    StepRecord {
        source_line: json::line(step),
        keyword: json::keyword(step),
        text: json::text(step, "name").trim().to_string(),
        block,
        raw: Some(json::raw_without(step, STEP_CHILDREN)),
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests fail loudly on adapter errors")]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!([{
            "keyword": "Feature",
            "name": "legacy",
            "line": 2,
            "description": "",
            "tags": [{"name": "@old", "line": 1}],
            "comments": [{"value": "# top", "line": 1}],
            "elements": [
                {"type": "background", "keyword": "Background", "name": "", "line": 3,
                 "steps": [{"keyword": "Given ", "name": "setup", "line": 4}]},
                {"type": "scenario", "keyword": "Scenario", "name": "plain", "line": 6,
                 "comments": [{"value": "# inner", "line": 5}],
                 "steps": [{"keyword": "When ", "name": "a table", "line": 7,
                            "rows": [{"cells": ["a", "b"], "line": 8}]}]},
                {"type": "scenario_outline", "keyword": "Scenario Outline", "name": "many",
                 "line": 10,
                 "steps": [{"keyword": "Then ", "name": "<x>", "line": 11,
                            "doc_string": {"value": "body", "content_type": "text", "line": 12}}],
                 "examples": [{"keyword": "Examples", "name": "", "line": 15,
                               "rows": [{"cells": ["x"], "line": 16}, {"cells": ["1"], "line": 17}]}]}
            ]
        }])
    }

    #[test]
    fn elements_are_split_by_type() {
        let record = adapt(&document(), "legacy.feature").expect("adapt document");
        let feature = record.feature.expect("feature present");
        assert_eq!(feature.source_line, Some(2));
        assert_eq!(feature.tags.first().map(|tag| tag.name.as_str()), Some("@old"));
        assert!(feature.background.is_some());
        assert!(matches!(feature.tests.first(), Some(TestRecord::Scenario(_))));
        match feature.tests.get(1) {
            Some(TestRecord::Outline(outline)) => {
                assert_eq!(outline.examples.first().map(|ex| ex.rows.len()), Some(2));
                let step = outline.steps.first().expect("outline step");
                assert!(matches!(
                    &step.block,
                    Some(BlockRecord::DocString(doc)) if doc.content_type.as_deref() == Some("text")
                ));
            }
            other => panic!("expected outline, got {other:?}"),
        }
        let texts: Vec<&str> = record.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["# top", "# inner"]);
    }

    #[test]
    fn unknown_element_type_is_rejected() {
        let document = json!([{"keyword": "Feature", "elements": [{"type": "rule"}]}]);
        let error = adapt(&document, "x.feature").expect_err("rule is unknown");
        assert_eq!(error.to_string(), "unknown element type 'rule'");
    }

    #[test]
    fn empty_document_has_no_feature() {
        let record = adapt(&json!([]), "empty.feature").expect("adapt empty");
        assert!(record.feature.is_none());
    }
}
