//! Adapter for the message-protocol shape emitted by gherkin 6 and later.
//!
//! Feature children are single-key objects naming their variant:
//! `{"background": ...}` or `{"scenario": ...}`. Scenarios and outlines share
//! one variant; a scenario with examples is an outline. Rules and any other
//! variant are not modelled.

use serde_json::Value;

use super::{json, typed};
use crate::error::{ModelError, Result};
use crate::record::{
    BackgroundRecord, BlockRecord, DocStringRecord, FeatureFileRecord, FeatureRecord,
    OutlineRecord, ScenarioRecord, StepRecord, TestRecord,
};

const FEATURE_CHILDREN: &[&str] = &["children", "tags"];
const DEFINITION_CHILDREN: &[&str] = &["steps", "examples", "tags"];
const STEP_CHILDREN: &[&str] = &["dataTable", "docString"];

/// Adapt a `gherkinDocument` message body.
pub(super) fn adapt(document: &Value, filename: &str) -> Result<FeatureFileRecord> {
    let feature = document
        .get("feature")
        .filter(|feature| !feature.is_null())
        .map(adapt_feature)
        .transpose()?;
    Ok(FeatureFileRecord {
        path: filename.to_string(),
        feature,
        comments: json::comments(document),
        raw: Some(json::raw_without(document, &["feature", "comments"])),
    })
}

fn variant(child: &Value) -> Result<(&str, &Value)> {
    child
        .as_object()
        .and_then(|map| map.iter().next())
        .map(|(key, value)| (key.as_str(), value))
        .ok_or_else(|| ModelError::unknown_type("<empty child>"))
}

fn adapt_feature(feature: &Value) -> Result<FeatureRecord> {
    let mut background = None;
    let mut tests = Vec::new();
    for child in json::array(feature, "children") {
        match variant(child)? {
            ("background", body) => background = Some(adapt_background(body)),
            ("scenario", body) => tests.push(adapt_scenario(body)),
            ("rule", _) => return Err(ModelError::unknown_type("Rule")),
            (other, _) => return Err(ModelError::unknown_type(other)),
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

fn adapt_background(background: &Value) -> BackgroundRecord {
    BackgroundRecord {
        source_line: json::line(background),
        keyword: json::keyword(background),
        name: json::name(background),
        description: json::description(background),
        steps: adapt_steps(background),
        raw: Some(json::raw_without(background, DEFINITION_CHILDREN)),
    }
}

fn adapt_scenario(scenario: &Value) -> TestRecord {
    let examples = json::array(scenario, "examples");
    let raw = Some(json::raw_without(scenario, DEFINITION_CHILDREN));
    if examples.is_empty() {
        TestRecord::Scenario(ScenarioRecord {
            source_line: json::line(scenario),
            keyword: json::keyword(scenario),
            name: json::name(scenario),
            description: json::description(scenario),
            tags: json::tags(scenario),
            steps: adapt_steps(scenario),
            raw,
        })
    } else {
        TestRecord::Outline(OutlineRecord {
            source_line: json::line(scenario),
            keyword: json::keyword(scenario),
            name: json::name(scenario),
            description: json::description(scenario),
            tags: json::tags(scenario),
            steps: adapt_steps(scenario),
            examples: examples.iter().map(typed::adapt_example).collect(),
            raw,
        })
    }
}

fn adapt_steps(container: &Value) -> Vec<StepRecord> {
    json::array(container, "steps").iter().map(adapt_step).collect()
}

fn adapt_step(step: &Value) -> StepRecord {
    let table = step
        .get("dataTable")
        .filter(|table| !table.is_null())
        .map(|table| BlockRecord::Table(typed::adapt_table(table)));
    let block = table.or_else(|| {
        step.get("docString")
            .filter(|doc| !doc.is_null())
            .map(|doc| {
                BlockRecord::DocString(DocStringRecord {
                    source_line: json::line(doc),
                    content_type: json::optional_text(doc, "mediaType")
                        .or_else(|| json::optional_text(doc, "contentType")),
                    content: json::text(doc, "content"),
                    raw: Some(json::raw_without(doc, &[])),
                })
            })
    });

    StepRecord {
        source_line: json::line(step),
        keyword: json::keyword(step),
        text: json::text(step, "text").trim().to_string(),
        block,
        raw: Some(json::raw_without(step, STEP_CHILDREN)),
    }
}
