//! Adapter for the gherkin 3 and gherkin 4 JSON shapes.
//!
//! Both shapes use capitalised `type` discriminators and `location` objects.
//! Gherkin 3 roots the document at the feature, with a separate `background`
//! and a `scenarioDefinitions` array. Gherkin 4 wraps the feature in a
//! `GherkinDocument` and lists the background among the feature's children.

use serde_json::Value;

use super::json;
use crate::error::{ModelError, Result};
use crate::record::{
    BackgroundRecord, BlockRecord, DocStringRecord, ExampleRecord, FeatureFileRecord,
    FeatureRecord, OutlineRecord, ScenarioRecord, StepRecord, TableRecord, TestRecord,
};

const FEATURE_CHILDREN: &[&str] = &[
    "background",
    "scenarioDefinitions",
    "children",
    "tags",
    "comments",
];
const DEFINITION_CHILDREN: &[&str] = &["steps", "examples", "tags"];
const STEP_CHILDREN: &[&str] = &["argument"];

/// Adapt a gherkin 3 document rooted at its feature.
pub(super) fn adapt_gherkin3(feature: &Value, filename: &str) -> Result<FeatureFileRecord> {
    let background = feature
        .get("background")
        .filter(|background| !background.is_null())
        .map(adapt_background)
        .transpose()?;
    let tests = json::array(feature, "scenarioDefinitions")
        .iter()
        .map(adapt_definition)
        .collect::<Result<Vec<_>>>()?;

    Ok(FeatureFileRecord {
        path: filename.to_string(),
        comments: json::comments(feature),
        feature: Some(feature_record(feature, background, tests)),
        raw: None,
    })
}

/// Adapt a gherkin 4 `GherkinDocument`.
pub(super) fn adapt_gherkin4(document: &Value, filename: &str) -> Result<FeatureFileRecord> {
    let feature = document
        .get("feature")
        .filter(|feature| !feature.is_null())
        .map(adapt_gherkin4_feature)
        .transpose()?;
    Ok(FeatureFileRecord {
        path: filename.to_string(),
        feature,
        comments: json::comments(document),
        raw: Some(json::raw_without(document, &["feature", "comments"])),
    })
}

fn adapt_gherkin4_feature(feature: &Value) -> Result<FeatureRecord> {
    let mut background = None;
    let mut tests = Vec::new();
    for child in json::array(feature, "children") {
        if json::discriminator(child, "type")? == "Background" {
            background = Some(adapt_background(child)?);
        } else {
            tests.push(adapt_definition(child)?);
        }
    }
    Ok(feature_record(feature, background, tests))
}

fn feature_record(
    feature: &Value,
    background: Option<BackgroundRecord>,
    tests: Vec<TestRecord>,
) -> FeatureRecord {
    FeatureRecord {
        source_line: json::line(feature),
        keyword: json::keyword(feature),
        name: json::name(feature),
        description: json::description(feature),
        tags: json::tags(feature),
        background,
        tests,
        raw: Some(json::raw_without(feature, FEATURE_CHILDREN)),
    }
}

fn adapt_background(background: &Value) -> Result<BackgroundRecord> {
    Ok(BackgroundRecord {
        source_line: json::line(background),
        keyword: json::keyword(background),
        name: json::name(background),
        description: json::description(background),
        steps: json::array(background, "steps")
            .iter()
            .map(adapt_step)
            .collect::<Result<_>>()?,
        raw: Some(json::raw_without(background, DEFINITION_CHILDREN)),
    })
}

fn adapt_definition(definition: &Value) -> Result<TestRecord> {
    let steps = json::array(definition, "steps")
        .iter()
        .map(adapt_step)
        .collect::<Result<Vec<_>>>()?;
    let raw = Some(json::raw_without(definition, DEFINITION_CHILDREN));

    match json::discriminator(definition, "type")? {
        "Scenario" => Ok(TestRecord::Scenario(ScenarioRecord {
            source_line: json::line(definition),
            keyword: json::keyword(definition),
            name: json::name(definition),
            description: json::description(definition),
            tags: json::tags(definition),
            steps,
            raw,
        })),
        "ScenarioOutline" => Ok(TestRecord::Outline(OutlineRecord {
            source_line: json::line(definition),
            keyword: json::keyword(definition),
            name: json::name(definition),
            description: json::description(definition),
            tags: json::tags(definition),
            steps,
            examples: json::array(definition, "examples")
                .iter()
                .map(adapt_example)
                .collect(),
            raw,
        })),
        other => Err(ModelError::unknown_type(other)),
    }
}

pub(super) fn adapt_example(example: &Value) -> ExampleRecord {
    ExampleRecord {
        source_line: json::line(example),
        keyword: json::keyword(example),
        name: json::name(example),
        description: json::description(example),
        tags: json::tags(example),
        rows: json::header_and_body(example),
        raw: Some(json::raw_without(
            example,
            &["tableHeader", "tableBody", "tags"],
        )),
    }
}

fn adapt_step(step: &Value) -> Result<StepRecord> {
    let block = step
        .get("argument")
        .filter(|argument| !argument.is_null())
        .map(adapt_argument)
        .transpose()?;

    Ok(StepRecord {
        source_line: json::line(step),
        keyword: json::keyword(step),
        text: json::text(step, "text").trim().to_string(),
        block,
        raw: Some(json::raw_without(step, STEP_CHILDREN)),
    })
}

fn adapt_argument(argument: &Value) -> Result<BlockRecord> {
    match json::discriminator(argument, "type")? {
        "DataTable" => Ok(BlockRecord::Table(adapt_table(argument))),
        "DocString" => Ok(BlockRecord::DocString(DocStringRecord {
            source_line: json::line(argument),
            content_type: json::optional_text(argument, "contentType"),
            content: json::text(argument, "content"),
            raw: Some(json::raw_without(argument, &[])),
        })),
        other => Err(ModelError::unknown_type(other)),
    }
}

pub(super) fn adapt_table(table: &Value) -> TableRecord {
    let rows: Vec<_> = json::array(table, "rows").iter().map(json::row).collect();
    TableRecord {
        source_line: json::line(table).or_else(|| rows.first().and_then(|row| row.source_line)),
        rows,
        raw: Some(json::raw_without(table, &["rows"])),
    }
}
