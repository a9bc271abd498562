//! Behavioural tests for building models from serialized parser output.

#![expect(clippy::expect_used, reason = "behavioural tests use explicit panics for clarity")]

use gherkin_model::{Feature, FeatureFile, ModelError, RawAst, adapt};
use rstest::rstest;
use serde_json::{Value, json};

fn gherkin2() -> Value {
    json!([{
        "keyword": "Feature",
        "name": "shapes",
        "description": "",
        "line": 1,
        "tags": [{"name": "@shape", "line": 1}],
        "elements": [{
            "type": "scenario",
            "keyword": "Scenario",
            "name": "one",
            "description": "",
            "line": 3,
            "steps": [{
                "keyword": "Given ",
                "name": "a table",
                "line": 4,
                "rows": [{"cells": ["a", "b"], "line": 5}]
            }]
        }]
    }])
}

fn gherkin4() -> Value {
    json!({
        "type": "GherkinDocument",
        "feature": {
            "type": "Feature",
            "keyword": "Feature",
            "name": "shapes",
            "location": {"line": 2, "column": 1},
            "tags": [{"type": "Tag", "name": "@shape", "location": {"line": 1, "column": 1}}],
            "children": [{
                "type": "Scenario",
                "keyword": "Scenario",
                "name": "one",
                "location": {"line": 3, "column": 3},
                "tags": [],
                "steps": [{
                    "type": "Step",
                    "keyword": "Given ",
                    "text": "a table",
                    "location": {"line": 4, "column": 5},
                    "argument": {
                        "type": "DataTable",
                        "location": {"line": 5, "column": 7},
                        "rows": [{
                            "type": "TableRow",
                            "location": {"line": 5, "column": 7},
                            "cells": [
                                {"type": "TableCell", "value": "a", "location": {"line": 5, "column": 9}},
                                {"type": "TableCell", "value": "b", "location": {"line": 5, "column": 13}}
                            ]
                        }]
                    }
                }]
            }]
        },
        "comments": []
    })
}

fn messages() -> Value {
    json!({
        "gherkinDocument": {
            "uri": "shapes.feature",
            "feature": {
                "keyword": "Feature",
                "name": "shapes",
                "location": {"line": 2, "column": 1},
                "tags": [{"name": "@shape", "location": {"line": 1, "column": 1}}],
                "children": [{"scenario": {
                    "keyword": "Scenario",
                    "name": "one",
                    "location": {"line": 3, "column": 3},
                    "tags": [],
                    "examples": [],
                    "steps": [{
                        "keyword": "Given ",
                        "text": "a table",
                        "location": {"line": 4, "column": 5},
                        "dataTable": {
                            "location": {"line": 5, "column": 7},
                            "rows": [{"location": {"line": 5, "column": 7},
                                      "cells": [{"value": "a"}, {"value": "b"}]}]
                        }
                    }]
                }}]
            },
            "comments": []
        }
    })
}

fn feature_from(value: Value) -> Feature {
    let raw = RawAst::detect(value).expect("shape detected");
    let record = adapt(raw, "shapes.feature").expect("adapt document");
    FeatureFile::from(record).feature.expect("feature present")
}

#[rstest]
#[case::gherkin2(gherkin2())]
#[case::gherkin4(gherkin4())]
#[case::messages(messages())]
fn every_shape_builds_the_same_model(#[case] value: Value) {
    let feature = feature_from(value);
    let expected = [
        "@shape",
        "Feature: shapes",
        "",
        "  Scenario: one",
        "    Given a table",
        "      | a | b |",
    ]
    .join("\n");
    assert_eq!(feature.to_string(), expected);
    let table = feature
        .tests
        .first()
        .and_then(|test| test.steps().first())
        .and_then(|step| step.table())
        .expect("table block");
    assert_eq!(table.rows.first().and_then(|row| row.source_line), Some(5));
}

#[test]
fn shapes_compare_equal_to_each_other() {
    let old = feature_from(gherkin2());
    let new = feature_from(messages());
    assert_eq!(old, new);
}

#[test]
fn raw_elements_stay_readable() {
    let feature = feature_from(gherkin4());
    let raw = feature.raw_element().expect("raw element kept");
    assert_eq!(raw.get("type").and_then(Value::as_str), Some("Feature"));
    assert!(raw.get("children").is_none());
}

#[rstest]
#[case(json!({"type": "Rule"}), "Rule")]
#[case(json!({"type": "GherkinDocument", "feature": {"type": "Feature", "children": [{"type": "Rule"}]}}), "Rule")]
#[case(json!([{"keyword": "Feature", "elements": [{"type": "mystery"}]}]), "mystery")]
fn unknown_variants_are_reported(#[case] value: Value, #[case] discriminator: &str) {
    let error = RawAst::detect(value)
        .and_then(|raw| adapt(raw, "unknown.feature"))
        .expect_err("unknown variant is rejected");
    assert!(matches!(
        error,
        ModelError::UnknownElementType { discriminator: ref found } if found == discriminator
    ));
}
