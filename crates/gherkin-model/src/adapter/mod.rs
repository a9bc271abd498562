//! Version adapters.
//!
//! Each supported raw AST shape has exactly one adapter that translates it
//! into the canonical records of [`crate::record`]. Shapes are chosen once,
//! at the boundary, either explicitly by constructing a [`RawAst`] variant or
//! by [`RawAst::detect`] for serialized JSON documents.

mod gherkin2;
mod json;
mod messages;
mod native;
mod typed;

use serde_json::Value;
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::record::FeatureFileRecord;

pub(crate) use native::{adapt_native, is_language_header, mask_cell_escapes};

/// A raw AST in one of the supported shapes.
#[derive(Debug, Clone)]
pub enum RawAst<'a> {
    /// The AST of the in-process `gherkin` parser, with the text it was
    /// parsed from. `feature` is `None` for blank or comment-only text.
    Native {
        /// The parsed feature.
        feature: Option<&'a gherkin::Feature>,
        /// The exact text handed to the parser.
        source: &'a str,
    },
    /// An array of features in the gherkin 2 JSON shape.
    Gherkin2(Value),
    /// A feature object in the gherkin 3 JSON shape.
    Gherkin3(Value),
    /// A `GherkinDocument` object in the gherkin 4 JSON shape.
    Gherkin4(Value),
    /// A `gherkinDocument` body from the message protocol.
    Messages(Value),
}

impl RawAst<'_> {
    /// Short name of the shape, used in log output.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Native { .. } => "native",
            Self::Gherkin2(_) => "gherkin2",
            Self::Gherkin3(_) => "gherkin3",
            Self::Gherkin4(_) => "gherkin4",
            Self::Messages(_) => "messages",
        }
    }
}

impl RawAst<'static> {
    /// Identify the shape of a serialized AST.
    ///
    /// Arrays are gherkin 2 documents. Objects are told apart by their
    /// `type` field, or by a `gherkinDocument` envelope. A bare document
    /// with a `feature` or `uri` key and no `type` is a message body.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownElementType`] when no shape matches.
    pub fn detect(value: Value) -> Result<Self> {
        match &value {
            Value::Array(_) => return Ok(Self::Gherkin2(value)),
            Value::Object(map) => {
                if map.contains_key("gherkinDocument") {
                    let document = map.get("gherkinDocument").cloned().unwrap_or_default();
                    return Ok(Self::Messages(document));
                }
                match map.get("type").and_then(Value::as_str) {
                    Some("GherkinDocument") => return Ok(Self::Gherkin4(value)),
                    Some("Feature") => return Ok(Self::Gherkin3(value)),
                    Some(other) => return Err(ModelError::unknown_type(other)),
                    None if map.contains_key("feature") || map.contains_key("uri") => {
                        return Ok(Self::Messages(value));
                    }
                    None => {}
                }
            }
            _ => {}
        }
        Err(ModelError::unknown_type(json_kind(&value)))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "untyped object",
    }
}

/// Translate a raw AST into a canonical feature file record.
///
/// `filename` is recorded as the record's path.
///
/// # Errors
///
/// Returns [`ModelError::UnknownElementType`] when the AST contains a
/// variant the model does not support, such as a rule.
pub fn adapt(raw: RawAst<'_>, filename: &str) -> Result<FeatureFileRecord> {
    debug!(shape = raw.shape(), file = filename, "adapting raw ast");
    match raw {
        RawAst::Native { feature, source } => adapt_native(feature, source, filename, 0),
        RawAst::Gherkin2(value) => gherkin2::adapt(&value, filename),
        RawAst::Gherkin3(value) => typed::adapt_gherkin3(&value, filename),
        RawAst::Gherkin4(value) => typed::adapt_gherkin4(&value, filename),
        RawAst::Messages(value) => messages::adapt(&value, filename),
    }
}
