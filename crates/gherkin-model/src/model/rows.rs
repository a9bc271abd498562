//! Conversion of caller-supplied values into example rows.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::BuildHasher;

use serde_json::Value;

use crate::error::{ModelError, Result};

/// A row supplied by a caller, before it is arranged against parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowInput {
    /// Values in column order.
    Values(Vec<String>),
    /// Values keyed by parameter name.
    Mapping(Vec<(String, String)>),
}

impl RowInput {
    /// Produce cell values for a row under `parameters`.
    ///
    /// Sequences pass through unchanged. Mappings are laid out in parameter
    /// order, with an empty string for each parameter the mapping lacks.
    #[must_use]
    pub fn arrange(&self, parameters: &[&str]) -> Vec<String> {
        match self {
            Self::Values(values) => values.clone(),
            Self::Mapping(pairs) => parameters
                .iter()
                .map(|parameter| {
                    pairs
                        .iter()
                        .find(|(key, _)| key == parameter)
                        .map(|(_, value)| value.clone())
                        .unwrap_or_default()
                })
                .collect(),
        }
    }
}

/// Values that can be added to or removed from an examples block.
///
/// Implemented for sequences (`Vec`, slices, arrays), string-keyed maps, and
/// JSON arrays or objects. Every value is rendered with `Display` and
/// trimmed.
pub trait IntoRow {
    /// Convert into a row input.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Argument`] for values that are neither
    /// sequences nor mappings.
    fn into_row(self) -> Result<RowInput>;
}

fn cell<T: Display + ?Sized>(value: &T) -> String {
    value.to_string().trim().to_string()
}

fn values<'a, T, I>(items: I) -> RowInput
where
    T: Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    RowInput::Values(items.into_iter().map(cell).collect())
}

fn mapping<'a, K, V, I>(pairs: I) -> RowInput
where
    K: Display + 'a,
    V: Display + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    RowInput::Mapping(
        pairs
            .into_iter()
            .map(|(key, value)| (cell(key), cell(value)))
            .collect(),
    )
}

impl<T: Display> IntoRow for Vec<T> {
    fn into_row(self) -> Result<RowInput> {
        Ok(values(&self))
    }
}

impl<T: Display> IntoRow for &Vec<T> {
    fn into_row(self) -> Result<RowInput> {
        Ok(values(self))
    }
}

impl<T: Display> IntoRow for &[T] {
    fn into_row(self) -> Result<RowInput> {
        Ok(values(self))
    }
}

impl<T: Display, const N: usize> IntoRow for [T; N] {
    fn into_row(self) -> Result<RowInput> {
        Ok(values(&self))
    }
}

impl<K: Display, V: Display, S: BuildHasher> IntoRow for HashMap<K, V, S> {
    fn into_row(self) -> Result<RowInput> {
        Ok(mapping(&self))
    }
}

impl<K: Display, V: Display, S: BuildHasher> IntoRow for &HashMap<K, V, S> {
    fn into_row(self) -> Result<RowInput> {
        Ok(mapping(self))
    }
}

impl<K: Display, V: Display> IntoRow for BTreeMap<K, V> {
    fn into_row(self) -> Result<RowInput> {
        Ok(mapping(&self))
    }
}

impl<K: Display, V: Display> IntoRow for &BTreeMap<K, V> {
    fn into_row(self) -> Result<RowInput> {
        Ok(mapping(self))
    }
}

fn json_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => cell(text),
        other => cell(other),
    }
}

impl IntoRow for &Value {
    fn into_row(self) -> Result<RowInput> {
        match self {
            Value::Array(items) => Ok(RowInput::Values(items.iter().map(json_cell).collect())),
            Value::Object(map) => Ok(RowInput::Mapping(
                map.iter()
                    .map(|(key, value)| (cell(key), json_cell(value)))
                    .collect(),
            )),
            other => Err(ModelError::Argument(format!(
                "can only add rows from sequences or mappings, got {other}"
            ))),
        }
    }
}

impl IntoRow for Value {
    fn into_row(self) -> Result<RowInput> {
        (&self).into_row()
    }
}

impl IntoRow for RowInput {
    fn into_row(self) -> Result<RowInput> {
        Ok(self)
    }
}
