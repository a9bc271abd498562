//! Example blocks of scenario outlines.

use tracing::trace;

use crate::config::Dialect;
use crate::error::{ModelError, Result};
use crate::parsing::{self, Snippet};
use crate::record::RawElement;

use super::{IntoRow, Tag, TableRow};

/// An examples block: a parameter row followed by argument rows.
#[derive(Debug, Clone, Default)]
pub struct Example {
    /// Localised keyword; rendered as `Examples` when empty.
    pub keyword: String,
    /// Example block name.
    pub name: String,
    /// Description text below the keyword line.
    pub description: String,
    /// Tags applied to the block.
    pub tags: Vec<Tag>,
    /// Every row; the first one names the parameters.
    pub rows: Vec<TableRow>,
    /// 1-based line of the keyword.
    pub source_line: Option<usize>,
    pub(crate) raw: Option<RawElement>,
}

impl Example {
    /// Parse a stand-alone examples block.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Grammar`] naming `stand_alone_example.feature`
    /// if the text is not an examples block.
    pub fn from_text(text: &str) -> Result<Self> {
        parsing::parse_snippet(Snippet::Example, text, &Dialect::default())?
            .into_example()
            .map(Self::from)
    }

    /// The parameter row, if any row exists.
    #[must_use]
    pub fn parameter_row(&self) -> Option<&TableRow> {
        self.rows.first()
    }

    /// Every row after the parameter row.
    #[must_use]
    pub fn argument_rows(&self) -> &[TableRow] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// Parameter names taken from the parameter row.
    #[must_use]
    pub fn parameters(&self) -> Vec<&str> {
        self.parameter_row().map(TableRow::values).unwrap_or_default()
    }

    /// Append an argument row.
    ///
    /// Sequences are taken positionally; mappings are arranged by parameter
    /// name, with missing parameters left empty. Values are converted to
    /// strings and trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Argument`] if `row` is neither a sequence nor a
    /// mapping, and [`ModelError::State`] if the block has no parameter row.
    pub fn add_row(&mut self, row: impl IntoRow) -> Result<()> {
        let input = row.into_row()?;
        if self.rows.is_empty() {
            return Err(ModelError::State(
                "cannot add a row: no parameters have been set".to_string(),
            ));
        }
        let values = input.arrange(&self.parameters());
        trace!(?values, "adding example row");
        self.rows.push(TableRow::new(values));
        Ok(())
    }

    /// Remove the first argument row equal to `row`.
    ///
    /// The parameter row is never removed. Removing from an empty block, or
    /// removing a row that is not present, leaves the block untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Argument`] if `row` is neither a sequence nor a
    /// mapping.
    pub fn remove_row(&mut self, row: impl IntoRow) -> Result<()> {
        let input = row.into_row()?;
        if self.rows.is_empty() {
            return Ok(());
        }
        let values = input.arrange(&self.parameters());
        let found = self
            .argument_rows()
            .iter()
            .position(|candidate| candidate.values() == values);
        if let Some(index) = found {
            trace!(?values, "removing example row");
            self.rows.remove(index + 1);
        }
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests fail loudly on unexpected errors")]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};

    #[fixture]
    fn example() -> Example {
        Example {
            rows: vec![TableRow::new(["param1", "param2"])],
            ..Example::default()
        }
    }

    fn arguments(example: &Example) -> Vec<Vec<&str>> {
        example.argument_rows().iter().map(TableRow::values).collect()
    }

    #[rstest]
    fn sequence_rows_are_positional(mut example: Example) {
        example.add_row(vec!["a", "b"]).expect("add sequence row");
        example.add_row(["c", "d"]).expect("add array row");
        example.add_row(&[1, 2][..]).expect("add slice row");
        assert_eq!(
            arguments(&example),
            vec![vec!["a", "b"], vec!["c", "d"], vec!["1", "2"]]
        );
    }

    #[rstest]
    fn mapping_rows_follow_parameter_order(mut example: Example) {
        let mut map = HashMap::new();
        map.insert("param2", "b ");
        map.insert("param1", " a");
        example.add_row(map).expect("add mapping row");

        let mut partial = BTreeMap::new();
        partial.insert("param2", "only");
        example.add_row(&partial).expect("add partial mapping row");

        assert_eq!(arguments(&example), vec![vec!["a", "b"], vec!["", "only"]]);
    }

    #[rstest]
    fn json_rows_accept_arrays_and_objects(mut example: Example) {
        example.add_row(json!([1, true])).expect("add json array");
        example
            .add_row(json!({"param1": "x", "param2": 2.5}))
            .expect("add json object");
        assert_eq!(arguments(&example), vec![vec!["1", "true"], vec!["x", "2.5"]]);
    }

    #[rstest]
    fn json_scalars_are_rejected(mut example: Example) {
        let result = example.add_row(json!("not a row"));
        assert!(matches!(result, Err(ModelError::Argument(_))));
        assert!(example.argument_rows().is_empty());
    }

    #[test]
    fn adding_without_parameters_is_a_state_error() {
        let mut example = Example::default();
        let error = example.add_row(["a"]).expect_err("no parameter row");
        assert_eq!(
            error.to_string(),
            "invalid state: cannot add a row: no parameters have been set"
        );
    }

    #[rstest]
    fn remove_row_deletes_first_match_only(mut example: Example) {
        example.add_row(["a", "b"]).expect("add row");
        example.add_row(["c", "d"]).expect("add row");
        example.add_row(["a", "b"]).expect("add row");

        example.remove_row(["a", "b"]).expect("remove row");
        assert_eq!(arguments(&example), vec![vec!["c", "d"], vec!["a", "b"]]);

        let mut map = HashMap::new();
        map.insert("param1", "c");
        map.insert("param2", "d");
        example.remove_row(&map).expect("remove mapping row");
        assert_eq!(arguments(&example), vec![vec!["a", "b"]]);
    }

    #[rstest]
    fn remove_row_never_touches_parameters(mut example: Example) {
        example.remove_row(["param1", "param2"]).expect("remove row");
        assert_eq!(example.parameters(), vec!["param1", "param2"]);
    }

    #[test]
    fn remove_row_on_empty_block_is_a_no_op() {
        let mut example = Example::default();
        example.remove_row(["a"]).expect("no-op removal");
        assert!(example.rows.is_empty());
    }
}
