//! Steps and the blocks attached to them.

use crate::config::Dialect;
use crate::error::Result;
use crate::parsing::{self, Snippet};
use crate::record::RawElement;

/// A single step.
#[derive(Debug, Clone, Default)]
pub struct Step {
    /// Keyword as written, e.g. `Given`; rendered as `*` when empty.
    pub keyword: String,
    /// Text following the keyword.
    pub text: String,
    /// Attached table or doc string.
    pub block: Option<Block>,
    /// 1-based line of the step.
    pub source_line: Option<usize>,
    pub(crate) raw: Option<RawElement>,
}

impl Step {
    /// Create a step with the given keyword and text and no block.
    #[must_use]
    pub fn new(keyword: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Attach `block` to the step, replacing any existing block.
    #[must_use]
    pub fn with_block(mut self, block: impl Into<Block>) -> Self {
        self.block = Some(block.into());
        self
    }

    /// Parse a stand-alone step, including any block below it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::Grammar`] naming
    /// `stand_alone_step.feature` if the text is not a step.
    pub fn from_text(text: &str) -> Result<Self> {
        parsing::parse_snippet(Snippet::Step, text, &Dialect::default())?
            .into_step()
            .map(Self::from)
    }

    /// The attached table, if any.
    #[must_use]
    pub fn table(&self) -> Option<&Table> {
        self.block.as_ref().and_then(Block::as_table)
    }

    /// The attached doc string, if any.
    #[must_use]
    pub fn doc_string(&self) -> Option<&DocString> {
        self.block.as_ref().and_then(Block::as_doc_string)
    }
}

/// The block argument of a step.
#[derive(Debug, Clone)]
pub enum Block {
    /// A data table.
    Table(Table),
    /// A doc string.
    DocString(DocString),
}

impl Block {
    /// The table, if this block is one.
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            Self::DocString(_) => None,
        }
    }

    /// The doc string, if this block is one.
    #[must_use]
    pub fn as_doc_string(&self) -> Option<&DocString> {
        match self {
            Self::DocString(doc) => Some(doc),
            Self::Table(_) => None,
        }
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

impl From<DocString> for Block {
    fn from(doc: DocString) -> Self {
        Self::DocString(doc)
    }
}

/// A data table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Rows in source order.
    pub rows: Vec<TableRow>,
    /// 1-based line of the first row.
    pub source_line: Option<usize>,
    pub(crate) raw: Option<RawElement>,
}

impl Table {
    /// Build a table from rows of cell values.
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(TableRow::new).collect(),
            ..Self::default()
        }
    }

    /// Parse a stand-alone table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::Grammar`] naming
    /// `stand_alone_table.feature` if the text is not a table.
    pub fn from_text(text: &str) -> Result<Self> {
        parsing::parse_snippet(Snippet::Table, text, &Dialect::default())?
            .into_table()
            .map(Self::from)
    }
}

/// A row of a table or examples block.
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    /// Cells in column order.
    pub cells: Vec<TableCell>,
    /// 1-based line of the row.
    pub source_line: Option<usize>,
    pub(crate) raw: Option<RawElement>,
}

impl TableRow {
    /// Build a row from cell values.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: values.into_iter().map(TableCell::new).collect(),
            ..Self::default()
        }
    }

    /// Parse a stand-alone table row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::Grammar`] naming
    /// `stand_alone_table_row.feature` if the text is not a table row.
    pub fn from_text(text: &str) -> Result<Self> {
        parsing::parse_snippet(Snippet::Row, text, &Dialect::default())?
            .into_row()
            .map(Self::from)
    }

    /// Cell values in column order.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        self.cells.iter().map(|cell| cell.value.as_str()).collect()
    }
}

/// A single table cell.
#[derive(Debug, Clone, Default)]
pub struct TableCell {
    /// Unescaped cell value.
    pub value: String,
    /// 1-based line of the cell.
    pub source_line: Option<usize>,
    pub(crate) raw: Option<RawElement>,
}

impl TableCell {
    /// Create a cell holding `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

/// A doc string block.
#[derive(Debug, Clone, Default)]
pub struct DocString {
    /// Content type written after the opening fence.
    pub content_type: Option<String>,
    /// Content with the fence indentation removed.
    pub content: String,
    /// 1-based line of the opening fence.
    pub source_line: Option<usize>,
    pub(crate) raw: Option<RawElement>,
}

impl DocString {
    /// Create a doc string with `content` and no content type.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Parse a stand-alone doc string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::Grammar`] naming
    /// `stand_alone_doc_string.feature` if the text is not a doc string.
    pub fn from_text(text: &str) -> Result<Self> {
        parsing::parse_snippet(Snippet::DocString, text, &Dialect::default())?
            .into_doc_string()
            .map(Self::from)
    }
}
