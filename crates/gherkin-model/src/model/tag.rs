//! Tags and comments.

use crate::config::Dialect;
use crate::error::Result;
use crate::parsing::{self, Snippet};
use crate::record::RawElement;
use crate::text::normalise_tag;

/// A tag such as `@smoke`.
#[derive(Debug, Clone, Default)]
pub struct Tag {
    /// Tag name including the `@` prefix.
    pub name: String,
    /// 1-based line of the tag.
    pub source_line: Option<usize>,
    pub(crate) raw: Option<RawElement>,
}

impl Tag {
    /// Create a tag, adding the `@` prefix when missing.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: normalise_tag(name),
            ..Self::default()
        }
    }

    /// Parse the first tag of a stand-alone tag line.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::Grammar`] naming
    /// `stand_alone_tag.feature` if the text holds no tag.
    pub fn from_text(text: &str) -> Result<Self> {
        parsing::parse_snippet(Snippet::Tag, text, &Dialect::default())?
            .into_tag()
            .map(Self::from)
    }
}

/// A comment line.
#[derive(Debug, Clone, Default)]
pub struct Comment {
    /// Comment text including the `#` marker.
    pub text: String,
    /// 1-based line of the comment.
    pub source_line: Option<usize>,
    pub(crate) raw: Option<RawElement>,
}

impl Comment {
    /// Create a comment with `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}
