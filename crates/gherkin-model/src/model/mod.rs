//! Typed document tree for feature files.
//!
//! Ownership flows strictly downward: a [`Feature`] owns its tests, a test
//! owns its steps, a step owns its block. Upward navigation is provided by
//! [`Cursor`], which borrows the tree and records the path taken from a root
//! node, so parent links never own anything and cycles cannot form.
//!
//! Every node type has a `Default` value suitable for programmatic assembly:
//! collections start empty and scalars start unset.

mod build;
mod cursor;
mod equality;
mod example;
mod feature;
mod node;
mod rows;
mod step;
mod tag;
mod test_case;

pub use cursor::{Ancestors, Cursor};
pub use example::Example;
pub use feature::{Directory, Feature, FeatureFile};
pub use node::{Category, KindQuery, NodeKind, NodeRef};
pub use rows::{IntoRow, RowInput};
pub use step::{Block, DocString, Step, Table, TableCell, TableRow};
pub use tag::{Comment, Tag};
pub use test_case::{Background, Outline, Scenario, Test};

/// Implements the read-only raw element accessor shared by sourced nodes.
macro_rules! raw_element_accessor {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// The raw parser element this node was adapted from, if any.
                #[must_use]
                pub fn raw_element(&self) -> Option<&crate::record::RawElement> {
                    self.raw.as_ref()
                }
            }
        )+
    };
}

raw_element_accessor!(
    FeatureFile,
    Feature,
    Background,
    Scenario,
    Outline,
    Example,
    Step,
    Table,
    TableRow,
    TableCell,
    DocString,
    Tag,
    Comment,
);
