//! A typed document model for Gherkin feature files.
//!
//! Feature files are parsed into a tree of strongly typed nodes
//! ([`Directory`], [`FeatureFile`], [`Feature`], [`Background`],
//! [`Scenario`], [`Outline`], [`Example`], [`Step`], [`Table`], [`TableRow`],
//! [`TableCell`], [`DocString`], [`Tag`], and [`Comment`]). Every node can be
//! built programmatically, compared structurally, navigated upward through a
//! [`Cursor`], and rendered back to canonical Gherkin text with `Display`.
//!
//! Parser output reaches the model through [`adapter`], which translates each
//! supported raw AST shape into the version-neutral records of [`record`].
//!
//! ```no_run
//! use gherkin_model::{Category, Cursor, FeatureFile, NodeKind};
//!
//! # fn main() -> gherkin_model::Result<()> {
//! let file = FeatureFile::from_path("tests/features/login.feature")?;
//! let root = Cursor::root(&file);
//! let outlined_steps = root
//!     .descendants()
//!     .iter()
//!     .filter(|cursor| cursor.kind() == NodeKind::Step)
//!     .filter_map(|step| step.get_ancestor(Category::Test))
//!     .filter(|test| test.kind() == NodeKind::Outline)
//!     .count();
//! println!("{outlined_steps} outline steps");
//! if let Some(feature) = &file.feature {
//!     print!("{feature}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod logging;
mod model;
mod parsing;
pub mod record;
mod render;
mod text;

pub use adapter::{RawAst, adapt};
pub use config::{Dialect, LogLevel, ModelConfig};
pub use error::{ModelError, Result};
pub use model::*;
