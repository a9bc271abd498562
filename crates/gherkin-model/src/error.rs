//! Error types surfaced by parsing, adapting, and editing feature models.
//!
//! Every fallible operation in the crate returns [`ModelError`]. Variants
//! carry enough context (file names, offending discriminators) for callers to
//! report failures without access to the original source text.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or editing a feature model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The grammar parser rejected the text, or a stand-alone snippet did not
    /// contain the requested element.
    #[error("failed to parse '{file}': {message}")]
    Grammar {
        /// File name (real or synthetic) the text was parsed under.
        file: String,
        /// Message reported by the parser.
        message: String,
    },

    /// The adapter met a structural variant it does not know how to model.
    #[error("unknown element type '{discriminator}'")]
    UnknownElementType {
        /// The unrecognised type discriminator.
        discriminator: String,
    },

    /// A caller supplied an invalid argument.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// An operation was attempted while the model was in the wrong state.
    #[error("invalid state: {0}")]
    State(String),

    /// An existing path could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A configuration value could not be interpreted.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ModelError {
    pub(crate) fn grammar(file: impl Into<String>, message: impl ToString) -> Self {
        Self::Grammar {
            file: file.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn unknown_type(discriminator: impl Into<String>) -> Self {
        Self::UnknownElementType {
            discriminator: discriminator.into(),
        }
    }
}

/// Convenience alias for results produced by this crate.
pub type Result<T, E = ModelError> = std::result::Result<T, E>;
