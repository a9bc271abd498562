//! Configuration for parsing and logging.
//!
//! Configuration is an explicit value: parse entry points take a [`Dialect`]
//! argument rather than consulting global state. [`ModelConfig::from_env`]
//! resolves process-wide defaults from environment variables prefixed with
//! `GHERKIN_MODEL_`.

use std::env;
use std::fmt;
use std::str::FromStr;

use gherkin::GherkinEnv;

use crate::error::ModelError;

/// Environment variable selecting the log level.
pub const LOG_LEVEL_VAR: &str = "GHERKIN_MODEL_LOG_LEVEL";
/// Environment variable selecting the default grammar dialect.
pub const DIALECT_VAR: &str = "GHERKIN_MODEL_DIALECT";

/// Minimum level of the events [`crate::logging::init_logging`] prints.
///
/// Defaults to `Warn`, which only surfaces lossy table recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Row edits and everything below.
    Trace,
    /// Parse, adapt and directory-walk boundaries.
    Debug,
    /// Informational events.
    Info,
    /// Recoverable problems.
    #[default]
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    const ALL: [Self; 5] = [Self::Trace, Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// The level as a `tracing` filter directive.
    #[must_use]
    pub fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = if wanted == "warning" { "warn" } else { wanted.as_str() };
        Self::ALL
            .into_iter()
            .find(|level| level.as_filter_str() == wanted)
            .ok_or_else(|| {
                ModelError::Config(format!(
                    "{LOG_LEVEL_VAR}: unknown log level '{s}', expected trace, debug, info, warn or error"
                ))
            })
    }
}

/// Grammar dialect used to localise keywords.
///
/// A dialect only changes which keywords the parser accepts; the resulting
/// model structure is identical across dialects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dialect(String);

impl Dialect {
    /// The default English dialect.
    pub const DEFAULT_CODE: &'static str = "en";

    /// Create a dialect from a language code such as `en` or `en-au`.
    ///
    /// The code is not validated until it is used for parsing.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_string())
    }

    /// The language code of this dialect.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Build the parser environment for this dialect.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Argument`] if the parser does not support the
    /// language code.
    pub(crate) fn environment(&self) -> Result<GherkinEnv, ModelError> {
        GherkinEnv::new(self.code())
            .map_err(|err| ModelError::Argument(format!("unsupported dialect '{}': {err}", self.0)))
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CODE)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Configuration for the modeler.
///
/// # Environment Variables
///
/// - `GHERKIN_MODEL_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `GHERKIN_MODEL_DIALECT`: default dialect code (for example `en-au`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelConfig {
    /// Log level used by [`crate::logging::init_logging`].
    pub log_level: LogLevel,
    /// Dialect passed to parse calls made with this configuration.
    pub dialect: Dialect,
}

impl ModelConfig {
    /// Load configuration from environment variables.
    ///
    /// Falls back to defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Config`] if a variable contains an invalid value.
    pub fn from_env() -> Result<Self, ModelError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Config`] if a variable contains an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ModelError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };

        let dialect = match lookup(DIALECT_VAR) {
            Some(val) if val.trim().is_empty() => {
                return Err(ModelError::Config(format!(
                    "{DIALECT_VAR} is set but empty, expected a language code"
                )));
            }
            Some(val) => Dialect::new(val),
            None => Dialect::default(),
        };

        Ok(Self { log_level, dialect })
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Create a new configuration with the specified dialect.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[rstest]
    #[case(" TRACE ", Some(LogLevel::Trace))]
    #[case("Debug", Some(LogLevel::Debug))]
    #[case("warning", Some(LogLevel::Warn))]
    #[case("error", Some(LogLevel::Error))]
    #[case("loud", None)]
    fn log_levels_from_variable_values(#[case] input: &str, #[case] expected: Option<LogLevel>) {
        assert_eq!(input.parse::<LogLevel>().ok(), expected);
    }

    #[test]
    fn bad_log_levels_name_the_variable() {
        let config = ModelConfig::from_lookup(lookup_from(&[(LOG_LEVEL_VAR, "loud")]));
        assert!(config.unwrap_err().to_string().contains(LOG_LEVEL_VAR));
    }

    #[test]
    fn config_defaults_when_variables_are_absent() {
        let config = ModelConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ModelConfig::default());
        assert_eq!(config.dialect.code(), "en");
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn config_reads_dialect_and_level() {
        let config = ModelConfig::from_lookup(lookup_from(&[
            (LOG_LEVEL_VAR, "debug"),
            (DIALECT_VAR, " en-au "),
        ]))
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.dialect, Dialect::new("en-au"));
    }

    #[test]
    fn config_rejects_empty_dialect() {
        let result = ModelConfig::from_lookup(lookup_from(&[(DIALECT_VAR, "  ")]));
        assert!(result.unwrap_err().to_string().contains(DIALECT_VAR));
    }

    #[test]
    fn unsupported_dialect_is_an_argument_error() {
        let result = Dialect::new("xx-nowhere").environment();
        assert!(matches!(result, Err(ModelError::Argument(_))));
    }

    #[test]
    fn builders_override_fields() {
        let config = ModelConfig::default()
            .with_log_level(LogLevel::Trace)
            .with_dialect(Dialect::new("fr"));
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.dialect.to_string(), "fr");
    }
}
