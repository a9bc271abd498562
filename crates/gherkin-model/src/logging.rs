//! Opt-in stderr output for the crate's `tracing` events.
//!
//! Parsing, adapter and row-edit code only emits events; nothing is printed
//! until a subscriber is installed, here or by the embedding application.

use tracing_subscriber::EnvFilter;

use crate::config::{LogLevel, ModelConfig};

fn filter_for(level: LogLevel) -> EnvFilter {
    EnvFilter::new(format!("gherkin_model={}", level.as_filter_str()))
}

/// Print this crate's events at `config.log_level` and above to stderr.
///
/// Keeps any global subscriber that is already installed.
pub fn init_logging(config: &ModelConfig) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter_for(config.log_level))
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .try_init();
    if installed.is_err() {
        tracing::debug!("a global subscriber is already installed");
    }
}
