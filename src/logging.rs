//! Logger setup for the demo binary.
//!
//! Everything logs through the `log` macros; this module only installs
//! `env_logger` as the backend, once per process.

use std::sync::Once;

/// Default level when neither the config nor `RUST_LOG` names one.
const DEFAULT_FILTER: &str = "info";

/// How the demo's logger is built.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directives such as `"plane_scene=debug,winit=warn"`. When set
    /// it overrides `RUST_LOG`.
    pub env_filter: Option<String>,
    /// Whether output is colored.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Pick the filter directives: config first, then the environment, then
/// [`DEFAULT_FILTER`].
fn resolve_filter(configured: Option<String>, environment: Option<String>) -> String {
    configured
        .or(environment)
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
}

static LOGGER: Once = Once::new();

/// Install `env_logger` as the global logger. Only the first call in a
/// process has any effect.
pub fn init_logging(config: LoggingConfig) {
    LOGGER.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        let installed = env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .try_init();

        match installed {
            Ok(()) => log::debug!("logger installed with filter `{filter}`"),
            // A test harness or embedding program got there first.
            Err(_) => log::warn!("a global logger was already installed"),
        }
    });
}
