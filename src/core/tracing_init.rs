use crate::core::config::LoggingConfig;
use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configured level for this crate, `warn` for the HTTP stack underneath
fn filter_directive(config: &LoggingConfig) -> String {
    format!("warn,pixel_gate={}", config.level)
}

fn wants_console(config: &LoggingConfig) -> bool {
    config.console || config.format == "console"
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean. `RUST_LOG` overrides the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(config)))
        .context(format!("Invalid log level '{}'", config.level))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if wants_console(config) {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    installed.context("Failed to install tracing subscriber")
}
