//! Logging setup for VirtualMan
//!
//! Structured logs via the `tracing` ecosystem, written to stdout as text or JSON

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use virtualman_config::{LogFormat, TelemetryConfig};

/// Initialize the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the configured filter. An invalid
/// filter falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), &config.filter);

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

/// Pick the first usable filter among `RUST_LOG`, the configured one and `info`
fn build_filter(env_filter: Option<&str>, configured: &str) -> EnvFilter {
    env_filter
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
