#![allow(clippy::must_use_candidate)]

pub mod cors;
pub mod health;
mod loader;
pub mod server;
pub mod settings;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use server::*;
pub use settings::*;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level VirtualMan configuration
///
/// `server` and `telemetry` come from the optional TOML file. `azure` is
/// always read from the process environment.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Upstream endpoints, keys and avatar display settings
    #[serde(skip)]
    pub azure: Settings,
}
