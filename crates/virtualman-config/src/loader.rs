use std::path::Path;

use crate::{AnyOrList, Config, RESERVED_PATHS, Settings};

impl Config {
    /// Load configuration
    ///
    /// Server and telemetry sections come from the TOML file at `path` when
    /// one is given, defaults otherwise. Upstream settings are always read
    /// from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails, or
    /// validation fails
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;
                Self::from_toml(&raw)?
            }
            None => Self::default(),
        };

        config.azure = Settings::from_env();
        config.validate()?;

        Ok(config)
    }

    /// Parse the file-backed sections from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or has unknown fields
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the health path or CORS policy is unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_health()?;
        self.validate_cors()?;
        Ok(())
    }

    fn validate_health(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("health path must start with '/', got '{}'", health.path);
        }

        if health.enabled && RESERVED_PATHS.contains(&health.path.as_str()) {
            anyhow::bail!("health path '{}' is already served by another route", health.path);
        }

        Ok(())
    }

    fn validate_cors(&self) -> anyhow::Result<()> {
        let cors = &self.server.cors;

        if cors.enabled && cors.credentials && cors.origins == AnyOrList::Any {
            anyhow::bail!("CORS credentials cannot be combined with a wildcard origin");
        }

        Ok(())
    }
}
