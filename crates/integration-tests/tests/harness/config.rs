//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use virtualman_config::{Config, OpenAiSettings, ServerConfig, Settings, SpeechSettings};

/// Builder for constructing test configurations
///
/// Starts with no upstream configured, like an empty environment.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                azure: Settings::default(),
                ..Config::default()
            },
        }
    }

    /// Point the chat adapter at a mock Azure OpenAI endpoint
    pub fn with_openai(mut self, endpoint: &str, deployment: &str) -> Self {
        self.config.azure.openai = OpenAiSettings {
            endpoint: Some(endpoint.to_owned()),
            api_key: Some(SecretString::from("test-openai-key")),
            deployment: Some(deployment.to_owned()),
            ..OpenAiSettings::default()
        };
        self
    }

    /// Point the avatar adapter at a mock speech service
    pub fn with_speech(mut self, relay_token_url: &str, sts_token_url: &str) -> Self {
        self.config.azure.speech = SpeechSettings {
            relay_token_url: relay_token_url.to_owned(),
            sts_token_url: sts_token_url.to_owned(),
            ..self.config.azure.speech
        };
        self
    }

    pub fn with_speech_key(mut self, key: &str) -> Self {
        self.config.azure.speech.api_key = Some(SecretString::from(key.to_owned()));
        self
    }

    pub fn with_speech_region(mut self, region: &str) -> Self {
        self.config.azure.speech.region = Some(region.to_owned());
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
