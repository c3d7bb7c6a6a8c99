use reqwest::Client;
use virtualman_config::SpeechSettings;

use crate::{
    best_effort::BestEffort,
    error::{AvatarError, Result},
    token::{self, RelayBody, region_url},
    types::AvatarToken,
};

/// Avatar token adapter backed by the Azure Speech relay and STS endpoints
pub struct Server {
    client: Client,
    settings: SpeechSettings,
}

impl Server {
    pub fn new(settings: SpeechSettings) -> Self {
        Self {
            client: virtualman_core::http_client(),
            settings,
        }
    }

    /// Fetch a relay token and, best-effort, an STS authorization token
    ///
    /// Fails before any network call when no speech key is configured. A
    /// relay body that is not a JSON object is returned as `{"raw": ...}`
    /// without attempting the STS call.
    pub async fn avatar_token(&self, region_override: Option<&str>) -> Result<AvatarToken> {
        let api_key = self
            .settings
            .api_key
            .as_ref()
            .ok_or_else(|| AvatarError::Configuration("Missing Azure Speech key".to_string()))?;

        let region = self.resolve_region(region_override);
        if !token::is_region_label(region) {
            tracing::warn!("rejected speech region that is not a single hostname label");
            return Err(AvatarError::Configuration(
                "Speech region must contain only lowercase letters, digits and '-'".to_string(),
            ));
        }
        if region.is_empty() {
            tracing::warn!("no speech region configured or requested, relay token call will fail");
        }

        let relay_url = region_url(&self.settings.relay_token_url, region);
        let relay = match token::fetch_relay_token(&self.client, &relay_url, api_key).await? {
            RelayBody::Object(relay) => relay,
            RelayBody::Raw(raw) => {
                tracing::warn!("relay token response was not a JSON object, returning raw body");
                return Ok(AvatarToken::Raw { raw });
            }
        };

        let sts_url = region_url(&self.settings.sts_token_url, region);
        let auth_token: BestEffort<String> = token::issue_sts_token(&self.client, &sts_url, api_key).await.into();

        tracing::debug!(auth_token = auth_token.is_available(), "avatar token assembled");

        Ok(AvatarToken::merged(relay, auth_token.into_option("STS auth token")))
    }

    /// Requested region, else the configured one, else empty
    fn resolve_region<'a>(&'a self, region_override: Option<&'a str>) -> &'a str {
        region_override
            .map(str::trim)
            .filter(|region| !region.is_empty())
            .or(self.settings.region.as_deref())
            .unwrap_or_default()
    }
}
