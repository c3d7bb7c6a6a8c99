use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};

use crate::error::{AvatarError, Result};

/// Header carrying the speech subscription key
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Timeout applied to both token calls
pub const TOKEN_TIMEOUT: Duration = Duration::from_secs(10);

/// Relay token body as received from the speech service
#[derive(Debug, PartialEq)]
pub enum RelayBody {
    Object(Map<String, Value>),
    Raw(String),
}

impl RelayBody {
    /// Classify a successful relay response body
    ///
    /// Anything other than a JSON object (including valid JSON arrays or
    /// scalars) cannot carry `authToken` and is passed through as text.
    pub fn parse(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Self::Object(map),
            _ => Self::Raw(text),
        }
    }
}

/// Whether `region` is safe to place in a token URL host
///
/// Only lowercase letters, digits and `-` are accepted, so the region can
/// never add a host, port, path or query. Empty passes and fails upstream.
pub fn is_region_label(region: &str) -> bool {
    region
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Substitute the region into a token URL template
pub fn region_url(template: &str, region: &str) -> String {
    template.replace(virtualman_config::REGION_PLACEHOLDER, region)
}

/// Fetch the avatar relay token, failing the request on any upstream error
pub async fn fetch_relay_token(client: &Client, url: &str, api_key: &SecretString) -> Result<RelayBody> {
    tracing::debug!(url, "requesting avatar relay token");

    let response = client
        .get(url)
        .header(SUBSCRIPTION_KEY_HEADER, api_key.expose_secret())
        .timeout(TOKEN_TIMEOUT)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Relay token request failed: {e}");
            AvatarError::Upstream {
                status: None,
                message: e.to_string(),
            }
        })?;

    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

        tracing::error!("Relay token API error ({status}): {error_text}");

        return Err(AvatarError::Upstream {
            status: Some(status.as_u16()),
            message: error_text,
        });
    }

    let text = response.text().await.map_err(|e| {
        tracing::error!("Failed to read relay token response body: {e}");
        AvatarError::Upstream {
            status: Some(status.as_u16()),
            message: format!("failed to read response body: {e}"),
        }
    })?;

    Ok(RelayBody::parse(text))
}

/// Request a short-lived STS authorization token
///
/// Any failure is reported through the error string only; callers treat it
/// as best-effort.
pub async fn issue_sts_token(client: &Client, url: &str, api_key: &SecretString) -> std::result::Result<String, String> {
    tracing::debug!(url, "requesting STS authorization token");

    let response = client
        .post(url)
        .header(SUBSCRIPTION_KEY_HEADER, api_key.expose_secret())
        .body(String::new())
        .timeout(TOKEN_TIMEOUT)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(format!("upstream returned {status}: {error_text}"));
    }

    response
        .text()
        .await
        .map_err(|e| format!("failed to read response body: {e}"))
}
