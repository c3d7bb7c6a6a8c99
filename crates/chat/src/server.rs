use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use virtualman_config::OpenAiSettings;

use crate::{
    error::{ChatError, Result},
    extract::extract_answer,
    types::ChatCompletionRequest,
};

/// Timeout for a single chat completion call
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the Azure `OpenAI` key
const API_KEY_HEADER: &str = "api-key";

/// Chat adapter backed by an Azure `OpenAI` deployment
pub struct Server {
    client: Client,
    settings: OpenAiSettings,
}

/// Settings that must all be present before a chat call is attempted
struct Target<'a> {
    endpoint: &'a str,
    deployment: &'a str,
    api_key: &'a SecretString,
}

impl Server {
    pub fn new(settings: OpenAiSettings) -> Self {
        Self {
            client: virtualman_core::http_client(),
            settings,
        }
    }

    /// Ask the configured deployment a question
    ///
    /// The returned answer is never empty.
    pub async fn ask(&self, question: &str) -> Result<String> {
        let target = self.target()?;
        let url = completions_url(target.endpoint, target.deployment);

        tracing::debug!(
            deployment = target.deployment,
            question_len = question.len(),
            "chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .query(&[("api-version", self.settings.api_version.as_str())])
            .header(API_KEY_HEADER, target.api_key.expose_secret())
            .json(&ChatCompletionRequest::for_question(question))
            .timeout(CHAT_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI request failed: {e}");
                ChatError::Upstream {
                    status: None,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("OpenAI API error ({status}): {error_text}");

            return Err(ChatError::Upstream {
                status: Some(status.as_u16()),
                message: error_text,
            });
        }

        let text = response.text().await.map_err(|e| {
            tracing::error!("Failed to read OpenAI response body: {e}");
            ChatError::Upstream {
                status: Some(status.as_u16()),
                message: format!("failed to read response body: {e}"),
            }
        })?;

        parse_answer(status.as_u16(), &text)
    }

    fn target(&self) -> Result<Target<'_>> {
        if let (Some(endpoint), Some(deployment), Some(api_key)) =
            (&self.settings.endpoint, &self.settings.deployment, &self.settings.api_key)
        {
            return Ok(Target {
                endpoint,
                deployment,
                api_key,
            });
        }

        let missing: Vec<&str> = [
            ("AZURE_OPENAI_ENDPOINT", self.settings.endpoint.is_none()),
            ("AZURE_OPENAI_KEY", self.settings.api_key.is_none()),
            ("AZURE_OPENAI_DEPLOYMENT", self.settings.deployment.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        Err(ChatError::Configuration(missing.join(", ")))
    }
}

/// Answer from a successful response body
///
/// A body that is not JSON fails the request, while JSON without any answer
/// text yields the placeholder.
fn parse_answer(status: u16, text: &str) -> Result<String> {
    let body = serde_json::from_str::<Value>(text).map_err(|e| {
        tracing::error!("OpenAI response was not JSON: {e}");
        ChatError::Upstream {
            status: Some(status),
            message: format!("response body was not JSON: {e}"),
        }
    })?;

    Ok(extract_answer(&body))
}

/// Deployment-scoped chat completions URL, without the query string
fn completions_url(endpoint: &str, deployment: &str) -> String {
    let base = endpoint.trim_end_matches('/');
    format!("{base}/openai/deployments/{deployment}/chat/completions")
}
