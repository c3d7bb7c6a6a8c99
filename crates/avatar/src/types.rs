use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field under which the STS authorization token is merged
pub const AUTH_TOKEN_FIELD: &str = "authToken";

/// Query string of `GET /avatar/token`
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    /// Speech region overriding the configured one
    pub region: Option<String>,
}

/// Body returned by `GET /avatar/token`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AvatarToken {
    /// Relay token object as issued upstream, plus `authToken` when available
    Relay(Map<String, Value>),
    /// Relay response that was not a JSON object, passed through as text
    Raw { raw: String },
}

impl AvatarToken {
    /// Combine the relay object with an optional STS token
    ///
    /// The token is only inserted once it has been fully obtained, so the
    /// relay object is either returned untouched or complete with the token.
    pub fn merged(relay: Map<String, Value>, auth_token: Option<String>) -> Self {
        let Some(auth_token) = auth_token else {
            return Self::Relay(relay);
        };

        let mut merged = relay;
        merged.insert(AUTH_TOKEN_FIELD.to_string(), Value::String(auth_token));

        Self::Relay(merged)
    }
}
