use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;
use virtualman_core::HttpError;

pub type Result<T> = std::result::Result<T, ChatError>;

/// Chat adapter failures that end the request
#[derive(Debug, Error)]
pub enum ChatError {
    /// Endpoint, key or deployment is not configured, no request was sent
    #[error("Missing Azure OpenAI configuration: {0}")]
    Configuration(String),

    /// Network failure, timeout or non-success status from the chat endpoint
    #[error("OpenAI request failed: {message}")]
    Upstream { status: Option<u16>, message: String },
}

impl HttpError for ChatError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::Upstream { .. } => "upstream_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Upstream {
                status: Some(status),
                message,
            } => format!("OpenAI request failed: upstream returned {status}: {message}"),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        virtualman_core::error_response(&self)
    }
}
