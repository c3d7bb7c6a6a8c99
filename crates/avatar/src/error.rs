use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;
use virtualman_core::HttpError;

pub type Result<T> = std::result::Result<T, AvatarError>;

/// Avatar token failures that end the request
///
/// A missing STS token is not an error, see [`crate::BestEffort`].
#[derive(Debug, Error)]
pub enum AvatarError {
    /// Required speech settings are absent, no request was sent
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The relay token call failed or returned a non-success status
    #[error("Failed to get avatar token: {message}")]
    Upstream { status: Option<u16>, message: String },
}

impl HttpError for AvatarError {
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
            } => format!("Failed to get avatar token: upstream returned {status}: {message}"),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AvatarError {
    fn into_response(self) -> Response {
        virtualman_core::error_response(&self)
    }
}
