use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::Serialize;

/// Error that knows how it is presented over HTTP
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `upstream_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// JSON error envelope returned by every route
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub message: String,
    pub r#type: String,
    pub code: u16,
}

impl ErrorBody {
    pub fn new(status: StatusCode, error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetails {
                message: message.into(),
                r#type: error_type.into(),
                code: status.as_u16(),
            },
        }
    }
}

/// Render an [`HttpError`] as a JSON response
pub fn error_response<E: HttpError + ?Sized>(error: &E) -> Response {
    let status = error.status_code();
    let body = ErrorBody::new(status, error.error_type(), error.client_message());

    (status, Json(body)).into_response()
}
