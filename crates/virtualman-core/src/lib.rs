//! Types shared by the VirtualMan adapters and server

mod error;
mod http_client;

pub use error::{ErrorBody, ErrorDetails, HttpError, error_response};
pub use http_client::http_client;
