#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
pub mod extract;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use error::{ChatError, Result};
pub use server::{CHAT_TIMEOUT, Server};
pub use types::{AskRequest, AskResponse, SYSTEM_INSTRUCTION};
use request::ExtractPayload;

/// Build the chat server from configuration
pub fn build_server(config: &virtualman_config::Config) -> Arc<Server> {
    Arc::new(Server::new(config.azure.openai.clone()))
}

/// Create the endpoint router for chat
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/ask", post(ask))
}

/// Handle a single question from the avatar client
async fn ask(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<AskRequest>,
) -> Result<Json<AskResponse>> {
    let answer = server.ask(&request.question).await?;

    tracing::debug!(answer_len = answer.len(), "chat answer ready");

    Ok(Json(AskResponse { answer }))
}
