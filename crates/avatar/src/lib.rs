#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod best_effort;
mod error;
mod server;
mod token;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

pub use best_effort::BestEffort;
pub use error::{AvatarError, Result};
pub use server::Server;
pub use types::{AUTH_TOKEN_FIELD, AvatarToken, TokenQuery};

/// Build the avatar token server from configuration
pub fn build_server(config: &virtualman_config::Config) -> Arc<Server> {
    Arc::new(Server::new(config.azure.speech.clone()))
}

/// Create the endpoint router for avatar tokens
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/avatar/token", get(avatar_token))
}

/// Handle relay token requests
async fn avatar_token(
    State(server): State<Arc<Server>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<AvatarToken>> {
    tracing::debug!(region = ?query.region, "avatar token handler called");

    let token = server.avatar_token(query.region.as_deref()).await?;

    Ok(Json(token))
}
