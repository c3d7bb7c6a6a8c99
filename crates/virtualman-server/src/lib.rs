mod client_config;
mod cors;
mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::get,
};
use http::StatusCode;
use tower_http::trace::TraceLayer;
use virtualman_config::Config;
use virtualman_core::ErrorBody;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Upstream settings are only checked per request, so this never fails on
    /// a missing key or endpoint.
    pub fn new(config: Config) -> Self {
        let listen_address = config.server.listen_address();

        let avatar_state = avatar::build_server(&config);
        let chat_state = chat::build_server(&config);
        let settings = Arc::new(config.azure);

        log_upstream_summary(&settings);

        let mut app = Router::new();

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        app = app.merge(
            Router::new()
                .route("/config", get(client_config::config_handler))
                .with_state(settings),
        );

        app = app.merge(avatar::endpoint_router().with_state(avatar_state));

        app = app.merge(chat::endpoint_router().with_state(chat_state));

        app = app.fallback(not_found);

        app = app.layer(TraceLayer::new_for_http());

        if config.server.cors.enabled {
            app = app.layer(cors::cors_layer(&config.server.cors));
        }

        Self {
            router: app,
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

/// Report which upstreams are usable, without any secret values
fn log_upstream_summary(settings: &virtualman_config::Settings) {
    let openai = &settings.openai;
    let chat_ready = openai.endpoint.is_some() && openai.api_key.is_some() && openai.deployment.is_some();

    tracing::info!(
        chat_ready,
        speech_key = settings.speech.has_key(),
        speech_region = settings.speech.region.as_deref().unwrap_or("<unset>"),
        "upstream configuration loaded"
    );

    if !chat_ready {
        tracing::warn!("Azure OpenAI settings incomplete, /ask will fail until they are provided");
    }
    if !settings.speech.has_key() {
        tracing::warn!("AZURE_SPEECH_KEY not set, /avatar/token will fail until it is provided");
    }
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new(StatusCode::NOT_FOUND, "not_found_error", "route not found")),
    )
        .into_response()
}
