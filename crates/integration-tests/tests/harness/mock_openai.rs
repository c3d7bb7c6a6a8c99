//! Mock Azure OpenAI chat completions endpoint
//!
//! Returns a canned body and records what it received

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// What the mock answers with
#[derive(Clone)]
pub enum Reply {
    Json(serde_json::Value),
    Text(String),
    Status(StatusCode, String),
}

/// A request the mock received
#[derive(Debug, Clone)]
pub struct Received {
    pub deployment: String,
    pub api_version: Option<String>,
    pub api_key: Option<String>,
    pub body: serde_json::Value,
}

pub struct MockOpenAi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    reply: Reply,
    request_count: AtomicU32,
    last_request: Mutex<Option<Received>>,
}

#[derive(Deserialize)]
struct VersionQuery {
    #[serde(rename = "api-version")]
    api_version: Option<String>,
}

impl MockOpenAi {
    /// Start a mock replying with a standard `choices` body containing `answer`
    pub async fn start(answer: &str) -> anyhow::Result<Self> {
        Self::start_with(Reply::Json(serde_json::json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "finish_reason": "stop",
                "message": { "role": "assistant", "content": answer }
            }]
        })))
        .await
    }

    pub async fn start_with(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            reply,
            request_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        });

        let app = Router::new()
            .route(
                "/openai/deployments/{deployment}/chat/completions",
                routing::post(handle_completion),
            )
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Endpoint to configure as `AZURE_OPENAI_ENDPOINT`
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of completion requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<Received> {
        self.state.last_request.lock().unwrap().clone()
    }
}

impl Drop for MockOpenAi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_completion(
    State(state): State<Arc<MockState>>,
    Path(deployment): Path<String>,
    Query(query): Query<VersionQuery>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    *state.last_request.lock().unwrap() = Some(Received {
        deployment,
        api_version: query.api_version,
        api_key: headers
            .get("api-key")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        body,
    });

    match &state.reply {
        Reply::Json(value) => Json(value.clone()).into_response(),
        Reply::Text(text) => text.clone().into_response(),
        Reply::Status(status, text) => (*status, text.clone()).into_response(),
    }
}
