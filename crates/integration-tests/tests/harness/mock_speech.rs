//! Mock Azure Speech relay token and STS endpoints

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Relay token object returned by [`MockSpeech::start`]
pub fn relay_object() -> serde_json::Value {
    serde_json::json!({
        "Urls": ["turn:relay.communication.microsoft.com:3478"],
        "Username": "relay-user",
        "Password": "relay-pass"
    })
}

/// How the relay token endpoint answers
#[derive(Clone)]
pub enum RelayReply {
    Json(serde_json::Value),
    Text(String),
    Status(StatusCode, String),
}

/// How the STS endpoint answers
#[derive(Clone)]
pub enum StsReply {
    Token(String),
    Status(StatusCode),
}

pub struct MockSpeech {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    relay: RelayReply,
    sts: StsReply,
    relay_count: AtomicU32,
    sts_count: AtomicU32,
    regions: Mutex<Vec<String>>,
    subscription_keys: Mutex<Vec<String>>,
}

impl MockSpeech {
    /// Relay returns [`relay_object`], STS issues `sts-token`
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(RelayReply::Json(relay_object()), StsReply::Token("sts-token".to_owned())).await
    }

    pub async fn start_with(relay: RelayReply, sts: StsReply) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            relay,
            sts,
            relay_count: AtomicU32::new(0),
            sts_count: AtomicU32::new(0),
            regions: Mutex::new(Vec::new()),
            subscription_keys: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/relay/{region}/token", routing::get(handle_relay))
            .route("/sts/{region}/issueToken", routing::post(handle_sts))
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

    /// Relay token URL template with a `{region}` placeholder
    pub fn relay_token_url(&self) -> String {
        format!("http://{}/relay/{{region}}/token", self.addr)
    }

    /// STS URL template with a `{region}` placeholder
    pub fn sts_token_url(&self) -> String {
        format!("http://{}/sts/{{region}}/issueToken", self.addr)
    }

    pub fn relay_count(&self) -> u32 {
        self.state.relay_count.load(Ordering::Relaxed)
    }

    pub fn sts_count(&self) -> u32 {
        self.state.sts_count.load(Ordering::Relaxed)
    }

    /// Regions seen by either endpoint, in arrival order
    pub fn regions(&self) -> Vec<String> {
        self.state.regions.lock().unwrap().clone()
    }

    /// Subscription keys seen by either endpoint, in arrival order
    pub fn subscription_keys(&self) -> Vec<String> {
        self.state.subscription_keys.lock().unwrap().clone()
    }
}

impl Drop for MockSpeech {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn record(state: &MockState, region: String, headers: &HeaderMap) {
    state.regions.lock().unwrap().push(region);

    if let Some(key) = headers
        .get("Ocp-Apim-Subscription-Key")
        .and_then(|value| value.to_str().ok())
    {
        state.subscription_keys.lock().unwrap().push(key.to_owned());
    }
}

async fn handle_relay(State(state): State<Arc<MockState>>, Path(region): Path<String>, headers: HeaderMap) -> Response {
    state.relay_count.fetch_add(1, Ordering::Relaxed);
    record(&state, region, &headers);

    match &state.relay {
        RelayReply::Json(value) => Json(value.clone()).into_response(),
        RelayReply::Text(text) => text.clone().into_response(),
        RelayReply::Status(status, text) => (*status, text.clone()).into_response(),
    }
}

async fn handle_sts(State(state): State<Arc<MockState>>, Path(region): Path<String>, headers: HeaderMap) -> Response {
    state.sts_count.fetch_add(1, Ordering::Relaxed);
    record(&state, region, &headers);

    match &state.sts {
        StsReply::Token(token) => token.clone().into_response(),
        StsReply::Status(status) => (*status, "sts unavailable").into_response(),
    }
}
