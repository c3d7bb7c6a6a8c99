//! `GET /config`: non-secret settings the browser client needs

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use virtualman_config::Settings;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    azure_speech: SpeechInfo,
    avatar: AvatarInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechInfo {
    region: Option<String>,
    /// Presence only, the key itself is never reported
    has_key: bool,
}

#[derive(Debug, Serialize)]
struct AvatarInfo {
    character: String,
    style: String,
    voice: String,
}

impl From<&Settings> for ClientConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            azure_speech: SpeechInfo {
                region: settings.speech.region.clone(),
                has_key: settings.speech.has_key(),
            },
            avatar: AvatarInfo {
                character: settings.avatar.character.clone(),
                style: settings.avatar.style.clone(),
                voice: settings.avatar.voice.clone(),
            },
        }
    }
}

pub async fn config_handler(State(settings): State<Arc<Settings>>) -> Json<ClientConfig> {
    Json(ClientConfig::from(settings.as_ref()))
}
