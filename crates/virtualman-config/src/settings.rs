//! Environment-derived settings snapshot for the upstream adapters

use secrecy::SecretString;

/// Avatar character reported when `AZURE_SPEECH_AVATAR` is unset
pub const DEFAULT_AVATAR_CHARACTER: &str = "Meg";
/// Avatar style reported when `AZURE_SPEECH_AVATAR_STYLE` is unset
pub const DEFAULT_AVATAR_STYLE: &str = "business";
/// Avatar voice reported when `AZURE_SPEECH_VOICE` is unset
pub const DEFAULT_AVATAR_VOICE: &str = "zh-CN-YunyiMultilingualNeural";

/// Pinned chat completions API version
pub const DEFAULT_OPENAI_API_VERSION: &str = "2025-01-01-preview";
/// Relay token endpoint, `{region}` is substituted per request
pub const DEFAULT_RELAY_TOKEN_URL: &str =
    "https://{region}.tts.speech.microsoft.com/cognitiveservices/avatar/relay/token/v1";
/// STS token issuance endpoint, `{region}` is substituted per request
pub const DEFAULT_STS_TOKEN_URL: &str = "https://{region}.api.cognitive.microsoft.com/sts/v1.0/issueToken";

/// Placeholder replaced by the resolved speech region in URL templates
pub const REGION_PLACEHOLDER: &str = "{region}";

/// Immutable snapshot of upstream settings, built once at startup
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub openai: OpenAiSettings,
    pub speech: SpeechSettings,
    pub avatar: AvatarSettings,
}

/// Azure `OpenAI` chat completion settings
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<SecretString>,
    pub deployment: Option<String>,
    pub api_version: String,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            deployment: None,
            api_version: DEFAULT_OPENAI_API_VERSION.to_string(),
        }
    }
}

/// Azure Speech settings used by the avatar token adapter
#[derive(Debug, Clone)]
pub struct SpeechSettings {
    /// Reported only, the token URLs are derived from the region
    pub endpoint: Option<String>,
    pub api_key: Option<SecretString>,
    pub region: Option<String>,
    pub relay_token_url: String,
    pub sts_token_url: String,
}

impl SpeechSettings {
    /// Whether a non-empty subscription key is configured
    pub const fn has_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            region: None,
            relay_token_url: DEFAULT_RELAY_TOKEN_URL.to_string(),
            sts_token_url: DEFAULT_STS_TOKEN_URL.to_string(),
        }
    }
}

/// Avatar display attributes handed to the browser client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarSettings {
    pub character: String,
    pub style: String,
    pub voice: String,
}

impl Default for AvatarSettings {
    fn default() -> Self {
        Self {
            character: DEFAULT_AVATAR_CHARACTER.to_string(),
            style: DEFAULT_AVATAR_STYLE.to_string(),
            voice: DEFAULT_AVATAR_VOICE.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment
    ///
    /// Loads `.env` from the working directory first without overriding
    /// variables that are already set. Never fails: unreadable or empty
    /// variables count as absent.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let secret = |name: &str| var(name).map(SecretString::from);

        let defaults = AvatarSettings::default();

        Self {
            openai: OpenAiSettings {
                endpoint: var("AZURE_OPENAI_ENDPOINT"),
                api_key: secret("AZURE_OPENAI_KEY"),
                deployment: var("AZURE_OPENAI_DEPLOYMENT"),
                api_version: var("AZURE_OPENAI_API_VERSION").unwrap_or_else(|| DEFAULT_OPENAI_API_VERSION.to_string()),
            },
            speech: SpeechSettings {
                endpoint: var("AZURE_SPEECH_ENDPOINT"),
                api_key: secret("AZURE_SPEECH_KEY"),
                region: var("AZURE_SPEECH_REGION"),
                relay_token_url: var("AZURE_SPEECH_RELAY_TOKEN_URL")
                    .unwrap_or_else(|| DEFAULT_RELAY_TOKEN_URL.to_string()),
                sts_token_url: var("AZURE_SPEECH_STS_TOKEN_URL").unwrap_or_else(|| DEFAULT_STS_TOKEN_URL.to_string()),
            },
            avatar: AvatarSettings {
                character: var("AZURE_SPEECH_AVATAR").unwrap_or(defaults.character),
                style: var("AZURE_SPEECH_AVATAR_STYLE").unwrap_or(defaults.style),
                voice: var("AZURE_SPEECH_VOICE").unwrap_or(defaults.voice),
            },
        }
    }
}
