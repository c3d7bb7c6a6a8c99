use serde::{Deserialize, Serialize};

/// Persona instruction sent as the system turn of every chat request
pub const SYSTEM_INSTRUCTION: &str = "你是一个微软认证培训师。你只能使用不超过100个字来回复学员的信息。";

/// Body of `POST /ask`
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Response of `POST /ask`, `answer` is never empty
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Chat completion payload in the Azure `OpenAI` wire format
#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub(crate) enum ChatMessage<'a> {
    System { content: [ContentPart<'a>; 1] },
    User { content: &'a str },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum ContentPart<'a> {
    Text { text: &'a str },
}

impl<'a> ChatCompletionRequest<'a> {
    /// System persona turn followed by the caller's question
    pub fn for_question(question: &'a str) -> Self {
        Self {
            messages: [
                ChatMessage::System {
                    content: [ContentPart::Text {
                        text: SYSTEM_INSTRUCTION,
                    }],
                },
                ChatMessage::User { content: question },
            ],
        }
    }
}
