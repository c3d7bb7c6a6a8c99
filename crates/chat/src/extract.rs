//! Answer extraction from loosely-structured chat completion bodies

use serde_json::Value;

/// Answer returned when no strategy finds any text
pub const NO_ANSWER_PLACEHOLDER: &str = "(no answer returned from OpenAI)";

/// A single way of locating the answer text in a response body
pub struct Strategy {
    pub name: &'static str,
    find: fn(&Value) -> Option<&Value>,
}

/// Strategies tried in order, the first non-empty string wins
pub const STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "choices[0].message.content",
        find: |body| body.get("choices")?.get(0)?.get("message")?.get("content"),
    },
    Strategy {
        name: "answer",
        find: |body| body.get("answer"),
    },
    Strategy {
        name: "content",
        find: |body| body.get("content"),
    },
];

impl Strategy {
    /// Non-empty answer text found by this strategy
    pub fn apply<'a>(&self, body: &'a Value) -> Option<&'a str> {
        (self.find)(body)
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
    }
}

/// Extract the answer text, falling back to [`NO_ANSWER_PLACEHOLDER`]
pub fn extract_answer(body: &Value) -> String {
    STRATEGIES
        .iter()
        .find_map(|strategy| {
            let answer = strategy.apply(body)?;
            tracing::debug!(strategy = strategy.name, "answer extracted");
            Some(answer.to_string())
        })
        .unwrap_or_else(|| {
            tracing::warn!("chat response contained no answer, using placeholder");
            NO_ANSWER_PLACEHOLDER.to_string()
        })
}
