use std::fmt::Display;

/// Outcome of a secondary call whose failure must not fail the request
///
/// The failure side is only ever logged, never returned to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestEffort<T> {
    Available(T),
    Unavailable(String),
}

impl<T> BestEffort<T> {
    /// Take the value, logging the failure reason at `warn`
    pub fn into_option(self, what: &str) -> Option<T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable(reason) => {
                tracing::warn!("{what} unavailable, continuing without it: {reason}");
                None
            }
        }
    }

    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl<T, E: Display> From<std::result::Result<T, E>> for BestEffort<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Available(value),
            Err(e) => Self::Unavailable(e.to_string()),
        }
    }
}
