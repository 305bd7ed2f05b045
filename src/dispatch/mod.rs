//! Action dispatch to the text-processing endpoint.
//!
//! A dispatch sends the stored selection and a [`Command`] as one JSON
//! `POST`, then hands the coerced response text back to the event loop.
//! Every dispatch carries a [`RequestToken`]; only the most recently issued
//! token may apply its result.

mod client;
mod worker;

pub use client::{DEFAULT_ENDPOINT, HttpActionClient};
pub use worker::Dispatcher;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One of the four fixed transformations the backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Paraphrase,
    Expand,
    Summarize,
    Translate,
}

impl Command {
    /// All commands in popup order.
    pub const ALL: [Self; 4] = [
        Self::Paraphrase,
        Self::Expand,
        Self::Summarize,
        Self::Translate,
    ];

    /// Identifier sent on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paraphrase => "paraphrase",
            Self::Expand => "expand",
            Self::Summarize => "summarize",
            Self::Translate => "translate",
        }
    }

    /// Button label in the action popup.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Paraphrase => "Paraphrasing",
            Self::Expand => "Expanding",
            Self::Summarize => "Summarizing",
            Self::Translate => "Translating",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body: `{"text": ..., "command": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub text: String,
    pub command: Command,
}

impl ActionRequest {
    pub fn new(text: impl Into<String>, command: Command) -> Self {
        Self {
            text: text.into(),
            command,
        }
    }
}

/// Why a dispatch failed. Every variant is a `RequestFailed` to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("request failed: server returned status {0}")]
    Status(u16),
    #[error("request failed: transport error: {0}")]
    Transport(String),
    #[error("request failed: malformed response body: {0}")]
    Decode(String),
    #[error("request failed: response body is {0}, expected a string")]
    UnexpectedBody(&'static str),
}

/// Coerce a decoded response body to editor text.
///
/// Strings pass through, numbers and booleans use their JSON text form,
/// anything else is rejected.
pub fn coerce_body(value: Value) -> Result<String, DispatchError> {
    match value {
        Value::String(text) => Ok(text),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(DispatchError::UnexpectedBody("null")),
        Value::Array(_) => Err(DispatchError::UnexpectedBody("an array")),
        Value::Object(_) => Err(DispatchError::UnexpectedBody("an object")),
    }
}

/// Performs one request/response round trip.
pub trait ActionClient: Send + Sync {
    /// Send `request` and return the response text.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] for non-success status, transport
    /// failure, or a body that is not usable as text.
    fn send(&self, request: &ActionRequest) -> Result<String, DispatchError>;
}

/// Identifies one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues tokens and remembers which one is still allowed to land.
#[derive(Debug, Clone)]
pub struct TokenSequence {
    next: u64,
    latest: Option<RequestToken>,
}

impl TokenSequence {
    pub const fn new() -> Self {
        Self {
            next: 1,
            latest: None,
        }
    }

    /// Issue a fresh token; it supersedes any earlier one.
    pub const fn issue(&mut self) -> RequestToken {
        let token = RequestToken(self.next);
        self.next += 1;
        self.latest = Some(token);
        token
    }

    /// The token whose response is still awaited.
    pub const fn in_flight(&self) -> Option<RequestToken> {
        self.latest
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest == Some(token)
    }

    /// Settle `token`. Returns `false` (and changes nothing) for stale tokens.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.latest = None;
            true
        } else {
            false
        }
    }
}

impl Default for TokenSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// A finished dispatch, as delivered back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub token: RequestToken,
    pub command: Command,
    pub result: Result<String, DispatchError>,
}
