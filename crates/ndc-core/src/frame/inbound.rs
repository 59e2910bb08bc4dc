//! Inbound frame
//!
//! Every inbound frame is a JSON object `{"t": <tag>, "o": {...}}`. The frame keeps the
//! whole decoded value so handlers receive it untouched.

use serde_json::Value;
use std::fmt;

/// A decoded inbound frame
#[derive(Debug, Clone, PartialEq)]
pub struct InboundFrame {
    raw: Value,
}

impl InboundFrame {
    /// Wrap an already decoded JSON value
    #[must_use]
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Decode a frame from JSON text
    pub fn from_json(text: &str) -> Result<Self, FrameError> {
        serde_json::from_str(text).map(Self::new).map_err(FrameError::from)
    }

    /// Decode a frame from raw bytes
    ///
    /// No UTF-8 pre-check is made; the JSON parser rejects what it cannot read.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FrameError> {
        serde_json::from_slice(bytes).map(Self::new).map_err(FrameError::from)
    }

    /// Top-level tag `t`
    ///
    /// Accepts both integers and numeric strings.
    pub fn tag(&self) -> Option<i64> {
        match self.raw.get("t")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Frame body `o`, `Null` when absent
    pub fn body(&self) -> &Value {
        self.raw.get("o").unwrap_or(&Value::Null)
    }

    /// Chat message classification key `(type, mediaType)`
    ///
    /// `mediaType` defaults to 0. Returns `None` when `o.chatMessage.type` is missing.
    pub fn chat_message_key(&self) -> Option<(i64, i64)> {
        let message = self.body().get("chatMessage")?;
        let message_type = message.get("type").and_then(as_int)?;
        let media_type = match message.get("mediaType") {
            None | Some(Value::Null) => 0,
            Some(value) => as_int(value)?,
        };
        Some((message_type, media_type))
    }

    /// `type` of the first entry of `o.actions`
    pub fn first_action_type(&self) -> Option<&str> {
        self.body()
            .get("actions")?
            .as_array()?
            .first()?
            .get("type")?
            .as_str()
    }

    /// The whole decoded frame
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Consume the frame and return the decoded value
    pub fn into_raw(self) -> Value {
        self.raw
    }
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl fmt::Display for InboundFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<Value> for InboundFrame {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

/// Frame decoding errors
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("Invalid frame JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
