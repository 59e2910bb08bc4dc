//! Top-level frame tags
//!
//! The `t` field of every frame.

/// Frame tags known to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum FrameTag {
    /// Keep-alive sent by the client
    Heartbeat = 116,
    /// A member started a chat action (typing, ...)
    ActionStart = 304,
    /// A member ended a chat action
    ActionEnd = 306,
    /// Chat message or chat system notice
    ChatMessage = 1000,
}

impl FrameTag {
    /// Create a `FrameTag` from a raw tag value
    #[must_use]
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            116 => Some(Self::Heartbeat),
            304 => Some(Self::ActionStart),
            306 => Some(Self::ActionEnd),
            1000 => Some(Self::ChatMessage),
            _ => None,
        }
    }

    /// Get the raw tag value
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self as i64
    }

    /// Get the name of this tag
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heartbeat => "Heartbeat",
            Self::ActionStart => "ActionStart",
            Self::ActionEnd => "ActionEnd",
            Self::ChatMessage => "ChatMessage",
        }
    }
}

impl std::fmt::Display for FrameTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_i64())
    }
}
