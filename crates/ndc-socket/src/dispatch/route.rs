//! Frame classification

use ndc_core::{ActionKind, ChatMessageKind, FrameTag, InboundFrame};
use std::fmt;

/// Where a decoded frame is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Chat message with a known `type:mediaType` key
    ChatMessage(ChatMessageKind),
    /// Action-start with a known action type
    ActionStart(ActionKind),
    /// Action-end with a known action type
    ActionEnd(ActionKind),
    /// Everything else
    Unhandled,
}

impl Route {
    /// Name of the handler method this route invokes
    #[must_use]
    pub const fn handler_name(self) -> &'static str {
        match self {
            Self::ChatMessage(kind) => kind.handler_name(),
            Self::ActionStart(ActionKind::Typing) => "on_user_typing_start",
            Self::ActionEnd(ActionKind::Typing) => "on_user_typing_end",
            Self::Unhandled => "on_unhandled",
        }
    }

    #[must_use]
    pub const fn is_unhandled(self) -> bool {
        matches!(self, Self::Unhandled)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handler_name())
    }
}

/// Classify a decoded frame
///
/// Tag 1000 routes on `o.chatMessage` `type:mediaType`, tags 304/306 route on the
/// first entry of `o.actions`. Unknown tags, unknown keys and missing fields all
/// classify as [`Route::Unhandled`].
pub fn classify(frame: &InboundFrame) -> Route {
    match frame.tag().and_then(FrameTag::from_i64) {
        Some(FrameTag::ChatMessage) => frame
            .chat_message_key()
            .and_then(|(message_type, media_type)| {
                ChatMessageKind::from_key(message_type, media_type)
            })
            .map_or(Route::Unhandled, Route::ChatMessage),
        Some(FrameTag::ActionStart) => frame
            .first_action_type()
            .and_then(ActionKind::from_str)
            .map_or(Route::Unhandled, Route::ActionStart),
        Some(FrameTag::ActionEnd) => frame
            .first_action_type()
            .and_then(ActionKind::from_str)
            .map_or(Route::Unhandled, Route::ActionEnd),
        Some(FrameTag::Heartbeat) | None => Route::Unhandled,
    }
}
