//! Event dispatcher

use super::route::{classify, Route};
use crate::handlers::EventHandler;
use ndc_core::{ActionKind, ChatMessageKind, InboundFrame};
use std::sync::Arc;

/// Routes decoded frames to the consumer's [`EventHandler`]
pub struct EventDispatcher {
    handler: Arc<dyn EventHandler>,
}

impl EventDispatcher {
    pub fn new(handler: Arc<dyn EventHandler>) -> Self {
        Self { handler }
    }

    /// Classify a frame and invoke exactly one handler method
    pub fn dispatch(&self, frame: &InboundFrame) -> Route {
        let route = classify(frame);
        let handler = self.handler.as_ref();

        match route {
            Route::ChatMessage(kind) => dispatch_chat_message(handler, kind, frame),
            Route::ActionStart(ActionKind::Typing) => handler.on_user_typing_start(frame),
            Route::ActionEnd(ActionKind::Typing) => handler.on_user_typing_end(frame),
            Route::Unhandled => {
                tracing::warn!(frame = %frame, "Unhandled event");
                handler.on_unhandled(frame);
            }
        }

        tracing::trace!(route = %route, "Frame dispatched");
        route
    }

    /// Decode a text frame and dispatch it
    ///
    /// Frames that are not valid JSON are logged and dropped without invoking a handler.
    pub fn dispatch_text(&self, text: &str) -> Option<Route> {
        match InboundFrame::from_json(text) {
            Ok(frame) => Some(self.dispatch(&frame)),
            Err(e) => {
                tracing::warn!(error = %e, frame = %text, "Dropping undecodable frame");
                None
            }
        }
    }

    /// Decode a binary frame and dispatch it
    pub fn dispatch_bytes(&self, bytes: &[u8]) -> Option<Route> {
        match InboundFrame::from_slice(bytes) {
            Ok(frame) => Some(self.dispatch(&frame)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    frame = %String::from_utf8_lossy(bytes),
                    "Dropping undecodable frame"
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher").finish_non_exhaustive()
    }
}

fn dispatch_chat_message(handler: &dyn EventHandler, kind: ChatMessageKind, frame: &InboundFrame) {
    match kind {
        ChatMessageKind::Text => handler.on_text_message(frame),
        ChatMessageKind::Image => handler.on_image_message(frame),
        ChatMessageKind::Youtube => handler.on_youtube_message(frame),
        ChatMessageKind::Strike => handler.on_strike_message(frame),
        ChatMessageKind::Voice => handler.on_voice_message(frame),
        ChatMessageKind::Sticker => handler.on_sticker_message(frame),
        ChatMessageKind::VoiceChatNotAnswered => handler.on_voice_chat_not_answered(frame),
        ChatMessageKind::VoiceChatNotCancelled => handler.on_voice_chat_not_cancelled(frame),
        ChatMessageKind::VoiceChatNotDeclined => handler.on_voice_chat_not_declined(frame),
        ChatMessageKind::VideoChatNotAnswered => handler.on_video_chat_not_answered(frame),
        ChatMessageKind::VideoChatNotCancelled => handler.on_video_chat_not_cancelled(frame),
        ChatMessageKind::VideoChatNotDeclined => handler.on_video_chat_not_declined(frame),
        ChatMessageKind::AvatarChatNotAnswered => handler.on_avatar_chat_not_answered(frame),
        ChatMessageKind::AvatarChatNotCancelled => handler.on_avatar_chat_not_cancelled(frame),
        ChatMessageKind::AvatarChatNotDeclined => handler.on_avatar_chat_not_declined(frame),
        ChatMessageKind::Delete => handler.on_delete_message(frame),
        ChatMessageKind::GroupMemberJoin => handler.on_group_member_join(frame),
        ChatMessageKind::GroupMemberLeave => handler.on_group_member_leave(frame),
        ChatMessageKind::ChatInvite => handler.on_chat_invite(frame),
        ChatMessageKind::ChatBackgroundChanged => handler.on_chat_background_changed(frame),
        ChatMessageKind::ChatTitleChanged => handler.on_chat_title_changed(frame),
        ChatMessageKind::ChatIconChanged => handler.on_chat_icon_changed(frame),
        ChatMessageKind::VoiceChatStart => handler.on_voice_chat_start(frame),
        ChatMessageKind::VideoChatStart => handler.on_video_chat_start(frame),
        ChatMessageKind::AvatarChatStart => handler.on_avatar_chat_start(frame),
        ChatMessageKind::VoiceChatEnd => handler.on_voice_chat_end(frame),
        ChatMessageKind::VideoChatEnd => handler.on_video_chat_end(frame),
        ChatMessageKind::AvatarChatEnd => handler.on_avatar_chat_end(frame),
        ChatMessageKind::ChatContentChanged => handler.on_chat_content_changed(frame),
        ChatMessageKind::ScreenRoomStart => handler.on_screen_room_start(frame),
        ChatMessageKind::ScreenRoomEnd => handler.on_screen_room_end(frame),
        ChatMessageKind::ChatHostTransferred => handler.on_chat_host_transferred(frame),
        ChatMessageKind::TextMessageForceRemoved => {
            handler.on_text_message_force_removed(frame);
        }
        ChatMessageKind::ChatRemovedMessage => handler.on_chat_removed_message(frame),
        ChatMessageKind::TextMessageRemovedByAdmin => {
            handler.on_text_message_removed_by_admin(frame);
        }
        ChatMessageKind::ChatTip => handler.on_chat_tip(frame),
        ChatMessageKind::ChatPinAnnouncement => handler.on_chat_pin_announcement(frame),
        ChatMessageKind::VoiceChatPermissionOpenToEveryone => {
            handler.on_voice_chat_permission_open_to_everyone(frame);
        }
        ChatMessageKind::VoiceChatPermissionInvitedAndRequested => {
            handler.on_voice_chat_permission_invited_and_requested(frame);
        }
        ChatMessageKind::VoiceChatPermissionInviteOnly => {
            handler.on_voice_chat_permission_invite_only(frame);
        }
        ChatMessageKind::ChatViewOnlyEnabled => handler.on_chat_view_only_enabled(frame),
        ChatMessageKind::ChatViewOnlyDisabled => handler.on_chat_view_only_disabled(frame),
        ChatMessageKind::ChatUnpinAnnouncement => handler.on_chat_unpin_announcement(frame),
        ChatMessageKind::ChatTippingEnabled => handler.on_chat_tipping_enabled(frame),
        ChatMessageKind::ChatTippingDisabled => handler.on_chat_tipping_disabled(frame),
        ChatMessageKind::TimestampMessage => handler.on_timestamp_message(frame),
        ChatMessageKind::WelcomeMessage => handler.on_welcome_message(frame),
        ChatMessageKind::InviteMessage => handler.on_invite_message(frame),
    }
}
