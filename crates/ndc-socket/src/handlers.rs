//! Consumer event handlers
//!
//! One method per routed event. Every method has a no-op default, so a consumer
//! overrides only what it cares about. Methods run on the receive task and should
//! return quickly; long work belongs on a spawned task.

use ndc_core::InboundFrame;

/// Callbacks invoked for inbound frames
///
/// Exactly one method is called per decoded frame. Frames without a dedicated
/// handler go to [`EventHandler::on_unhandled`].
pub trait EventHandler: Send + Sync {
    /// Plain text message (`0:0`)
    fn on_text_message(&self, _frame: &InboundFrame) {}

    /// Image message (`0:100`)
    fn on_image_message(&self, _frame: &InboundFrame) {}

    /// YouTube link (`0:103`)
    fn on_youtube_message(&self, _frame: &InboundFrame) {}

    /// Strike notice (`1:0`)
    fn on_strike_message(&self, _frame: &InboundFrame) {}

    /// Voice note (`2:110`)
    fn on_voice_message(&self, _frame: &InboundFrame) {}

    /// Sticker (`3:113`)
    fn on_sticker_message(&self, _frame: &InboundFrame) {}

    fn on_voice_chat_not_answered(&self, _frame: &InboundFrame) {}

    fn on_voice_chat_not_cancelled(&self, _frame: &InboundFrame) {}

    fn on_voice_chat_not_declined(&self, _frame: &InboundFrame) {}

    fn on_video_chat_not_answered(&self, _frame: &InboundFrame) {}

    fn on_video_chat_not_cancelled(&self, _frame: &InboundFrame) {}

    fn on_video_chat_not_declined(&self, _frame: &InboundFrame) {}

    fn on_avatar_chat_not_answered(&self, _frame: &InboundFrame) {}

    fn on_avatar_chat_not_cancelled(&self, _frame: &InboundFrame) {}

    fn on_avatar_chat_not_declined(&self, _frame: &InboundFrame) {}

    /// Message deleted (`100:0`)
    fn on_delete_message(&self, _frame: &InboundFrame) {}

    /// Member joined the chat (`101:0`)
    fn on_group_member_join(&self, _frame: &InboundFrame) {}

    /// Member left the chat (`102:0`)
    fn on_group_member_leave(&self, _frame: &InboundFrame) {}

    fn on_chat_invite(&self, _frame: &InboundFrame) {}

    fn on_chat_background_changed(&self, _frame: &InboundFrame) {}

    fn on_chat_title_changed(&self, _frame: &InboundFrame) {}

    fn on_chat_icon_changed(&self, _frame: &InboundFrame) {}

    fn on_voice_chat_start(&self, _frame: &InboundFrame) {}

    fn on_video_chat_start(&self, _frame: &InboundFrame) {}

    fn on_avatar_chat_start(&self, _frame: &InboundFrame) {}

    fn on_voice_chat_end(&self, _frame: &InboundFrame) {}

    fn on_video_chat_end(&self, _frame: &InboundFrame) {}

    fn on_avatar_chat_end(&self, _frame: &InboundFrame) {}

    fn on_chat_content_changed(&self, _frame: &InboundFrame) {}

    fn on_screen_room_start(&self, _frame: &InboundFrame) {}

    fn on_screen_room_end(&self, _frame: &InboundFrame) {}

    /// Host role transferred (`116:0`)
    fn on_chat_host_transferred(&self, _frame: &InboundFrame) {}

    fn on_text_message_force_removed(&self, _frame: &InboundFrame) {}

    fn on_chat_removed_message(&self, _frame: &InboundFrame) {}

    fn on_text_message_removed_by_admin(&self, _frame: &InboundFrame) {}

    fn on_chat_tip(&self, _frame: &InboundFrame) {}

    fn on_chat_pin_announcement(&self, _frame: &InboundFrame) {}

    fn on_voice_chat_permission_open_to_everyone(&self, _frame: &InboundFrame) {}

    fn on_voice_chat_permission_invited_and_requested(&self, _frame: &InboundFrame) {}

    fn on_voice_chat_permission_invite_only(&self, _frame: &InboundFrame) {}

    fn on_chat_view_only_enabled(&self, _frame: &InboundFrame) {}

    fn on_chat_view_only_disabled(&self, _frame: &InboundFrame) {}

    fn on_chat_unpin_announcement(&self, _frame: &InboundFrame) {}

    fn on_chat_tipping_enabled(&self, _frame: &InboundFrame) {}

    fn on_chat_tipping_disabled(&self, _frame: &InboundFrame) {}

    /// Timestamp separator (`65281:0`)
    fn on_timestamp_message(&self, _frame: &InboundFrame) {}

    /// Welcome message (`65282:0`)
    fn on_welcome_message(&self, _frame: &InboundFrame) {}

    fn on_invite_message(&self, _frame: &InboundFrame) {}

    /// A member started typing (action-start, `Typing`)
    fn on_user_typing_start(&self, _frame: &InboundFrame) {}

    /// A member stopped typing (action-end, `Typing`)
    fn on_user_typing_end(&self, _frame: &InboundFrame) {}

    /// Any frame without a dedicated handler
    fn on_unhandled(&self, _frame: &InboundFrame) {}
}
