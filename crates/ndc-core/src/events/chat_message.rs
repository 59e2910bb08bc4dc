//! Chat message kinds
//!
//! A chat message frame (tag 1000) is classified by `"{type}:{mediaType}"` taken from
//! `o.chatMessage`. The table below is the complete set of keys with a dedicated handler.

use std::fmt;

macro_rules! chat_message_kinds {
    ($(
        $(#[$doc:meta])*
        $variant:ident = ($message_type:literal, $media_type:literal) => $handler:literal,
    )+) => {
        /// Chat message kinds with a dedicated handler
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ChatMessageKind {
            $(
                $(#[$doc])*
                $variant,
            )+
        }

        impl ChatMessageKind {
            /// Every kind, in table order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Look up a kind by message type and media type
            #[must_use]
            pub const fn from_key(message_type: i64, media_type: i64) -> Option<Self> {
                match (message_type, media_type) {
                    $(($message_type, $media_type) => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// `(type, mediaType)` of this kind
            #[must_use]
            pub const fn key_parts(self) -> (i64, i64) {
                match self {
                    $(Self::$variant => ($message_type, $media_type),)+
                }
            }

            /// Name of the handler method this kind routes to
            #[must_use]
            pub const fn handler_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $handler,)+
                }
            }
        }
    };
}

chat_message_kinds! {
    /// Plain text message
    Text = (0, 0) => "on_text_message",
    /// Image message
    Image = (0, 100) => "on_image_message",
    /// YouTube link message
    Youtube = (0, 103) => "on_youtube_message",
    /// Strike notice
    Strike = (1, 0) => "on_strike_message",
    /// Voice note
    Voice = (2, 110) => "on_voice_message",
    /// Sticker
    Sticker = (3, 113) => "on_sticker_message",
    VoiceChatNotAnswered = (52, 0) => "on_voice_chat_not_answered",
    VoiceChatNotCancelled = (53, 0) => "on_voice_chat_not_cancelled",
    VoiceChatNotDeclined = (54, 0) => "on_voice_chat_not_declined",
    VideoChatNotAnswered = (55, 0) => "on_video_chat_not_answered",
    VideoChatNotCancelled = (56, 0) => "on_video_chat_not_cancelled",
    VideoChatNotDeclined = (57, 0) => "on_video_chat_not_declined",
    AvatarChatNotAnswered = (58, 0) => "on_avatar_chat_not_answered",
    AvatarChatNotCancelled = (59, 0) => "on_avatar_chat_not_cancelled",
    AvatarChatNotDeclined = (60, 0) => "on_avatar_chat_not_declined",
    /// Message deleted
    Delete = (100, 0) => "on_delete_message",
    GroupMemberJoin = (101, 0) => "on_group_member_join",
    GroupMemberLeave = (102, 0) => "on_group_member_leave",
    ChatInvite = (103, 0) => "on_chat_invite",
    ChatBackgroundChanged = (104, 0) => "on_chat_background_changed",
    ChatTitleChanged = (105, 0) => "on_chat_title_changed",
    ChatIconChanged = (106, 0) => "on_chat_icon_changed",
    VoiceChatStart = (107, 0) => "on_voice_chat_start",
    VideoChatStart = (108, 0) => "on_video_chat_start",
    AvatarChatStart = (109, 0) => "on_avatar_chat_start",
    VoiceChatEnd = (110, 0) => "on_voice_chat_end",
    VideoChatEnd = (111, 0) => "on_video_chat_end",
    AvatarChatEnd = (112, 0) => "on_avatar_chat_end",
    ChatContentChanged = (113, 0) => "on_chat_content_changed",
    ScreenRoomStart = (114, 0) => "on_screen_room_start",
    ScreenRoomEnd = (115, 0) => "on_screen_room_end",
    ChatHostTransferred = (116, 0) => "on_chat_host_transferred",
    TextMessageForceRemoved = (117, 0) => "on_text_message_force_removed",
    ChatRemovedMessage = (118, 0) => "on_chat_removed_message",
    TextMessageRemovedByAdmin = (119, 0) => "on_text_message_removed_by_admin",
    ChatTip = (120, 0) => "on_chat_tip",
    ChatPinAnnouncement = (121, 0) => "on_chat_pin_announcement",
    VoiceChatPermissionOpenToEveryone = (122, 0) => "on_voice_chat_permission_open_to_everyone",
    VoiceChatPermissionInvitedAndRequested = (123, 0) =>
        "on_voice_chat_permission_invited_and_requested",
    VoiceChatPermissionInviteOnly = (124, 0) => "on_voice_chat_permission_invite_only",
    ChatViewOnlyEnabled = (125, 0) => "on_chat_view_only_enabled",
    ChatViewOnlyDisabled = (126, 0) => "on_chat_view_only_disabled",
    ChatUnpinAnnouncement = (127, 0) => "on_chat_unpin_announcement",
    ChatTippingEnabled = (128, 0) => "on_chat_tipping_enabled",
    ChatTippingDisabled = (129, 0) => "on_chat_tipping_disabled",
    /// Timestamp separator
    TimestampMessage = (65281, 0) => "on_timestamp_message",
    /// Chat welcome message
    WelcomeMessage = (65282, 0) => "on_welcome_message",
    InviteMessage = (65283, 0) => "on_invite_message",
}

impl ChatMessageKind {
    /// Routing key in `"{type}:{mediaType}"` form
    #[must_use]
    pub fn key(self) -> String {
        let (message_type, media_type) = self.key_parts();
        format!("{message_type}:{media_type}")
    }

    /// Look up a kind by its `"{type}:{mediaType}"` key
    #[must_use]
    pub fn parse_key(key: &str) -> Option<Self> {
        let (message_type, media_type) = key.split_once(':')?;
        Self::from_key(message_type.parse().ok()?, media_type.parse().ok()?)
    }
}

impl fmt::Display for ChatMessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (message_type, media_type) = self.key_parts();
        write!(f, "{message_type}:{media_type}")
    }
}
