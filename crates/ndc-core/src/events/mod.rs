//! Event taxonomy
//!
//! Routing tables used to classify inbound frames: the top-level tag, the chat
//! message `type:mediaType` table, and the chat action table.

mod action;
mod chat_message;
mod frame_tag;

pub use action::ActionKind;
pub use chat_message::ChatMessageKind;
pub use frame_tag::FrameTag;
