//! # ndc-core
//!
//! Domain layer containing the identity-provider port, the inbound frame envelope,
//! and the event taxonomy used to route frames.
//! This crate has zero dependencies on infrastructure (sockets, runtime, etc.).

pub mod events;
pub mod frame;
pub mod identity;

// Re-export commonly used types at crate root
pub use events::{ActionKind, ChatMessageKind, FrameTag};
pub use frame::{FrameError, InboundFrame};
pub use identity::{IdentityError, IdentityProvider, StaticIdentity, StaticIdentityBuilder};
