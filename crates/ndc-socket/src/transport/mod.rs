//! Transport layer
//!
//! Owns the single WebSocket session: endpoint selection, the authenticated
//! handshake, the outbound sink, and the inbound receive loop.

mod auth;
mod endpoint;
mod receiver;
mod session;

pub use auth::AuthHeaders;
pub use endpoint::EndpointSelector;
pub use session::{CloseOutcome, ConnectOutcome, TransportSession};
