//! # ndc-socket
//!
//! Long-lived, authenticated real-time socket client.
//!
//! A [`SocketHandler`] owns one [`TransportSession`], a heartbeat loop and a reconnect
//! supervisor. Inbound frames are classified by the [`EventDispatcher`] and handed to
//! exactly one method of the consumer's [`EventHandler`].

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod socket;
pub mod supervisor;
pub mod transport;

pub use dispatch::{classify, EventDispatcher, Route};
pub use error::{SocketError, SocketResult};
pub use handlers::EventHandler;
pub use socket::SocketHandler;
pub use supervisor::{SessionControl, HEARTBEAT_FRAME};
pub use transport::{AuthHeaders, CloseOutcome, ConnectOutcome, EndpointSelector, TransportSession};
